//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::constants::{
    AVAILABILITY_PHRASES_V1, BULK_CONCURRENCY_LIMIT, BULK_GRACE_DELAY, BULK_GRACE_DELAY_MS,
    DEFAULT_WHOIS_BINARY, WHOIS_TIMEOUT, WHOIS_TIMEOUT_SECS,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// How resolver output bytes that are not valid UTF-8 are turned into text.
///
/// Registry servers frequently answer in Latin-1 or other legacy encodings,
/// so decoding never fails; this only selects what happens to the bad bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, ValueEnum)]
pub enum DecodePolicy {
    /// Drop invalid byte sequences
    #[default]
    Ignore,
    /// Substitute U+FFFD for each invalid byte sequence
    Replace,
}

impl DecodePolicy {
    /// Decodes `bytes` according to this policy.
    pub fn decode(self, bytes: &[u8]) -> String {
        match self {
            DecodePolicy::Replace => String::from_utf8_lossy(bytes).into_owned(),
            DecodePolicy::Ignore => {
                let mut text = String::with_capacity(bytes.len());
                for chunk in bytes.utf8_chunks() {
                    text.push_str(chunk.valid());
                }
                text
            }
        }
    }
}

/// Library configuration (no CLI dependencies).
///
/// This is the core configuration struct used by the library. It can be
/// constructed programmatically without any CLI dependencies.
///
/// # Examples
///
/// ```no_run
/// use whois_mcp::Config;
/// use std::time::Duration;
///
/// let config = Config {
///     timeout: Duration::from_secs(5),
///     max_concurrency: 3,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,

    /// Resolver binary (name on `PATH` or explicit path)
    pub whois_binary: PathBuf,

    /// Per-query resolver timeout
    pub timeout: Duration,

    /// Maximum concurrent lookups in a bulk request
    pub max_concurrency: usize,

    /// Delay each bulk lookup waits before releasing its slot
    pub grace_delay: Duration,

    /// Handling of invalid UTF-8 in resolver output
    pub decode_policy: DecodePolicy,

    /// Phrases marking a domain as available (matched against lower-cased output)
    pub availability_phrases: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            whois_binary: PathBuf::from(DEFAULT_WHOIS_BINARY),
            timeout: WHOIS_TIMEOUT,
            max_concurrency: BULK_CONCURRENCY_LIMIT,
            grace_delay: BULK_GRACE_DELAY,
            decode_policy: DecodePolicy::Ignore,
            availability_phrases: AVAILABILITY_PHRASES_V1
                .iter()
                .map(|p| p.to_string())
                .collect(),
        }
    }
}

/// Command-line options.
///
/// # Examples
///
/// ```bash
/// # Run as an MCP server on stdio (default)
/// whois_mcp
///
/// # One-shot lookups
/// whois_mcp domain example.com
/// whois_mcp domains example.com example.org --max-concurrency 2
/// whois_mcp asn 15169
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "whois_mcp",
    version,
    about = "Domain, IP and ASN WHOIS lookups for MCP clients."
)]
pub struct Opt {
    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info, global = true)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain, global = true)]
    pub log_format: LogFormat,

    /// Resolver binary to invoke
    #[arg(long, value_parser, default_value = DEFAULT_WHOIS_BINARY, global = true)]
    pub whois_binary: PathBuf,

    /// Per-query timeout in seconds
    #[arg(long, default_value_t = WHOIS_TIMEOUT_SECS, global = true)]
    pub timeout_seconds: u64,

    /// Maximum concurrent lookups for bulk requests
    #[arg(long, default_value_t = BULK_CONCURRENCY_LIMIT, global = true)]
    pub max_concurrency: usize,

    /// Delay in milliseconds each bulk lookup holds its slot after finishing
    #[arg(long, default_value_t = BULK_GRACE_DELAY_MS, global = true)]
    pub grace_delay_ms: u64,

    /// Invalid UTF-8 handling for resolver output: ignore|replace
    #[arg(long, value_enum, default_value_t = DecodePolicy::Ignore, global = true)]
    pub decode_policy: DecodePolicy,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// What the binary should do. Defaults to `serve`.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Serve MCP tools over stdin/stdout
    Serve,
    /// Look up a single domain
    Domain { domain: String },
    /// Look up several domains concurrently
    Domains {
        #[arg(required = true)]
        domains: Vec<String>,
    },
    /// Look up a top-level domain registry
    Tld { tld: String },
    /// Look up an IPv4 or IPv6 address
    Ip { ip_address: String },
    /// Look up an autonomous system number (e.g. 15169 or AS15169)
    Asn { asn: String },
    /// Print the tool guide
    Info,
}

impl From<&Opt> for Config {
    fn from(opt: &Opt) -> Self {
        Self {
            log_level: opt.log_level.clone(),
            log_format: opt.log_format.clone(),
            whois_binary: opt.whois_binary.clone(),
            timeout: Duration::from_secs(opt.timeout_seconds),
            max_concurrency: opt.max_concurrency,
            grace_delay: Duration::from_millis(opt.grace_delay_ms),
            decode_policy: opt.decode_policy,
            ..Default::default()
        }
    }
}
