//! whois_mcp library: WHOIS lookups for LLM tool-use clients
//!
//! This library wraps the system `whois` resolver. It runs one resolver
//! process per query with a timeout, parses the free-text answer into
//! normalized fields, infers whether a domain is registered, and runs bulk
//! domain lookups under a politeness cap. The `server` module exposes all of
//! it as MCP tools over stdio.
//!
//! # Example
//!
//! ```no_run
//! use whois_mcp::{init_stats, Config, WhoisClient};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let client = WhoisClient::new(&Config::default(), init_stats());
//!
//! let result = client.lookup_domain("https://example.com/").await;
//! match result.error() {
//!     Some(error) => eprintln!("lookup failed: {}", error),
//!     None => println!("registered: {:?}", result.is_registered),
//! }
//!
//! let bulk = client
//!     .lookup_domains(&["example.com".to_string(), "example.org".to_string()])
//!     .await;
//! println!("{} registered", bulk.summary.registered_domains);
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime and a `whois` binary on `PATH`
//! (or configured via `Config::whois_binary`). Lookups never return `Err`:
//! check the `error` field of each result instead.

pub mod config;
pub mod error_handling;
pub mod initialization;
pub mod server;
pub mod whois;

// Re-export public API
pub use config::{Command, Config, DecodePolicy, LogFormat, LogLevel, Opt};
pub use error_handling::{InitializationError, LookupFailure, LookupStats, WhoisError};
pub use initialization::{init_logger_with, init_semaphore, init_stats};
pub use server::McpServer;
pub use whois::{AsnInput, BulkResult, BulkSummary, QueryResult, WhoisClient};
