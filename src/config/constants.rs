//! Configuration constants.
//!
//! This module defines the operational parameters of the lookup engine:
//! resolver invocation, timeouts, bulk politeness limits and the
//! registration-status phrase table.

use std::time::Duration;

/// Name of the external resolver binary, looked up on `PATH`.
pub const DEFAULT_WHOIS_BINARY: &str = "whois";

/// Per-query resolver timeout in seconds.
/// Most registries answer in well under 2s; slow referral chains can take longer.
pub const WHOIS_TIMEOUT_SECS: u64 = 10;
pub const WHOIS_TIMEOUT: Duration = Duration::from_secs(WHOIS_TIMEOUT_SECS);

/// Maximum concurrent resolver processes during a bulk lookup
pub const BULK_CONCURRENCY_LIMIT: usize = 5;

/// Delay a bulk lookup holds its slot for after finishing.
/// Keeps the aggregate request rate against registry servers low.
pub const BULK_GRACE_DELAY_MS: u64 = 100;
pub const BULK_GRACE_DELAY: Duration = Duration::from_millis(BULK_GRACE_DELAY_MS);

/// Placeholder used when the resolver exits non-zero with an empty error stream
pub const UNKNOWN_RESOLVER_ERROR: &str = "Unknown error";

/// Version tag of the default availability phrase table.
pub const AVAILABILITY_PHRASES_VERSION: &str = "v1";

/// Phrases that mark a domain as not registered when found anywhere in the
/// lower-cased resolver output.
///
/// Registries phrase "no such domain" differently and this list has no
/// per-TLD awareness. To extend it, add a new versioned table rather than
/// editing this one, so results stay reproducible.
pub const AVAILABILITY_PHRASES_V1: &[&str] = &[
    "no match",
    "not found",
    "no data found",
    "status: available",
    "no matching record",
    "not registered",
];

/// Line prefixes registries use for comments and banners
pub const COMMENT_PREFIXES: &[char] = &['%', '#'];

/// MCP protocol revision advertised in the `initialize` response
pub const MCP_PROTOCOL_VERSION: &str = "2024-11-05";

/// Human-readable server name
pub const SERVER_NAME: &str = "Domain Lookup MCP Server";
