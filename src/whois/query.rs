//! Shaping of user input into resolver query strings.
//!
//! Callers (LLM tool calls, CLI users) pass URLs, mixed case, stray
//! whitespace and bare numbers. These helpers turn that into what the
//! resolver expects. None of them validate syntax beyond that.

use std::fmt;

use serde::Deserialize;

/// Reduces a domain or URL to a bare lower-case host name.
///
/// Strips `http://`/`https://`, any path and any port. Idempotent:
/// `clean_domain(&clean_domain(d)) == clean_domain(d)`.
///
/// ```
/// use whois_mcp::whois::clean_domain;
/// assert_eq!(clean_domain(" HTTPS://Example.com:8443/path "), "example.com");
/// ```
pub fn clean_domain(input: &str) -> String {
    let lowered = input.trim().to_lowercase();
    let without_scheme = lowered.replace("http://", "").replace("https://", "");
    let host = without_scheme.split('/').next().unwrap_or_default();
    let host = host.split(':').next().unwrap_or_default();
    host.trim().to_string()
}

/// Normalizes a top-level domain to its leading-dot form (`com` -> `.com`).
pub fn normalize_tld(input: &str) -> String {
    let tld = input.trim().to_lowercase();
    if tld.starts_with('.') {
        tld
    } else {
        format!(".{}", tld)
    }
}

/// IP addresses are passed through verbatim apart from trimming, so both
/// IPv4 and IPv6 textual forms reach the resolver unchanged.
pub fn normalize_ip(input: &str) -> String {
    input.trim().to_string()
}

/// An autonomous system number as supplied by a caller.
///
/// Deserializes from either a JSON number (`15169`) or a string
/// (`"15169"`, `"as15169"`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum AsnInput {
    Numeric(u32),
    Prefixed(String),
}

impl AsnInput {
    /// Canonical `AS<digits>` query string.
    ///
    /// Numeric input (as a number or an all-digit string) gets the `AS`
    /// prefix; anything else is upper-cased and passed through.
    pub fn canonical(&self) -> String {
        match self {
            AsnInput::Numeric(number) => format!("AS{}", number),
            AsnInput::Prefixed(text) => {
                let text = text.trim().to_uppercase();
                if !text.is_empty() && text.chars().all(|c| c.is_ascii_digit()) {
                    format!("AS{}", text)
                } else {
                    text
                }
            }
        }
    }
}

impl From<u32> for AsnInput {
    fn from(number: u32) -> Self {
        AsnInput::Numeric(number)
    }
}

impl From<&str> for AsnInput {
    fn from(text: &str) -> Self {
        AsnInput::Prefixed(text.to_string())
    }
}

impl From<String> for AsnInput {
    fn from(text: String) -> Self {
        AsnInput::Prefixed(text)
    }
}

impl fmt::Display for AsnInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}
