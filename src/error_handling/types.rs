//! Error type definitions.
//!
//! This module defines all error types used throughout the application.

use std::time::Duration;

use log::SetLoggerError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

use crate::config::UNKNOWN_RESOLVER_ERROR;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),
}

/// Failure of a single WHOIS query.
///
/// The `Display` output of each variant is exactly the text reported in the
/// `error` field of a `QueryResult`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WhoisError {
    /// The resolver did not finish in time and was killed.
    #[error("WHOIS query timed out after {} seconds", format_secs(.timeout))]
    Timeout {
        /// The timeout that was exceeded
        timeout: Duration,
    },

    /// The resolver exited with a non-zero status.
    #[error("WHOIS command failed: {0}")]
    ResolverFailure(String),

    /// Spawning or talking to the resolver failed (e.g. binary missing).
    #[error("Internal error: {0}")]
    Internal(String),

    /// The query was empty after cleanup.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),
}

impl WhoisError {
    /// Builds a resolver failure from its (already decoded) error stream.
    ///
    /// Surrounding whitespace is trimmed; an empty stream is reported as
    /// "Unknown error".
    pub fn resolver_failure(stderr: &str) -> Self {
        let trimmed = stderr.trim();
        if trimmed.is_empty() {
            WhoisError::ResolverFailure(UNKNOWN_RESOLVER_ERROR.to_string())
        } else {
            WhoisError::ResolverFailure(trimmed.to_string())
        }
    }

    /// Category used for statistics.
    pub fn error_type(&self) -> ErrorType {
        match self {
            WhoisError::Timeout { .. } => ErrorType::Timeout,
            WhoisError::ResolverFailure(_) => ErrorType::ResolverFailure,
            WhoisError::Internal(_) => ErrorType::InternalError,
            WhoisError::InvalidQuery(_) => ErrorType::InvalidQuery,
        }
    }
}

impl From<std::io::Error> for WhoisError {
    fn from(err: std::io::Error) -> Self {
        WhoisError::Internal(err.to_string())
    }
}

/// A per-domain task in a bulk lookup that did not produce a result.
///
/// Such domains are counted as errors and left out of the result map.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("lookup task for '{domain}' failed: {reason}")]
pub struct LookupFailure {
    /// Domain the task was started for
    pub domain: String,
    /// Why the task failed (panic message, cancellation, ...)
    pub reason: String,
}

/// Categories of lookup failures, for statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    Timeout,
    ResolverFailure,
    InternalError,
    InvalidQuery,
    TaskFailure,
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::Timeout => "WHOIS timeout",
            ErrorType::ResolverFailure => "Resolver failure",
            ErrorType::InternalError => "Internal error",
            ErrorType::InvalidQuery => "Invalid query",
            ErrorType::TaskFailure => "Bulk task failure",
        }
    }
}

/// Formats a duration as whole seconds when it has no fractional part.
fn format_secs(duration: &Duration) -> String {
    if duration.subsec_nanos() == 0 {
        duration.as_secs().to_string()
    } else {
        format!("{}", duration.as_secs_f64())
    }
}
