//! Error handling and lookup statistics.
//!
//! This module provides:
//! - Error type definitions (initialization, resolver, bulk task failures)
//! - Error categorization for statistics
//! - Lookup statistics tracking (queries, successes, errors by type)
//!
//! Resolver errors never cross the tool boundary as `Err`: they are rendered
//! into the `error` field of a `QueryResult`. Only initialization errors and
//! bulk task failures are surfaced as Rust errors.

mod stats;
mod types;

// Re-export public API
pub use stats::LookupStats;
pub use types::{ErrorType, InitializationError, LookupFailure, WhoisError};

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_lookup_stats_initialization() {
        let stats = LookupStats::new();
        for error_type in ErrorType::iter() {
            assert_eq!(stats.get_error_count(error_type), 0);
        }
        assert_eq!(stats.total_queries(), 0);
        assert_eq!(stats.total_successes(), 0);
    }

    #[test]
    fn test_lookup_stats_record_whois_error() {
        let stats = LookupStats::new();
        stats.record_error(&WhoisError::ResolverFailure("refused".into()));
        stats.record_error(&WhoisError::Internal("no such file".into()));
        stats.record_error(&WhoisError::Internal("broken pipe".into()));

        assert_eq!(stats.get_error_count(ErrorType::ResolverFailure), 1);
        assert_eq!(stats.get_error_count(ErrorType::InternalError), 2);
        assert_eq!(stats.total_errors(), 3);
    }
}
