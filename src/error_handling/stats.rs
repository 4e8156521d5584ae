//! Lookup statistics tracking.
//!
//! `LookupStats` is the observability handle of the engine. It is created once
//! at startup and shared (via `Arc`) by everything that runs queries, so
//! counters can be reported at shutdown without any global state.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::{ErrorType, WhoisError};

/// Thread-safe lookup statistics tracker.
///
/// All error types are initialized to zero on creation.
#[derive(Debug)]
pub struct LookupStats {
    queries: AtomicUsize,
    successes: AtomicUsize,
    errors: HashMap<ErrorType, AtomicUsize>,
}

impl Default for LookupStats {
    fn default() -> Self {
        Self::new()
    }
}

impl LookupStats {
    pub fn new() -> Self {
        let mut errors = HashMap::new();
        for error in ErrorType::iter() {
            errors.insert(error, AtomicUsize::new(0));
        }

        LookupStats {
            queries: AtomicUsize::new(0),
            successes: AtomicUsize::new(0),
            errors,
        }
    }

    /// Records that a resolver query was started.
    pub fn record_query(&self) {
        self.queries.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a query that produced resolver output.
    pub fn record_success(&self) {
        self.successes.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a failed query under its category.
    pub fn record_error(&self, error: &WhoisError) {
        self.increment_error(error.error_type());
    }

    /// Increment an error counter.
    pub fn increment_error(&self, error: ErrorType) {
        if let Some(counter) = self.errors.get(&error) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment error counter for {:?} which is not in the map. \
                 This indicates a bug in LookupStats initialization.",
                error
            );
        }
    }

    /// Get the count for an error type.
    pub fn get_error_count(&self, error: ErrorType) -> usize {
        self.errors
            .get(&error)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Get total error count across all error types.
    pub fn total_errors(&self) -> usize {
        ErrorType::iter().map(|e| self.get_error_count(e)).sum()
    }

    pub fn total_queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    pub fn total_successes(&self) -> usize {
        self.successes.load(Ordering::SeqCst)
    }

    /// Logs a one-line summary plus one line per non-zero error category.
    pub fn log_summary(&self) {
        log::info!(
            "WHOIS queries: {} total, {} succeeded, {} failed",
            self.total_queries(),
            self.total_successes(),
            self.total_errors()
        );
        for error_type in ErrorType::iter() {
            let count = self.get_error_count(error_type);
            if count > 0 {
                log::info!("  {}: {}", error_type, count);
            }
        }
    }
}
