//! Application initialization and resource setup.
//!
//! This module provides functions to initialize the shared resources:
//! - Logger (stderr, plain or JSON)
//! - Bulk admission semaphore
//! - Lookup statistics handle

mod logger;

use std::sync::Arc;

use tokio::sync::Semaphore;

use crate::error_handling::LookupStats;

// Re-export public API
pub use logger::init_logger_with;

/// Initializes a semaphore for controlling concurrency.
///
/// Creates a new semaphore with the specified permit count. A count of zero
/// would block every task forever, so it is raised to one.
///
/// # Arguments
///
/// * `count` - Maximum number of concurrent operations allowed
///
/// # Returns
///
/// An `Arc<Semaphore>` that can be shared across multiple tasks.
pub fn init_semaphore(count: usize) -> Arc<Semaphore> {
    Arc::new(Semaphore::new(count.max(1)))
}

/// Initializes the lookup statistics handle shared by the engine.
pub fn init_stats() -> Arc<LookupStats> {
    Arc::new(LookupStats::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_semaphore_permits() {
        assert_eq!(init_semaphore(5).available_permits(), 5);
    }

    #[test]
    fn test_init_semaphore_zero_is_raised() {
        assert_eq!(init_semaphore(0).available_permits(), 1);
    }
}
