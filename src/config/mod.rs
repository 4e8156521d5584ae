//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (timeouts, concurrency caps, phrase tables)
//! - Library configuration (`Config`)
//! - CLI option types and parsing

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Command, Config, DecodePolicy, LogFormat, LogLevel, Opt};
