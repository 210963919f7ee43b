//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CacheError {
    /// A write would push the byte budget to or past its ceiling
    #[error("Cache capacity exceeded: writing '{key}' needs {required} bytes, budget is {max_bytes}")]
    CapacityExceeded {
        key: String,
        required: u64,
        max_bytes: u64,
    },

    /// Key not found in cache
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Console input that does not parse as a command
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    /// Configuration values that cannot build a cache
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
