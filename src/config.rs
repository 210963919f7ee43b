//! Configuration Module
//!
//! Handles loading and validating cache configuration from environment variables.

use std::env;

use crate::error::{CacheError, Result};

/// Default byte budget: 64 MiB
pub const DEFAULT_MAX_BYTES: u64 = 64 * 1024 * 1024;

/// Default eviction threshold. Evictions begin once usage passes
/// `max_bytes / 1.25`, i.e. 80% of the budget.
pub const DEFAULT_EVICTION_THRESHOLD: f64 = 1.25;

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Byte budget for keys plus values, 0 = unbounded
    pub max_bytes: u64,
    /// Multiplier applied to used bytes when deciding whether to evict
    pub eviction_threshold: f64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_MAX_BYTES` - Byte budget, 0 disables the limit (default: 67108864)
    /// - `CACHE_EVICTION_THRESHOLD` - Eviction multiplier (default: 1.25)
    pub fn from_env() -> Self {
        Self {
            max_bytes: env::var("CACHE_MAX_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_BYTES),
            eviction_threshold: env::var("CACHE_EVICTION_THRESHOLD")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_EVICTION_THRESHOLD),
        }
    }

    /// Checks that the values can drive a cache.
    ///
    /// The threshold must be finite and strictly positive. `max_bytes` is
    /// unconstrained since 0 means unbounded.
    pub fn validate(&self) -> Result<()> {
        if !self.eviction_threshold.is_finite() || self.eviction_threshold <= 0.0 {
            return Err(CacheError::InvalidConfig(format!(
                "eviction threshold must be a positive number, got {}",
                self.eviction_threshold
            )));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_BYTES,
            eviction_threshold: DEFAULT_EVICTION_THRESHOLD,
        }
    }
}
