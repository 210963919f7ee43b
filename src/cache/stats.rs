//! Cache Statistics Module
//!
//! Tracks cache metrics including hits, misses, evictions and byte usage.

use serde::Serialize;

// == Cache Stats ==
/// Tracks cache performance metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Number of successful cache retrievals
    pub hits: u64,
    /// Number of failed cache retrievals
    pub misses: u64,
    /// Entries dropped from the back of the recency list
    pub evictions: u64,
    /// Entries dropped by an explicit remove
    pub removals: u64,
    /// Writes refused because they would exceed the byte budget
    pub rejections: u64,
    /// Current number of entries in the cache
    pub entries: usize,
    /// Bytes currently charged against the budget
    pub used_bytes: u64,
    /// Configured byte budget, 0 = unbounded
    pub max_bytes: u64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no requests have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub fn record_removal(&mut self) {
        self.removals += 1;
    }

    pub fn record_rejection(&mut self) {
        self.rejections += 1;
    }

    // == Snapshot Usage ==
    /// Copies the live size figures into the counters.
    pub fn set_usage(&mut self, entries: usize, used_bytes: u64, max_bytes: u64) {
        self.entries = entries;
        self.used_bytes = used_bytes;
        self.max_bytes = max_bytes;
    }
}
