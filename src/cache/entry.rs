//! Cache Entry Module
//!
//! Defines the value-size contract and the record stored for each key.

use std::sync::Arc;

// == Cache Value ==
/// A payload that can report its approximate memory cost in bytes.
///
/// The estimate drives both the byte accounting and the eviction trigger,
/// so it should be a reasonable, non-negative approximation.
pub trait CacheValue {
    /// Approximate size in bytes.
    fn size(&self) -> u64;
}

impl CacheValue for String {
    fn size(&self) -> u64 {
        self.len() as u64
    }
}

impl CacheValue for &'static str {
    fn size(&self) -> u64 {
        self.len() as u64
    }
}

impl CacheValue for Vec<u8> {
    fn size(&self) -> u64 {
        self.len() as u64
    }
}

impl CacheValue for Box<[u8]> {
    fn size(&self) -> u64 {
        self.len() as u64
    }
}

impl<T: CacheValue + ?Sized> CacheValue for Arc<T> {
    fn size(&self) -> u64 {
        (**self).size()
    }
}

// == Entry ==
/// One cached key-value pair.
#[derive(Debug, Clone)]
pub struct Entry<V> {
    /// The key, unique within a cache
    pub key: String,
    /// The stored value
    pub value: V,
    /// Bytes charged for this entry when it was last written
    pub cost: u64,
}

impl<V: CacheValue> Entry<V> {
    // == Constructor ==
    /// Creates an entry and records its cost as `len(key) + value.size()`.
    pub fn new(key: String, value: V) -> Self {
        let cost = entry_cost(&key, &value);
        Self { key, value, cost }
    }

    // == Replace Value ==
    /// Swaps in a new value, re-records the cost and returns the old value.
    pub fn replace_value(&mut self, value: V) -> V {
        self.cost = entry_cost(&self.key, &value);
        std::mem::replace(&mut self.value, value)
    }
}

/// Bytes charged for a key-value pair, saturating at `u64::MAX`.
pub fn entry_cost<V: CacheValue + ?Sized>(key: &str, value: &V) -> u64 {
    (key.len() as u64).saturating_add(value.size())
}
