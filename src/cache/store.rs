//! Cache Store Module
//!
//! Main cache engine combining a key index with the recency list and a byte budget.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::cache::{
    entry_cost, CacheStats, CacheValue, Entry, RecencyList, TracingSink, WarningSink,
};
use crate::config::Config;
use crate::error::{CacheError, Result};

/// Callback invoked with the key and value of every entry that leaves the
/// cache through eviction or explicit removal.
pub type EvictCallback<V> = Box<dyn FnMut(String, V) + Send>;

// == Byte LRU Cache ==
/// LRU cache bounded by the approximate byte footprint of its entries.
///
/// Each entry is charged `len(key) + value.size()` bytes. Writes that would
/// bring usage to or past `max_bytes` are refused. After a successful write,
/// least recently used entries are evicted while
/// `max_bytes < used_bytes * eviction_threshold`, so a threshold of `1.25`
/// starts evicting once usage passes 80% of the budget and a threshold at or
/// below `1.0` never evicts (writes are refused first). A write whose byte
/// count would overflow `u64` is refused too, including when `max_bytes` is 0.
///
/// Not thread-safe; wrap it in [`SharedCache`](crate::SharedCache) to share it.
pub struct ByteLruCache<V> {
    /// Entries in access order
    list: RecencyList<V>,
    /// Key to list handle
    index: HashMap<String, usize>,
    /// Byte ceiling, 0 = unbounded
    max_bytes: u64,
    /// Sum of entry costs currently stored
    used_bytes: u64,
    eviction_threshold: f64,
    on_evict: Option<EvictCallback<V>>,
    sink: Arc<dyn WarningSink>,
    stats: CacheStats,
}

impl<V: CacheValue> ByteLruCache<V> {
    // == Constructor ==
    /// Creates an empty cache.
    ///
    /// # Arguments
    /// * `max_bytes` - Byte budget, 0 disables capacity enforcement
    /// * `eviction_threshold` - Multiplier applied to used bytes for the eviction trigger
    /// * `on_evict` - Optional callback for entries leaving the cache
    pub fn new(
        max_bytes: u64,
        eviction_threshold: f64,
        on_evict: Option<EvictCallback<V>>,
    ) -> Self {
        Self {
            list: RecencyList::new(),
            index: HashMap::new(),
            max_bytes,
            used_bytes: 0,
            eviction_threshold,
            on_evict,
            sink: Arc::new(TracingSink),
            stats: CacheStats::new(),
        }
    }

    /// Creates a cache from validated configuration.
    pub fn from_config(config: &Config, on_evict: Option<EvictCallback<V>>) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config.max_bytes, config.eviction_threshold, on_evict))
    }

    /// Replaces the diagnostic sink (defaults to [`TracingSink`]).
    pub fn with_sink(mut self, sink: Arc<dyn WarningSink>) -> Self {
        self.sink = sink;
        self
    }

    // == Set ==
    /// Inserts or updates `key`, reporting a warning and returning `false`
    /// if the byte budget refuses the write.
    pub fn set(&mut self, key: impl Into<String>, value: V) -> bool {
        match self.try_set(key, value) {
            Ok(()) => true,
            Err(err) => {
                self.sink.report_warning(&err.to_string());
                false
            }
        }
    }

    /// Inserts or updates `key`.
    ///
    /// The prospective usage is computed before anything changes, so a
    /// refused write leaves the cache exactly as it was. On success the entry
    /// becomes most recently used and the eviction loop runs.
    pub fn try_set(&mut self, key: impl Into<String>, value: V) -> Result<()> {
        let key = key.into();
        let existing = self.index.get(&key).copied();

        let old_cost = existing
            .and_then(|idx| self.list.get(idx))
            .map_or(0, |entry| entry.cost);
        // None when the byte counter would overflow, refused even when unbounded
        let prospective = (key.len() as u64)
            .checked_add(value.size())
            .and_then(|cost| (self.used_bytes - old_cost).checked_add(cost));

        let prospective = match prospective {
            Some(bytes) if self.max_bytes == 0 || bytes < self.max_bytes => bytes,
            other => {
                self.stats.record_rejection();
                return Err(CacheError::CapacityExceeded {
                    key,
                    required: other.unwrap_or(u64::MAX),
                    max_bytes: self.max_bytes,
                });
            }
        };

        match existing {
            Some(idx) => {
                self.list.move_to_front(idx);
                if let Some(entry) = self.list.get_mut(idx) {
                    entry.replace_value(value);
                }
            }
            None => {
                let idx = self.list.push_front(Entry::new(key.clone(), value));
                self.index.insert(key, idx);
            }
        }
        self.used_bytes = prospective;

        self.evict_over_threshold();
        Ok(())
    }

    // == Get ==
    /// Returns the value for `key` and marks it most recently used.
    pub fn get(&mut self, key: &str) -> Option<&V> {
        match self.index.get(key).copied() {
            Some(idx) => {
                self.stats.record_hit();
                self.list.move_to_front(idx);
                self.list.get(idx).map(|entry| &entry.value)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Peek ==
    /// Returns the value for `key` without touching recency or stats.
    pub fn peek(&self, key: &str) -> Option<&V> {
        self.index
            .get(key)
            .and_then(|&idx| self.list.get(idx))
            .map(|entry| &entry.value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    // == Remove ==
    /// Removes `key`, invoking `on_evict` for it.
    ///
    /// An absent key is reported as a warning but still counts as success:
    /// this always returns `true`.
    pub fn remove(&mut self, key: &str) -> bool {
        if let Err(err) = self.try_remove(key) {
            self.sink.report_warning(&err.to_string());
        }
        true
    }

    /// Removes `key`, failing with `NotFound` if it is absent.
    pub fn try_remove(&mut self, key: &str) -> Result<()> {
        let entry = self
            .index
            .remove(key)
            .and_then(|idx| self.list.remove(idx))
            .ok_or_else(|| CacheError::NotFound(key.to_string()))?;

        self.stats.record_removal();
        self.release(entry);
        Ok(())
    }

    // == Remove Oldest ==
    /// Evicts the least recently used entry. No-op on an empty cache.
    pub fn remove_oldest(&mut self) {
        self.evict_oldest();
    }

    // == Length ==
    /// Returns the number of entries (not bytes).
    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn used_bytes(&self) -> u64 {
        self.used_bytes
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    pub fn eviction_threshold(&self) -> f64 {
        self.eviction_threshold
    }

    // == Iter ==
    /// Iterates `(key, value)` pairs from most to least recently used.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.list
            .iter()
            .map(|entry| (entry.key.as_str(), &entry.value))
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_usage(self.list.len(), self.used_bytes, self.max_bytes);
        stats
    }

    /// Drops the back entry. Returns false if there was nothing to drop.
    fn evict_oldest(&mut self) -> bool {
        match self.list.pop_back() {
            Some(entry) => {
                self.index.remove(&entry.key);
                self.stats.record_eviction();
                debug!(key = %entry.key, cost = entry.cost, "evicted least recently used entry");
                self.release(entry);
                true
            }
            None => false,
        }
    }

    /// Evicts from the back while usage scaled by the threshold exceeds the budget.
    fn evict_over_threshold(&mut self) {
        while self.max_bytes != 0
            && (self.max_bytes as f64) < self.used_bytes as f64 * self.eviction_threshold
        {
            if !self.evict_oldest() {
                break;
            }
        }
    }

    /// Returns an unlinked entry's bytes to the budget and hands it to `on_evict`.
    fn release(&mut self, entry: Entry<V>) {
        self.used_bytes -= entry.cost;
        if let Some(on_evict) = self.on_evict.as_mut() {
            on_evict(entry.key, entry.value);
        }
    }
}

impl<V> fmt::Debug for ByteLruCache<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteLruCache")
            .field("len", &self.list.len())
            .field("used_bytes", &self.used_bytes)
            .field("max_bytes", &self.max_bytes)
            .field("eviction_threshold", &self.eviction_threshold)
            .field("stats", &self.stats)
            .finish()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Value whose size is given directly.
    #[derive(Debug, Clone, PartialEq)]
    struct Blob(u64);

    impl CacheValue for Blob {
        fn size(&self) -> u64 {
            self.0
        }
    }

    fn recording_sink() -> (Arc<dyn WarningSink>, Arc<Mutex<Vec<String>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let captured = seen.clone();
        let sink: Arc<dyn WarningSink> =
            Arc::new(move |msg: &str| captured.lock().unwrap().push(msg.to_string()));
        (sink, seen)
    }

    fn recording_evictions() -> (EvictCallback<Blob>, Arc<Mutex<Vec<String>>>) {
        let evicted = Arc::new(Mutex::new(Vec::new()));
        let captured = evicted.clone();
        let callback: EvictCallback<Blob> =
            Box::new(move |key, _value| captured.lock().unwrap().push(key));
        (callback, evicted)
    }

    #[test]
    fn test_store_new() {
        let cache: ByteLruCache<Blob> = ByteLruCache::new(100, 0.8, None);
        assert_eq!(cache.len(), 0);
        assert!(cache.is_empty());
        assert_eq!(cache.used_bytes(), 0);
        assert_eq!(cache.max_bytes(), 100);
    }

    #[test]
    fn test_capacity_scenario() {
        let (sink, warnings) = recording_sink();
        let mut cache = ByteLruCache::new(100, 0.8, None).with_sink(sink);

        assert!(cache.set("a", Blob(10)));
        assert_eq!(cache.used_bytes(), 11);

        assert!(cache.set("b", Blob(70)));
        assert_eq!(cache.used_bytes(), 82);
        assert_eq!(cache.len(), 2);

        // 82 + 21 = 103 >= 100
        assert!(!cache.set("c", Blob(20)));
        assert_eq!(warnings.lock().unwrap().len(), 1);

        // Rejected write leaves accounting and contents untouched
        assert_eq!(cache.used_bytes(), 82);
        assert_eq!(cache.len(), 2);
        assert!(!cache.contains_key("c"));
        assert_eq!(cache.stats().rejections, 1);
    }

    #[test]
    fn test_get_promotes_entry() {
        let (on_evict, evicted) = recording_evictions();
        let mut cache = ByteLruCache::new(100, 0.8, Some(on_evict));

        cache.set("a", Blob(10));
        cache.set("b", Blob(70));

        assert_eq!(cache.get("a"), Some(&Blob(10)));
        cache.remove_oldest();

        assert_eq!(*evicted.lock().unwrap(), vec!["b"]);
        assert!(cache.contains_key("a"));
        assert_eq!(cache.used_bytes(), 11);
    }

    #[test]
    fn test_get_missing_has_no_side_effects() {
        let mut cache: ByteLruCache<Blob> = ByteLruCache::new(100, 0.8, None);
        cache.set("a", Blob(1));

        assert!(cache.get("zzz").is_none());
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.used_bytes(), 2);
        assert_eq!(cache.stats().misses, 1);
    }

    #[test]
    fn test_remove_missing_reports_and_succeeds() {
        let (sink, warnings) = recording_sink();
        let mut cache: ByteLruCache<Blob> = ByteLruCache::new(100, 0.8, None).with_sink(sink);

        assert!(cache.remove("missing"));
        assert_eq!(cache.len(), 0);
        assert_eq!(cache.used_bytes(), 0);

        let warnings = warnings.lock().unwrap();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("missing"));
    }

    #[test]
    fn test_try_remove_missing_is_not_found() {
        let mut cache: ByteLruCache<Blob> = ByteLruCache::new(100, 0.8, None);
        assert_eq!(
            cache.try_remove("missing"),
            Err(CacheError::NotFound("missing".to_string()))
        );
    }

    #[test]
    fn test_remove_invokes_callback_and_frees_bytes() {
        let (on_evict, evicted) = recording_evictions();
        let mut cache = ByteLruCache::new(0, 1.0, Some(on_evict));

        cache.set("key1", Blob(5));
        cache.set("key2", Blob(6));
        assert!(cache.remove("key1"));

        assert_eq!(*evicted.lock().unwrap(), vec!["key1"]);
        assert_eq!(cache.used_bytes(), 10);
        assert!(cache.get("key1").is_none());
        assert_eq!(cache.stats().removals, 1);
    }

    #[test]
    fn test_update_adjusts_bytes_and_promotes() {
        let mut cache = ByteLruCache::new(100, 1.0, None);

        cache.set("a", Blob(10));
        cache.set("b", Blob(10));
        assert!(cache.set("a", Blob(30)));

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.used_bytes(), 31 + 11);
        assert_eq!(cache.peek("a"), Some(&Blob(30)));
        let order: Vec<&str> = cache.iter().map(|(k, _)| k).collect();
        assert_eq!(order, vec!["a", "b"]);
    }

    #[test]
    fn test_rejected_update_keeps_old_value() {
        let mut cache = ByteLruCache::new(50, 1.0, None);

        cache.set("a", Blob(10));
        cache.set("b", Blob(10));
        assert!(!cache.set("b", Blob(40)));

        assert_eq!(cache.peek("b"), Some(&Blob(10)));
        assert_eq!(cache.used_bytes(), 22);
        // Rejected write does not promote
        let order: Vec<&str> = cache.iter().map(|(k, _)| k).collect();
        assert_eq!(order, vec!["b", "a"]);
    }

    #[test]
    fn test_threshold_above_one_evicts_oldest_first() {
        let (on_evict, evicted) = recording_evictions();
        // Evicts once used * 2 > 100, i.e. used > 50
        let mut cache = ByteLruCache::new(100, 2.0, Some(on_evict));

        cache.set("a", Blob(19));
        cache.set("b", Blob(19));
        assert!(evicted.lock().unwrap().is_empty());
        assert_eq!(cache.used_bytes(), 40);

        cache.set("c", Blob(19));

        assert_eq!(*evicted.lock().unwrap(), vec!["a"]);
        assert_eq!(cache.used_bytes(), 40);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn test_threshold_at_or_below_one_never_evicts() {
        let mut cache = ByteLruCache::new(100, 0.8, None);

        for i in 0..9 {
            assert!(cache.set(format!("k{}", i), Blob(8)));
        }
        assert_eq!(cache.len(), 9);
        assert_eq!(cache.stats().evictions, 0);
    }

    #[test]
    fn test_eviction_loop_terminates_when_new_entry_alone_exceeds_trigger() {
        let (on_evict, evicted) = recording_evictions();
        let mut cache = ByteLruCache::new(100, 10.0, Some(on_evict));

        cache.set("a", Blob(2));
        // 3 + 40 = 43 bytes, 43 * 10 > 100 even alone
        assert!(cache.set("b", Blob(40)));

        assert_eq!(*evicted.lock().unwrap(), vec!["a", "b"]);
        assert!(cache.is_empty());
        assert_eq!(cache.used_bytes(), 0);
    }

    #[test]
    fn test_unbounded_cache_accepts_everything() {
        let mut cache = ByteLruCache::new(0, 2.0, None);

        for i in 0..100 {
            assert!(cache.set(format!("key{}", i), Blob(1_000_000)));
        }
        assert_eq!(cache.len(), 100);
        assert_eq!(cache.stats().evictions, 0);
    }

    #[test]
    fn test_bounded_rejects_size_that_overflows() {
        let mut cache = ByteLruCache::new(100, 1.25, None);

        assert!(cache.set("a", Blob(10)));
        assert!(!cache.set("b", Blob(u64::MAX)));

        assert_eq!(cache.used_bytes(), 11);
        assert_eq!(cache.len(), 1);
        assert!(!cache.contains_key("b"));
    }

    #[test]
    fn test_unbounded_rejects_write_that_overflows_counter() {
        let mut cache = ByteLruCache::new(0, 1.25, None);

        assert!(cache.set("a", Blob(u64::MAX / 2)));
        // 2 * (u64::MAX / 2 + 1) does not fit in a u64
        assert!(matches!(
            cache.try_set("b", Blob(u64::MAX / 2)),
            Err(CacheError::CapacityExceeded {
                required: u64::MAX,
                max_bytes: 0,
                ..
            })
        ));
        assert!(cache.set("c", Blob(10)));

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.used_bytes(), u64::MAX / 2 + 1 + 11);
        assert_eq!(cache.stats().rejections, 1);
    }

    #[test]
    fn test_remove_oldest_empty_is_noop() {
        let mut cache: ByteLruCache<Blob> = ByteLruCache::new(100, 1.0, None);
        cache.remove_oldest();
        assert!(cache.is_empty());
        assert_eq!(cache.stats().evictions, 0);
    }

    #[test]
    fn test_from_config_rejects_invalid_threshold() {
        let config = Config {
            max_bytes: 10,
            eviction_threshold: 0.0,
        };
        let result: Result<ByteLruCache<String>> = ByteLruCache::from_config(&config, None);
        assert!(matches!(result, Err(CacheError::InvalidConfig(_))));
    }

    #[test]
    fn test_stats_reflect_usage() {
        let mut cache = ByteLruCache::new(100, 1.0, None);

        cache.set("key1", "value1".to_string());
        cache.get("key1");
        cache.get("nonexistent");

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.entries, 1);
        assert_eq!(stats.used_bytes, 10);
        assert_eq!(stats.max_bytes, 100);
    }
}
