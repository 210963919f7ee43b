//! Shared Cache Handle
//!
//! Puts a single mutual-exclusion boundary around a [`ByteLruCache`] so it can
//! be used from several tasks. Every call holds the lock for one whole cache
//! operation, including any `on_evict` callbacks it triggers.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use crate::cache::{ByteLruCache, CacheStats, CacheValue, EvictCallback};
use crate::config::Config;
use crate::error::Result;

/// Cloneable, task-safe handle to one cache.
pub struct SharedCache<V> {
    inner: Arc<Mutex<ByteLruCache<V>>>,
}

impl<V> Clone for SharedCache<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V: CacheValue> SharedCache<V> {
    /// Wraps an existing cache.
    pub fn new(cache: ByteLruCache<V>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(cache)),
        }
    }

    /// Creates a shared cache from configuration.
    pub fn from_config(config: &Config, on_evict: Option<EvictCallback<V>>) -> Result<Self> {
        Ok(Self::new(ByteLruCache::from_config(config, on_evict)?))
    }

    /// Locks the cache for a multi-step critical section.
    pub async fn lock(&self) -> MutexGuard<'_, ByteLruCache<V>> {
        self.inner.lock().await
    }

    pub async fn set(&self, key: impl Into<String>, value: V) -> bool {
        self.inner.lock().await.set(key, value)
    }

    pub async fn try_set(&self, key: impl Into<String>, value: V) -> Result<()> {
        self.inner.lock().await.try_set(key, value)
    }

    pub async fn remove(&self, key: &str) -> bool {
        self.inner.lock().await.remove(key)
    }

    pub async fn remove_oldest(&self) {
        self.inner.lock().await.remove_oldest()
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.lock().await.is_empty()
    }

    pub async fn stats(&self) -> CacheStats {
        self.inner.lock().await.stats()
    }
}

impl<V: CacheValue + Clone> SharedCache<V> {
    /// Looks up `key`, marking it most recently used, and returns a clone of the value.
    pub async fn get(&self, key: &str) -> Option<V> {
        self.inner.lock().await.get(key).cloned()
    }
}
