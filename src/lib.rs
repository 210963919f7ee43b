//! Mini Cache - An embeddable in-memory LRU cache
//!
//! Entries are evicted least-recently-used first, bounded by the approximate
//! byte footprint of keys and values rather than by entry count.

pub mod cache;
pub mod config;
pub mod console;
pub mod error;
pub mod models;
pub mod shared;

pub use cache::{ByteLruCache, CacheStats, CacheValue, EvictCallback, TracingSink, WarningSink};
pub use config::Config;
pub use error::{CacheError, Result};
pub use shared::SharedCache;
