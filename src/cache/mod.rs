//! Cache Module
//!
//! Provides an in-memory LRU cache bounded by approximate byte footprint.

mod entry;
mod lru;
mod sink;
mod stats;
mod store;


// Re-export public types
pub use entry::{entry_cost, CacheValue, Entry};
pub use lru::RecencyList;
pub use sink::{TracingSink, WarningSink};
pub use stats::CacheStats;
pub use store::{ByteLruCache, EvictCallback};
