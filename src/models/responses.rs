//! Console replies
//!
//! Defines what the console writes back for each command.

use std::fmt;

use serde::Serialize;

use crate::cache::CacheStats;

/// Reply to one console command, rendered one line per reply.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Write accepted or command done
    Ok,
    /// Write refused by the byte budget
    Rejected,
    /// Value found by GET
    Value(String),
    /// GET miss
    Nil,
    Integer(usize),
    /// Stats serialized as one JSON line
    Stats(String),
    /// Bad input; the session continues
    Error(String),
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Ok => write!(f, "OK"),
            Reply::Rejected => write!(f, "REJECTED"),
            Reply::Value(value) => write!(f, "{}", value),
            Reply::Nil => write!(f, "(nil)"),
            Reply::Integer(n) => write!(f, "(integer) {}", n),
            Reply::Stats(json) => write!(f, "{}", json),
            Reply::Error(msg) => write!(f, "ERR {}", msg),
        }
    }
}

/// Stats reply body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsResponse {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Number of evictions
    pub evictions: u64,
    pub removals: u64,
    pub rejections: u64,
    /// Current number of entries in cache
    pub entries: usize,
    pub used_bytes: u64,
    pub max_bytes: u64,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            removals: stats.removals,
            rejections: stats.rejections,
            entries: stats.entries,
            used_bytes: stats.used_bytes,
            max_bytes: stats.max_bytes,
        }
    }
}
