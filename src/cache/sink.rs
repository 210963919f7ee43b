//! Diagnostic Sink Module
//!
//! One-way channel the cache uses to report non-fatal conditions.

use tracing::warn;

// == Warning Sink ==
/// Receives diagnostic warnings such as rejected writes or removal of
/// absent keys. Reports are informational and never drive control flow.
pub trait WarningSink: Send + Sync {
    fn report_warning(&self, message: &str);
}

/// Default sink, forwards every report to `tracing` at WARN level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl WarningSink for TracingSink {
    fn report_warning(&self, message: &str) {
        warn!(target: "mini_cache::cache", "{}", message);
    }
}

impl<F> WarningSink for F
where
    F: Fn(&str) + Send + Sync,
{
    fn report_warning(&self, message: &str) {
        self(message)
    }
}
