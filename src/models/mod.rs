//! Command and reply models for the console
//!
//! This module defines how console input lines are parsed and how
//! replies are rendered.

pub mod commands;
pub mod responses;

// Re-export commonly used types
pub use commands::Command;
pub use responses::{Reply, StatsResponse};
