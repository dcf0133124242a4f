//! Core functionality for the notification bundler.
//!
//! This module contains:
//! - The trained per-user rate model with its population-average fallback
//! - The streaming bundling engine and its release policy

pub mod bundling;
pub mod rate;

// Re-export commonly used types
pub use bundling::{BundlingEngine, PendingNotification, Release, BUNDLES_PER_DAY};
pub use rate::{ModelError, RateModel, TrainError};
