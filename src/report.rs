//! Delivery-delay evaluation for simulation runs.
//!
//! Bundling trades immediacy for fewer interruptions; this module measures
//! the price. Each delivered notification contributes the time it spent
//! held back, and a run is summarized by the mean and worst-case delay.

use crate::core::bundling::Release;
use serde::Serialize;
use statrs::statistics::Statistics;
use uuid::Uuid;

/// Accumulates per-notification delivery delays across a run.
#[derive(Debug, Default)]
pub struct DelayTracker {
    delays_min: Vec<f64>,
}

impl DelayTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the hold time of every notification in a release.
    pub fn record(&mut self, release: &Release) {
        for notification in &release.notifications {
            let held = release.released_at - notification.timestamp;
            self.delays_min.push(held.num_seconds() as f64 / 60.0);
        }
    }

    /// Total notifications recorded so far.
    pub fn notification_count(&self) -> usize {
        self.delays_min.len()
    }

    /// Mean delivery delay in minutes, 0 for an empty run.
    pub fn mean_delay_min(&self) -> f64 {
        if self.delays_min.is_empty() {
            0.0
        } else {
            Statistics::mean(&self.delays_min)
        }
    }

    /// Worst-case delivery delay in minutes, 0 for an empty run.
    pub fn max_delay_min(&self) -> f64 {
        if self.delays_min.is_empty() {
            0.0
        } else {
            Statistics::max(&self.delays_min)
        }
    }
}

/// Summary of one simulation run.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationSummary {
    /// Unique identifier for this run
    pub run_id: Uuid,
    /// Events fed through the engine
    pub events_processed: usize,
    /// Bundles emitted (threshold, day-flush, and final drain combined)
    pub releases_emitted: usize,
    /// Notifications delivered across all bundles
    pub notifications_delivered: usize,
    /// Mean delivery delay in minutes
    pub mean_delay_min: f64,
    /// Worst-case delivery delay in minutes
    pub max_delay_min: f64,
}

impl SimulationSummary {
    /// Multi-line display form for the CLI.
    pub fn render(&self) -> String {
        format!(
            "Run {}:\n\
             - Events processed: {}\n\
             - Bundles released: {}\n\
             - Notifications delivered: {}\n\
             - Mean delivery delay: {:.1} min\n\
             - Max delivery delay: {:.1} min",
            self.run_id,
            self.events_processed,
            self.releases_emitted,
            self.notifications_delivered,
            self.mean_delay_min,
            self.max_delay_min
        )
    }
}
