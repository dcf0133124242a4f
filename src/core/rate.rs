//! Trained per-user activity rates.
//!
//! The rate model maps each user to their average number of friend-activity
//! events per active calendar day, learned from a recorded stream. Users the
//! model has never seen resolve to the population average, so every user
//! always gets a usable policy.

use crate::ingest::ActivityEvent;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Immutable mapping from user id to trained daily activity rate.
///
/// Built once before streaming begins and never mutated while an engine is
/// consuming events. Every stored rate is strictly positive: a user appears
/// only if they contributed at least one event on at least one day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateModel {
    rates: HashMap<String, f64>,
    fallback: f64,
}

impl RateModel {
    /// Learn per-user rates from a recorded event stream.
    ///
    /// Each user's rate is their total event count divided by the number of
    /// distinct calendar days they were active on. The fallback is the
    /// arithmetic mean of all per-user rates.
    pub fn train(events: &[ActivityEvent]) -> Result<Self, TrainError> {
        if events.is_empty() {
            return Err(TrainError::NoEvents);
        }

        let mut counts: HashMap<&str, u64> = HashMap::new();
        let mut active_days: HashMap<&str, HashSet<NaiveDate>> = HashMap::new();
        for event in events {
            *counts.entry(event.user_id.as_str()).or_insert(0) += 1;
            active_days
                .entry(event.user_id.as_str())
                .or_default()
                .insert(event.timestamp.date());
        }

        let mut rates = HashMap::with_capacity(counts.len());
        for (user_id, count) in counts {
            // A counted user has at least one active day.
            let days = active_days[user_id].len();
            rates.insert(user_id.to_string(), count as f64 / days as f64);
        }

        let fallback = rates.values().mean();
        Ok(Self { rates, fallback })
    }

    /// The trained rate for a user, or the population average if unseen.
    pub fn rate_for(&self, user_id: &str) -> f64 {
        self.rates.get(user_id).copied().unwrap_or(self.fallback)
    }

    /// The population-average rate used for unseen users.
    pub fn fallback(&self) -> f64 {
        self.fallback
    }

    /// Number of users with a trained rate.
    pub fn user_count(&self) -> usize {
        self.rates.len()
    }

    /// All trained rates, keyed by user id.
    pub fn rates(&self) -> &HashMap<String, f64> {
        &self.rates
    }

    /// Load a previously saved model.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ModelError::IoError(e.to_string()))?;
        serde_json::from_str(&content).map_err(|e| ModelError::ParseError(e.to_string()))
    }

    /// Save the model for later runs.
    pub fn save(&self, path: &Path) -> Result<(), ModelError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ModelError::IoError(e.to_string()))?;
        }
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ModelError::SerializeError(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| ModelError::IoError(e.to_string()))
    }
}

/// Errors raised while training a rate model.
#[derive(Debug)]
pub enum TrainError {
    /// Training input contained no events.
    NoEvents,
}

impl std::fmt::Display for TrainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrainError::NoEvents => write!(f, "Cannot train a rate model from zero events"),
        }
    }
}

impl std::error::Error for TrainError {}

/// Errors raised while persisting or loading a rate model.
#[derive(Debug)]
pub enum ModelError {
    IoError(String),
    ParseError(String),
    SerializeError(String),
}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelError::IoError(e) => write!(f, "IO error: {e}"),
            ModelError::ParseError(e) => write!(f, "Parse error: {e}"),
            ModelError::SerializeError(e) => write!(f, "Serialize error: {e}"),
        }
    }
}

impl std::error::Error for ModelError {}
