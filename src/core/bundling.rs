//! Per-user bundling of friend-activity notifications.
//!
//! Incoming events are appended to per-user bundles. A bundle is released
//! either when it has grown to a rate-derived share of the user's expected
//! daily volume, or unconditionally when the observed calendar date
//! advances. All release decisions live in [`BundlingEngine`]; the per-user
//! state is a plain data holder.

use crate::core::rate::RateModel;
use crate::ingest::ActivityEvent;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Target number of sub-bundles per user per active day.
///
/// Threshold-triggered releases stop one short of this: the last share of a
/// day's activity always leaves with the day-boundary flush.
pub const BUNDLES_PER_DAY: usize = 4;

/// One queued notification awaiting release.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingNotification {
    /// When the friend activity happened
    pub timestamp: NaiveDateTime,
    /// The friend whose activity triggered the notification
    pub friend_id: String,
    /// Display name carried through for rendering
    pub friend_name: String,
}

/// A batch of notifications released for one user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Release {
    /// The user this bundle is addressed to
    pub user_id: String,
    /// Timestamp of the event that triggered the release
    pub released_at: NaiveDateTime,
    /// The bundled notifications, in arrival order
    pub notifications: Vec<PendingNotification>,
}

/// Per-user bundle state, created lazily on a user's first event.
///
/// Holds the in-progress bundle and the count of completed threshold
/// releases within the current calendar day (starting at 1, never above
/// [`BUNDLES_PER_DAY`]).
#[derive(Debug)]
struct UserBundle {
    pending: Vec<PendingNotification>,
    bundle_index: usize,
}

impl UserBundle {
    fn new() -> Self {
        Self {
            pending: Vec::new(),
            bundle_index: 1,
        }
    }

    fn append(&mut self, notification: PendingNotification) {
        self.pending.push(notification);
    }

    fn reset(&mut self) {
        self.pending.clear();
        self.bundle_index = 1;
    }
}

/// The streaming bundling engine.
///
/// One instance owns all per-user state and the last-seen timestamp, so
/// independent engines (e.g. sharded by user) can coexist in one process.
/// [`BundlingEngine::ingest`] must be called once per event, in
/// non-decreasing timestamp order; the day-boundary logic depends on the
/// last-seen timestamp reflecting exactly the previously ingested event.
/// Feeding events out of order violates that precondition and yields
/// unspecified release timing.
pub struct BundlingEngine {
    model: RateModel,
    users: HashMap<String, UserBundle>,
    last_timestamp: Option<NaiveDateTime>,
}

impl BundlingEngine {
    /// Create an engine over a trained rate model.
    pub fn new(model: RateModel) -> Self {
        Self {
            model,
            users: HashMap::new(),
            last_timestamp: None,
        }
    }

    /// Feed one event through the release policy.
    ///
    /// Returns zero or more releases: the current user's threshold release
    /// first (if their bundle crossed the rate-derived size and the per-day
    /// release cap has not been reached), then day-boundary releases for
    /// every user with a non-empty bundle if the calendar date advanced
    /// since the previous event. Cross-user ordering within a day flush is
    /// unspecified.
    pub fn ingest(&mut self, event: ActivityEvent) -> Vec<Release> {
        let mut releases = Vec::new();
        let timestamp = event.timestamp;

        let threshold = self.model.rate_for(&event.user_id) / BUNDLES_PER_DAY as f64;
        let bundle = self
            .users
            .entry(event.user_id.clone())
            .or_insert_with(UserBundle::new);
        bundle.append(PendingNotification {
            timestamp,
            friend_id: event.friend_id,
            friend_name: event.friend_name,
        });

        // Real-number comparison: the threshold is a fraction of the trained
        // daily rate, not a rounded count.
        if bundle.pending.len() as f64 >= threshold && bundle.bundle_index < BUNDLES_PER_DAY {
            releases.push(Release {
                user_id: event.user_id,
                released_at: timestamp,
                notifications: std::mem::take(&mut bundle.pending),
            });
            bundle.bundle_index += 1;
        }

        if let Some(last) = self.last_timestamp {
            if timestamp.date() > last.date() {
                self.drain_into(&mut releases, timestamp);
            }
        }

        self.last_timestamp = Some(timestamp);
        releases
    }

    /// Drain every user's backlog at end of stream.
    ///
    /// Releases are stamped with the last ingested timestamp. Call once
    /// after the final event; a second call finds nothing to drain and
    /// returns empty.
    pub fn flush_remaining(&mut self) -> Vec<Release> {
        let mut releases = Vec::new();
        if let Some(last) = self.last_timestamp {
            self.drain_into(&mut releases, last);
        }
        releases
    }

    /// Number of users currently holding a non-empty bundle.
    pub fn pending_users(&self) -> usize {
        self.users.values().filter(|b| !b.pending.is_empty()).count()
    }

    /// The rate model this engine consults.
    pub fn model(&self) -> &RateModel {
        &self.model
    }

    /// Release and reset every non-empty bundle. Users whose bundle is
    /// already empty are left untouched, release count included.
    fn drain_into(&mut self, releases: &mut Vec<Release>, released_at: NaiveDateTime) {
        for (user_id, bundle) in &mut self.users {
            if bundle.pending.is_empty() {
                continue;
            }
            releases.push(Release {
                user_id: user_id.clone(),
                released_at,
                notifications: std::mem::take(&mut bundle.pending),
            });
            bundle.reset();
        }
    }
}
