//! Delivery of released bundles.
//!
//! The engine only decides *when* a bundle is ready; what happens to it is
//! pluggable. The printing sink reproduces the reference delivery behavior,
//! the memory sink backs tests and export, and the null sink exists so a
//! simulation can run for its statistics alone.

use crate::core::bundling::Release;
use crate::ingest::TIMESTAMP_FORMAT;

/// Receives released bundles.
pub trait ReleaseSink {
    fn accept(&mut self, release: &Release);
}

/// Prints released bundles to stdout.
///
/// Stand-in for an actual transport; override by implementing
/// [`ReleaseSink`] with a real delivery mechanism.
#[derive(Debug, Default)]
pub struct PrintSink;

impl ReleaseSink for PrintSink {
    fn accept(&mut self, release: &Release) {
        println!(
            "[{}] bundle for {} ({} notifications)",
            release.released_at.format(TIMESTAMP_FORMAT),
            release.user_id,
            release.notifications.len()
        );
        for notification in &release.notifications {
            println!(
                "  {} {} ({})",
                notification.timestamp.format(TIMESTAMP_FORMAT),
                notification.friend_name,
                notification.friend_id
            );
        }
        println!();
    }
}

/// Collects released bundles in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub releases: Vec<Release>,
}

impl ReleaseSink for MemorySink {
    fn accept(&mut self, release: &Release) {
        self.releases.push(release.clone());
    }
}

/// Discards released bundles.
#[derive(Debug, Default)]
pub struct NullSink;

impl ReleaseSink for NullSink {
    fn accept(&mut self, _release: &Release) {}
}
