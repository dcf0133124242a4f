//! Notif Bundler - rate-aware bundling of friend-activity notifications.
//!
//! This library decides *when* to deliver a batch of pending per-friend
//! notifications to a user, trading immediacy for fewer interruptions. A
//! time-ordered stream of friend-activity events is grouped into per-user
//! bundles, released either once enough events have accumulated relative to
//! that user's trained daily activity rate, or unconditionally when the
//! observed calendar date advances.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       Notif Bundler                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌─────────────┐   ┌─────────────┐   ┌─────────────┐        │
//! │  │   Ingest    │──▶│  Bundling   │──▶│   Release   │        │
//! │  │ (event file)│   │   Engine    │   │    Sink     │        │
//! │  └─────────────┘   └─────────────┘   └─────────────┘        │
//! │                           │                  │              │
//! │                           ▼                  ▼              │
//! │                    ┌─────────────┐    ┌─────────────┐       │
//! │                    │ Rate Model  │    │    Delay    │       │
//! │                    │ (trained)   │    │   Report    │       │
//! │                    └─────────────┘    └─────────────┘       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use notif_bundler::{read_events, run_simulation, MemorySink, RateModel};
//! use std::path::Path;
//!
//! let events = read_events(Path::new("notifications.csv")).expect("readable file");
//! let model = RateModel::train(&events).expect("at least one event");
//!
//! let mut sink = MemorySink::default();
//! let summary = run_simulation(model, events, &mut sink);
//! println!("{}", summary.render());
//! ```

pub mod config;
pub mod core;
pub mod ingest;
pub mod report;
pub mod simulate;
pub mod sink;

// Re-export key types at crate root for convenience
pub use config::{Config, ConfigError};
pub use core::{
    BundlingEngine, ModelError, PendingNotification, RateModel, Release, TrainError,
    BUNDLES_PER_DAY,
};
pub use ingest::{read_events, ActivityEvent, ParseError, TIMESTAMP_FORMAT};
pub use report::{DelayTracker, SimulationSummary};
pub use simulate::run_simulation;
pub use sink::{MemorySink, NullSink, PrintSink, ReleaseSink};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
