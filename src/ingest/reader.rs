//! Reading recorded event files.
//!
//! One event per line, `timestamp,user_id,friend_id,friend_name`, in
//! non-decreasing timestamp order. Ordering is a precondition of the
//! bundling engine and is not validated here; feeding an out-of-order file
//! through the engine yields unspecified release timing.

use crate::ingest::types::{ActivityEvent, ParseError};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Read every event from a delimited file, in file order.
///
/// Blank lines are skipped. Any malformed line aborts the read with a
/// [`ParseError`] naming the offending line.
pub fn read_events(path: &Path) -> Result<Vec<ActivityEvent>, ParseError> {
    let file = File::open(path).map_err(|e| ParseError::IoError(e.to_string()))?;
    let reader = BufReader::new(file);

    let mut events = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| ParseError::IoError(e.to_string()))?;
        if line.trim().is_empty() {
            continue;
        }
        events.push(ActivityEvent::parse_line(&line, idx + 1)?);
    }

    Ok(events)
}
