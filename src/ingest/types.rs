//! Event types for the notification bundler.
//!
//! Events arrive as delimited text lines. All parsing and validation happens
//! here, at the boundary, so the bundling core only ever sees valid instants.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Timestamp format used by recorded event files.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single friend-activity event: one user received activity from one friend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEvent {
    /// When the activity happened
    pub timestamp: NaiveDateTime,
    /// The user to (eventually) notify
    pub user_id: String,
    /// The friend whose activity triggered the event
    pub friend_id: String,
    /// Display name of the friend (payload only, never consulted by policy)
    pub friend_name: String,
}

impl ActivityEvent {
    /// Parse one `timestamp,user_id,friend_id,friend_name` line.
    ///
    /// `line_no` is 1-based and only used for error reporting.
    pub fn parse_line(line: &str, line_no: usize) -> Result<Self, ParseError> {
        let mut fields = line.splitn(4, ',');
        let (Some(ts), Some(user_id), Some(friend_id), Some(friend_name)) =
            (fields.next(), fields.next(), fields.next(), fields.next())
        else {
            return Err(ParseError::MalformedLine {
                line_no,
                line: line.to_string(),
            });
        };

        let timestamp = NaiveDateTime::parse_from_str(ts.trim(), TIMESTAMP_FORMAT).map_err(|_| {
            ParseError::BadTimestamp {
                line_no,
                value: ts.to_string(),
            }
        })?;

        Ok(Self {
            timestamp,
            user_id: user_id.trim().to_string(),
            friend_id: friend_id.trim().to_string(),
            friend_name: friend_name.trim().to_string(),
        })
    }
}

/// Errors raised while reading recorded event files.
#[derive(Debug)]
pub enum ParseError {
    IoError(String),
    MalformedLine { line_no: usize, line: String },
    BadTimestamp { line_no: usize, value: String },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::IoError(e) => write!(f, "IO error: {e}"),
            ParseError::MalformedLine { line_no, line } => {
                write!(f, "Malformed event on line {line_no}: {line:?}")
            }
            ParseError::BadTimestamp { line_no, value } => {
                write!(f, "Bad timestamp on line {line_no}: {value:?}")
            }
        }
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line() {
        let event =
            ActivityEvent::parse_line("2021-03-01 09:15:00,u1,f9,Alice", 1).expect("valid line");
        assert_eq!(event.user_id, "u1");
        assert_eq!(event.friend_id, "f9");
        assert_eq!(event.friend_name, "Alice");
        assert_eq!(
            event.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            "2021-03-01 09:15:00"
        );
    }

    #[test]
    fn test_friend_name_may_contain_commas() {
        // Only the first three commas delimit fields; the rest is payload.
        let event = ActivityEvent::parse_line("2021-03-01 09:15:00,u1,f9,Smith, Jr.", 1)
            .expect("valid line");
        assert_eq!(event.friend_name, "Smith, Jr.");
    }

    #[test]
    fn test_parse_line_missing_fields() {
        let err = ActivityEvent::parse_line("2021-03-01 09:15:00,u1", 7).unwrap_err();
        assert!(matches!(err, ParseError::MalformedLine { line_no: 7, .. }));
    }

    #[test]
    fn test_parse_line_bad_timestamp() {
        let err = ActivityEvent::parse_line("yesterday,u1,f9,Alice", 3).unwrap_err();
        assert!(matches!(err, ParseError::BadTimestamp { line_no: 3, .. }));
    }
}
