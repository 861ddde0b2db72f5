//! Temporal data types and time handling

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Timestamp representing a point in time with millisecond precision
///
/// Millisecond resolution is the persistence resolution of every ledger in
/// this crate; the store never truncates to whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp {
    /// Milliseconds since Unix epoch
    millis: i64,
}

impl Timestamp {
    /// Create a timestamp from milliseconds since Unix epoch
    pub fn from_millis(millis: i64) -> Self {
        Self { millis }
    }

    /// Create a timestamp from seconds since Unix epoch
    pub fn from_secs(secs: i64) -> Self {
        Self {
            millis: secs * 1_000,
        }
    }

    /// Get current wall-clock timestamp
    pub fn now() -> Self {
        Self {
            millis: Utc::now().timestamp_millis(),
        }
    }

    /// Get milliseconds since Unix epoch
    pub fn as_millis(&self) -> i64 {
        self.millis
    }

    /// Get seconds since Unix epoch
    pub fn as_secs(&self) -> i64 {
        self.millis / 1_000
    }

    /// Whether this is a plausible wall-clock instant (strictly after epoch)
    pub fn is_positive(&self) -> bool {
        self.millis > 0
    }

    /// Convert to chrono DateTime
    pub fn to_datetime(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.millis).unwrap_or_else(Utc::now)
    }

    /// Add duration in milliseconds
    pub fn add_millis(&self, millis: i64) -> Self {
        Self {
            millis: self.millis + millis,
        }
    }

    /// Subtract duration in milliseconds
    pub fn sub_millis(&self, millis: i64) -> Self {
        Self {
            millis: self.millis - millis,
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_datetime().to_rfc3339())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self {
            millis: dt.timestamp_millis(),
        }
    }
}
