//! Revision: one immutable, timestamped write to a key

use crate::core::temporal::Timestamp;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single immutable write to a key
///
/// `created_at` is assigned by the store at write time, never by the caller,
/// and is monotonically non-decreasing in write order for a given key. The
/// wire field name is `timestamp` to match the response shape callers see.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Revision {
    /// Key this revision belongs to
    pub key: String,
    /// The stored payload (string, object, or array)
    pub value: Value,
    /// Store-assigned creation time
    #[serde(rename = "timestamp")]
    pub created_at: Timestamp,
}

impl Revision {
    /// Create a new revision
    pub fn new(key: String, value: Value, created_at: Timestamp) -> Self {
        Self {
            key,
            value,
            created_at,
        }
    }
}
