//! KeyHistory: the ordered revision sequence for a single key

use crate::core::revision::Revision;
use crate::core::temporal::Timestamp;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Complete history of revisions for one key, ordered by creation time
///
/// Revisions are only ever appended, so insertion order and time order
/// coincide (a plain Vec rather than a time-keyed map). Two revisions may
/// share a `created_at`; insertion order disambiguates them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyHistory {
    /// Key this history belongs to
    key: String,
    /// Revisions in append order, `created_at` non-decreasing
    revisions: Vec<Revision>,
}

impl KeyHistory {
    /// Create an empty history for a key
    pub fn new(key: String) -> Self {
        Self {
            key,
            revisions: Vec::new(),
        }
    }

    /// Get the key
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Append a revision assigned at `created_at`, returning it
    ///
    /// The clock is clamped against the last revision so `created_at` stays
    /// non-decreasing even if the wall clock steps backwards.
    pub fn append(&mut self, value: Value, mut created_at: Timestamp) -> Revision {
        if let Some(last) = self.revisions.last() {
            if created_at < last.created_at {
                created_at = last.created_at;
            }
        }
        let revision = Revision::new(self.key.clone(), value, created_at);
        self.revisions.push(revision.clone());
        revision
    }

    /// Get the most recently appended revision
    pub fn latest(&self) -> Option<&Revision> {
        self.revisions.last()
    }

    /// Get the latest revision with `created_at <= timestamp`
    ///
    /// Binary search over the ordered history. `partition_point` returns the
    /// first index past the matching prefix, so among revisions sharing a
    /// timestamp the one latest in insertion order wins.
    pub fn as_of(&self, timestamp: Timestamp) -> Option<&Revision> {
        let idx = self
            .revisions
            .partition_point(|r| r.created_at <= timestamp);
        if idx == 0 {
            None
        } else {
            self.revisions.get(idx - 1)
        }
    }

    /// All revisions in append order
    pub fn revisions(&self) -> &[Revision] {
        &self.revisions
    }

    /// Check if the history is empty
    pub fn is_empty(&self) -> bool {
        self.revisions.is_empty()
    }

    /// Number of revisions
    pub fn len(&self) -> usize {
        self.revisions.len()
    }

    /// Creation time of the earliest revision (if any)
    pub fn first_timestamp(&self) -> Option<Timestamp> {
        self.revisions.first().map(|r| r.created_at)
    }

    /// Creation time of the latest revision (if any)
    pub fn last_timestamp(&self) -> Option<Timestamp> {
        self.revisions.last().map(|r| r.created_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn history_with(entries: &[(&str, i64)]) -> KeyHistory {
        let mut history = KeyHistory::new("abc".to_string());
        for (value, millis) in entries {
            history.append(json!(value), Timestamp::from_millis(*millis));
        }
        history
    }

    #[test]
    fn test_history_append_and_latest() {
        let history = history_with(&[("v1", 1_000), ("v2", 2_000)]);
        assert_eq!(history.len(), 2);
        assert_eq!(history.latest().unwrap().value, json!("v2"));
        assert_eq!(history.first_timestamp(), Some(Timestamp::from_millis(1_000)));
        assert_eq!(history.last_timestamp(), Some(Timestamp::from_millis(2_000)));
    }

    #[test]
    fn test_as_of_resolves_latest_not_after() {
        let history = history_with(&[("v1", 1_000), ("v2", 2_000), ("v3", 3_000)]);

        assert!(history.as_of(Timestamp::from_millis(999)).is_none());
        assert_eq!(
            history.as_of(Timestamp::from_millis(1_000)).unwrap().value,
            json!("v1")
        );
        assert_eq!(
            history.as_of(Timestamp::from_millis(2_500)).unwrap().value,
            json!("v2")
        );
        assert_eq!(
            history.as_of(Timestamp::from_millis(9_999)).unwrap().value,
            json!("v3")
        );
    }

    #[test]
    fn test_as_of_ties_resolve_to_most_recently_written() {
        // two revisions in the same millisecond
        let history = history_with(&[("old", 1_000), ("first", 2_000), ("second", 2_000)]);

        assert_eq!(
            history.as_of(Timestamp::from_millis(2_000)).unwrap().value,
            json!("second")
        );
        assert_eq!(
            history.as_of(Timestamp::from_millis(1_999)).unwrap().value,
            json!("old")
        );
    }

    #[test]
    fn test_append_clamps_backwards_clock() {
        let mut history = KeyHistory::new("abc".to_string());
        history.append(json!("v1"), Timestamp::from_millis(2_000));
        let rev = history.append(json!("v2"), Timestamp::from_millis(1_500));

        assert_eq!(rev.created_at, Timestamp::from_millis(2_000));
        assert_eq!(
            history.as_of(Timestamp::from_millis(2_000)).unwrap().value,
            json!("v2")
        );
    }

    #[test]
    fn test_as_of_does_not_mutate() {
        let history = history_with(&[("v1", 1_000), ("v2", 2_000)]);
        let before = history.len();

        let _ = history.as_of(Timestamp::from_millis(5_000));
        let _ = history.latest();

        assert_eq!(history.len(), before);
        assert_eq!(history.latest().unwrap().value, json!("v2"));
    }
}
