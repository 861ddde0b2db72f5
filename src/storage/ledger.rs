//! Revision ledger: append-only storage for revisions

use crate::core::history::KeyHistory;
use crate::core::revision::Revision;
use crate::core::temporal::Timestamp;
use crate::error::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;

/// Trait for revision ledger implementations
///
/// The ledger assigns timestamps at append time and answers the two lookups
/// the store needs: latest revision, and latest revision as of an instant.
/// Implementations must keep per-key writes serialized and must never expose
/// a partially appended revision to readers.
#[async_trait]
pub trait RevisionLedger: Send + Sync {
    /// Append a revision for a key, assigning its creation time
    async fn append(&self, key: &str, value: Value) -> Result<Revision>;

    /// Get the most recently appended revision for a key
    async fn latest(&self, key: &str) -> Result<Option<Revision>>;

    /// Get the latest revision for a key with `created_at <= timestamp`
    ///
    /// Among revisions sharing a timestamp, the most recently written wins.
    async fn latest_as_of(&self, key: &str, timestamp: Timestamp) -> Result<Option<Revision>>;

    /// Discard every key history
    async fn clear(&self) -> Result<()>;
}

/// In-memory implementation of the revision ledger
///
/// Histories live in a concurrent map keyed by key; the map's sharded entry
/// locks give per-key write serializability while leaving readers of
/// unrelated keys unblocked. Timestamps are assigned while the entry lock is
/// held, so a reader never sees a revision without its creation time.
pub struct InMemoryLedger {
    /// Map from key to its revision history
    histories: DashMap<String, KeyHistory>,
}

impl InMemoryLedger {
    /// Create a new empty in-memory ledger
    pub fn new() -> Self {
        Self {
            histories: DashMap::new(),
        }
    }

    /// Number of keys with at least one revision
    pub fn key_count(&self) -> usize {
        self.histories.len()
    }
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RevisionLedger for InMemoryLedger {
    async fn append(&self, key: &str, value: Value) -> Result<Revision> {
        let mut history = self
            .histories
            .entry(key.to_string())
            .or_insert_with(|| KeyHistory::new(key.to_string()));

        Ok(history.append(value, Timestamp::now()))
    }

    async fn latest(&self, key: &str) -> Result<Option<Revision>> {
        Ok(self
            .histories
            .get(key)
            .and_then(|history| history.latest().cloned()))
    }

    async fn latest_as_of(&self, key: &str, timestamp: Timestamp) -> Result<Option<Revision>> {
        Ok(self
            .histories
            .get(key)
            .and_then(|history| history.as_of(timestamp).cloned()))
    }

    async fn clear(&self) -> Result<()> {
        self.histories.clear();
        Ok(())
    }
}
