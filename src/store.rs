//! Versioned store: write-append, point-in-time read, full reset

use crate::core::revision::Revision;
use crate::error::{Error, Result};
use crate::storage::{InMemoryLedger, RevisionLedger};
use crate::validate;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

/// The versioned key-value store
///
/// Owns a revision ledger and gates every operation through the validator.
/// Each accepted write appends one immutable revision; reads are pure
/// projections over the ledger and never mutate history.
#[derive(Clone)]
pub struct VersionedStore {
    ledger: Arc<dyn RevisionLedger>,
}

impl VersionedStore {
    /// Create a store backed by the in-memory ledger
    pub fn in_memory() -> Self {
        Self::with_ledger(Arc::new(InMemoryLedger::new()))
    }

    /// Create a store over an existing ledger
    pub fn with_ledger(ledger: Arc<dyn RevisionLedger>) -> Self {
        Self { ledger }
    }

    /// Create a store backed by a durable sled ledger at `path`
    #[cfg(feature = "sled")]
    pub fn durable(path: impl AsRef<std::path::Path>) -> Result<Self> {
        Ok(Self::with_ledger(Arc::new(
            crate::storage::SledLedger::open(path)?,
        )))
    }

    /// Write a value under a key, appending one revision
    ///
    /// The returned revision echoes the stored value exactly and carries the
    /// store-assigned creation time.
    pub async fn write(&self, key: &str, value: Value) -> Result<Revision> {
        validate::validate_write(key, &value)?;

        let revision = self.ledger.append(key, value).await?;
        debug!(key, timestamp = revision.created_at.as_millis(), "appended revision");
        Ok(revision)
    }

    /// Read the value of a key, optionally as of a point in time
    ///
    /// With no timestamp, resolves to the most recently appended revision.
    /// With a timestamp (epoch milliseconds as a raw string), resolves to the
    /// latest revision not after that instant; among revisions sharing an
    /// instant the most recently written wins.
    pub async fn read(&self, key: &str, timestamp: Option<&str>) -> Result<Value> {
        let parsed = validate::validate_read(key, timestamp)?;

        let revision = match parsed {
            None => self.ledger.latest(key).await?,
            Some(ts) => self.ledger.latest_as_of(key, ts).await?,
        };

        revision.map(|r| r.value).ok_or(Error::NotFound)
    }

    /// Discard every key history
    ///
    /// Idempotent. Once this returns, every read resolves to `NotFound`
    /// until a new write occurs.
    pub async fn reset(&self) -> Result<()> {
        self.ledger.clear().await?;
        info!("store reset, all histories discarded");
        Ok(())
    }
}
