//! Durable revision ledger backed by sled

use crate::core::revision::Revision;
use crate::core::temporal::Timestamp;
use crate::error::{Error, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::path::Path;
use tokio::sync::Mutex;

/// Entry keys are `key bytes ++ 0x00 ++ big-endian u64 millis`. Validated
/// keys never contain 0x00, so prefixes of distinct keys cannot collide and
/// entries for one key sort by creation time.
fn entry_key(key: &str, timestamp: Timestamp) -> Vec<u8> {
    let mut out = Vec::with_capacity(key.len() + 9);
    out.extend_from_slice(key.as_bytes());
    out.push(0);
    out.extend_from_slice(&(timestamp.as_millis() as u64).to_be_bytes());
    out
}

fn key_prefix(key: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(key.len() + 1);
    out.extend_from_slice(key.as_bytes());
    out.push(0);
    out
}

fn decode_entry(key: &str, entry: &[u8], payload: &[u8]) -> Result<Revision> {
    let suffix = entry
        .get(key.len() + 1..)
        .filter(|s| s.len() == 8)
        .ok_or_else(|| Error::Ledger(format!("corrupt ledger entry for key {key}")))?;
    let mut millis = [0u8; 8];
    millis.copy_from_slice(suffix);

    let value: Value = serde_json::from_slice(payload)?;
    Ok(Revision::new(
        key.to_string(),
        value,
        Timestamp::from_millis(u64::from_be_bytes(millis) as i64),
    ))
}

/// Durable implementation of the revision ledger
///
/// Persists at millisecond resolution. The encoded entry key is the primary
/// key, so two revisions cannot share a millisecond: appends are serialized
/// under a mutex and the assigned timestamp is bumped past the key's last
/// revision, making `created_at` strictly increasing per key.
pub struct SledLedger {
    db: sled::Db,
    /// Serializes appends so timestamp assignment and insert are atomic
    write_lock: Mutex<()>,
}

impl SledLedger {
    /// Open (or create) a ledger at the given path
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            db: sled::open(path)?,
            write_lock: Mutex::new(()),
        })
    }

    fn last_timestamp(&self, key: &str) -> Result<Option<Timestamp>> {
        match self.db.scan_prefix(key_prefix(key)).next_back() {
            Some(entry) => {
                let (entry_key, payload) = entry?;
                let revision = decode_entry(key, &entry_key, &payload)?;
                Ok(Some(revision.created_at))
            }
            None => Ok(None),
        }
    }
}

#[async_trait]
impl super::ledger::RevisionLedger for SledLedger {
    async fn append(&self, key: &str, value: Value) -> Result<Revision> {
        let _guard = self.write_lock.lock().await;

        let mut created_at = Timestamp::now();
        if let Some(last) = self.last_timestamp(key)? {
            if created_at <= last {
                created_at = last.add_millis(1);
            }
        }

        self.db
            .insert(entry_key(key, created_at), serde_json::to_vec(&value)?)?;
        self.db.flush_async().await?;

        Ok(Revision::new(key.to_string(), value, created_at))
    }

    async fn latest(&self, key: &str) -> Result<Option<Revision>> {
        match self.db.scan_prefix(key_prefix(key)).next_back() {
            Some(entry) => {
                let (entry_key, payload) = entry?;
                Ok(Some(decode_entry(key, &entry_key, &payload)?))
            }
            None => Ok(None),
        }
    }

    async fn latest_as_of(&self, key: &str, timestamp: Timestamp) -> Result<Option<Revision>> {
        let range = key_prefix(key)..=entry_key(key, timestamp);
        match self.db.range(range).next_back() {
            Some(entry) => {
                let (entry_key, payload) = entry?;
                Ok(Some(decode_entry(key, &entry_key, &payload)?))
            }
            None => Ok(None),
        }
    }

    async fn clear(&self) -> Result<()> {
        self.db.clear()?;
        self.db.flush_async().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::ledger::RevisionLedger;
    use serde_json::json;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_append_and_lookups() {
        let dir = tempdir().unwrap();
        let ledger = SledLedger::open(dir.path()).unwrap();

        let r1 = ledger.append("abc", json!("first")).await.unwrap();
        let r2 = ledger.append("abc", json!("second")).await.unwrap();
        assert!(r1.created_at < r2.created_at);

        let latest = ledger.latest("abc").await.unwrap().unwrap();
        assert_eq!(latest.value, json!("second"));

        let at_first = ledger
            .latest_as_of("abc", r1.created_at)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(at_first.value, json!("first"));

        let before = r1.created_at.sub_millis(1);
        assert!(ledger.latest_as_of("abc", before).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_prefix_keys_do_not_collide() {
        let dir = tempdir().unwrap();
        let ledger = SledLedger::open(dir.path()).unwrap();

        ledger.append("ab", json!("short")).await.unwrap();
        ledger.append("abc", json!("long")).await.unwrap();

        assert_eq!(
            ledger.latest("ab").await.unwrap().unwrap().value,
            json!("short")
        );
        assert_eq!(
            ledger.latest("abc").await.unwrap().unwrap().value,
            json!("long")
        );
    }

    #[tokio::test]
    async fn test_clear_discards_everything() {
        let dir = tempdir().unwrap();
        let ledger = SledLedger::open(dir.path()).unwrap();

        ledger.append("abc", json!("v1")).await.unwrap();
        ledger.clear().await.unwrap();

        assert!(ledger.latest("abc").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_revisions_survive_reopen() {
        let dir = tempdir().unwrap();

        {
            let ledger = SledLedger::open(dir.path()).unwrap();
            ledger
                .append("abc", json!({"inner_key": "def"}))
                .await
                .unwrap();
        }

        let reopened = SledLedger::open(dir.path()).unwrap();
        let latest = reopened.latest("abc").await.unwrap().unwrap();
        assert_eq!(latest.value, json!({"inner_key": "def"}));
    }
}
