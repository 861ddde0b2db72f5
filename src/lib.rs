//! Temporal-KV: a minimal temporal key-value store
//!
//! Every write appends an immutable, timestamped revision; reads resolve
//! either the most recent value or the value as of a point in time.
//!
//! # Core Concepts
//!
//! - **Revisions**: immutable, store-timestamped writes to a key
//! - **Key Histories**: the ordered revision sequence per key
//! - **Temporal reads**: "value of key K as of time T", resolved to the
//!   latest revision not after T
//! - **Ledgers**: pluggable revision storage (in-memory, or durable via the
//!   `sled` feature)
//!
//! # Example
//!
//! ```
//! use temporal_kv::prelude::*;
//! use serde_json::json;
//!
//! # async fn example() -> temporal_kv::error::Result<()> {
//! let store = VersionedStore::in_memory();
//!
//! // Write a value; the store assigns the revision timestamp
//! let revision = store.write("user_1", json!("active")).await?;
//!
//! // Read the latest value, or the value as of an instant
//! let latest = store.read("user_1", None).await?;
//! let as_of = store
//!     .read("user_1", Some(&revision.created_at.as_millis().to_string()))
//!     .await?;
//! assert_eq!(latest, as_of);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod cli;
pub mod core;
pub mod error;
pub mod storage;
pub mod validate;

/// Main store type
pub mod store;

/// Prelude module for common imports
pub mod prelude {
    pub use crate::core::*;
    pub use crate::error::{Error, Result};
    pub use crate::storage::*;
    pub use crate::store::VersionedStore;
}
