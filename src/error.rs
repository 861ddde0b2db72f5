//! Error types for Temporal-KV

use thiserror::Error;

/// Result type alias for Temporal-KV operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Temporal-KV
///
/// The three domain kinds (`InvalidWrite`, `InvalidRead`, `NotFound`) are
/// disjoint and locally recoverable by the caller. Each carries a fixed
/// message, so callers cannot tell which individual rule failed. Everything
/// else is a non-domain fault propagated from the ledger layer.
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed key or value on a write; no state change
    #[error("input is invalid, please enter only a `key` of type String (alphanumeric and _ only) and a `value` of type String/JSON")]
    InvalidWrite,

    /// Malformed key or timestamp on a read; no state change
    #[error("input is invalid, please enter only a `key` of type String (alphanumeric and _ only) with an optional `timestamp` of type unix timestamp")]
    InvalidRead,

    /// Key never written, or the queried timestamp predates all revisions
    #[error("no records found. Either this key does not have any records, no records existed with this timestamp")]
    NotFound,

    /// Revision ledger failures (storage unavailable, corrupt entry)
    #[error("Ledger error: {0}")]
    Ledger(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

#[cfg(feature = "sled")]
impl From<sled::Error> for Error {
    fn from(e: sled::Error) -> Self {
        Error::Ledger(e.to_string())
    }
}
