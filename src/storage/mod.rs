//! Storage layer: revision ledgers

pub mod ledger;

#[cfg(feature = "sled")]
pub mod sled;

pub use ledger::*;

#[cfg(feature = "sled")]
pub use self::sled::SledLedger;
