//! Core data types and models

pub mod history;
pub mod revision;
pub mod temporal;

pub use history::*;
pub use revision::*;
pub use temporal::*;
