//! Local persistence module
//!
//! This module provides the key-value store used to persist the active
//! locale, usage ledgers, and the session record between runs.

pub mod store;

pub use store::KvStore;
