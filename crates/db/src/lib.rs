//! `db` crate — the record store.
//!
//! Provides the injected key-value storage abstraction, typed records for
//! employees and disputes, and repository functions for both collections
//! plus whole-database backup/restore.  No workflow rules live here.

pub mod error;
pub mod storage;
pub mod repository;
pub mod models;

pub use storage::{FileStorage, KeyValueStore, MemoryStorage, SharedStorage};
pub use error::DbError;
pub use models::{Dispute, DisputeStatus, Employee, Verdict};
