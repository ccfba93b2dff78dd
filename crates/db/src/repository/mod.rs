//! Repository functions — one function per store operation.
//!
//! Every function takes a `&dyn KeyValueStore` and returns a
//! `Result<T, DbError>`.  Each collection is stored as one JSON array under
//! its own key, and every mutator rewrites the whole array.

pub mod employees;
pub mod disputes;
pub mod snapshot;
pub mod seed;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::{DbError, KeyValueStore};

/// Storage key of the employee collection.
pub const EMPLOYEES_KEY: &str = "sp_employees";
/// Storage key of the dispute collection.
pub const DISPUTES_KEY: &str = "sp_disputes";

/// Decode the collection under `key`; a never-written key is an empty collection.
pub(crate) fn load_collection<T: DeserializeOwned>(
    kv: &dyn KeyValueStore,
    key: &str,
) -> Result<Vec<T>, DbError> {
    match kv.get(key)? {
        Some(raw) => serde_json::from_str(&raw).map_err(|source| DbError::Corrupt {
            key: key.to_owned(),
            source,
        }),
        None => Ok(Vec::new()),
    }
}

/// Re-serialise and persist the full collection under `key`.
pub(crate) fn save_collection<T: Serialize>(
    kv: &dyn KeyValueStore,
    key: &str,
    records: &[T],
) -> Result<(), DbError> {
    let encoded = serde_json::to_string(records).map_err(DbError::Serialize)?;
    kv.set(key, &encoded)
}
