//! Typed error type for the db crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("storage i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored collection could not be decoded.
    #[error("stored value under '{key}' is corrupt: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("serialization error: {0}")]
    Serialize(#[source] serde_json::Error),

    /// A restore document failed shape validation.  Nothing was written.
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),
}
