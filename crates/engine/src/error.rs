//! Engine-level error types.

use db::DisputeStatus;
use thiserror::Error;

/// Errors produced by the dispute workflow and the operations around it.
#[derive(Debug, Error)]
pub enum EngineError {
    // ------ Caller-side validation ------

    /// A required form field was blank.
    #[error("field '{0}' must not be empty")]
    MissingField(&'static str),

    /// A decision was attempted without an acting approver.
    #[error("an approver must be selected before deciding a dispute")]
    ApproverRequired,

    // ------ Workflow ------

    /// The status machine has no such edge (decided disputes are final).
    #[error("cannot move a dispute from {from} to {to}")]
    InvalidTransition {
        from: DisputeStatus,
        to: DisputeStatus,
    },

    /// Only approved disputes produce a letter.
    #[error("dispute '{dispute_id}' is {status}; only approved disputes can be printed")]
    NotPrintable {
        dispute_id: String,
        status: DisputeStatus,
    },

    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: String },

    /// Persistence error from the db crate.
    #[error("database error: {0}")]
    Database(#[from] db::DbError),
}

impl EngineError {
    /// True when a restore was refused because the document was malformed.
    pub fn is_invalid_snapshot(&self) -> bool {
        matches!(self, Self::Database(db::DbError::InvalidSnapshot(_)))
    }
}
