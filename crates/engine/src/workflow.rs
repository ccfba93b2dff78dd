//! Dispute status machine.
//!
//! ```text
//!            ┌──► Approved
//! Pending ───┤
//!            └──► Rejected
//! ```
//!
//! `Approved` and `Rejected` are terminal; there is no undo.  A decision
//! carries the verdict and the acting approver, and the store writes
//! status, approver and timestamp together.

use db::repository::disputes::{get_dispute, update_dispute_status};
use db::{Dispute, DisputeStatus, KeyValueStore, Verdict};
use tracing::{debug, instrument};

use crate::EngineError;

/// Status reached by applying `verdict` to a dispute in `current`.
///
/// # Errors
/// [`EngineError::InvalidTransition`] if `current` is terminal.
pub fn next_status(current: DisputeStatus, verdict: Verdict) -> Result<DisputeStatus, EngineError> {
    let target = DisputeStatus::from(verdict);
    if current.is_terminal() {
        return Err(EngineError::InvalidTransition { from: current, to: target });
    }
    Ok(target)
}

/// Apply an approver's decision to dispute `dispute_id`.
///
/// Returns the updated dispute, or `Ok(None)` when no dispute has that id
/// (a silent no-op, same as the store).
///
/// # Errors
/// - [`EngineError::ApproverRequired`] if `approver_id` is blank.
/// - [`EngineError::InvalidTransition`] if the dispute was already decided.
#[instrument(skip(kv))]
pub fn decide(
    kv: &dyn KeyValueStore,
    dispute_id: &str,
    verdict: Verdict,
    approver_id: &str,
) -> Result<Option<Dispute>, EngineError> {
    if approver_id.trim().is_empty() {
        return Err(EngineError::ApproverRequired);
    }

    let Some(current) = get_dispute(kv, dispute_id)? else {
        debug!("no dispute '{}', nothing to decide", dispute_id);
        return Ok(None);
    };

    next_status(current.status, verdict)?;
    update_dispute_status(kv, dispute_id, verdict, approver_id)?;

    Ok(get_dispute(kv, dispute_id)?)
}

// ============================================================
// Unit tests
// ============================================================
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use db::repository::disputes::{list_disputes, upsert_dispute};
    use db::MemoryStorage;

    fn storage_with_pending(id: &str) -> MemoryStorage {
        let kv = MemoryStorage::new();
        let date = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        upsert_dispute(&kv, Dispute::pending(id, "2", date, "lupa absen")).unwrap();
        kv
    }

    #[test]
    fn pending_moves_to_either_verdict() {
        assert_eq!(
            next_status(DisputeStatus::Pending, Verdict::Approved).unwrap(),
            DisputeStatus::Approved
        );
        assert_eq!(
            next_status(DisputeStatus::Pending, Verdict::Rejected).unwrap(),
            DisputeStatus::Rejected
        );
    }

    #[test]
    fn terminal_states_have_no_exits() {
        for from in [DisputeStatus::Approved, DisputeStatus::Rejected] {
            for verdict in [Verdict::Approved, Verdict::Rejected] {
                assert!(matches!(
                    next_status(from, verdict),
                    Err(EngineError::InvalidTransition { from: f, .. }) if f == from
                ));
            }
        }
    }

    #[test]
    fn decide_sets_status_approver_and_time() {
        let kv = storage_with_pending("d1");

        let decided = decide(&kv, "d1", Verdict::Approved, "1")
            .unwrap()
            .expect("dispute exists");

        assert_eq!(decided.status, DisputeStatus::Approved);
        assert_eq!(decided.approver_id.as_deref(), Some("1"));
        assert!(decided.approved_at.is_some());
    }

    #[test]
    fn decide_requires_an_approver() {
        let kv = storage_with_pending("d1");

        assert!(matches!(
            decide(&kv, "d1", Verdict::Approved, "  "),
            Err(EngineError::ApproverRequired)
        ));
        let stored = list_disputes(&kv).unwrap();
        assert_eq!(stored[0].status, DisputeStatus::Pending);
    }

    #[test]
    fn decided_dispute_cannot_be_decided_again() {
        let kv = storage_with_pending("d1");
        decide(&kv, "d1", Verdict::Rejected, "1").unwrap();
        let first = list_disputes(&kv).unwrap();

        assert!(matches!(
            decide(&kv, "d1", Verdict::Approved, "3"),
            Err(EngineError::InvalidTransition { .. })
        ));
        assert_eq!(list_disputes(&kv).unwrap(), first);
    }

    #[test]
    fn unknown_dispute_is_a_no_op() {
        let kv = storage_with_pending("d1");
        let before = list_disputes(&kv).unwrap();

        assert!(decide(&kv, "missing", Verdict::Approved, "1").unwrap().is_none());
        assert_eq!(list_disputes(&kv).unwrap(), before);
    }
}
