//! Dispute operations.  Disputes are never deleted.

use chrono::Utc;
use tracing::{debug, info};

use crate::{
    models::{Dispute, DisputeStatus, Verdict},
    DbError, KeyValueStore,
};

use super::{load_collection, save_collection, DISPUTES_KEY};

/// Return all disputes in storage order.
pub fn list_disputes(kv: &dyn KeyValueStore) -> Result<Vec<Dispute>, DbError> {
    load_collection(kv, DISPUTES_KEY)
}

/// Fetch a single dispute by id.
pub fn get_dispute(kv: &dyn KeyValueStore, id: &str) -> Result<Option<Dispute>, DbError> {
    Ok(list_disputes(kv)?.into_iter().find(|d| d.id == id))
}

/// Insert `dispute`, or replace the record with the same id in place.
pub fn upsert_dispute(kv: &dyn KeyValueStore, dispute: Dispute) -> Result<(), DbError> {
    let mut disputes = list_disputes(kv)?;

    match disputes.iter().position(|d| d.id == dispute.id) {
        Some(index) => {
            info!("updating dispute '{}'", dispute.id);
            disputes[index] = dispute;
        }
        None => {
            info!("recording dispute '{}' for employee '{}'", dispute.id, dispute.employee_id);
            disputes.push(dispute);
        }
    }

    save_collection(kv, DISPUTES_KEY, &disputes)
}

/// Record an approver's decision on dispute `id`.
///
/// Sets `status`, `approver_id` and `approved_at` (now) in one write.
/// Unknown ids are a silent no-op.  The current status is not inspected;
/// the workflow layer refuses decisions on already-decided disputes.
pub fn update_dispute_status(
    kv: &dyn KeyValueStore,
    id: &str,
    verdict: Verdict,
    approver_id: &str,
) -> Result<(), DbError> {
    let mut disputes = list_disputes(kv)?;

    let Some(dispute) = disputes.iter_mut().find(|d| d.id == id) else {
        debug!("update_dispute_status: no dispute with id '{}'", id);
        return Ok(());
    };

    dispute.status = DisputeStatus::from(verdict);
    dispute.approver_id = Some(approver_id.to_owned());
    dispute.approved_at = Some(Utc::now());

    info!("dispute '{}' {} by '{}'", id, verdict, approver_id);
    save_collection(kv, DISPUTES_KEY, &disputes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStorage;
    use chrono::NaiveDate;

    fn dispute(id: &str) -> Dispute {
        let date = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        Dispute::pending(id, "2", date, "lupa absen")
    }

    #[test]
    fn upsert_dispute_inserts_then_replaces() {
        let kv = MemoryStorage::new();
        upsert_dispute(&kv, dispute("d1")).unwrap();
        upsert_dispute(&kv, dispute("d2")).unwrap();

        let mut edited = dispute("d1");
        edited.reason = "mesin absen rusak".into();
        upsert_dispute(&kv, edited).unwrap();

        let disputes = list_disputes(&kv).unwrap();
        assert_eq!(disputes.len(), 2);
        assert_eq!(disputes[0].reason, "mesin absen rusak");
    }

    #[test]
    fn approval_stamps_approver_and_time() {
        let kv = MemoryStorage::new();
        upsert_dispute(&kv, dispute("d1")).unwrap();

        update_dispute_status(&kv, "d1", Verdict::Approved, "approver-x").unwrap();

        let stored = get_dispute(&kv, "d1").unwrap().expect("dispute exists");
        assert_eq!(stored.status, DisputeStatus::Approved);
        assert_eq!(stored.approver_id.as_deref(), Some("approver-x"));
        assert!(stored.approved_at.is_some());
    }

    #[test]
    fn unknown_id_leaves_collection_unchanged() {
        let kv = MemoryStorage::new();
        upsert_dispute(&kv, dispute("d1")).unwrap();
        let before = list_disputes(&kv).unwrap();

        update_dispute_status(&kv, "nope", Verdict::Rejected, "1").unwrap();

        assert_eq!(list_disputes(&kv).unwrap(), before);
    }

    #[test]
    fn decision_only_touches_matching_dispute() {
        let kv = MemoryStorage::new();
        upsert_dispute(&kv, dispute("d1")).unwrap();
        upsert_dispute(&kv, dispute("d2")).unwrap();

        update_dispute_status(&kv, "d2", Verdict::Rejected, "1").unwrap();

        let d1 = get_dispute(&kv, "d1").unwrap().unwrap();
        assert_eq!(d1.status, DisputeStatus::Pending);
        assert_eq!(d1.approver_id, None);
        assert_eq!(d1.approved_at, None);
    }
}
