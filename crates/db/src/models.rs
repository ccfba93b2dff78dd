//! Record structs for the two stored collections.
//!
//! These are *persistence* models.  Apart from `DisputeStatus::is_terminal`,
//! which marks the states with no outgoing transition, the transition rule
//! and its checks live in the `engine` crate.  Field names
//! serialise in camelCase so snapshots stay compatible with the browser
//! edition of the tool.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// employees
// ---------------------------------------------------------------------------

/// A registered employee.  Approvers are ordinary employees with
/// `is_approver` set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: String,
    pub name: String,
    /// Employee identification number (NIP).
    pub nip: String,
    pub position: String,
    /// Signature image as a `data:` URL, if one was uploaded.
    #[serde(default)]
    pub signature_base64: Option<String>,
    #[serde(default)]
    pub is_approver: bool,
}

// ---------------------------------------------------------------------------
// disputes
// ---------------------------------------------------------------------------

/// Lifecycle state of a dispute.
///
/// Serialised with the Indonesian labels used by existing backups; the
/// English names are accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DisputeStatus {
    #[serde(rename = "Menunggu", alias = "Pending")]
    Pending,
    #[serde(rename = "Disetujui", alias = "Approved")]
    Approved,
    #[serde(rename = "Ditolak", alias = "Rejected")]
    Rejected,
}

impl DisputeStatus {
    /// `Approved` and `Rejected` have no outgoing transitions.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Label shown to users.
    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "Menunggu",
            Self::Approved => "Disetujui",
            Self::Rejected => "Ditolak",
        }
    }
}

impl std::fmt::Display for DisputeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Approved => write!(f, "approved"),
            Self::Rejected => write!(f, "rejected"),
        }
    }
}

impl std::str::FromStr for DisputeStatus {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending"  | "menunggu"  => Ok(Self::Pending),
            "approved" | "disetujui" => Ok(Self::Approved),
            "rejected" | "ditolak"   => Ok(Self::Rejected),
            other => Err(format!("unknown dispute status: {other}")),
        }
    }
}

/// An approver's decision.  Only these two statuses can be written by
/// [`crate::repository::disputes::update_dispute_status`], so a record can
/// never carry approval metadata while still `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Approved,
    Rejected,
}

impl From<Verdict> for DisputeStatus {
    fn from(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Approved => DisputeStatus::Approved,
            Verdict::Rejected => DisputeStatus::Rejected,
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        DisputeStatus::from(*self).fmt(f)
    }
}

/// A request to correct the recorded attendance for one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dispute {
    pub id: String,
    /// Not checked against the employee collection.
    pub employee_id: String,
    pub date: NaiveDate,
    pub reason: String,
    pub status: DisputeStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approver_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<DateTime<Utc>>,
}

impl Dispute {
    /// A freshly submitted dispute: `Pending`, no approval metadata.
    pub fn pending(
        id: impl Into<String>,
        employee_id: impl Into<String>,
        date: NaiveDate,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            employee_id: employee_id.into(),
            date,
            reason: reason.into(),
            status: DisputeStatus::Pending,
            approver_id: None,
            approved_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn status_uses_indonesian_labels_on_the_wire() {
        let encoded = serde_json::to_value(DisputeStatus::Approved).unwrap();
        assert_eq!(encoded, json!("Disetujui"));
    }

    #[test]
    fn only_pending_has_outgoing_transitions() {
        assert!(!DisputeStatus::Pending.is_terminal());
        assert!(DisputeStatus::Approved.is_terminal());
        assert!(DisputeStatus::Rejected.is_terminal());
    }

    #[test]
    fn status_accepts_english_aliases() {
        let status: DisputeStatus = serde_json::from_value(json!("Rejected")).unwrap();
        assert_eq!(status, DisputeStatus::Rejected);
        assert_eq!("PENDING".parse::<DisputeStatus>(), Ok(DisputeStatus::Pending));
        assert!("archived".parse::<DisputeStatus>().is_err());
    }

    #[test]
    fn pending_dispute_omits_approval_fields() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let dispute = Dispute::pending("d1", "2", date, "lupa absen pulang");
        let encoded = serde_json::to_value(&dispute).unwrap();

        assert_eq!(encoded["employeeId"], "2");
        assert_eq!(encoded["date"], "2024-01-10");
        assert_eq!(encoded["status"], "Menunggu");
        assert!(encoded.get("approverId").is_none());
        assert!(encoded.get("approvedAt").is_none());
    }

    #[test]
    fn employee_decodes_browser_record() {
        let employee: Employee = serde_json::from_value(json!({
            "id": "1",
            "name": "Budi Santoso",
            "nip": "198501012010011001",
            "position": "Kepala Bagian Umum",
            "signatureBase64": null,
            "isApprover": true
        }))
        .unwrap();

        assert!(employee.is_approver);
        assert_eq!(employee.signature_base64, None);
    }
}
