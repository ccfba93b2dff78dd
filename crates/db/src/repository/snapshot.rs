//! Whole-database backup and restore.
//!
//! A snapshot is a JSON object:
//!
//! ```json
//! { "employees": [...], "disputes": [...], "exportedAt": "...", "version": "1.0" }
//! ```
//!
//! Restore requires `employees`; `disputes` is optional and, when absent
//! or not a well-formed list of disputes, the stored disputes are left alone.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::{
    models::{Dispute, Employee},
    DbError, KeyValueStore,
};

use super::{disputes::list_disputes, employees::list_employees, save_collection, DISPUTES_KEY, EMPLOYEES_KEY};

/// Format tag written into every snapshot.  Restore does not branch on it.
pub const SNAPSHOT_VERSION: &str = "1.0";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotDocument<'a> {
    employees: &'a [Employee],
    disputes: &'a [Dispute],
    exported_at: DateTime<Utc>,
    version: &'static str,
}

/// What a successful restore replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestoreSummary {
    pub employees: usize,
    /// `None` when the snapshot carried no usable dispute array.
    pub disputes: Option<usize>,
}

/// Serialise both collections into a pretty-printed snapshot document.
pub fn export_all(kv: &dyn KeyValueStore) -> Result<String, DbError> {
    let employees = list_employees(kv)?;
    let disputes = list_disputes(kv)?;

    let document = SnapshotDocument {
        employees: &employees,
        disputes: &disputes,
        exported_at: Utc::now(),
        version: SNAPSHOT_VERSION,
    };

    info!(
        "exporting snapshot ({} employees, {} disputes)",
        employees.len(),
        disputes.len()
    );
    serde_json::to_string_pretty(&document).map_err(DbError::Serialize)
}

/// Restore a snapshot produced by [`export_all`].
///
/// # Errors
/// - [`DbError::InvalidSnapshot`] if the document is not a JSON object, or
///   if `employees` is missing or not an array of employees.  Nothing is
///   written.  A malformed `disputes` section is skipped, not fatal.
/// - Storage errors from the underlying medium.
pub fn import_all(kv: &dyn KeyValueStore, document: &str) -> Result<RestoreSummary, DbError> {
    let (employees, disputes) = match parse_snapshot(document) {
        Ok(parsed) => parsed,
        Err(reason) => {
            warn!("rejected snapshot: {}", reason);
            return Err(DbError::InvalidSnapshot(reason));
        }
    };

    save_collection(kv, EMPLOYEES_KEY, &employees)?;
    if let Some(disputes) = &disputes {
        save_collection(kv, DISPUTES_KEY, disputes)?;
    }

    let summary = RestoreSummary {
        employees: employees.len(),
        disputes: disputes.as_ref().map(Vec::len),
    };
    info!("restored snapshot: {:?}", summary);
    Ok(summary)
}

/// Validate the whole document before anything is written.
fn parse_snapshot(document: &str) -> Result<(Vec<Employee>, Option<Vec<Dispute>>), String> {
    let value: Value =
        serde_json::from_str(document).map_err(|e| format!("not valid JSON: {e}"))?;

    let Value::Object(mut fields) = value else {
        return Err("document is not a JSON object".into());
    };

    let employees = match fields.remove("employees") {
        Some(list @ Value::Array(_)) => serde_json::from_value::<Vec<Employee>>(list)
            .map_err(|e| format!("malformed employee record: {e}"))?,
        Some(_) => return Err("'employees' is not an array".into()),
        None => return Err("employee data is missing".into()),
    };

    let disputes = match fields.remove("disputes") {
        Some(list @ Value::Array(_)) => match serde_json::from_value::<Vec<Dispute>>(list) {
            Ok(disputes) => Some(disputes),
            Err(e) => {
                warn!("ignoring malformed dispute records in snapshot: {}", e);
                None
            }
        },
        _ => None,
    };

    Ok((employees, disputes))
}
