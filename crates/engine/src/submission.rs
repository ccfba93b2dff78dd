//! Form handling: new disputes and employee master data.
//!
//! Both paths validate blank fields, assign a fresh id where needed and hand
//! the record to the store's upsert.

use chrono::NaiveDate;
use db::repository::{disputes::upsert_dispute, employees::upsert_employee};
use db::{Dispute, Employee, KeyValueStore};
use tracing::info;
use uuid::Uuid;

use crate::EngineError;

/// Input for a new dispute.
#[derive(Debug, Clone)]
pub struct DisputeDraft {
    pub employee_id: String,
    pub date: NaiveDate,
    pub reason: String,
}

/// Input for adding or editing an employee.  `id: None` adds a new one.
#[derive(Debug, Clone, Default)]
pub struct EmployeeForm {
    pub id: Option<String>,
    pub name: String,
    pub nip: String,
    pub position: String,
    pub is_approver: bool,
    pub signature_base64: Option<String>,
}

impl From<Employee> for EmployeeForm {
    fn from(e: Employee) -> Self {
        Self {
            id: Some(e.id),
            name: e.name,
            nip: e.nip,
            position: e.position,
            is_approver: e.is_approver,
            signature_base64: e.signature_base64,
        }
    }
}

fn require(field: &'static str, value: &str) -> Result<(), EngineError> {
    if value.trim().is_empty() {
        return Err(EngineError::MissingField(field));
    }
    Ok(())
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Record a new dispute.  It always starts `Pending` with no approver.
///
/// # Errors
/// [`EngineError::MissingField`] for a blank employee id or reason.
pub fn submit_dispute(kv: &dyn KeyValueStore, draft: DisputeDraft) -> Result<Dispute, EngineError> {
    require("employee_id", &draft.employee_id)?;
    require("reason", &draft.reason)?;

    let dispute = Dispute::pending(new_id(), draft.employee_id, draft.date, draft.reason);
    upsert_dispute(kv, dispute.clone())?;

    info!("submitted dispute '{}' for {}", dispute.id, dispute.date);
    Ok(dispute)
}

/// Add or update an employee.
///
/// # Errors
/// [`EngineError::MissingField`] for a blank name, NIP or position.
pub fn save_employee(kv: &dyn KeyValueStore, form: EmployeeForm) -> Result<Employee, EngineError> {
    require("name", &form.name)?;
    require("nip", &form.nip)?;
    require("position", &form.position)?;

    let employee = Employee {
        id: form.id.filter(|id| !id.trim().is_empty()).unwrap_or_else(new_id),
        name: form.name.trim().to_owned(),
        nip: form.nip.trim().to_owned(),
        position: form.position.trim().to_owned(),
        signature_base64: form.signature_base64.filter(|s| !s.is_empty()),
        is_approver: form.is_approver,
    };
    upsert_employee(kv, employee.clone())?;
    Ok(employee)
}
