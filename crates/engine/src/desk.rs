//! `DisputeDesk` — the façade front ends talk to.
//!
//! It owns the injected storage and the rewriting collaborator and exposes
//! every user-facing operation:
//! 1. Employee master data (list, save, remove, approvers).
//! 2. Dispute submission, optionally with a reworded reason.
//! 3. Approval decisions through the status machine.
//! 4. Dashboard, approval table source data and the printable letter.
//! 5. Backup and restore of the whole store.

use std::sync::Arc;

use db::repository::{disputes, employees, seed, snapshot};
use db::repository::snapshot::RestoreSummary;
use db::{Dispute, DisputeStatus, Employee, KeyValueStore, SharedStorage, Verdict};
use rewriter::{refine_or_original, RewriteContext, TextRewriter};
use tracing::{info, instrument};

use crate::report::{self, DashboardStats};
use crate::submission::{self, DisputeDraft, EmployeeForm};
use crate::{letter, workflow, EngineError};

/// Stateless coordinator over one store and one rewriter.
///
/// Cheap to clone; clones share the same storage.
#[derive(Clone)]
pub struct DisputeDesk {
    storage: SharedStorage,
    rewriter: Arc<dyn TextRewriter>,
}

impl DisputeDesk {
    pub fn new(storage: SharedStorage, rewriter: Arc<dyn TextRewriter>) -> Self {
        Self { storage, rewriter }
    }

    fn kv(&self) -> &dyn KeyValueStore {
        self.storage.as_ref()
    }

    /// Write the demo employees unless employee data already exists.
    pub fn seed_defaults(&self) -> Result<bool, EngineError> {
        Ok(seed::seed_defaults(self.kv())?)
    }

    // -----------------------------------------------------------------------
    // Employees
    // -----------------------------------------------------------------------

    pub fn employees(&self) -> Result<Vec<Employee>, EngineError> {
        Ok(employees::list_employees(self.kv())?)
    }

    pub fn employee(&self, id: &str) -> Result<Option<Employee>, EngineError> {
        Ok(employees::get_employee(self.kv(), id)?)
    }

    pub fn approvers(&self) -> Result<Vec<Employee>, EngineError> {
        let all = self.employees()?;
        Ok(report::approvers(&all).into_iter().cloned().collect())
    }

    pub fn save_employee(&self, form: EmployeeForm) -> Result<Employee, EngineError> {
        submission::save_employee(self.kv(), form)
    }

    /// Unknown ids are a no-op.  Disputes filed by the employee stay.
    pub fn remove_employee(&self, id: &str) -> Result<(), EngineError> {
        Ok(employees::delete_employee(self.kv(), id)?)
    }

    // -----------------------------------------------------------------------
    // Disputes
    // -----------------------------------------------------------------------

    pub fn disputes(&self) -> Result<Vec<Dispute>, EngineError> {
        Ok(disputes::list_disputes(self.kv())?)
    }

    pub fn disputes_with_status(&self, status: DisputeStatus) -> Result<Vec<Dispute>, EngineError> {
        Ok(self.disputes()?.into_iter().filter(|d| d.status == status).collect())
    }

    pub fn submit(&self, draft: DisputeDraft) -> Result<Dispute, EngineError> {
        submission::submit_dispute(self.kv(), draft)
    }

    /// See [`workflow::decide`].
    pub fn decide(
        &self,
        dispute_id: &str,
        verdict: Verdict,
        approver_id: &str,
    ) -> Result<Option<Dispute>, EngineError> {
        workflow::decide(self.kv(), dispute_id, verdict, approver_id)
    }

    /// Reword `raw` for employee `employee_id`.
    ///
    /// Rewriter failures are absorbed: the original text comes back.
    ///
    /// # Errors
    /// [`EngineError::NotFound`] if the employee does not exist.
    #[instrument(skip(self, raw))]
    pub async fn refine_reason(&self, employee_id: &str, raw: &str) -> Result<String, EngineError> {
        let employee = self.employee(employee_id)?.ok_or_else(|| EngineError::NotFound {
            kind: "employee",
            id: employee_id.to_owned(),
        })?;

        let ctx = RewriteContext::new(employee.name, employee.position);
        Ok(refine_or_original(self.rewriter.as_ref(), raw, &ctx).await)
    }

    // -----------------------------------------------------------------------
    // Views
    // -----------------------------------------------------------------------

    pub fn stats(&self) -> Result<DashboardStats, EngineError> {
        Ok(DashboardStats::collect(&self.employees()?, &self.disputes()?))
    }

    /// HTML letter for an approved dispute.
    ///
    /// # Errors
    /// - [`EngineError::NotFound`] if the dispute or its employee is missing.
    /// - [`EngineError::NotPrintable`] unless the dispute is approved.
    pub fn print_letter(&self, dispute_id: &str) -> Result<String, EngineError> {
        let dispute = disputes::get_dispute(self.kv(), dispute_id)?.ok_or_else(|| {
            EngineError::NotFound {
                kind: "dispute",
                id: dispute_id.to_owned(),
            }
        })?;

        if dispute.status != DisputeStatus::Approved {
            return Err(EngineError::NotPrintable {
                dispute_id: dispute.id,
                status: dispute.status,
            });
        }

        let all = self.employees()?;
        let find = |id: &str| all.iter().find(|e| e.id == id);

        let employee = find(&dispute.employee_id).ok_or_else(|| EngineError::NotFound {
            kind: "employee",
            id: dispute.employee_id.clone(),
        })?;
        let approver = dispute.approver_id.as_deref().and_then(find);

        Ok(letter::render_letter(employee, approver, &dispute))
    }

    // -----------------------------------------------------------------------
    // Backup / restore
    // -----------------------------------------------------------------------

    pub fn backup(&self) -> Result<String, EngineError> {
        Ok(snapshot::export_all(self.kv())?)
    }

    /// Restore a backup.  A malformed document changes nothing and yields an
    /// error for which [`EngineError::is_invalid_snapshot`] is true.
    pub fn restore(&self, document: &str) -> Result<RestoreSummary, EngineError> {
        let summary = snapshot::import_all(self.kv(), document)?;
        info!("store restored from backup");
        Ok(summary)
    }
}
