//! Read-only projections over the two collections: the approver list, the
//! dashboard counters and the approval table.

use db::{Dispute, DisputeStatus, Employee};
use serde::Serialize;

/// Shown in place of an employee that no longer exists.
pub const UNKNOWN_EMPLOYEE: &str = "Unknown";

/// Employees eligible to decide disputes, in storage order.
pub fn approvers(employees: &[Employee]) -> Vec<&Employee> {
    employees.iter().filter(|e| e.is_approver).collect()
}

/// Dashboard counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_employees: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
}

impl DashboardStats {
    pub fn collect(employees: &[Employee], disputes: &[Dispute]) -> Self {
        disputes.iter().fold(
            Self {
                total_employees: employees.len(),
                ..Self::default()
            },
            |mut stats, d| {
                match d.status {
                    DisputeStatus::Pending => stats.pending += 1,
                    DisputeStatus::Approved => stats.approved += 1,
                    DisputeStatus::Rejected => stats.rejected += 1,
                }
                stats
            },
        )
    }
}

/// One line of the approval table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovalRow<'a> {
    pub dispute: &'a Dispute,
    /// [`UNKNOWN_EMPLOYEE`] for a dangling reference.
    pub employee_name: &'a str,
    pub employee_nip: Option<&'a str>,
    pub approver_name: Option<&'a str>,
}

/// Approval table rows, newest attendance date first.
pub fn approval_rows<'a>(employees: &'a [Employee], disputes: &'a [Dispute]) -> Vec<ApprovalRow<'a>> {
    let find = |id: &str| employees.iter().find(|e| e.id == id);

    let mut rows: Vec<ApprovalRow<'a>> = disputes
        .iter()
        .map(|dispute| {
            let employee = find(&dispute.employee_id);
            ApprovalRow {
                dispute,
                employee_name: employee.map_or(UNKNOWN_EMPLOYEE, |e| e.name.as_str()),
                employee_nip: employee.map(|e| e.nip.as_str()),
                approver_name: dispute
                    .approver_id
                    .as_deref()
                    .and_then(find)
                    .map(|e| e.name.as_str()),
            }
        })
        .collect();

    rows.sort_by(|a, b| b.dispute.date.cmp(&a.dispute.date));
    rows
}
