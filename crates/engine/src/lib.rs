//! `engine` crate — the dispute workflow, form handling, views and the
//! `DisputeDesk` façade.

pub mod error;
pub mod workflow;
pub mod submission;
pub mod report;
pub mod letter;
pub mod desk;

pub use error::EngineError;
pub use workflow::{decide, next_status};
pub use submission::{DisputeDraft, EmployeeForm};
pub use report::{approval_rows, ApprovalRow, DashboardStats};
pub use desk::DisputeDesk;
