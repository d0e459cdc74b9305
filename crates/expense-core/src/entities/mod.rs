//! Domain entities - core business objects

mod approval_event;
mod audit_log;
mod expense_request;
mod user;

pub use approval_event::{ApprovalEvent, NewApprovalEvent};
pub use audit_log::{AuditLogEntry, NewAuditEntry, EXPENSE_REQUESTS_TABLE};
pub use expense_request::{ExpenseRequest, NewExpenseRequest};
pub use user::User;
