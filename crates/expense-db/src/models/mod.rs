//! Database models - SQLx-compatible structs for PostgreSQL tables

mod approval;
mod audit_log;
mod expense_request;
mod user;

pub use approval::ApprovalEventModel;
pub use audit_log::AuditLogModel;
pub use expense_request::ExpenseRequestModel;
pub use user::UserModel;
