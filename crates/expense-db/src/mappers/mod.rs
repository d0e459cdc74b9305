//! Model to entity mappers
//!
//! - `TryFrom<Model> for Entity`: convert database rows to domain objects.
//!   Text columns holding closed enums (status, role, currency) are parsed,
//!   and an unrecognized value is an error, never a default.
//! - `*Insert`/`*Update` structs: prepare entity data for database operations

mod approval;
mod audit_log;
mod expense_request;
mod user;

pub use approval::ApprovalEventInsert;
pub use audit_log::AuditEntryInsert;
pub use expense_request::{ExpenseInsert, ExpenseUpdate};
