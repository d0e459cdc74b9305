//! Repository implementations
//!
//! PostgreSQL implementations of the ports defined in expense-core.

mod audit_log;
mod error;
mod expense;
mod user;

pub use audit_log::PgAuditLogRepository;
pub use expense::{PgExpenseStore, PgUnitOfWork};
pub use user::PgUserDirectory;
