//! # expense-core
//!
//! Domain layer for the expense-request lifecycle: entities, value objects,
//! input validation, domain errors, and the ports (traits) the engine talks to.
//! This crate has zero dependencies on infrastructure (database, chat transport, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod validation;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    ApprovalEvent, AuditLogEntry, ExpenseRequest, NewApprovalEvent, NewAuditEntry,
    NewExpenseRequest, User, EXPENSE_REQUESTS_TABLE,
};
pub use error::DomainError;
pub use traits::{
    ActionButton, ActionKeyboard, AuditLogRepository, ExpenseStore, ExpenseUnitOfWork,
    MessageRef, NotificationChannel, NotifyError, RepoResult, UserDirectory,
};
pub use validation::{
    validate_amount, validate_amount_value, validate_comment, validate_not_empty,
    validate_optional_comment, ValidationError,
};
pub use value_objects::{
    ApprovalAction, AuditAction, ChatId, CompanyId, Currency, ExpenseId, ExpenseStatus,
    IdParseError, Role, UserId,
};
