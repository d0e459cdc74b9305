//! Ports - interfaces the engine depends on, implemented by infrastructure crates

mod notification;
mod repositories;

pub use notification::{ActionButton, ActionKeyboard, MessageRef, NotificationChannel, NotifyError};
pub use repositories::{
    AuditLogRepository, ExpenseStore, ExpenseUnitOfWork, RepoResult, UserDirectory,
};
