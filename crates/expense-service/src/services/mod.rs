//! Business logic services
//!
//! Services borrow a [`ServiceContext`] and are cheap to construct per call.

pub mod audit;
pub mod context;
pub mod directory;
pub mod error;
pub mod lifecycle;
pub mod query;

pub use audit::AuditLogService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use directory::DirectoryService;
pub use error::{ServiceError, ServiceResult};
pub use lifecycle::ExpenseLifecycleEngine;
pub use query::ExpenseQueryService;
