//! # expense-service
//!
//! Application layer: the expense lifecycle engine and the services around it.
//!
//! Every collaborator is injected through [`ServiceContext`], so the engine
//! runs the same against PostgreSQL + Telegram (see [`bootstrap`]) and against
//! in-memory fakes.

pub mod bootstrap;
pub mod dto;
pub mod services;

pub use dto::{
    CreateExpenseRequest, DirectIssueRequest, ExpenseDetailsResponse, ExpenseRequestResponse,
    HistoryEntry, TransitionOutcome,
};
pub use services::{
    AuditLogService, DirectoryService, ExpenseLifecycleEngine, ExpenseQueryService,
    ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult,
};
