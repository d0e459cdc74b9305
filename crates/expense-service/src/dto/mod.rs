//! Data transfer objects exchanged with the trigger layer

pub mod requests;
pub mod responses;

pub use requests::{CreateExpenseRequest, DirectIssueRequest};
pub use responses::{
    ApprovalEventResponse, ExpenseDetailsResponse, ExpenseRequestResponse, HistoryEntry,
    TransitionOutcome,
};
