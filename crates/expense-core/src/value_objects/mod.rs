//! Value objects - immutable types that represent domain concepts

mod audit_action;
mod currency;
mod ids;
mod role;
mod status;

pub use audit_action::AuditAction;
pub use currency::Currency;
pub use ids::{ChatId, CompanyId, ExpenseId, IdParseError, UserId};
pub use role::{ApprovalAction, Role};
pub use status::ExpenseStatus;
