//! Approval event entity <-> model mapper

use chrono::{DateTime, Utc};

use expense_core::entities::{ApprovalEvent, NewApprovalEvent};
use expense_core::error::DomainError;
use expense_core::value_objects::{ExpenseId, UserId};

use crate::models::ApprovalEventModel;

/// Convert ApprovalEventModel to ApprovalEvent entity
impl TryFrom<ApprovalEventModel> for ApprovalEvent {
    type Error = DomainError;

    fn try_from(model: ApprovalEventModel) -> Result<Self, Self::Error> {
        Ok(ApprovalEvent {
            id: model.id,
            expense_request_id: ExpenseId::new(model.expense_request_id),
            actor_id: UserId::new(model.actor_id),
            actor_role: model.actor_role.parse()?,
            action: model.action.parse()?,
            comment: model.comment,
            created_at: model.created_at,
        })
    }
}

/// Values bound when appending to the approval ledger
pub struct ApprovalEventInsert<'a> {
    pub expense_request_id: i64,
    pub actor_id: i64,
    pub actor_role: &'static str,
    pub action: &'static str,
    pub comment: Option<&'a str>,
    pub created_at: DateTime<Utc>,
}

impl<'a> ApprovalEventInsert<'a> {
    pub fn new(event: &'a NewApprovalEvent) -> Self {
        Self {
            expense_request_id: event.expense_request_id.into_inner(),
            actor_id: event.actor_id.into_inner(),
            actor_role: event.actor_role.as_str(),
            action: event.action.as_str(),
            comment: event.comment.as_deref(),
            created_at: event.created_at,
        }
    }
}
