//! Approval event entity - one ledger row per applied transition

use chrono::{DateTime, Utc};

use crate::value_objects::{ApprovalAction, ExpenseId, Role, UserId};

use super::User;

/// Approval event entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovalEvent {
    pub id: i64,
    pub expense_request_id: ExpenseId,
    pub actor_id: UserId,
    pub actor_role: Role,
    pub action: ApprovalAction,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Approval event to be appended inside a transition's transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewApprovalEvent {
    pub expense_request_id: ExpenseId,
    pub actor_id: UserId,
    pub actor_role: Role,
    pub action: ApprovalAction,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl NewApprovalEvent {
    /// Record `action` by `actor`, stamped with the actor's current role
    pub fn new(expense_request_id: ExpenseId, actor: &User, action: ApprovalAction) -> Self {
        Self {
            expense_request_id,
            actor_id: actor.id,
            actor_role: actor.role,
            action,
            comment: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Materialize the entity once the store has assigned an id
    pub fn into_event(self, id: i64) -> ApprovalEvent {
        ApprovalEvent {
            id,
            expense_request_id: self.expense_request_id,
            actor_id: self.actor_id,
            actor_role: self.actor_role,
            action: self.action,
            comment: self.comment,
            created_at: self.created_at,
        }
    }
}
