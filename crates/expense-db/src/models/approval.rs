//! Approval event database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for expense_approvals table
#[derive(Debug, Clone, FromRow)]
pub struct ApprovalEventModel {
    pub id: i64,
    pub expense_request_id: i64,
    pub actor_id: i64,
    pub actor_role: String,
    pub action: String,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}
