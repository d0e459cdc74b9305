//! Audit log database model

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use sqlx::FromRow;

/// Database model for audit_logs table
#[derive(Debug, Clone, FromRow)]
pub struct AuditLogModel {
    pub id: i64,
    pub table_name: String,
    pub record_id: i64,
    pub actor_id: Option<i64>,
    pub action: String,
    /// JSON object shaped per action (statuses, amounts, comment)
    pub payload: Option<JsonValue>,
    pub created_at: DateTime<Utc>,
}
