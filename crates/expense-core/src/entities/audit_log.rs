//! Audit log entity - generic, cross-entity, append-only

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;

use crate::value_objects::UserId;

/// Table name recorded for expense request audit entries
pub const EXPENSE_REQUESTS_TABLE: &str = "expense_requests";

/// A persisted audit entry
#[derive(Debug, Clone, PartialEq)]
pub struct AuditLogEntry {
    pub id: i64,
    pub table_name: String,
    /// Loose reference: no foreign key to the audited row
    pub record_id: i64,
    pub actor_id: Option<UserId>,
    pub action: String,
    pub payload: JsonValue,
    pub created_at: DateTime<Utc>,
}

/// An audit entry ready to be appended
#[derive(Debug, Clone, PartialEq)]
pub struct NewAuditEntry {
    pub table_name: String,
    pub record_id: i64,
    pub actor_id: Option<UserId>,
    pub action: String,
    pub payload: JsonValue,
    pub created_at: DateTime<Utc>,
}

impl NewAuditEntry {
    pub fn new(
        table_name: impl Into<String>,
        record_id: i64,
        actor_id: Option<UserId>,
        action: impl Into<String>,
        payload: JsonValue,
    ) -> Self {
        Self {
            table_name: table_name.into(),
            record_id,
            actor_id,
            action: action.into(),
            payload,
            created_at: Utc::now(),
        }
    }

    /// Materialize the entity once the store has assigned an id
    pub fn into_entry(self, id: i64) -> AuditLogEntry {
        AuditLogEntry {
            id,
            table_name: self.table_name,
            record_id: self.record_id,
            actor_id: self.actor_id,
            action: self.action,
            payload: self.payload,
            created_at: self.created_at,
        }
    }
}
