//! Audit log entity <-> model mapper

use serde_json::Value as JsonValue;

use expense_core::entities::{AuditLogEntry, NewAuditEntry};
use expense_core::value_objects::UserId;

use crate::models::AuditLogModel;

/// Convert AuditLogModel to AuditLogEntry entity
impl From<AuditLogModel> for AuditLogEntry {
    fn from(model: AuditLogModel) -> Self {
        AuditLogEntry {
            id: model.id,
            table_name: model.table_name,
            record_id: model.record_id,
            actor_id: model.actor_id.map(UserId::new),
            action: model.action,
            payload: model.payload.unwrap_or(JsonValue::Null),
            created_at: model.created_at,
        }
    }
}

/// Values bound when appending an audit entry
pub struct AuditEntryInsert<'a> {
    pub table_name: &'a str,
    pub record_id: i64,
    pub actor_id: Option<i64>,
    pub action: &'a str,
    pub payload: &'a JsonValue,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl<'a> AuditEntryInsert<'a> {
    pub fn new(entry: &'a NewAuditEntry) -> Self {
        Self {
            table_name: &entry.table_name,
            record_id: entry.record_id,
            actor_id: entry.actor_id.map(UserId::into_inner),
            action: &entry.action,
            payload: &entry.payload,
            created_at: entry.created_at,
        }
    }
}
