//! PostgreSQL implementation of AuditLogRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use expense_core::entities::AuditLogEntry;
use expense_core::traits::{AuditLogRepository, RepoResult};

use crate::models::AuditLogModel;

use super::error::map_db_error;

/// PostgreSQL implementation of AuditLogRepository
#[derive(Clone)]
pub struct PgAuditLogRepository {
    pool: PgPool,
}

impl PgAuditLogRepository {
    /// Create a new PgAuditLogRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditLogRepository for PgAuditLogRepository {
    #[instrument(skip(self))]
    async fn find_by_record(
        &self,
        table_name: &str,
        record_id: i64,
    ) -> RepoResult<Vec<AuditLogEntry>> {
        let results = sqlx::query_as::<_, AuditLogModel>(
            r#"
            SELECT id, table_name, record_id, actor_id, action, payload, created_at
            FROM audit_logs
            WHERE table_name = $1 AND record_id = $2
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(table_name)
        .bind(record_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(AuditLogEntry::from).collect())
    }
}
