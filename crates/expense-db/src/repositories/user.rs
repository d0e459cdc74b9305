//! PostgreSQL implementation of UserDirectory

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use expense_core::entities::User;
use expense_core::traits::{RepoResult, UserDirectory};
use expense_core::value_objects::{CompanyId, Role, UserId};

use crate::models::UserModel;

use super::error::map_db_error;

/// Read-only directory backed by the users table
#[derive(Clone)]
pub struct PgUserDirectory {
    pool: PgPool,
}

impl PgUserDirectory {
    /// Create a new PgUserDirectory
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserDirectory for PgUserDirectory {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(
            r#"
            SELECT id, login, full_name, telegram_id, role::text AS role, company_id
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(User::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_role(
        &self,
        company_id: CompanyId,
        role: Role,
        require_address: bool,
    ) -> RepoResult<Vec<User>> {
        let results = sqlx::query_as::<_, UserModel>(
            r#"
            SELECT id, login, full_name, telegram_id, role::text AS role, company_id
            FROM users
            WHERE company_id = $1
              AND role::text = $2
              AND (NOT $3 OR telegram_id IS NOT NULL)
            ORDER BY id ASC
            "#,
        )
        .bind(company_id.into_inner())
        .bind(role.as_str())
        .bind(require_address)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(User::try_from).collect()
    }
}
