//! PostgreSQL implementation of ExpenseStore and its unit of work

use async_trait::async_trait;
use sqlx::{Acquire, PgPool, Postgres, Transaction};
use tracing::{debug, instrument};

use expense_core::entities::{
    ApprovalEvent, ExpenseRequest, NewApprovalEvent, NewAuditEntry, NewExpenseRequest,
};
use expense_core::traits::{ExpenseStore, ExpenseUnitOfWork, RepoResult};
use expense_core::value_objects::{CompanyId, ExpenseId, ExpenseStatus};

use crate::mappers::{ApprovalEventInsert, AuditEntryInsert, ExpenseInsert, ExpenseUpdate};
use crate::models::{ApprovalEventModel, ExpenseRequestModel};

use super::error::{map_db_error, request_not_found};

/// PostgreSQL implementation of ExpenseStore
#[derive(Clone)]
pub struct PgExpenseStore {
    pool: PgPool,
}

impl PgExpenseStore {
    /// Create a new PgExpenseStore
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ExpenseStore for PgExpenseStore {
    #[instrument(skip(self))]
    async fn begin(&self) -> RepoResult<Box<dyn ExpenseUnitOfWork>> {
        let tx = self.pool.begin().await.map_err(map_db_error)?;
        Ok(Box::new(PgUnitOfWork { tx }))
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: ExpenseId) -> RepoResult<Option<ExpenseRequest>> {
        let result = sqlx::query_as::<_, ExpenseRequestModel>(
            r#"
            SELECT id, requester_id, company_id, description, amount, currency,
                   status::text AS status, director_id, cashier_id, director_comment,
                   issued_amount, created_at, approved_at, issued_at, updated_at
            FROM expense_requests
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(ExpenseRequest::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_company(
        &self,
        company_id: CompanyId,
        statuses: &[ExpenseStatus],
        limit: Option<i64>,
    ) -> RepoResult<Vec<ExpenseRequest>> {
        let statuses: Vec<String> = statuses.iter().map(ToString::to_string).collect();

        // LIMIT NULL means no limit
        let results = sqlx::query_as::<_, ExpenseRequestModel>(
            r#"
            SELECT id, requester_id, company_id, description, amount, currency,
                   status::text AS status, director_id, cashier_id, director_comment,
                   issued_amount, created_at, approved_at, issued_at, updated_at
            FROM expense_requests
            WHERE company_id = $1 AND status::text = ANY($2)
            ORDER BY COALESCE(issued_at, approved_at, created_at) DESC, id DESC
            LIMIT $3
            "#,
        )
        .bind(company_id.into_inner())
        .bind(statuses)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(ExpenseRequest::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn find_approval_events(&self, id: ExpenseId) -> RepoResult<Vec<ApprovalEvent>> {
        let results = sqlx::query_as::<_, ApprovalEventModel>(
            r#"
            SELECT id, expense_request_id, actor_id, actor_role, action, comment, created_at
            FROM expense_approvals
            WHERE expense_request_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(ApprovalEvent::try_from).collect()
    }
}

/// One PostgreSQL transaction
///
/// Dropping it without `commit` rolls the transaction back.
pub struct PgUnitOfWork {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl ExpenseUnitOfWork for PgUnitOfWork {
    #[instrument(skip(self))]
    async fn lock_for_update(&mut self, id: ExpenseId) -> RepoResult<Option<ExpenseRequest>> {
        let result = sqlx::query_as::<_, ExpenseRequestModel>(
            r#"
            SELECT id, requester_id, company_id, description, amount, currency,
                   status::text AS status, director_id, cashier_id, director_comment,
                   issued_amount, created_at, approved_at, issued_at, updated_at
            FROM expense_requests
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        result.map(ExpenseRequest::try_from).transpose()
    }

    #[instrument(skip(self, request))]
    async fn insert_request(&mut self, request: &NewExpenseRequest) -> RepoResult<ExpenseRequest> {
        let insert = ExpenseInsert::new(request);

        let model = sqlx::query_as::<_, ExpenseRequestModel>(
            r#"
            INSERT INTO expense_requests (requester_id, company_id, description, amount, currency,
                                          status, cashier_id, created_at, approved_at, issued_at,
                                          updated_at)
            VALUES ($1, $2, $3, $4, $5, $6::expense_status, $7, $8, $9, $10, $8)
            RETURNING id, requester_id, company_id, description, amount, currency,
                      status::text AS status, director_id, cashier_id, director_comment,
                      issued_amount, created_at, approved_at, issued_at, updated_at
            "#,
        )
        .bind(insert.requester_id)
        .bind(insert.company_id)
        .bind(insert.description)
        .bind(insert.amount)
        .bind(insert.currency)
        .bind(insert.status)
        .bind(insert.cashier_id)
        .bind(insert.created_at)
        .bind(insert.approved_at)
        .bind(insert.issued_at)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        ExpenseRequest::try_from(model)
    }

    #[instrument(skip(self, request), fields(request_id = %request.id))]
    async fn update_request(&mut self, request: &ExpenseRequest) -> RepoResult<()> {
        let update = ExpenseUpdate::new(request);

        let result = sqlx::query(
            r#"
            UPDATE expense_requests
            SET status = $2::expense_status,
                director_id = $3,
                cashier_id = $4,
                director_comment = $5,
                issued_amount = $6,
                approved_at = $7,
                issued_at = $8,
                updated_at = $9
            WHERE id = $1
            "#,
        )
        .bind(update.id)
        .bind(update.status)
        .bind(update.director_id)
        .bind(update.cashier_id)
        .bind(update.director_comment)
        .bind(update.issued_amount)
        .bind(update.approved_at)
        .bind(update.issued_at)
        .bind(update.updated_at)
        .execute(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(request_not_found(request.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_request(&mut self, id: ExpenseId) -> RepoResult<()> {
        // explicit so the delete does not depend on the FK being declared ON DELETE CASCADE
        let approvals = sqlx::query("DELETE FROM expense_approvals WHERE expense_request_id = $1")
            .bind(id.into_inner())
            .execute(&mut *self.tx)
            .await
            .map_err(map_db_error)?;

        let result = sqlx::query("DELETE FROM expense_requests WHERE id = $1")
            .bind(id.into_inner())
            .execute(&mut *self.tx)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(request_not_found(id));
        }

        debug!(
            request_id = %id,
            approvals_removed = approvals.rows_affected(),
            "Expense request deleted"
        );
        Ok(())
    }

    #[instrument(skip(self, event), fields(request_id = %event.expense_request_id))]
    async fn insert_approval_event(
        &mut self,
        event: &NewApprovalEvent,
    ) -> RepoResult<ApprovalEvent> {
        let insert = ApprovalEventInsert::new(event);

        let model = sqlx::query_as::<_, ApprovalEventModel>(
            r#"
            INSERT INTO expense_approvals (expense_request_id, actor_id, actor_role, action,
                                           comment, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, expense_request_id, actor_id, actor_role, action, comment, created_at
            "#,
        )
        .bind(insert.expense_request_id)
        .bind(insert.actor_id)
        .bind(insert.actor_role)
        .bind(insert.action)
        .bind(insert.comment)
        .bind(insert.created_at)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        ApprovalEvent::try_from(model)
    }

    #[instrument(skip(self, entry), fields(record_id = entry.record_id, action = %entry.action))]
    async fn append_audit(&mut self, entry: &NewAuditEntry) -> RepoResult<()> {
        let insert = AuditEntryInsert::new(entry);

        // A failed statement aborts the whole Postgres transaction; the savepoint
        // confines that to the audit insert.
        let mut savepoint = Acquire::begin(&mut self.tx).await.map_err(map_db_error)?;

        let result = sqlx::query(
            r#"
            INSERT INTO audit_logs (table_name, record_id, actor_id, action, payload, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(insert.table_name)
        .bind(insert.record_id)
        .bind(insert.actor_id)
        .bind(insert.action)
        .bind(insert.payload)
        .bind(insert.created_at)
        .execute(&mut *savepoint)
        .await;

        match result {
            Ok(_) => savepoint.commit().await.map_err(map_db_error),
            Err(e) => {
                savepoint.rollback().await.map_err(map_db_error)?;
                Err(map_db_error(e))
            }
        }
    }

    #[instrument(skip(self))]
    async fn commit(self: Box<Self>) -> RepoResult<()> {
        self.tx.commit().await.map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn rollback(self: Box<Self>) -> RepoResult<()> {
        self.tx.rollback().await.map_err(map_db_error)
    }
}
