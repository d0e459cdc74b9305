//! Read-only views over expense requests

use tracing::instrument;

use expense_core::entities::AuditLogEntry;
use expense_core::value_objects::{CompanyId, ExpenseId, ExpenseStatus};

use crate::dto::{
    ApprovalEventResponse, ExpenseDetailsResponse, ExpenseRequestResponse, HistoryEntry,
};

use super::audit::AuditLogService;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Rows returned by `history_for_company` when no limit is given
pub const DEFAULT_HISTORY_LIMIT: i64 = 20;

/// Expense query service
pub struct ExpenseQueryService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ExpenseQueryService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// A request with its approval events, oldest first
    #[instrument(skip(self))]
    pub async fn get(&self, request_id: ExpenseId) -> ServiceResult<ExpenseDetailsResponse> {
        let request = self
            .ctx
            .expense_store()
            .find_by_id(request_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Expense request", request_id.to_string()))?;

        let events = self
            .ctx
            .expense_store()
            .find_approval_events(request_id)
            .await?;

        Ok(ExpenseDetailsResponse {
            request: ExpenseRequestResponse::from(&request),
            events: events.iter().map(ApprovalEventResponse::from).collect(),
        })
    }

    /// Requests waiting for the director, newest first
    #[instrument(skip(self))]
    pub async fn pending_for_company(
        &self,
        company_id: CompanyId,
    ) -> ServiceResult<Vec<ExpenseRequestResponse>> {
        self.list(company_id, &[ExpenseStatus::Pending], None).await
    }

    /// Approved requests waiting for the cashier, most recently approved first
    #[instrument(skip(self))]
    pub async fn approved_for_company(
        &self,
        company_id: CompanyId,
    ) -> ServiceResult<Vec<ExpenseRequestResponse>> {
        self.list(company_id, &[ExpenseStatus::Approved], None).await
    }

    /// Approved and issued requests, newest activity first
    #[instrument(skip(self))]
    pub async fn history_for_company(
        &self,
        company_id: CompanyId,
        limit: Option<i64>,
    ) -> ServiceResult<Vec<HistoryEntry>> {
        let limit = limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
        if limit <= 0 {
            return Err(ServiceError::validation("limit must be positive"));
        }

        let requests = self
            .ctx
            .expense_store()
            .find_by_company(company_id, &ExpenseStatus::history_statuses(), Some(limit))
            .await?;

        Ok(requests.iter().map(HistoryEntry::from).collect())
    }

    /// Audit entries of a request, oldest first
    pub async fn audit_trail(&self, request_id: ExpenseId) -> ServiceResult<Vec<AuditLogEntry>> {
        AuditLogService::new(self.ctx).trail(request_id).await
    }

    async fn list(
        &self,
        company_id: CompanyId,
        statuses: &[ExpenseStatus],
        limit: Option<i64>,
    ) -> ServiceResult<Vec<ExpenseRequestResponse>> {
        let requests = self
            .ctx
            .expense_store()
            .find_by_company(company_id, statuses, limit)
            .await?;

        Ok(requests.iter().map(ExpenseRequestResponse::from).collect())
    }
}
