//! Audit log service
//!
//! Writes go through the caller's unit of work so the entry commits with the
//! transition it describes. A failed write is logged and swallowed: a missing
//! audit line must never cost the transition itself.

use rust_decimal::Decimal;
use serde_json::{json, Value as JsonValue};
use tracing::{error, instrument};

use expense_core::entities::{AuditLogEntry, ExpenseRequest, NewAuditEntry, User};
use expense_core::traits::ExpenseUnitOfWork;
use expense_core::value_objects::{AuditAction, ExpenseId, ExpenseStatus};
use expense_core::EXPENSE_REQUESTS_TABLE;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Amounts are stored in payloads as fixed two-decimal strings
fn amount_value(amount: Decimal) -> JsonValue {
    JsonValue::String(format!("{amount:.2}"))
}

/// Audit log service
pub struct AuditLogService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuditLogService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Append an entry; returns whether it was written
    #[instrument(skip(self, uow, entry), fields(record_id = entry.record_id, action = %entry.action))]
    pub async fn record(&self, uow: &mut dyn ExpenseUnitOfWork, entry: NewAuditEntry) -> bool {
        match uow.append_audit(&entry).await {
            Ok(()) => true,
            Err(e) => {
                error!(
                    table = %entry.table_name,
                    record_id = entry.record_id,
                    actor_id = ?entry.actor_id,
                    action = %entry.action,
                    payload = %entry.payload,
                    error = %e,
                    "Failed to write audit entry"
                );
                false
            }
        }
    }

    async fn record_expense(
        &self,
        uow: &mut dyn ExpenseUnitOfWork,
        request_id: ExpenseId,
        actor: &User,
        action: AuditAction,
        payload: JsonValue,
    ) -> bool {
        let entry = NewAuditEntry::new(
            EXPENSE_REQUESTS_TABLE,
            request_id.into_inner(),
            Some(actor.id),
            action.as_str(),
            payload,
        );
        self.record(uow, entry).await
    }

    /// `insert`: a request was created
    pub async fn record_created(
        &self,
        uow: &mut dyn ExpenseUnitOfWork,
        request: &ExpenseRequest,
        actor: &User,
    ) -> bool {
        let payload = json!({
            "old_status": JsonValue::Null,
            "new_status": request.status.as_str(),
            "requester_id": request.requester_id,
            "amount": amount_value(request.amount),
            "currency": request.currency.code(),
            "description": request.description,
        });
        self.record_expense(uow, request.id, actor, AuditAction::Insert, payload)
            .await
    }

    /// `approved`
    pub async fn record_approved(
        &self,
        uow: &mut dyn ExpenseUnitOfWork,
        request: &ExpenseRequest,
        actor: &User,
        old_status: ExpenseStatus,
    ) -> bool {
        let payload = json!({
            "old_status": old_status.as_str(),
            "new_status": request.status.as_str(),
            "comment": request.director_comment,
        });
        self.record_expense(uow, request.id, actor, AuditAction::Approved, payload)
            .await
    }

    /// `declined`
    pub async fn record_declined(
        &self,
        uow: &mut dyn ExpenseUnitOfWork,
        request: &ExpenseRequest,
        actor: &User,
        old_status: ExpenseStatus,
    ) -> bool {
        let payload = json!({
            "old_status": old_status.as_str(),
            "new_status": request.status.as_str(),
            "reason": request.director_comment,
        });
        self.record_expense(uow, request.id, actor, AuditAction::Declined, payload)
            .await
    }

    /// `issued`; carries original vs. issued amount when they differ
    ///
    /// `old_status` is `None` for a direct issue, which has no prior state.
    pub async fn record_issued(
        &self,
        uow: &mut dyn ExpenseUnitOfWork,
        request: &ExpenseRequest,
        actor: &User,
        old_status: Option<ExpenseStatus>,
        comment: Option<&str>,
    ) -> bool {
        let mut payload = json!({
            "old_status": old_status.map(ExpenseStatus::as_str),
            "new_status": request.status.as_str(),
            "comment": comment,
        });

        if let (Some(issued), Some(fields)) = (
            request.issued_amount.filter(|_| request.has_issued_delta()),
            payload.as_object_mut(),
        ) {
            fields.insert("original_amount".into(), amount_value(request.amount));
            fields.insert("issued_amount".into(), amount_value(issued));
        }

        self.record_expense(uow, request.id, actor, AuditAction::Issued, payload)
            .await
    }

    /// `delete`
    pub async fn record_deleted(
        &self,
        uow: &mut dyn ExpenseUnitOfWork,
        request: &ExpenseRequest,
        actor: &User,
        reason: Option<&str>,
    ) -> bool {
        let payload = json!({
            "old_status": request.status.as_str(),
            "new_status": JsonValue::Null,
            "amount": amount_value(request.amount),
            "currency": request.currency.code(),
            "reason": reason,
        });
        self.record_expense(uow, request.id, actor, AuditAction::Delete, payload)
            .await
    }

    /// Audit entries of one request, oldest first
    #[instrument(skip(self))]
    pub async fn trail(&self, request_id: ExpenseId) -> ServiceResult<Vec<AuditLogEntry>> {
        Ok(self
            .ctx
            .audit_repo()
            .find_by_record(EXPENSE_REQUESTS_TABLE, request_id.into_inner())
            .await?)
    }
}
