//! Response DTOs
//!
//! All response DTOs implement `Serialize`. Amounts are serialized as
//! strings so no precision is lost on the way out.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::error;

use expense_core::entities::{ApprovalEvent, ExpenseRequest};
use expense_core::value_objects::{
    ApprovalAction, CompanyId, Currency, ExpenseId, ExpenseStatus, Role, UserId,
};

use crate::services::error::ServiceResult;

/// Expense request as shown to the trigger layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseRequestResponse {
    pub id: ExpenseId,
    pub requester_id: UserId,
    pub company_id: CompanyId,
    pub description: String,
    pub amount: Decimal,
    pub currency: Currency,
    pub status: ExpenseStatus,
    pub status_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub director_id: Option<UserId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cashier_id: Option<UserId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub director_comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issued_amount: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issued_at: Option<DateTime<Utc>>,
}

impl From<&ExpenseRequest> for ExpenseRequestResponse {
    fn from(request: &ExpenseRequest) -> Self {
        Self {
            id: request.id,
            requester_id: request.requester_id,
            company_id: request.company_id,
            description: request.description.clone(),
            amount: request.amount,
            currency: request.currency,
            status: request.status,
            status_label: request.status.label(),
            director_id: request.director_id,
            cashier_id: request.cashier_id,
            director_comment: request.director_comment.clone(),
            issued_amount: request.issued_amount,
            created_at: request.created_at,
            approved_at: request.approved_at,
            issued_at: request.issued_at,
        }
    }
}

/// One line of the approval ledger
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApprovalEventResponse {
    pub actor_id: UserId,
    pub actor_role: Role,
    pub action: ApprovalAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&ApprovalEvent> for ApprovalEventResponse {
    fn from(event: &ApprovalEvent) -> Self {
        Self {
            actor_id: event.actor_id,
            actor_role: event.actor_role,
            action: event.action,
            comment: event.comment.clone(),
            created_at: event.created_at,
        }
    }
}

/// A request together with its approval ledger
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseDetailsResponse {
    pub request: ExpenseRequestResponse,
    pub events: Vec<ApprovalEventResponse>,
}

/// History row; `amount` is what was actually paid (or will be)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub id: ExpenseId,
    pub requester_id: UserId,
    pub description: String,
    pub amount: Decimal,
    pub requested_amount: Decimal,
    pub currency: Currency,
    pub status: ExpenseStatus,
    pub occurred_at: DateTime<Utc>,
}

impl From<&ExpenseRequest> for HistoryEntry {
    fn from(request: &ExpenseRequest) -> Self {
        Self {
            id: request.id,
            requester_id: request.requester_id,
            description: request.description.clone(),
            amount: request.effective_amount(),
            requested_amount: request.amount,
            currency: request.currency,
            status: request.status,
            occurred_at: request
                .issued_at
                .or(request.approved_at)
                .unwrap_or(request.created_at),
        }
    }
}

/// Result shape handed back to the trigger layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransitionOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<ExpenseRequestResponse>,
}

impl TransitionOutcome {
    pub fn succeeded(request: &ExpenseRequest, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            request: Some(request.into()),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            request: None,
        }
    }

    /// Translate an engine result
    ///
    /// Infrastructure faults are logged in full here and reach the actor
    /// only as a generic message.
    pub fn from_result(result: ServiceResult<ExpenseRequest>, success_message: &str) -> Self {
        match result {
            Ok(request) => Self::succeeded(&request, success_message),
            Err(e) => {
                if e.is_infrastructure() {
                    error!(code = e.error_code(), error = %e, "Transition failed");
                }
                Self::failed(e.user_message())
            }
        }
    }
}
