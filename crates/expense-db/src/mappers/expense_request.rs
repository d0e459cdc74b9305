//! Expense request entity <-> model mapper

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use expense_core::entities::{ExpenseRequest, NewExpenseRequest};
use expense_core::error::DomainError;
use expense_core::value_objects::{CompanyId, ExpenseId, UserId};

use crate::models::ExpenseRequestModel;

/// Convert ExpenseRequestModel to ExpenseRequest entity
impl TryFrom<ExpenseRequestModel> for ExpenseRequest {
    type Error = DomainError;

    fn try_from(model: ExpenseRequestModel) -> Result<Self, Self::Error> {
        Ok(ExpenseRequest {
            id: ExpenseId::new(model.id),
            requester_id: UserId::new(model.requester_id),
            company_id: CompanyId::new(model.company_id),
            description: model.description.unwrap_or_default(),
            amount: model.amount,
            currency: model.currency.parse()?,
            status: model.status.parse()?,
            director_id: model.director_id.map(UserId::new),
            cashier_id: model.cashier_id.map(UserId::new),
            director_comment: model.director_comment,
            issued_amount: model.issued_amount,
            created_at: model.created_at,
            approved_at: model.approved_at,
            issued_at: model.issued_at,
            updated_at: model.updated_at,
        })
    }
}

/// Values bound when inserting a new request
pub struct ExpenseInsert<'a> {
    pub requester_id: i64,
    pub company_id: i64,
    pub description: &'a str,
    pub amount: Decimal,
    pub currency: &'static str,
    pub status: &'static str,
    pub cashier_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub approved_at: Option<DateTime<Utc>>,
    pub issued_at: Option<DateTime<Utc>>,
}

impl<'a> ExpenseInsert<'a> {
    pub fn new(request: &'a NewExpenseRequest) -> Self {
        Self {
            requester_id: request.requester_id.into_inner(),
            company_id: request.company_id.into_inner(),
            description: &request.description,
            amount: request.amount,
            currency: request.currency.code(),
            status: request.status.as_str(),
            cashier_id: request.cashier_id.map(UserId::into_inner),
            created_at: request.created_at,
            approved_at: request.approved_at,
            issued_at: request.issued_at,
        }
    }
}

/// Mutable columns written back after a transition
///
/// `amount`, `currency`, `requester_id` and `company_id` are never updated.
pub struct ExpenseUpdate<'a> {
    pub id: i64,
    pub status: &'static str,
    pub director_id: Option<i64>,
    pub cashier_id: Option<i64>,
    pub director_comment: Option<&'a str>,
    pub issued_amount: Option<Decimal>,
    pub approved_at: Option<DateTime<Utc>>,
    pub issued_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> ExpenseUpdate<'a> {
    pub fn new(request: &'a ExpenseRequest) -> Self {
        Self {
            id: request.id.into_inner(),
            status: request.status.as_str(),
            director_id: request.director_id.map(UserId::into_inner),
            cashier_id: request.cashier_id.map(UserId::into_inner),
            director_comment: request.director_comment.as_deref(),
            issued_amount: request.issued_amount,
            approved_at: request.approved_at,
            issued_at: request.issued_at,
            updated_at: request.updated_at,
        }
    }
}
