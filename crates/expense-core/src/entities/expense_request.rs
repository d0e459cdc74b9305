//! Expense request entity - the row every lifecycle transition mutates

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::error::DomainError;
use crate::value_objects::{CompanyId, Currency, ExpenseId, ExpenseStatus, UserId};

/// Expense request entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseRequest {
    pub id: ExpenseId,
    pub requester_id: UserId,
    pub company_id: CompanyId,
    pub description: String,
    /// Amount asked for; never rewritten after creation
    pub amount: Decimal,
    pub currency: Currency,
    pub status: ExpenseStatus,
    pub director_id: Option<UserId>,
    pub cashier_id: Option<UserId>,
    pub director_comment: Option<String>,
    /// Set only when the cashier paid out something other than `amount`
    pub issued_amount: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub approved_at: Option<DateTime<Utc>>,
    pub issued_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl ExpenseRequest {
    /// Amount that actually changed hands (or will, once issued)
    pub fn effective_amount(&self) -> Decimal {
        self.issued_amount.unwrap_or(self.amount)
    }

    /// Check if the cashier issued a different amount than requested
    pub fn has_issued_delta(&self) -> bool {
        self.issued_amount.is_some_and(|issued| issued != self.amount)
    }

    /// Fail with `StaleState` unless the request is currently `expected`
    pub fn ensure_status(&self, expected: ExpenseStatus) -> Result<(), DomainError> {
        if self.status == expected {
            Ok(())
        } else {
            Err(DomainError::StaleState {
                id: self.id,
                expected,
                actual: self.status,
            })
        }
    }

    /// pending -> approved
    pub fn approve(
        &mut self,
        director_id: UserId,
        comment: Option<String>,
        at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        self.ensure_status(ExpenseStatus::Pending)?;
        self.advance(ExpenseStatus::Approved, at)?;
        self.director_id = Some(director_id);
        self.director_comment = comment;
        self.approved_at = Some(at);
        Ok(())
    }

    /// pending -> declined
    pub fn decline(
        &mut self,
        director_id: UserId,
        reason: String,
        at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        self.ensure_status(ExpenseStatus::Pending)?;
        self.advance(ExpenseStatus::Declined, at)?;
        self.director_id = Some(director_id);
        self.director_comment = Some(reason);
        Ok(())
    }

    /// approved -> issued
    ///
    /// `issued_amount` is recorded only when it differs from `amount`.
    pub fn issue(
        &mut self,
        cashier_id: UserId,
        issued_amount: Option<Decimal>,
        at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        self.ensure_status(ExpenseStatus::Approved)?;
        self.advance(ExpenseStatus::Issued, at)?;
        self.cashier_id = Some(cashier_id);
        self.issued_amount = issued_amount.filter(|issued| *issued != self.amount);
        self.issued_at = Some(at);
        Ok(())
    }

    fn advance(&mut self, to: ExpenseStatus, at: DateTime<Utc>) -> Result<(), DomainError> {
        if !self.status.can_transition_to(to) {
            return Err(DomainError::InvalidTransition {
                from: self.status,
                to,
            });
        }
        self.status = to;
        self.updated_at = at;
        Ok(())
    }
}

/// Values for inserting a new expense request; the store assigns the id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExpenseRequest {
    pub requester_id: UserId,
    pub company_id: CompanyId,
    pub description: String,
    pub amount: Decimal,
    pub currency: Currency,
    pub status: ExpenseStatus,
    pub cashier_id: Option<UserId>,
    pub created_at: DateTime<Utc>,
    pub approved_at: Option<DateTime<Utc>>,
    pub issued_at: Option<DateTime<Utc>>,
}

impl NewExpenseRequest {
    /// A request awaiting the director's decision
    pub fn pending(
        requester_id: UserId,
        company_id: CompanyId,
        description: String,
        amount: Decimal,
        currency: Currency,
    ) -> Self {
        Self {
            requester_id,
            company_id,
            description,
            amount,
            currency,
            status: ExpenseStatus::Pending,
            cashier_id: None,
            created_at: Utc::now(),
            approved_at: None,
            issued_at: None,
        }
    }

    /// A request the cashier paid out without prior approval
    ///
    /// `approved_at` and `issued_at` carry the same instant.
    pub fn issued_directly(
        recipient_id: UserId,
        cashier_id: UserId,
        company_id: CompanyId,
        description: String,
        amount: Decimal,
        currency: Currency,
    ) -> Self {
        let now = Utc::now();
        Self {
            requester_id: recipient_id,
            company_id,
            description,
            amount,
            currency,
            status: ExpenseStatus::Issued,
            cashier_id: Some(cashier_id),
            created_at: now,
            approved_at: Some(now),
            issued_at: Some(now),
        }
    }

    /// Materialize the entity once the store has assigned an id
    pub fn into_request(self, id: ExpenseId) -> ExpenseRequest {
        ExpenseRequest {
            id,
            requester_id: self.requester_id,
            company_id: self.company_id,
            description: self.description,
            amount: self.amount,
            currency: self.currency,
            status: self.status,
            director_id: None,
            cashier_id: self.cashier_id,
            director_comment: None,
            issued_amount: None,
            created_at: self.created_at,
            approved_at: self.approved_at,
            issued_at: self.issued_at,
            updated_at: self.created_at,
        }
    }
}
