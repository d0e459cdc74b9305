//! Request DTOs
//!
//! All request DTOs implement `Deserialize` and `Validate`. Amounts arrive
//! already parsed (see `expense_core::validate_amount`) and are range-checked
//! by the engine.

use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use expense_core::value_objects::{Currency, UserId};

/// New expense request from an employee
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateExpenseRequest {
    /// Trimmed and checked by the engine, 3 to 1000 characters
    #[validate(length(max = 1000, message = "Описание слишком длинное (максимум 1000 символов)."))]
    pub description: String,

    pub amount: Decimal,

    /// Falls back to the configured default currency
    pub currency: Option<Currency>,
}

impl CreateExpenseRequest {
    pub fn new(description: impl Into<String>, amount: Decimal) -> Self {
        Self {
            description: description.into(),
            amount,
            currency: None,
        }
    }

    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = Some(currency);
        self
    }
}

/// Cash handed out by a cashier without prior approval
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DirectIssueRequest {
    /// Who received the money; may be the cashier
    pub recipient_id: UserId,

    #[validate(length(
        min = 1,
        max = 1000,
        message = "Назначение должно содержать от 1 до 1000 символов."
    ))]
    pub description: String,

    pub amount: Decimal,

    pub currency: Option<Currency>,

    pub comment: Option<String>,
}

impl DirectIssueRequest {
    pub fn new(recipient_id: UserId, description: impl Into<String>, amount: Decimal) -> Self {
        Self {
            recipient_id,
            description: description.into(),
            amount,
            currency: None,
            comment: None,
        }
    }

    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = Some(currency);
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}
