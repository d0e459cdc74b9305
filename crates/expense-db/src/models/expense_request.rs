//! Expense request database model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

/// Database model for expense_requests table
#[derive(Debug, Clone, FromRow)]
pub struct ExpenseRequestModel {
    pub id: i64,
    pub requester_id: i64,
    pub company_id: i64,
    pub description: Option<String>,
    pub amount: Decimal,
    /// char(3), may come back space padded
    pub currency: String,
    /// PostgreSQL enum selected as text
    pub status: String,
    pub director_id: Option<i64>,
    pub cashier_id: Option<i64>,
    pub director_comment: Option<String>,
    pub issued_amount: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub approved_at: Option<DateTime<Utc>>,
    pub issued_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}
