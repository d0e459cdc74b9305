//! Error handling utilities for repositories

use expense_core::error::DomainError;
use expense_core::value_objects::ExpenseId;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Create a "request not found" error
pub fn request_not_found(id: ExpenseId) -> DomainError {
    DomainError::RequestNotFound(id)
}
