//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::{ApprovalAction, CompanyId, ExpenseId, ExpenseStatus, Role, UserId};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Expense request not found: {0}")]
    RequestNotFound(ExpenseId),

    #[error("User not found: {0}")]
    UserNotFound(UserId),

    // =========================================================================
    // State Errors
    // =========================================================================
    /// The locked row is not in the status the operation requires.
    /// A concurrent transition committed first.
    #[error("Expense request {id} is {actual}, expected {expected}")]
    StaleState {
        id: ExpenseId,
        expected: ExpenseStatus,
        actual: ExpenseStatus,
    },

    #[error("Transition from {from} to {to} is not allowed")]
    InvalidTransition {
        from: ExpenseStatus,
        to: ExpenseStatus,
    },

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    #[error("Unknown expense status: {0}")]
    UnknownStatus(String),

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Role {role} cannot {action}")]
    RoleNotPermitted { role: Role, action: ApprovalAction },

    #[error("User {user_id} belongs to company {actual:?}, request belongs to {expected}")]
    CompanyMismatch {
        user_id: UserId,
        expected: CompanyId,
        actual: Option<CompanyId>,
    },

    #[error("User {0} has no company")]
    MissingCompany(UserId),

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// A role value in the directory is outside the closed set
    #[error("Unknown role in directory: {0}")]
    UnknownRole(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for logs and trigger-layer responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::RequestNotFound(_) => "UNKNOWN_REQUEST",
            Self::UserNotFound(_) => "UNKNOWN_USER",

            // State
            Self::StaleState { .. } => "STALE_STATE",
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::UnknownCurrency(_) => "UNKNOWN_CURRENCY",
            Self::UnknownStatus(_) => "UNKNOWN_STATUS",

            // Authorization
            Self::RoleNotPermitted { .. } => "ROLE_NOT_PERMITTED",
            Self::CompanyMismatch { .. } => "COMPANY_MISMATCH",
            Self::MissingCompany(_) => "MISSING_COMPANY",

            // Configuration
            Self::UnknownRole(_) => "UNKNOWN_ROLE",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::RequestNotFound(_) | Self::UserNotFound(_))
    }

    /// Check if the operation's precondition on the request failed
    ///
    /// Covers a status mismatch under lock and a request that no longer exists.
    pub fn is_stale_state(&self) -> bool {
        matches!(
            self,
            Self::StaleState { .. } | Self::InvalidTransition { .. } | Self::RequestNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_) | Self::UnknownCurrency(_) | Self::UnknownStatus(_)
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            Self::RoleNotPermitted { .. } | Self::CompanyMismatch { .. } | Self::MissingCompany(_)
        )
    }

    /// Check if this error comes from infrastructure or misconfiguration
    pub fn is_infrastructure(&self) -> bool {
        matches!(
            self,
            Self::DatabaseError(_) | Self::InternalError(_) | Self::UnknownRole(_)
        )
    }
}
