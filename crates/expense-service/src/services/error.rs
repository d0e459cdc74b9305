//! Service layer error types
//!
//! Provides a unified error type for all service operations.

use expense_core::{DomainError, ValidationError};
use std::fmt;

/// Generic text shown to the actor when an infrastructure fault occurred
pub const INTERNAL_ERROR_MESSAGE: &str = "Произошла внутренняя ошибка. Попробуйте позже.";

/// Service layer error type
#[derive(Debug)]
pub enum ServiceError {
    /// Domain rule violation
    Domain(DomainError),

    /// Malformed amount or comment
    InvalidInput(ValidationError),

    /// Validation error
    Validation(String),

    /// Resource not found
    NotFound { resource: &'static str, id: String },

    /// Permission denied
    PermissionDenied { permission: String },

    /// Internal error
    Internal(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain(e) => write!(f, "{e}"),
            Self::InvalidInput(e) => write!(f, "Invalid input: {e}"),
            Self::NotFound { resource, id } => write!(f, "{resource} not found: {id}"),
            Self::PermissionDenied { permission } => {
                write!(f, "Missing required permission: {permission}")
            }
            Self::Validation(msg) => write!(f, "Validation error: {msg}"),
            Self::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Domain(e) => Some(e),
            Self::InvalidInput(e) => Some(e),
            _ => None,
        }
    }
}

impl ServiceError {
    /// Create a not found error
    pub fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            id: id.into(),
        }
    }

    /// Create a permission denied error
    pub fn permission_denied(permission: impl Into<String>) -> Self {
        Self::PermissionDenied {
            permission: permission.into(),
        }
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Get the error code for logs and trigger-layer responses
    pub fn error_code(&self) -> &str {
        match self {
            Self::Domain(e) => e.code(),
            Self::InvalidInput(_) | Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::PermissionDenied { .. } => "MISSING_PERMISSIONS",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// The request was already processed or no longer exists
    pub fn is_stale_state(&self) -> bool {
        matches!(self, Self::Domain(e) if e.is_stale_state())
    }

    /// Storage or wiring fault rather than something the actor did
    pub fn is_infrastructure(&self) -> bool {
        match self {
            Self::Domain(e) => e.is_infrastructure(),
            Self::Internal(_) => true,
            _ => false,
        }
    }

    /// Russian text for the actor who drove the operation
    ///
    /// Infrastructure faults collapse to one generic message; the details
    /// belong in the logs.
    pub fn user_message(&self) -> String {
        if self.is_infrastructure() {
            return INTERNAL_ERROR_MESSAGE.to_string();
        }

        match self {
            Self::Domain(e) => domain_message(e),
            Self::InvalidInput(e) => e.to_string(),
            Self::Validation(msg) => msg.clone(),
            Self::NotFound { .. } => "Запрошенные данные не найдены.".to_string(),
            Self::PermissionDenied { .. } => "Недостаточно прав для этого действия.".to_string(),
            Self::Internal(_) => INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }
}

fn domain_message(err: &DomainError) -> String {
    match err {
        DomainError::StaleState { id, actual, .. } => {
            format!("Заявка #{id} уже обработана (статус: {}).", actual.label())
        }
        DomainError::InvalidTransition { from, .. } => {
            format!("Заявка уже обработана (статус: {}).", from.label())
        }
        DomainError::RequestNotFound(id) => format!("Заявка #{id} не найдена."),
        DomainError::UserNotFound(_) => "Пользователь не найден.".to_string(),
        DomainError::ValidationError(msg) => msg.clone(),
        DomainError::UnknownCurrency(code) => format!("Неизвестная валюта: {code}"),
        DomainError::RoleNotPermitted { .. } => "Недостаточно прав для этого действия.".to_string(),
        DomainError::CompanyMismatch { .. } => "Заявка относится к другой компании.".to_string(),
        DomainError::MissingCompany(_) => "Пользователь не привязан к компании.".to_string(),
        _ => INTERNAL_ERROR_MESSAGE.to_string(),
    }
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl From<ValidationError> for ServiceError {
    fn from(err: ValidationError) -> Self {
        Self::InvalidInput(err)
    }
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(errors: validator::ValidationErrors) -> Self {
        // first message wins; the actor fixes one field at a time
        let message = errors
            .field_errors()
            .into_values()
            .flat_map(|errs| errs.iter())
            .find_map(|e| e.message.as_ref().map(ToString::to_string))
            .unwrap_or_else(|| errors.to_string());
        Self::Validation(message)
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
