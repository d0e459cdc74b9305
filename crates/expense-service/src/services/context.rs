//! Service context - dependency container for services
//!
//! Holds the collaborators the lifecycle engine talks to. Each is a trait
//! object, so tests can hand in in-memory fakes.

use std::sync::Arc;

use expense_core::traits::{AuditLogRepository, ExpenseStore, UserDirectory};
use expense_core::value_objects::Currency;
use expense_notify::NotificationDispatcher;

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    expense_store: Arc<dyn ExpenseStore>,
    audit_repo: Arc<dyn AuditLogRepository>,
    user_directory: Arc<dyn UserDirectory>,
    notifier: NotificationDispatcher,
    default_currency: Currency,
}

impl ServiceContext {
    pub fn new(
        expense_store: Arc<dyn ExpenseStore>,
        audit_repo: Arc<dyn AuditLogRepository>,
        user_directory: Arc<dyn UserDirectory>,
        notifier: NotificationDispatcher,
    ) -> Self {
        Self {
            expense_store,
            audit_repo,
            user_directory,
            notifier,
            default_currency: Currency::default(),
        }
    }

    pub fn with_default_currency(mut self, currency: Currency) -> Self {
        self.default_currency = currency;
        self
    }

    /// Get the expense store
    pub fn expense_store(&self) -> &dyn ExpenseStore {
        self.expense_store.as_ref()
    }

    /// Get the audit log (read side)
    pub fn audit_repo(&self) -> &dyn AuditLogRepository {
        self.audit_repo.as_ref()
    }

    /// Get the user directory
    pub fn user_directory(&self) -> &dyn UserDirectory {
        self.user_directory.as_ref()
    }

    /// Get the notification dispatcher
    pub fn notifier(&self) -> &NotificationDispatcher {
        &self.notifier
    }

    /// Currency used when a trigger does not name one
    pub fn default_currency(&self) -> Currency {
        self.default_currency
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("notifier", &self.notifier)
            .field("default_currency", &self.default_currency)
            .finish()
    }
}

/// Builder for creating ServiceContext
#[derive(Default)]
pub struct ServiceContextBuilder {
    expense_store: Option<Arc<dyn ExpenseStore>>,
    audit_repo: Option<Arc<dyn AuditLogRepository>>,
    user_directory: Option<Arc<dyn UserDirectory>>,
    notifier: Option<NotificationDispatcher>,
    default_currency: Option<Currency>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expense_store(mut self, store: Arc<dyn ExpenseStore>) -> Self {
        self.expense_store = Some(store);
        self
    }

    pub fn audit_repo(mut self, repo: Arc<dyn AuditLogRepository>) -> Self {
        self.audit_repo = Some(repo);
        self
    }

    pub fn user_directory(mut self, directory: Arc<dyn UserDirectory>) -> Self {
        self.user_directory = Some(directory);
        self
    }

    pub fn notifier(mut self, notifier: NotificationDispatcher) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn default_currency(mut self, currency: Currency) -> Self {
        self.default_currency = Some(currency);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        let context = ServiceContext::new(
            self.expense_store
                .ok_or_else(|| ServiceError::validation("expense_store is required"))?,
            self.audit_repo
                .ok_or_else(|| ServiceError::validation("audit_repo is required"))?,
            self.user_directory
                .ok_or_else(|| ServiceError::validation("user_directory is required"))?,
            self.notifier
                .ok_or_else(|| ServiceError::validation("notifier is required"))?,
        );

        Ok(match self.default_currency {
            Some(currency) => context.with_default_currency(currency),
            None => context,
        })
    }
}
