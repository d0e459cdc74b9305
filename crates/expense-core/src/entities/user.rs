//! Directory user - read-only identity consumed by the engine

use crate::error::DomainError;
use crate::value_objects::{ChatId, CompanyId, Role, UserId};

/// User entity as supplied by the directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub login: Option<String>,
    pub full_name: Option<String>,
    /// Delivery address on the notification channel
    pub chat_id: Option<ChatId>,
    pub role: Role,
    pub company_id: Option<CompanyId>,
}

impl User {
    /// Create a user with only the fields the engine needs
    pub fn new(id: UserId, role: Role, company_id: CompanyId) -> Self {
        Self {
            id,
            login: None,
            full_name: None,
            chat_id: None,
            role,
            company_id: Some(company_id),
        }
    }

    pub fn with_full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = Some(full_name.into());
        self
    }

    pub fn with_login(mut self, login: impl Into<String>) -> Self {
        self.login = Some(login.into());
        self
    }

    pub fn with_chat_id(mut self, chat_id: ChatId) -> Self {
        self.chat_id = Some(chat_id);
        self
    }

    /// Full name, falling back to login, then "Unknown"
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .or(self.login.as_deref())
            .unwrap_or("Unknown")
    }

    pub fn can_receive_notifications(&self) -> bool {
        self.chat_id.is_some()
    }

    /// Company the user belongs to; participants without one cannot act
    pub fn require_company(&self) -> Result<CompanyId, DomainError> {
        self.company_id.ok_or(DomainError::MissingCompany(self.id))
    }
}
