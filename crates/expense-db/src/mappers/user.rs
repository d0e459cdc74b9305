//! Directory user model -> entity mapper

use expense_core::entities::User;
use expense_core::error::DomainError;
use expense_core::value_objects::{ChatId, CompanyId, UserId};

use crate::models::UserModel;

/// Convert UserModel to User entity
///
/// Fails with `UnknownRole` when the directory holds a role outside the closed set.
impl TryFrom<UserModel> for User {
    type Error = DomainError;

    fn try_from(model: UserModel) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId::new(model.id),
            login: model.login,
            full_name: model.full_name,
            chat_id: model.telegram_id.map(ChatId::new),
            role: model.role.parse()?,
            company_id: model.company_id.map(CompanyId::new),
        })
    }
}
