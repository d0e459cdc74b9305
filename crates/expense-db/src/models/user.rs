//! Directory user database model

use sqlx::FromRow;

/// Database model for the users table (read-only here)
#[derive(Debug, Clone, FromRow)]
pub struct UserModel {
    pub id: i64,
    pub login: Option<String>,
    pub full_name: Option<String>,
    pub telegram_id: Option<i64>,
    pub role: String,
    pub company_id: Option<i64>,
}
