//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file if present).

use serde::Deserialize;
use std::env;
use std::str::FromStr;

use expense_core::Currency;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseSettings,
    pub notifications: NotificationSettings,
    /// Currency applied when a trigger does not name one
    #[serde(default)]
    pub default_currency: Currency,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default)]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "production" => Ok(Self::Production),
            "staging" => Ok(Self::Staging),
            "development" => Ok(Self::Development),
            other => Err(ConfigError::InvalidValue("APP_ENV", other.to_string())),
        }
    }
}

/// Database connection settings
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_acquire_timeout_secs")]
    pub acquire_timeout_secs: u64,
}

/// Outbound notification settings
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationSettings {
    /// When false, dispatch is logged and skipped
    #[serde(default = "default_notifications_enabled")]
    pub enabled: bool,
    /// Required while notifications are enabled
    pub telegram_bot_token: Option<String>,
    /// Override for a self-hosted Bot API server
    pub telegram_api_url: Option<String>,
}

// Default value functions
fn default_app_name() -> String {
    "expense-engine".to_string()
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_acquire_timeout_secs() -> u64 {
    10
}

fn default_notifications_enabled() -> bool {
    true
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if a required variable is missing or a value does not parse
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key/value source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let notifications_enabled =
            parse_or(&lookup, "NOTIFICATIONS_ENABLED", default_notifications_enabled)?;
        let telegram_bot_token = lookup("TELEGRAM_BOT_TOKEN").filter(|t| !t.trim().is_empty());
        if notifications_enabled && telegram_bot_token.is_none() {
            return Err(ConfigError::MissingVar("TELEGRAM_BOT_TOKEN"));
        }

        Ok(Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env: parse_or(&lookup, "APP_ENV", Environment::default)?,
            },
            database: DatabaseSettings {
                url: lookup("DATABASE_URL").ok_or(ConfigError::MissingVar("DATABASE_URL"))?,
                max_connections: parse_or(
                    &lookup,
                    "DATABASE_MAX_CONNECTIONS",
                    default_max_connections,
                )?,
                min_connections: parse_or(
                    &lookup,
                    "DATABASE_MIN_CONNECTIONS",
                    default_min_connections,
                )?,
                acquire_timeout_secs: parse_or(
                    &lookup,
                    "DATABASE_ACQUIRE_TIMEOUT_SECS",
                    default_acquire_timeout_secs,
                )?,
            },
            notifications: NotificationSettings {
                enabled: notifications_enabled,
                telegram_bot_token,
                telegram_api_url: lookup("TELEGRAM_API_URL"),
            },
            default_currency: parse_or(&lookup, "DEFAULT_CURRENCY", Currency::default)?,
        })
    }
}

/// Parse `key` if set, otherwise fall back to `default`
fn parse_or<F, T, D>(lookup: &F, key: &'static str, default: D) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    D: FnOnce() -> T,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key, raw)),
        None => Ok(default()),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
