//! # expense-common
//!
//! Shared utilities: environment configuration and tracing setup.

pub mod config;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use config::{
    AppConfig, AppSettings, ConfigError, DatabaseSettings, Environment, NotificationSettings,
};
pub use telemetry::{try_init_tracing_with_config, TracingConfig, TracingError};
