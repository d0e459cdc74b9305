//! Wiring for a deployed engine: PostgreSQL adapters and the Telegram channel

use std::sync::Arc;

use anyhow::Context;
use tracing::{debug, info};

use expense_common::telemetry::{try_init_tracing_with_config, TracingConfig, TracingError};
use expense_common::AppConfig;
use expense_db::{
    create_pool, DatabaseConfig, PgAuditLogRepository, PgExpenseStore, PgUserDirectory,
};
use expense_notify::{NotificationDispatcher, TelegramChannel};

use crate::services::{ServiceContext, ServiceContextBuilder};

/// Install the tracing preset for the configured environment
///
/// A subscriber installed earlier (e.g. by a test harness) is left in place;
/// any other failure is returned.
pub fn init_telemetry(config: &AppConfig) -> anyhow::Result<()> {
    let tracing_config = TracingConfig::for_environment(config.app.env);
    match try_init_tracing_with_config(&tracing_config) {
        Ok(()) => Ok(()),
        Err(TracingError::AlreadyInitialized) => {
            debug!("Tracing subscriber already installed, keeping it");
            Ok(())
        }
        Err(e) => Err(e).context("failed to initialize tracing"),
    }
}

/// Build a [`ServiceContext`] backed by PostgreSQL and Telegram
pub async fn build_context(config: &AppConfig) -> anyhow::Result<ServiceContext> {
    let pool = create_pool(&DatabaseConfig::from(&config.database))
        .await
        .context("failed to connect to PostgreSQL")?;

    let channel = build_channel(config)?;
    let notifier =
        NotificationDispatcher::new(Arc::new(channel)).with_enabled(config.notifications.enabled);

    let context = ServiceContextBuilder::new()
        .expense_store(Arc::new(PgExpenseStore::new(pool.clone())))
        .audit_repo(Arc::new(PgAuditLogRepository::new(pool.clone())))
        .user_directory(Arc::new(PgUserDirectory::new(pool)))
        .notifier(notifier)
        .default_currency(config.default_currency)
        .build()
        .map_err(|e| anyhow::anyhow!("failed to build service context: {e}"))?;

    info!(
        app = %config.app.name,
        notifications = config.notifications.enabled,
        default_currency = %config.default_currency,
        "Expense engine ready"
    );
    Ok(context)
}

fn build_channel(config: &AppConfig) -> anyhow::Result<TelegramChannel> {
    // an empty token is accepted while dispatch is disabled; nothing is sent
    let token = config
        .notifications
        .telegram_bot_token
        .clone()
        .unwrap_or_default();
    let channel = TelegramChannel::new(token);

    match config.notifications.telegram_api_url.as_deref() {
        Some(url) => channel
            .with_api_url(url)
            .context("invalid TELEGRAM_API_URL"),
        None => Ok(channel),
    }
}
