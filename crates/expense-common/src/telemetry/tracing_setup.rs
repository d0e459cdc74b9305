//! Tracing and logging setup
//!
//! `RUST_LOG` wins when set. Otherwise the filter is built from the preset:
//! the engine crates log at the preset level while the database driver and
//! the Bot API client are held at `warn`, since every swallowed delivery or
//! audit failure is already logged by the engine with its request id.

use tracing::{Level, Subscriber};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

use crate::config::Environment;

/// Dependencies whose own logging is capped at `warn` unless `RUST_LOG` says otherwise
const NOISY_DEPENDENCIES: &[&str] = &["sqlx", "teloxide", "reqwest", "hyper", "hyper_util"];

/// Tracing configuration options
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Level for the engine crates when `RUST_LOG` is not set
    pub level: Level,
    /// One JSON object per event, for log shipping
    pub json: bool,
    /// Emit span open/close events (each transition runs in one span)
    pub span_events: bool,
    pub file_line: bool,
    pub thread_names: bool,
    /// Cap driver and HTTP client logs at `warn`
    pub quiet_dependencies: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            json: false,
            span_events: false,
            file_line: true,
            thread_names: false,
            quiet_dependencies: true,
        }
    }
}

impl TracingConfig {
    /// Debug logging with span events, dependencies still quiet
    #[must_use]
    pub fn development() -> Self {
        Self {
            level: Level::DEBUG,
            span_events: true,
            thread_names: true,
            ..Self::default()
        }
    }

    /// JSON at info level
    #[must_use]
    pub fn production() -> Self {
        Self {
            json: true,
            file_line: false,
            ..Self::default()
        }
    }

    /// Pick the preset matching the deployment environment
    #[must_use]
    pub fn for_environment(env: Environment) -> Self {
        match env {
            Environment::Development => Self::development(),
            Environment::Staging => Self::default(),
            Environment::Production => Self::production(),
        }
    }

    /// Filter directives used when `RUST_LOG` is absent, e.g. `info,sqlx=warn,...`
    pub fn default_directives(&self) -> String {
        let level = self.level.as_str().to_ascii_lowercase();
        if !self.quiet_dependencies {
            return level;
        }

        let mut directives = level;
        for dependency in NOISY_DEPENDENCIES {
            directives.push_str(&format!(",{dependency}=warn"));
        }
        directives
    }

    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.default_directives()))
    }

    fn fmt_layer<S>(&self) -> Box<dyn Layer<S> + Send + Sync + 'static>
    where
        S: Subscriber + for<'span> LookupSpan<'span>,
    {
        let span_events = if self.span_events {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        };

        let layer = fmt::layer()
            .with_file(self.file_line)
            .with_line_number(self.file_line)
            .with_thread_names(self.thread_names)
            .with_span_events(span_events);

        if self.json {
            layer.json().boxed()
        } else {
            layer.boxed()
        }
    }
}

/// Install the global subscriber for `config`
///
/// Fails, without panicking, when a subscriber is already installed (a test
/// harness, or an embedding application that set up its own).
pub fn try_init_tracing_with_config(config: &TracingConfig) -> Result<(), TracingError> {
    tracing_subscriber::registry()
        .with(config.env_filter())
        .with(config.fmt_layer())
        .try_init()
        .map_err(|e| {
            if tracing::dispatcher::has_been_set() {
                TracingError::AlreadyInitialized
            } else {
                // e.g. another `log` logger owns the log facade
                TracingError::Init(e.to_string())
            }
        })
}

/// Tracing initialization errors
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum TracingError {
    #[error("Tracing subscriber already initialized")]
    AlreadyInitialized,

    #[error("Failed to install tracing subscriber: {0}")]
    Init(String),
}
