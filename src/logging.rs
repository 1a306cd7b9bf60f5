//! Process-wide log subscriber setup.
//!
//! The log level follows the environment name: production runs at INFO,
//! everything else at DEBUG. An explicit filter (CLI flag, then `RUST_LOG`)
//! replaces the environment-derived default.

use tracing::Level;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, Settings};

/// Outcome of [`configure_logging`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoggingStatus {
    /// This call installed the global subscriber
    Installed,
    /// A subscriber was already in place; nothing changed
    AlreadyInstalled,
}

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Invalid log filter {filter:?}: {source}")]
    InvalidFilter {
        filter: String,
        #[source]
        source: ParseError,
    },
}

/// Level selected for the given settings.
pub fn log_level(settings: &Settings) -> Level {
    if settings.is_production() {
        Level::INFO
    } else {
        Level::DEBUG
    }
}

/// Resolve the filter directive with priority: explicit > `RUST_LOG` > environment default.
pub fn resolve_filter(
    settings: &Settings,
    explicit: Option<&str>,
    rust_log: Option<String>,
) -> String {
    let non_blank = |filter: &String| !filter.trim().is_empty();
    explicit
        .map(str::to_string)
        .filter(non_blank)
        .or_else(|| rust_log.filter(non_blank))
        .unwrap_or_else(|| log_level(settings).as_str().to_ascii_lowercase())
}

/// Install the global subscriber once.
///
/// Later calls leave the existing subscriber untouched and report
/// [`LoggingStatus::AlreadyInstalled`]. A malformed filter is an error even
/// when a subscriber is already installed.
pub fn configure_logging(
    settings: &Settings,
    explicit_filter: Option<&str>,
) -> Result<LoggingStatus, LoggingError> {
    let filter = resolve_filter(settings, explicit_filter, std::env::var("RUST_LOG").ok());
    let env_filter =
        EnvFilter::try_new(&filter).map_err(|source| LoggingError::InvalidFilter {
            filter: filter.clone(),
            source,
        })?;

    let (text_layer, json_layer) = match settings.log_format {
        LogFormat::Text => (Some(tracing_subscriber::fmt::layer()), None),
        LogFormat::Json => (None, Some(tracing_subscriber::fmt::layer().json())),
    };

    let installed = tracing_subscriber::registry()
        .with(env_filter)
        .with(text_layer)
        .with(json_layer)
        .try_init();

    match installed {
        Ok(()) => {
            tracing::debug!(
                filter = %filter,
                format = ?settings.log_format,
                environment = %settings.environment,
                "Logging configured"
            );
            Ok(LoggingStatus::Installed)
        }
        Err(_) => Ok(LoggingStatus::AlreadyInstalled),
    }
}
