//! Application factory.
//!
//! Loads settings, installs logging, wires the shared state and returns a
//! ready-to-serve router. Each call builds an independent router; only the
//! first logging installation in a process takes effect.

use axum::Router;

use crate::config::SettingsLoader;
use crate::error::AppError;
use crate::logging::{configure_logging, LoggingStatus};
use crate::routes::create_router;
use crate::state::AppState;

/// Startup options that do not belong to the settings snapshot.
#[derive(Debug, Clone, Default)]
pub struct AppOptions {
    /// Log filter override (e.g. "domu_backend=debug,tower_http=info")
    pub log_filter: Option<String>,
}

/// Create a fully wired application.
///
/// Fails before any route exists when the settings are malformed or the log
/// filter is invalid.
pub fn create_app(loader: &SettingsLoader, options: &AppOptions) -> Result<Router, AppError> {
    let settings = loader.get_settings()?;

    let logging = configure_logging(&settings, options.log_filter.as_deref())?;
    if logging == LoggingStatus::AlreadyInstalled {
        tracing::debug!("Logging already configured, keeping existing subscriber");
    }

    tracing::info!(
        app_name = %settings.app_name,
        environment = %settings.environment,
        version = %settings.version,
        docs_enabled = settings.enable_docs,
        "Loaded settings"
    );

    let state = AppState::new(settings);
    Ok(create_router(state))
}
