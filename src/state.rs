//! Shared application state for request handlers.

use std::sync::Arc;

use axum::extract::FromRef;
use utoipa::openapi::OpenApi;

use crate::config::Settings;
use crate::health::HealthService;
use crate::routes::docs;

/// Shared application state, cloneable across handlers via Arc-wrapped fields.
///
/// Holds the settings snapshot the application was built from, the health
/// service wired to that snapshot, and the OpenAPI document describing the
/// mounted routes.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub health: HealthService,
    pub openapi: Arc<OpenApi>,
}

impl AppState {
    /// Wires every component from a single settings snapshot.
    pub fn new(settings: Arc<Settings>) -> Self {
        Self {
            health: HealthService::new(Arc::clone(&settings)),
            openapi: Arc::new(docs::openapi(&settings)),
            settings,
        }
    }
}

impl FromRef<AppState> for HealthService {
    fn from_ref(state: &AppState) -> Self {
        state.health.clone()
    }
}
