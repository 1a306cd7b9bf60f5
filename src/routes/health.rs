//! Health check endpoint.
//!
//! Liveness check for load balancers and orchestrators: answers 200 with the
//! service name, environment and current time whenever the process is up.

use axum::{
    extract::State,
    http::Uri,
    response::Redirect,
    routing::get,
    Json, Router,
};
use http::header::{HeaderValue, CACHE_CONTROL};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::{CACHE_CONTROL_HEALTH, HEALTH_PATH};
use crate::health::{HealthService, HealthStatus};
use crate::state::AppState;

/// Service health-check
///
/// Returns the current health information for the service.
#[utoipa::path(
    get,
    path = "/api/health/",
    tag = "Health",
    responses(
        (status = 200, description = "Service is running", body = HealthStatus)
    )
)]
pub async fn read_health(State(service): State<HealthService>) -> Json<HealthStatus> {
    Json(service.get_status())
}

/// `/api/health` without the trailing slash redirects to the canonical path.
async fn redirect_to_canonical(uri: Uri) -> Redirect {
    match uri.query() {
        Some(query) => Redirect::temporary(&format!("{HEALTH_PATH}?{query}")),
        None => Redirect::temporary(HEALTH_PATH),
    }
}

/// Health routes, relative to the API prefix. Never cached.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health/", get(read_health))
        .route("/health", get(redirect_to_canonical))
        .layer(SetResponseHeaderLayer::overriding(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_HEALTH),
        ))
}
