//! HTTP routes.
//!
//! API routers live under `/api`, grouped by concern; documentation routes
//! sit at the root. Unmatched paths get a JSON 404. Request tracing is
//! enabled via middleware that gives every request its own ID and span.

pub mod docs;
pub mod health;

use axum::{middleware, Router};

use crate::config::API_PREFIX;
use crate::error::ApiError;
use crate::middleware::request_id_layer;
use crate::state::AppState;

/// Public API router, mountable by the application.
pub fn api_router() -> Router<AppState> {
    Router::new().nest(API_PREFIX, health::router())
}

async fn not_found() -> ApiError {
    ApiError::NotFound
}

/// Creates the Axum router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(api_router())
        .merge(docs::router(&state))
        .fallback(not_found)
        .with_state(state)
        // Request ID middleware - creates root span with request_id for correlation
        .layer(middleware::from_fn(request_id_layer))
}
