//! OpenAPI document and interactive API docs.
//!
//! `/openapi.json` is always served. Swagger UI (`/docs`) and ReDoc
//! (`/redoc`) are mounted only when docs are enabled in the settings.

use axum::{extract::State, routing::get, Json, Router};
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::{Config, SwaggerUi};

use crate::config::{Settings, DOCS_URL, OPENAPI_URL, REDOC_URL};
use crate::health::HealthStatus;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(crate::routes::health::read_health),
    components(schemas(HealthStatus)),
    tags(
        (name = "Health", description = "Service health monitoring endpoints")
    )
)]
pub struct ApiDoc;

/// OpenAPI document titled and versioned from the settings.
pub fn openapi(settings: &Settings) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.info.title = settings.app_name.clone();
    doc.info.version = settings.version.clone();
    doc
}

async fn openapi_json(State(state): State<AppState>) -> Json<utoipa::openapi::OpenApi> {
    Json(state.openapi.as_ref().clone())
}

/// Documentation routes for the application state.
pub fn router(state: &AppState) -> Router<AppState> {
    let router = Router::new().route(OPENAPI_URL, get(openapi_json));

    if !state.settings.enable_docs {
        return router;
    }

    router
        .merge(Redoc::with_url(REDOC_URL, state.openapi.as_ref().clone()))
        .merge(SwaggerUi::new(DOCS_URL).config(Config::from(OPENAPI_URL)))
}
