use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::config::ConfigError;
use crate::http::ServerError;
use crate::logging::LoggingError;

/// Failures that stop the application from starting.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Logging setup failed: {0}")]
    Logging(#[from] LoggingError),

    #[error("Server error: {0}")]
    Server(#[from] ServerError),
}

/// Errors rendered to HTTP clients.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Not Found")]
    NotFound,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
        };

        let body = serde_json::json!({ "detail": self.to_string() });

        (status, Json(body)).into_response()
    }
}
