//! HTTP-level tests against the application factory.
//!
//! Each test builds its own router from a fixed set of variables and drives
//! it in-process with `tower::ServiceExt::oneshot`.
//!
//! Run with: cargo test --test health_api
use axum::body::{Body, Bytes};
use axum::http::{header, HeaderMap, Request, StatusCode};
use axum::Router;
use chrono::{DateTime, Utc};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use domu_backend::health::HealthStatus;
use domu_backend::{create_app, AppError, AppOptions, SettingsLoader};

fn app_with(vars: &[(&str, &str)]) -> Router {
    let loader = SettingsLoader::from_vars(vars.iter().copied());
    create_app(&loader, &AppOptions::default()).expect("application should build")
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, HeaderMap, Bytes) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, headers, body)
}

async fn get(app: Router, uri: &str) -> (StatusCode, HeaderMap, Bytes) {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

#[tokio::test]
async fn test_health_with_defaults() {
    let (status, headers, body) = get(app_with(&[]), "/api/health/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "application/json");

    let payload: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(payload["service"], "Domu Backend");
    assert_eq!(payload["status"], "healthy");
    assert_eq!(payload["environment"], "development");

    let timestamp = payload["timestamp"].as_str().expect("timestamp should be a string");
    let parsed: DateTime<Utc> = timestamp.parse().expect("timestamp should be ISO-8601");
    assert!(parsed <= Utc::now());
}

#[tokio::test]
async fn test_health_reports_configured_environment() {
    let app = app_with(&[("ENVIRONMENT", "production"), ("APP_NAME", "Domu API")]);

    for _ in 0..3 {
        let (status, _, body) = get(app.clone(), "/api/health/").await;
        assert_eq!(status, StatusCode::OK);

        let health: HealthStatus = serde_json::from_slice(&body).unwrap();
        assert_eq!(health.environment, "production");
        assert_eq!(health.service, "Domu API");
    }
}

#[tokio::test]
async fn test_repeated_health_calls_differ_only_in_timestamp() {
    let app = app_with(&[]);

    let (_, _, first) = get(app.clone(), "/api/health/").await;
    let (_, _, second) = get(app, "/api/health/").await;

    let first: HealthStatus = serde_json::from_slice(&first).unwrap();
    let second: HealthStatus = serde_json::from_slice(&second).unwrap();

    assert!(second.timestamp >= first.timestamp);
    assert_eq!(
        HealthStatus {
            timestamp: first.timestamp,
            ..second
        },
        first
    );
}

#[tokio::test]
async fn test_health_is_not_cacheable() {
    let (_, headers, _) = get(app_with(&[]), "/api/health/").await;
    assert_eq!(headers[header::CACHE_CONTROL], "no-store");
}

#[tokio::test]
async fn test_health_without_trailing_slash_redirects() {
    let (status, headers, _) = get(app_with(&[]), "/api/health").await;

    assert_eq!(status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(headers[header::LOCATION], "/api/health/");
}

#[tokio::test]
async fn test_redirect_keeps_query_string() {
    let (_, headers, _) = get(app_with(&[]), "/api/health?verbose=1").await;
    assert_eq!(headers[header::LOCATION], "/api/health/?verbose=1");
}

#[tokio::test]
async fn test_health_rejects_other_methods() {
    let request = Request::post("/api/health/").body(Body::empty()).unwrap();
    let (status, _, _) = send(app_with(&[]), request).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_unknown_route_returns_json_not_found() {
    let (status, _, body) = get(app_with(&[]), "/api/unknown").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    let payload: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(payload["detail"], "Not Found");
}

#[tokio::test]
async fn test_request_id_is_generated() {
    let (_, headers, _) = get(app_with(&[]), "/api/health/").await;

    let request_id = headers["x-request-id"].to_str().unwrap();
    assert!(uuid::Uuid::parse_str(request_id).is_ok());
}

#[tokio::test]
async fn test_request_id_is_propagated() {
    let request = Request::get("/api/health/")
        .header("x-request-id", "req-42")
        .body(Body::empty())
        .unwrap();
    let (_, headers, _) = send(app_with(&[]), request).await;

    assert_eq!(headers["x-request-id"], "req-42");
}

#[tokio::test]
async fn test_openapi_document_uses_settings() {
    let app = app_with(&[("APP_NAME", "Domu API"), ("VERSION", "1.2.3")]);
    let (status, _, body) = get(app, "/openapi.json").await;

    assert_eq!(status, StatusCode::OK);
    let doc: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(doc["info"]["title"], "Domu API");
    assert_eq!(doc["info"]["version"], "1.2.3");
    assert!(doc["paths"]["/api/health/"]["get"].is_object());
}

#[tokio::test]
async fn test_docs_enabled_by_default() {
    let app = app_with(&[]);

    let (status, headers, body) = get(app.clone(), "/redoc").await;
    assert_eq!(status, StatusCode::OK);
    assert!(headers[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/html"));
    // The page embeds the application's own OpenAPI document
    assert!(String::from_utf8_lossy(&body).contains("Domu Backend"));

    let (status, _, _) = get(app, "/docs/").await;
    assert_ne!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_docs_can_be_disabled() {
    let app = app_with(&[("ENABLE_DOCS", "false")]);

    for uri in ["/docs", "/docs/", "/redoc"] {
        let (status, _, _) = get(app.clone(), uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri} should not be served");
    }

    let (status, _, _) = get(app, "/openapi.json").await;
    assert_eq!(status, StatusCode::OK);
}

#[test]
fn test_invalid_docs_flag_fails_construction() {
    let loader = SettingsLoader::from_vars([("ENABLE_DOCS", "perhaps")]);
    let result = create_app(&loader, &AppOptions::default());
    assert!(matches!(result, Err(AppError::Config(_))));
}

#[test]
fn test_invalid_log_filter_fails_construction() {
    let loader = SettingsLoader::from_vars(Vec::<(String, String)>::new());
    let options = AppOptions {
        log_filter: Some("domu_backend=loud".to_string()),
    };
    assert!(matches!(
        create_app(&loader, &options),
        Err(AppError::Logging(_))
    ));
}

#[test]
fn test_factory_builds_independent_apps() {
    let loader = SettingsLoader::from_vars(Vec::<(String, String)>::new());
    assert!(create_app(&loader, &AppOptions::default()).is_ok());
    assert!(create_app(&loader, &AppOptions::default()).is_ok());
}
