//! Domu Backend: HTTP service scaffold.
//!
//! An application factory ([`create_app`]) wires a settings snapshot, the
//! log subscriber and the API router (currently a single health-check
//! endpoint) into a ready-to-serve `axum::Router`.

pub mod app;
pub mod config;
pub mod error;
pub mod health;
pub mod http;
pub mod logging;
pub mod middleware;
pub mod routes;
pub mod state;

pub use app::{create_app, AppOptions};
pub use config::{Settings, SettingsLoader};
pub use error::AppError;
