//! Service health status.
//!
//! `HealthService` is a liveness report: it never checks downstream
//! dependencies, so the status is always "healthy" while the process can
//! answer at all.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::Settings;

/// Status reported while the process is able to respond
pub const STATUS_HEALTHY: &str = "healthy";

/// Point-in-time liveness record returned by the health endpoint.
///
/// ```json
/// {
///   "service": "Domu Backend",
///   "status": "healthy",
///   "timestamp": "2025-03-10T15:30:45.123456789Z",
///   "environment": "development"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthStatus {
    /// Name of the running service
    pub service: String,
    /// Semantic health indicator
    pub status: String,
    /// Timestamp of the health evaluation in UTC
    pub timestamp: DateTime<Utc>,
    /// Application runtime environment
    pub environment: String,
}

/// Builds health records from an injected settings snapshot.
#[derive(Debug, Clone)]
pub struct HealthService {
    settings: Arc<Settings>,
}

impl HealthService {
    pub fn new(settings: Arc<Settings>) -> Self {
        Self { settings }
    }

    /// Current health status; only the timestamp varies between calls.
    pub fn get_status(&self) -> HealthStatus {
        HealthStatus {
            service: self.settings.app_name.clone(),
            status: STATUS_HEALTHY.to_string(),
            timestamp: Utc::now(),
            environment: self.settings.environment.clone(),
        }
    }
}
