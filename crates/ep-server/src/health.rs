//! Health checks
//!
//! Liveness is a plain `OK`; readiness reports whether the assignment store
//! answers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use ep_api::AppState;
use ep_services::StorageStatus;
use serde::Serialize;

/// Health check status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Readiness report
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub version: String,
    pub storage: StorageStatus,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl HealthReport {
    pub fn from_storage(storage: StorageStatus) -> Self {
        let status = if storage.reachable {
            HealthStatus::Healthy
        } else {
            HealthStatus::Unhealthy
        };

        Self {
            status,
            version: env!("CARGO_PKG_VERSION").to_string(),
            storage,
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn http_status(&self) -> StatusCode {
        match self.status {
            HealthStatus::Healthy => StatusCode::OK,
            HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

/// Simple liveness check
pub async fn liveness() -> &'static str {
    "OK"
}

/// Readiness check
pub async fn readiness(State(state): State<AppState>) -> (StatusCode, Json<HealthReport>) {
    let report = HealthReport::from_storage(state.service.storage_status().await);
    let status = report.http_status();
    (status, Json(report))
}
