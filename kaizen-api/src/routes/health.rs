//! Health check endpoints.
//!
//! - /health/ping - simple liveness check
//! - /health/live - process alive check
//! - /health/ready - backing spreadsheet reachability

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

use crate::state::AppState;

// ============================================================================
// TYPES
// ============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[derive(utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub uptime_seconds: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upstream_latency_ms: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[derive(utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

// ============================================================================
// HANDLERS
// ============================================================================

/// GET /health/ping - Simple pong response
#[utoipa::path(
    get,
    path = "/health/ping",
    tag = "Health",
    responses((status = 200, description = "Service is responding", body = String)),
)]
pub async fn ping() -> impl IntoResponse {
    (StatusCode::OK, "pong")
}

/// GET /health/live - Process liveness check
#[utoipa::path(
    get,
    path = "/health/live",
    tag = "Health",
    responses((status = 200, description = "Process is alive", body = HealthResponse)),
)]
pub async fn liveness(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let response = HealthResponse {
        status: HealthStatus::Healthy,
        message: None,
        uptime_seconds: state.start_time.elapsed().as_secs(),
        upstream_latency_ms: None,
    };
    (StatusCode::OK, Json(response))
}

/// GET /health/ready - Readiness check (backing store reachability)
#[utoipa::path(
    get,
    path = "/health/ready",
    tag = "Health",
    responses(
        (status = 200, description = "Service is ready", body = HealthResponse),
        (status = 503, description = "Backing store unreachable", body = HealthResponse),
    ),
)]
pub async fn readiness(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let started = Instant::now();
    let uptime_seconds = state.start_time.elapsed().as_secs();

    match state.repo.list().await {
        Ok(_) => {
            let response = HealthResponse {
                status: HealthStatus::Healthy,
                message: None,
                uptime_seconds,
                upstream_latency_ms: Some(started.elapsed().as_millis() as u64),
            };
            (StatusCode::OK, Json(response))
        }
        Err(e) => {
            let response = HealthResponse {
                status: HealthStatus::Unhealthy,
                message: Some(e.to_string()),
                uptime_seconds,
                upstream_latency_ms: None,
            };
            (StatusCode::SERVICE_UNAVAILABLE, Json(response))
        }
    }
}

// ============================================================================
// ROUTER SETUP
// ============================================================================

/// Create the health routes router.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/ping", get(ping))
        .route("/live", get(liveness))
        .route("/ready", get(readiness))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response_serialization() {
        let response = HealthResponse {
            status: HealthStatus::Healthy,
            message: None,
            uptime_seconds: 42,
            upstream_latency_ms: Some(12),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["uptime_seconds"], 42);
        assert!(json.get("message").is_none());
    }
}
