//! Health check handlers

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, AppState};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RootResponse {
    pub message: String,
}

/// `GET /api/`
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Therapist Scheduling API".to_string(),
    })
}

/// Liveness; never touches the database
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        message: "Scheduling API server is running".to_string(),
    })
}

/// Readiness check (includes database)
pub async fn readiness_check(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    let health = state.service.health().await;

    if health.is_healthy() {
        Ok(Json(HealthResponse {
            status: "ready".to_string(),
            message: format!("{} responded in {} ms", health.adapter_id, health.latency_ms),
        }))
    } else {
        Err(ApiError::ServiceUnavailable(
            health
                .message
                .unwrap_or_else(|| format!("{} is unavailable", health.adapter_id)),
        ))
    }
}
