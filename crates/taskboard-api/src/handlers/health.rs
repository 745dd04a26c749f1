//! Liveness and health check endpoints

use axum::{extract::State, Json};

use crate::{
    models::{HealthResponse, RootResponse},
    state::AppState,
};

/// Root liveness message
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "API is running", body = RootResponse)
    )
)]
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Task Management API is running".to_string(),
    })
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime: state.uptime_seconds(),
        storage: state.storage.to_string(),
    })
}
