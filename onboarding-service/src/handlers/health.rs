use crate::startup::AppState;
use axum::{extract::State, Json};
use serde_json::{json, Value};
use service_core::error::AppError;

/// Root liveness probe kept for the onboarding frontend.
pub async fn root() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": "Backend is running"
    }))
}

/// Health check endpoint for Docker/K8s liveness probes.
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "onboarding-service",
        "version": env!("CARGO_PKG_VERSION"),
        "model_configured": state.gateway.is_configured()
    }))
}

pub async fn not_found() -> AppError {
    AppError::NotFound(anyhow::anyhow!("Route not found"))
}
