use crate::infrastructure::engine::EngineHandle;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// Readiness is gated on the engine; a deferred initialization is attempted
/// here.
pub async fn health_ready(State(engine): State<Arc<EngineHandle>>) -> impl IntoResponse {
    match engine.initialize().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ready",
                "engine": "initialized"
            })),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "not_ready",
                    "engine": "unavailable"
                })),
            )
        }
    }
}
