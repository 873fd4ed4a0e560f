use axum::response::{IntoResponse, Response};
use axum::{
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use std::any::Any;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use crate::controllers::{health, job::JobController};
use crate::infrastructure::config::Config;
use crate::infrastructure::engine::EngineHandle;
use crate::infrastructure::middleware::request_id_middleware;

/// Assemble the full application router. Shared with the e2e test harness so
/// tests exercise the exact production middleware stack.
pub fn build_router(job_controller: Arc<JobController>, engine: Arc<EngineHandle>) -> Router {
    // Job route: one synchronous synthesis call per request
    let job_routes = Router::new()
        .route("/run", post(JobController::run))
        .with_state(job_controller);

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(engine)
        .merge(job_routes)
        .layer(middleware::from_fn(request_id_middleware))
        // A panicking job must surface as the uniform error payload, never
        // take the worker down
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
}

/// Start the HTTP server with all routes configured
pub async fn start_http_server(
    config: Arc<Config>,
    job_controller: Arc<JobController>,
    engine: Arc<EngineHandle>,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_router(job_controller, engine);

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic".to_string()
    };

    tracing::error!(panic = %detail, "Job handler panicked");

    let body = serde_json::json!({
        "error": "Internal server error",
        "traceback": detail,
    });

    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}
