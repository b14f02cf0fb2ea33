//! Health check endpoint handlers.
//!
//! Liveness probes and the legacy `/ping` route. None of them touches TMDB
//! or Telegram.

use axum::{Json, Router, extract::State, routing::get};

use crate::api::doc::HEALTH_TAG;
use crate::api::dto::{HealthResponse, HealthStatus};
use crate::state::AppState;

/// Creates health check routes.
///
/// # Routes
/// - `GET /ping` - Legacy liveness route, answers `Pong`
/// - `GET /health` - Status with version and producer
/// - `GET /health/live` - Liveness probe
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/ping", get(ping))
        .route("/health", get(health_check))
        .route("/health/live", get(liveness_check))
}

#[utoipa::path(
    get,
    path = "/ping",
    responses(
        (status = 200, description = "Service is up", body = String)
    ),
    tag = HEALTH_TAG
)]
pub async fn ping() -> &'static str {
    "Pong"
}

/// Basic health check endpoint.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service status", body = HealthResponse)
    ),
    tag = HEALTH_TAG
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: HealthStatus::Healthy,
        version: state.version.clone(),
        producer: state.dispatcher.producer().to_string(),
    })
}

#[utoipa::path(
    get,
    path = "/health/live",
    responses(
        (status = 200, description = "Service is alive", body = String)
    ),
    tag = HEALTH_TAG
)]
pub async fn liveness_check() -> &'static str {
    "alive"
}
