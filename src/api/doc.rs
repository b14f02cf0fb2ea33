use axum::{Json, Router, routing::get};
use utoipa::OpenApi;

use crate::state::AppState;

pub const HEALTH_TAG: &str = "Health";
pub const WEBHOOK_TAG: &str = "Webhook";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Marquee",
        description = "Announces new media from Plex, Jellyfin/Emby and Jellyseerr on Telegram",
    ),
    paths(
        crate::api::handlers::webhook::receive_webhook,
        crate::api::handlers::health::ping,
        crate::api::handlers::health::health_check,
        crate::api::handlers::health::liveness_check,
    ),
    components(
        schemas(
            crate::api::dto::ErrorResponse,
            crate::api::dto::WebhookResponse,
            crate::api::dto::HealthResponse,
            crate::api::dto::HealthStatus,
            crate::models::MediaKind,
        )
    ),
    tags(
        (name = WEBHOOK_TAG, description = "Media server webhook receiver"),
        (name = HEALTH_TAG, description = "Health check endpoints"),
    )
)]
pub struct ApiDoc;

pub fn openapi_routes() -> Router<AppState> {
    Router::new().route(
        "/api-docs/openapi.json",
        get(|| async { Json(ApiDoc::openapi()) }),
    )
}
