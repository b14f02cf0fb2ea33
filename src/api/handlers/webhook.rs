//! Webhook endpoint.

use axum::{
    Json, Router,
    extract::State,
    response::{IntoResponse, Response},
    routing::post,
};

use crate::api::doc::WEBHOOK_TAG;
use crate::api::dto::{ErrorResponse, WebhookResponse};
use crate::state::AppState;
use crate::webhook::{DispatchOutcome, RawBody};

pub fn webhook_routes() -> Router<AppState> {
    Router::new().route("/webhook", post(receive_webhook))
}

impl IntoResponse for DispatchOutcome {
    fn into_response(self) -> Response {
        (self.status_code(), Json(WebhookResponse::from(&self))).into_response()
    }
}

/// Receive a "new media" webhook from the configured producer.
///
/// Plex posts `multipart/form-data` with a JSON `payload` field (and an
/// ignored `thumb` image); Jellyfin, Emby and Jellyseerr post JSON.
#[utoipa::path(
    post,
    path = "/webhook",
    request_body(
        content = serde_json::Value,
        description = "Producer-specific payload; Plex sends it as multipart/form-data",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Media announced, or event ignored", body = WebhookResponse),
        (status = 400, description = "Payload missing, malformed or incomplete", body = WebhookResponse),
        (status = 404, description = "No TMDB match", body = WebhookResponse),
        (status = 413, description = "Body over the configured limit", body = ErrorResponse),
        (status = 500, description = "Metadata lookup failed", body = WebhookResponse)
    ),
    tag = WEBHOOK_TAG
)]
pub async fn receive_webhook(State(state): State<AppState>, body: RawBody) -> DispatchOutcome {
    state.dispatcher.dispatch(&body).await
}
