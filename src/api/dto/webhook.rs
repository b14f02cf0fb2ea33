//! Webhook response DTO.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::webhook::DispatchOutcome;

/// Body returned for every dispatched webhook, whatever the status code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "status": "accepted",
    "message": "Film 'Inception' announced"
}))]
pub struct WebhookResponse {
    /// `accepted`, `ignored`, `bad_request`, `not_found` or `upstream_error`
    pub status: String,
    pub message: String,
    /// Machine-readable rejection code, only for `bad_request`
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "MISSING_FIELDS")]
    pub code: Option<String>,
}

impl From<&DispatchOutcome> for WebhookResponse {
    fn from(outcome: &DispatchOutcome) -> Self {
        let mut code = None;
        let message = match outcome {
            // delivery failures are logged, not reported to the producer
            DispatchOutcome::Accepted { title, kind, .. } => {
                format!("{} '{}' announced", kind.label(), title)
            }
            DispatchOutcome::Ignored { event: Some(event) } => {
                format!("Event '{}' ignored", event)
            }
            DispatchOutcome::Ignored { event: None } => "Event ignored".to_string(),
            DispatchOutcome::BadRequest(reason) => {
                code = Some(reason.code().to_string());
                reason.to_string()
            }
            DispatchOutcome::NotFound(key) => format!("No TMDB match for {}", key),
            DispatchOutcome::UpstreamError(_) => "Metadata lookup failed".to_string(),
        };

        Self {
            status: outcome.label().to_string(),
            message,
            code,
        }
    }
}
