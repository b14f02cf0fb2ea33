//! Results of adapting and dispatching a webhook.

use axum::http::StatusCode;

use super::error::RejectReason;
use crate::models::{LookupKey, MediaKind, NormalizedEvent};

/// What an adapter made of a producer payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdapterOutcome {
    /// Relevant event, validated and normalized
    Event(NormalizedEvent),
    /// Well-formed but not a "new item" event; `event` is whatever the
    /// producer sent, if anything
    Ignored { event: Option<String> },
    Rejected(RejectReason),
}

impl From<RejectReason> for AdapterOutcome {
    fn from(reason: RejectReason) -> Self {
        AdapterOutcome::Rejected(reason)
    }
}

/// Final result of one webhook request, mapped 1:1 onto an HTTP status.
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    /// Metadata found and an announcement attempted. `notified` is false
    /// when delivery failed; the request is acknowledged either way.
    Accepted {
        title: String,
        kind: MediaKind,
        notified: bool,
    },
    Ignored { event: Option<String> },
    BadRequest(RejectReason),
    NotFound(LookupKey),
    /// Metadata service failure. The detail is for logs only.
    UpstreamError(String),
}

impl DispatchOutcome {
    pub fn status_code(&self) -> StatusCode {
        match self {
            DispatchOutcome::Accepted { .. } | DispatchOutcome::Ignored { .. } => StatusCode::OK,
            DispatchOutcome::BadRequest(_) => StatusCode::BAD_REQUEST,
            DispatchOutcome::NotFound(_) => StatusCode::NOT_FOUND,
            DispatchOutcome::UpstreamError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short status word for response bodies and log fields
    pub fn label(&self) -> &'static str {
        match self {
            DispatchOutcome::Accepted { .. } => "accepted",
            DispatchOutcome::Ignored { .. } => "ignored",
            DispatchOutcome::BadRequest(_) => "bad_request",
            DispatchOutcome::NotFound(_) => "not_found",
            DispatchOutcome::UpstreamError(_) => "upstream_error",
        }
    }
}
