//! Reasons a producer payload is refused.

use thiserror::Error;

/// Why an inbound webhook was answered with 400.
///
/// Each variant is a distinct, loggable failure; none of them carries
/// internal error details.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RejectReason {
    #[error("payload is missing")]
    MissingPayload,

    #[error("payload is not a valid JSON object")]
    MalformedPayload,

    /// Plex only: the `payload` field is present but is not valid JSON
    #[error("nested payload is not a valid JSON object")]
    MalformedNestedPayload,

    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("invalid field {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("unsupported media type: {0}")]
    UnsupportedMediaKind(String),

    #[error("unsupported producer: {0}")]
    UnsupportedProducer(String),
}

impl RejectReason {
    /// Stable machine-readable code used in responses and logs
    pub fn code(&self) -> &'static str {
        match self {
            RejectReason::MissingPayload => "MISSING_PAYLOAD",
            RejectReason::MalformedPayload => "MALFORMED_PAYLOAD",
            RejectReason::MalformedNestedPayload => "MALFORMED_NESTED_PAYLOAD",
            RejectReason::MissingFields(_) => "MISSING_FIELDS",
            RejectReason::InvalidField { .. } => "INVALID_FIELD",
            RejectReason::UnsupportedMediaKind(_) => "UNSUPPORTED_MEDIA_KIND",
            RejectReason::UnsupportedProducer(_) => "UNSUPPORTED_PRODUCER",
        }
    }
}
