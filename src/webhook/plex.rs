//! Plex Media Server webhooks.
//!
//! Plex posts `multipart/form-data` with a `payload` text part holding a JSON
//! document (and sometimes a `thumb` image part). The same field is accepted
//! from url-encoded forms and from a JSON object body.

use serde_json::Value;

use super::adapter::{PayloadAdapter, Producer, RequiredFields, event_name};
use super::body::{RawBody, parse_object};
use super::error::RejectReason;
use super::outcome::AdapterOutcome;
use crate::models::{MediaKind, NormalizedEvent};

const PAYLOAD_FIELD: &str = "payload";
const RELEVANT_EVENT: &str = "library.new";

#[derive(Debug, Default)]
pub struct PlexAdapter;

impl PlexAdapter {
    /// First stage: pull the `payload` string out of the outer body.
    fn payload_field(body: &RawBody) -> Result<String, RejectReason> {
        let field = match body {
            RawBody::Form(fields) => fields.get(PAYLOAD_FIELD).cloned(),
            RawBody::Json(_) => match body.json_object()?.remove(PAYLOAD_FIELD) {
                None | Some(Value::Null) => None,
                Some(Value::String(s)) => Some(s),
                Some(_) => return Err(RejectReason::MalformedPayload),
            },
        };

        field
            .filter(|s| !s.trim().is_empty())
            .ok_or(RejectReason::MissingPayload)
    }

    fn extract(body: &RawBody) -> Result<AdapterOutcome, RejectReason> {
        let payload = Self::payload_field(body)?;
        // Second stage: the field itself is JSON
        let root = parse_object(payload.as_bytes(), RejectReason::MalformedNestedPayload)?;

        let event = event_name(&root, "event");
        if event != Some(RELEVANT_EVENT) {
            return Ok(AdapterOutcome::Ignored {
                event: event.map(str::to_string),
            });
        }

        let mut fields = RequiredFields::new(&root);
        let title = fields.text("Metadata.title")?;
        let media_type = fields.text("Metadata.type")?;
        fields.finish()?;

        let (Some(title), Some(media_type)) = (title, media_type) else {
            return Err(RejectReason::MissingFields(vec!["Metadata.title", "Metadata.type"]));
        };

        let kind = match media_type {
            "movie" => MediaKind::Movie,
            "show" => MediaKind::Series,
            other => return Err(RejectReason::UnsupportedMediaKind(other.to_string())),
        };

        Ok(AdapterOutcome::Event(NormalizedEvent::by_title(title, kind)))
    }
}

impl PayloadAdapter for PlexAdapter {
    fn producer(&self) -> Producer {
        Producer::Plex
    }

    fn adapt(&self, body: &RawBody) -> AdapterOutcome {
        Self::extract(body).unwrap_or_else(AdapterOutcome::Rejected)
    }
}
