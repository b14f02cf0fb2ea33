//! Jellyseerr webhook payloads (JSON body, looked up by TMDB id).

use serde_json::Value;

use super::adapter::{PayloadAdapter, Producer, RequiredFields, event_name, json_type};
use super::body::RawBody;
use super::error::RejectReason;
use super::outcome::AdapterOutcome;
use crate::models::{MediaKind, NormalizedEvent};

const RELEVANT_EVENT: &str = "MEDIA_AVAILABLE";
const TMDB_ID_FIELD: &str = "media.tmdbId";

#[derive(Debug, Default)]
pub struct JellyseerrAdapter;

/// Jellyseerr's default template renders `{{media_tmdbid}}` as a string,
/// custom templates may emit a number. Both are accepted.
fn parse_tmdb_id(value: &Value) -> Result<u64, RejectReason> {
    let invalid = |reason: String| RejectReason::InvalidField {
        field: TMDB_ID_FIELD,
        reason,
    };

    let id = match value {
        Value::Number(n) => n
            .as_u64()
            .ok_or_else(|| invalid(format!("expected a positive integer, got {}", n)))?,
        Value::String(s) => s
            .trim()
            .parse::<u64>()
            .map_err(|_| invalid(format!("expected a numeric id, got '{}'", s)))?,
        other => {
            return Err(invalid(format!(
                "expected a number or numeric string, got {}",
                json_type(other)
            )));
        }
    };

    if id == 0 {
        return Err(invalid("id must be greater than 0".to_string()));
    }

    Ok(id)
}

impl JellyseerrAdapter {
    fn extract(body: &RawBody) -> Result<AdapterOutcome, RejectReason> {
        let root = body.json_object()?;

        let event = event_name(&root, "notification_type");
        if event != Some(RELEVANT_EVENT) {
            return Ok(AdapterOutcome::Ignored {
                event: event.map(str::to_string),
            });
        }

        let mut fields = RequiredFields::new(&root);
        let tmdb_id = fields.value(TMDB_ID_FIELD);
        let media_type = fields.text("media.media_type")?;
        fields.finish()?;

        let (Some(tmdb_id), Some(media_type)) = (tmdb_id, media_type) else {
            return Err(RejectReason::MissingFields(vec![
                TMDB_ID_FIELD,
                "media.media_type",
            ]));
        };
        let tmdb_id = parse_tmdb_id(tmdb_id)?;

        let kind = match media_type.to_lowercase().as_str() {
            "movie" => MediaKind::Movie,
            "tvshow" => MediaKind::Series,
            _ => return Err(RejectReason::UnsupportedMediaKind(media_type.to_string())),
        };

        Ok(AdapterOutcome::Event(NormalizedEvent::by_tmdb_id(tmdb_id, kind)))
    }
}

impl PayloadAdapter for JellyseerrAdapter {
    fn producer(&self) -> Producer {
        Producer::Jellyseerr
    }

    fn adapt(&self, body: &RawBody) -> AdapterOutcome {
        Self::extract(body).unwrap_or_else(AdapterOutcome::Rejected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn available(media: Value) -> RawBody {
        RawBody::json(
            json!({
                "notification_type": "MEDIA_AVAILABLE",
                "subject": "Inception (2010)",
                "media": media
            })
            .to_string(),
        )
    }

    #[test]
    fn test_numeric_string_id() {
        let outcome = JellyseerrAdapter.adapt(&available(json!({
            "media_type": "movie",
            "tmdbId": "27205"
        })));
        assert_eq!(
            outcome,
            AdapterOutcome::Event(NormalizedEvent::by_tmdb_id(27205, MediaKind::Movie))
        );
    }

    #[test]
    fn test_number_id_and_tvshow() {
        let outcome = JellyseerrAdapter.adapt(&available(json!({
            "media_type": "TvShow",
            "tmdbId": 1396
        })));
        assert_eq!(
            outcome,
            AdapterOutcome::Event(NormalizedEvent::by_tmdb_id(1396, MediaKind::Series))
        );
    }

    #[test]
    fn test_invalid_ids() {
        for id in [json!("abc"), json!(-4), json!(1.5), json!(0), json!(["1"])] {
            let outcome = JellyseerrAdapter.adapt(&available(json!({
                "media_type": "movie",
                "tmdbId": id
            })));
            assert!(
                matches!(
                    outcome,
                    AdapterOutcome::Rejected(RejectReason::InvalidField {
                        field: "media.tmdbId",
                        ..
                    })
                ),
                "id {} should be invalid, got {:?}",
                id,
                outcome
            );
        }
    }

    #[test]
    fn test_missing_media() {
        let body = RawBody::json(json!({ "notification_type": "MEDIA_AVAILABLE" }).to_string());
        assert_eq!(
            JellyseerrAdapter.adapt(&body),
            AdapterOutcome::Rejected(RejectReason::MissingFields(vec![
                "media.tmdbId",
                "media.media_type"
            ]))
        );
    }

    #[test]
    fn test_other_notifications_are_ignored() {
        let body = RawBody::json(
            json!({ "notification_type": "MEDIA_PENDING", "media": {} }).to_string(),
        );
        assert_eq!(
            JellyseerrAdapter.adapt(&body),
            AdapterOutcome::Ignored {
                event: Some("MEDIA_PENDING".to_string())
            }
        );
    }

    #[test]
    fn test_unsupported_media_type() {
        let outcome = JellyseerrAdapter.adapt(&available(json!({
            "media_type": "music",
            "tmdbId": 1
        })));
        assert_eq!(
            outcome,
            AdapterOutcome::Rejected(RejectReason::UnsupportedMediaKind("music".to_string()))
        );
    }
}
