//! Transport-agnostic view of an inbound webhook body.

use std::collections::HashMap;

use axum::body::Bytes;
use serde_json::{Map, Value};

use super::error::RejectReason;

/// What the HTTP layer hands to the adapters.
///
/// Form variants (multipart or url-encoded) are flattened to their text
/// fields; binary parts such as Plex's `thumb` are dropped before this point.
#[derive(Debug, Clone)]
pub enum RawBody {
    Json(Bytes),
    Form(HashMap<String, String>),
}

impl RawBody {
    pub fn json(bytes: impl Into<Bytes>) -> Self {
        RawBody::Json(bytes.into())
    }

    pub fn form<K, V>(fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        RawBody::Form(
            fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Decode the body as a JSON object.
    ///
    /// Empty bodies and `null` count as a missing payload; anything that is
    /// not an object (including form bodies) is malformed.
    pub fn json_object(&self) -> Result<Map<String, Value>, RejectReason> {
        match self {
            RawBody::Json(bytes) => parse_object(bytes, RejectReason::MalformedPayload),
            RawBody::Form(fields) if fields.is_empty() => Err(RejectReason::MissingPayload),
            RawBody::Form(_) => Err(RejectReason::MalformedPayload),
        }
    }
}

/// Parse `raw` as a JSON object, reporting structural failures as `malformed`.
pub(crate) fn parse_object(
    raw: &[u8],
    malformed: RejectReason,
) -> Result<Map<String, Value>, RejectReason> {
    if raw.iter().all(u8::is_ascii_whitespace) {
        return Err(RejectReason::MissingPayload);
    }

    match serde_json::from_slice::<Value>(raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(Value::Null) => Err(RejectReason::MissingPayload),
        Ok(_) | Err(_) => Err(malformed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_null_bodies_are_missing() {
        assert_eq!(
            RawBody::json("").json_object().unwrap_err(),
            RejectReason::MissingPayload
        );
        assert_eq!(
            RawBody::json(" \n ").json_object().unwrap_err(),
            RejectReason::MissingPayload
        );
        assert_eq!(
            RawBody::json("null").json_object().unwrap_err(),
            RejectReason::MissingPayload
        );
        assert_eq!(
            RawBody::form(Vec::<(String, String)>::new())
                .json_object()
                .unwrap_err(),
            RejectReason::MissingPayload
        );
    }

    #[test]
    fn test_non_objects_are_malformed() {
        for raw in ["[1,2]", "\"text\"", "{not json", "42"] {
            assert_eq!(
                RawBody::json(raw).json_object().unwrap_err(),
                RejectReason::MalformedPayload,
                "body: {}",
                raw
            );
        }
        assert_eq!(
            RawBody::form([("NotificationType", "ItemAdded")])
                .json_object()
                .unwrap_err(),
            RejectReason::MalformedPayload
        );
    }

    #[test]
    fn test_object_is_returned() {
        let map = RawBody::json(r#"{"a": 1}"#).json_object().unwrap();
        assert_eq!(map.get("a"), Some(&Value::from(1)));
    }
}
