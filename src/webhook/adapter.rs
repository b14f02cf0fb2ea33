//! Producer selection and the adapter contract.

use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value};

use super::body::RawBody;
use super::error::RejectReason;
use super::jellyfin::JellyfinAdapter;
use super::jellyseerr::JellyseerrAdapter;
use super::outcome::AdapterOutcome;
use super::plex::PlexAdapter;

/// Turns one producer's payload shape into a [`crate::models::NormalizedEvent`].
///
/// Checks run in a fixed order and stop at the first failure: payload
/// presence, structural parse, event relevance, required fields, media kind.
pub trait PayloadAdapter: Send + Sync {
    fn producer(&self) -> Producer;

    fn adapt(&self, body: &RawBody) -> AdapterOutcome;
}

/// Media servers able to send webhooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Producer {
    Plex,
    /// Jellyfin and Emby share the webhook plugin format
    Jellyfin,
    Jellyseerr,
}

static PLEX: PlexAdapter = PlexAdapter;
static JELLYFIN: JellyfinAdapter = JellyfinAdapter;
static JELLYSEERR: JellyseerrAdapter = JellyseerrAdapter;

impl Producer {
    pub fn as_str(&self) -> &'static str {
        match self {
            Producer::Plex => "plex",
            Producer::Jellyfin => "jellyfin",
            Producer::Jellyseerr => "jellyseerr",
        }
    }

    pub fn adapter(&self) -> &'static dyn PayloadAdapter {
        match self {
            Producer::Plex => &PLEX,
            Producer::Jellyfin => &JELLYFIN,
            Producer::Jellyseerr => &JELLYSEERR,
        }
    }
}

impl FromStr for Producer {
    type Err = RejectReason;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "plex" => Ok(Producer::Plex),
            "jellyfin" | "emby" => Ok(Producer::Jellyfin),
            "jellyseerr" => Ok(Producer::Jellyseerr),
            _ => Err(RejectReason::UnsupportedProducer(s.to_string())),
        }
    }
}

impl fmt::Display for Producer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Follow a dotted path (`Metadata.title`) through nested objects.
fn lookup<'a>(root: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let mut current = root.get(segments.next()?)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// String value of the event discriminator, if the producer sent one.
pub(crate) fn event_name<'a>(root: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    root.get(key).and_then(Value::as_str)
}

/// Collects required fields so that every missing one is reported at once.
///
/// Absent, `null` and empty-string values count as missing.
pub(crate) struct RequiredFields<'a> {
    root: &'a Map<String, Value>,
    missing: Vec<&'static str>,
}

impl<'a> RequiredFields<'a> {
    pub(crate) fn new(root: &'a Map<String, Value>) -> Self {
        Self {
            root,
            missing: Vec::new(),
        }
    }

    /// Raw value of a present field.
    pub(crate) fn value(&mut self, path: &'static str) -> Option<&'a Value> {
        match lookup(self.root, path) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) if s.trim().is_empty() => None,
            Some(value) => Some(value),
        }
        .or_else(|| {
            self.missing.push(path);
            None
        })
    }

    /// A present field that must be a string.
    pub(crate) fn text(&mut self, path: &'static str) -> Result<Option<&'a str>, RejectReason> {
        match self.value(path) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(RejectReason::InvalidField {
                field: path,
                reason: format!("expected a string, got {}", json_type(other)),
            }),
        }
    }

    /// Fail with every missing field, or hand back nothing.
    pub(crate) fn finish(self) -> Result<(), RejectReason> {
        if self.missing.is_empty() {
            Ok(())
        } else {
            Err(RejectReason::MissingFields(self.missing))
        }
    }
}

pub(crate) fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
