//! Jellyfin / Emby webhook plugin payloads (JSON body).

use super::adapter::{PayloadAdapter, Producer, RequiredFields, event_name};
use super::body::RawBody;
use super::error::RejectReason;
use super::outcome::AdapterOutcome;
use crate::models::{MediaKind, NormalizedEvent};

const RELEVANT_EVENT: &str = "ItemAdded";

#[derive(Debug, Default)]
pub struct JellyfinAdapter;

impl JellyfinAdapter {
    fn extract(body: &RawBody) -> Result<AdapterOutcome, RejectReason> {
        let root = body.json_object()?;

        let event = event_name(&root, "NotificationType");
        if event != Some(RELEVANT_EVENT) {
            return Ok(AdapterOutcome::Ignored {
                event: event.map(str::to_string),
            });
        }

        let mut fields = RequiredFields::new(&root);
        let name = fields.text("Item.Name")?;
        let item_type = fields.text("Item.Type")?;
        fields.finish()?;

        let (Some(name), Some(item_type)) = (name, item_type) else {
            return Err(RejectReason::MissingFields(vec!["Item.Name", "Item.Type"]));
        };

        let kind = match item_type.to_lowercase().as_str() {
            "movie" => MediaKind::Movie,
            "series" => MediaKind::Series,
            _ => return Err(RejectReason::UnsupportedMediaKind(item_type.to_string())),
        };

        Ok(AdapterOutcome::Event(NormalizedEvent::by_title(name, kind)))
    }
}

impl PayloadAdapter for JellyfinAdapter {
    fn producer(&self) -> Producer {
        Producer::Jellyfin
    }

    fn adapt(&self, body: &RawBody) -> AdapterOutcome {
        Self::extract(body).unwrap_or_else(AdapterOutcome::Rejected)
    }
}
