//! Webhook entry point: adapt, look up, announce.

use std::sync::Arc;

use tracing::Instrument;

use super::adapter::{PayloadAdapter, Producer};
use super::body::RawBody;
use super::outcome::{AdapterOutcome, DispatchOutcome};
use crate::external::tmdb::{LookupError, LookupResult, MetadataProvider};
use crate::models::{LookupKey, LookupMode, MediaKind, MediaRecord, NormalizedEvent};
use crate::services::{AnnouncementFormatter, NotificationMessage, NotificationProvider};

/// Runs one webhook through adapter, metadata lookup, formatter and notifier.
///
/// Stages run sequentially and share nothing mutable; one dispatcher serves
/// every request concurrently.
pub struct Dispatcher {
    adapter: &'static dyn PayloadAdapter,
    metadata: Arc<dyn MetadataProvider>,
    formatter: AnnouncementFormatter,
    notifier: Arc<dyn NotificationProvider>,
}

impl Dispatcher {
    pub fn new(
        producer: Producer,
        metadata: Arc<dyn MetadataProvider>,
        formatter: AnnouncementFormatter,
        notifier: Arc<dyn NotificationProvider>,
    ) -> Self {
        Self {
            adapter: producer.adapter(),
            metadata,
            formatter,
            notifier,
        }
    }

    pub fn producer(&self) -> Producer {
        self.adapter.producer()
    }

    pub async fn dispatch(&self, body: &RawBody) -> DispatchOutcome {
        let span = tracing::info_span!("webhook", producer = %self.producer());
        self.run(body).instrument(span).await
    }

    async fn run(&self, body: &RawBody) -> DispatchOutcome {
        let event = match self.adapter.adapt(body) {
            AdapterOutcome::Event(event) => event,
            AdapterOutcome::Ignored { event } => {
                tracing::debug!(event = ?event, "Ignoring irrelevant event");
                return DispatchOutcome::Ignored { event };
            }
            AdapterOutcome::Rejected(reason) => {
                tracing::warn!(code = reason.code(), %reason, "Rejected webhook payload");
                return DispatchOutcome::BadRequest(reason);
            }
        };

        tracing::info!(key = %event.key(), kind = %event.kind(), "Webhook validated");

        let record = match self.lookup(&event).await {
            Ok(record) => record,
            Err(LookupError::NotFound { kind, key }) => {
                tracing::warn!(%key, %kind, "No metadata match");
                return DispatchOutcome::NotFound(key);
            }
            Err(LookupError::Upstream(e)) => {
                tracing::error!(
                    key = %event.key(),
                    provider = self.metadata.name(),
                    error = %e,
                    "Metadata lookup failed"
                );
                return DispatchOutcome::UpstreamError(e.to_string());
            }
        };

        let notified = self.announce(&record, event.kind()).await;

        DispatchOutcome::Accepted {
            title: record.title,
            kind: event.kind(),
            notified,
        }
    }

    async fn lookup(&self, event: &NormalizedEvent) -> LookupResult<MediaRecord> {
        let metadata = self.metadata.as_ref();
        match (event.mode(), event.kind(), event.key()) {
            (LookupMode::ByName, MediaKind::Movie, LookupKey::Title(title)) => {
                metadata.search_movie(title).await
            }
            (LookupMode::ByName, MediaKind::Series, LookupKey::Title(title)) => {
                metadata.search_series(title).await
            }
            (LookupMode::ById, MediaKind::Movie, LookupKey::TmdbId(id)) => {
                metadata.movie_by_id(*id).await
            }
            (LookupMode::ById, MediaKind::Series, LookupKey::TmdbId(id)) => {
                metadata.series_by_id(*id).await
            }
            // mode is derived from the key, the remaining pairs cannot occur
            (_, kind, key) => Err(LookupError::NotFound {
                kind,
                key: key.clone(),
            }),
        }
    }

    /// Format and send. Delivery failures are logged and reported as `false`;
    /// they never fail the request.
    async fn announce(&self, record: &MediaRecord, kind: MediaKind) -> bool {
        let announcement = self.formatter.format(record, kind);
        let message = NotificationMessage::new(announcement.caption)
            .with_title(record.title.clone())
            .with_image(announcement.image_url);

        match self.notifier.send(&message).await {
            Ok(result) if result.success => {
                tracing::info!(
                    title = %record.title,
                    notifier = self.notifier.name(),
                    duration_ms = result.duration_ms,
                    "Announcement sent"
                );
                true
            }
            Ok(result) => {
                tracing::error!(
                    title = %record.title,
                    notifier = self.notifier.name(),
                    status = ?result.status_code,
                    response = ?result.response,
                    "Announcement rejected by notifier"
                );
                false
            }
            Err(e) => {
                tracing::error!(
                    title = %record.title,
                    notifier = self.notifier.name(),
                    error = %e,
                    "Announcement could not be sent"
                );
                false
            }
        }
    }
}
