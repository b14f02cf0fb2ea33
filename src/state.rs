//! Application state for Axum web framework.
//!
//! Holds the webhook dispatcher, which owns every shared resource: the HTTP
//! client pools and the genre catalog.

use std::sync::Arc;

use crate::config::Settings;
use crate::error::AppResult;
use crate::external::tmdb::MetadataProvider;
use crate::models::GenreCatalog;
use crate::services::{AnnouncementFormatter, NotificationProvider};
use crate::webhook::Dispatcher;

/// Application state shared by all request handlers.
///
/// Cloning is cheap; the dispatcher sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
    /// Version reported by `/health`
    pub version: String,
}

impl AppState {
    /// Wire the dispatcher from settings and already-built providers.
    ///
    /// Providers are passed in so tests can point them at mock servers or
    /// replace them outright. Fails if `producer.kind` names no adapter.
    pub fn new(
        settings: &Settings,
        metadata: Arc<dyn MetadataProvider>,
        notifier: Arc<dyn NotificationProvider>,
    ) -> AppResult<Self> {
        let producer = settings.producer.producer()?;

        let formatter = AnnouncementFormatter::new(
            Arc::new(GenreCatalog::new()),
            settings.tmdb.image_base_url.clone(),
            settings.announcement.clone(),
        );
        let dispatcher = Dispatcher::new(
            producer,
            metadata,
            formatter,
            notifier,
        );

        Ok(Self {
            dispatcher: Arc::new(dispatcher),
            version: settings.application.version.clone(),
        })
    }
}
