//! Core notification provider trait and types.
//!
//! Announcements go through this abstraction so the dispatcher never
//! depends on a concrete messaging service.

use crate::error::AppResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Message to be sent via notification provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationMessage {
    /// Subject line, used for logging only by providers without titles
    pub title: Option<String>,
    /// Message body/caption (required)
    pub body: String,
    /// Image to attach, when the provider supports it
    pub image_url: Option<String>,
}

impl NotificationMessage {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            title: None,
            body: body.into(),
            image_url: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_image(mut self, image_url: Option<String>) -> Self {
        self.image_url = image_url;
        self
    }
}

/// Result of a notification send attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationResult {
    /// Whether send was successful
    pub success: bool,
    /// HTTP status code or provider-specific status
    pub status_code: Option<u16>,
    /// Response body or error message
    pub response: Option<String>,
    /// Time taken for the operation in milliseconds
    pub duration_ms: u64,
}

/// Trait for notification providers.
///
/// Uses `async_trait` to support async methods with dynamic dispatch.
/// Transport failures are reported as `Ok(NotificationResult { success:
/// false, .. })`; `Err` is reserved for problems before anything was sent.
#[async_trait]
pub trait NotificationProvider: Send + Sync {
    /// Sends a notification message
    async fn send(&self, message: &NotificationMessage) -> AppResult<NotificationResult>;

    /// Returns the provider name for logging/debugging
    fn name(&self) -> &'static str;

    /// Validates provider configuration (optional, default no-op)
    async fn validate_config(&self) -> AppResult<()> {
        Ok(())
    }
}
