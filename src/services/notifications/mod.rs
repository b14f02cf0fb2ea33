//! Notification system with pluggable providers.
//!
//! The core trait `NotificationProvider` keeps the dispatcher independent of
//! the messaging channel; Telegram is the bundled implementation.

mod provider;
mod telegram_provider;

pub use provider::{NotificationMessage, NotificationProvider, NotificationResult};
pub use telegram_provider::TelegramProvider;
