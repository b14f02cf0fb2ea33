//! Service layer: announcement formatting and outbound notifications.

pub mod announcement;
pub mod notifications;

pub use announcement::{Announcement, AnnouncementFormatter};
pub use notifications::{NotificationMessage, NotificationProvider, NotificationResult, TelegramProvider};
