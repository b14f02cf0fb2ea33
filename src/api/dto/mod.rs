//! Data transfer objects for API responses.

mod error;
mod health;
mod webhook;

pub use error::ErrorResponse;
pub use health::{HealthResponse, HealthStatus};
pub use webhook::WebhookResponse;
