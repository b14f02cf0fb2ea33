use thiserror::Error;

/// Application-wide error type.
///
/// Webhook-level rejections have their own taxonomy in
/// [`crate::webhook::RejectReason`]; this enum covers infrastructure,
/// upstream services and request-extraction failures.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found error with entity, field, and value information
    #[error("Resource not found: {entity} with {field}={value}")]
    NotFound {
        entity: String,
        field: String,
        value: String,
    },

    /// Validation error with field-specific details
    #[error("Validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Bad request error with descriptive message
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    /// Request body over `server.body_limit`
    #[error("Payload too large: {message}")]
    PayloadTooLarge { message: String },

    /// Failure while talking to a third-party API (TMDB, Telegram)
    #[error("{service} API error: {message}")]
    ExternalApi {
        service: String,
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// Configuration error with key information
    #[error("Configuration error: {key}")]
    Configuration {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// Internal error for unexpected failures
    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    pub fn external(service: &str, message: impl Into<String>, source: Option<anyhow::Error>) -> Self {
        AppError::ExternalApi {
            service: service.to_string(),
            message: message.into(),
            source,
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

impl From<crate::config::error::ConfigError> for AppError {
    fn from(error: crate::config::error::ConfigError) -> Self {
        let key = match &error {
            crate::config::error::ConfigError::ValidationError { field, .. } => field.clone(),
            _ => "settings".to_string(),
        };
        AppError::Configuration {
            key,
            source: error.into(),
        }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;
