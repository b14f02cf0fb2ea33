//! Error handler for converting errors and panics to HTTP responses.
//!
//! Every error leaving the API is rendered as the shared [`ErrorResponse`]
//! JSON body. Error sources are logged here and never serialized.

use std::any::Any;

use axum::{
    Json,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::api::dto::ErrorResponse;
use crate::error::AppError;

impl IntoResponse for AppError {
    /// Converts an AppError into an HTTP response.
    ///
    /// # Status Code Mapping
    /// - NotFound → 404 NOT_FOUND
    /// - Validation → 400 BAD_REQUEST
    /// - BadRequest → 400 BAD_REQUEST
    /// - PayloadTooLarge → 413 PAYLOAD_TOO_LARGE
    /// - ExternalApi → 502 BAD_GATEWAY
    /// - Configuration → 500 INTERNAL_SERVER_ERROR
    /// - Internal → 500 INTERNAL_SERVER_ERROR
    fn into_response(self) -> Response {
        let status = error_to_status_code(&self);
        let code = error_to_code(&self);

        let error_response = match &self {
            AppError::NotFound {
                entity,
                field,
                value,
            } => ErrorResponse::not_found_error(entity, field, value),
            AppError::Validation { field, reason } => {
                ErrorResponse::validation_error(field, reason)
            }
            AppError::BadRequest { message } | AppError::PayloadTooLarge { message } => {
                ErrorResponse::new(code, message)
            }
            AppError::ExternalApi { service, .. } => {
                tracing::error!(error = ?self, "Upstream call failed");
                ErrorResponse::new(code, &format!("{} request failed", service))
                    .with_details(json!({ "service": service }))
            }
            AppError::Configuration { key, .. } => {
                tracing::error!(error = ?self, "Configuration error while serving request");
                ErrorResponse::new(code, &format!("Configuration error: {}", key))
                    .with_details(json!({ "key": key }))
            }
            AppError::Internal { .. } => {
                tracing::error!(error = ?self, "Internal error while serving request");
                ErrorResponse::new(code, "An internal error occurred")
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Maps an AppError variant to its corresponding HTTP status code.
pub fn error_to_status_code(error: &AppError) -> StatusCode {
    match error {
        AppError::NotFound { .. } => StatusCode::NOT_FOUND,
        AppError::Validation { .. } | AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        AppError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        AppError::ExternalApi { .. } => StatusCode::BAD_GATEWAY,
        AppError::Configuration { .. } | AppError::Internal { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Maps an AppError variant to its error code string.
pub fn error_to_code(error: &AppError) -> &'static str {
    match error {
        AppError::NotFound { .. } => "NOT_FOUND",
        AppError::Validation { .. } => "VALIDATION_ERROR",
        AppError::BadRequest { .. } => "BAD_REQUEST",
        AppError::PayloadTooLarge { .. } => "PAYLOAD_TOO_LARGE",
        AppError::ExternalApi { .. } => "UPSTREAM_ERROR",
        AppError::Configuration { .. } => "CONFIGURATION_ERROR",
        AppError::Internal { .. } => "INTERNAL_ERROR",
    }
}

/// Response for a panicking handler, installed through `CatchPanicLayer`.
///
/// The panic message goes to the log only.
pub fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = panic.downcast_ref::<String>() {
        message.as_str()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        *message
    } else {
        "unknown panic payload"
    };
    tracing::error!(panic = %detail, "Request handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(
            "INTERNAL_ERROR",
            "An internal error occurred",
        )),
    )
        .into_response()
}

/// Fallback for unknown routes.
pub async fn route_not_found(uri: Uri) -> AppError {
    AppError::NotFound {
        entity: "Route".to_string(),
        field: "path".to_string(),
        value: uri.path().to_string(),
    }
}
