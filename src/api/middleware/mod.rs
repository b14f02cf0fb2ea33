//! Middleware components for request processing.
//!
//! Request ID tracking, request logging and error/panic rendering.

mod error_handler;
mod logging;
mod request_id;

pub use error_handler::{error_to_code, error_to_status_code, handle_panic, route_not_found};
pub use logging::logging_middleware;
pub use request_id::{REQUEST_ID_HEADER, RequestId, request_id_middleware};
