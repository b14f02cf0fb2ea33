//! Router configuration for the API.

use axum::{Router, extract::DefaultBodyLimit, middleware};
use tower_http::catch_panic::CatchPanicLayer;

use crate::api::doc::openapi_routes;
use crate::api::handlers;
use crate::api::middleware::{
    handle_panic, logging_middleware, request_id_middleware, route_not_found,
};
use crate::state::AppState;

/// Creates the main application router with all routes and middleware.
///
/// # Middleware Order
/// Middleware is applied in reverse order of declaration (last added runs first):
/// 1. Request ID middleware - generates/propagates request IDs
/// 2. Logging middleware - logs requests with request IDs
/// 3. Body limit - caps webhook bodies at `body_limit` bytes
/// 4. Panic catcher - turns handler panics into a 500 `ErrorResponse`
pub fn create_router(state: AppState, body_limit: usize) -> Router {
    Router::new()
        .merge(handlers::webhook::webhook_routes())
        .merge(handlers::health::health_routes())
        .merge(openapi_routes())
        .fallback(route_not_found)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}
