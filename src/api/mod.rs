//! API module for HTTP handlers, middleware, and DTOs.

pub mod doc;
pub mod dto;
mod extract;
pub mod handlers;
pub mod middleware;
pub mod routes;
