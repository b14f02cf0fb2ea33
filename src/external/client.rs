//! Shared outbound HTTP client construction.

use std::time::Duration;

use crate::error::{AppError, AppResult};

/// Build a pooled `reqwest` client for one upstream service.
///
/// Each service gets its own client so its configured timeout applies to
/// every request; connections are pooled per client.
///
/// # Features
/// - **Timeouts**: `timeout` for the whole request, 10s (or less) to connect
/// - **HTTP/2**: adaptive window sizing and keep-alive
/// - **Compression**: gzip
/// - **Security**: Rustls for TLS (no OpenSSL dependency)
pub fn build_client(service: &str, timeout: Duration) -> AppResult<reqwest::Client> {
    reqwest::Client::builder()
        // Timeouts
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        // Connection pooling
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(90))
        // HTTP/2 settings
        .http2_adaptive_window(true)
        .http2_keep_alive_interval(Duration::from_secs(10))
        .http2_keep_alive_timeout(Duration::from_secs(20))
        .gzip(true)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| {
            AppError::external(service, "failed to build HTTP client", Some(e.into()))
        })
}
