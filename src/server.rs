//! Server module for managing HTTP server lifecycle
//!
//! This module handles server initialization, startup, and graceful shutdown.

use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::signal;

use crate::api::routes::create_router;
use crate::config::{Environment, Settings};
use crate::external::tmdb::TmdbClient;
use crate::services::{NotificationProvider, TelegramProvider};
use crate::state::AppState;

/// HTTP server manager
pub struct Server {
    settings: Settings,
}

impl Server {
    /// Create a new server with the given settings
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Build the outbound clients and the application state.
    ///
    /// Fails if a client cannot be built or the Telegram configuration is
    /// unusable, before anything is bound.
    pub async fn build_state(&self) -> anyhow::Result<AppState> {
        let metadata = TmdbClient::new(&self.settings.tmdb)?;
        tracing::info!(
            base_url = %self.settings.tmdb.base_url,
            language = %self.settings.tmdb.language,
            timeout_secs = self.settings.tmdb.timeout,
            "TMDB client ready"
        );

        let notifier = TelegramProvider::new(self.settings.telegram.clone())?;
        notifier.validate_config().await.map_err(|e| {
            tracing::error!(error = %e, "Telegram configuration validation failed");
            anyhow::anyhow!("Telegram configuration validation failed: {}", e)
        })?;
        tracing::info!(
            chat_id = %self.settings.telegram.chat_id,
            parse_mode = %self.settings.telegram.parse_mode,
            "Telegram notifier ready"
        );

        let state = AppState::new(&self.settings, Arc::new(metadata), Arc::new(notifier))?;
        Ok(state)
    }

    /// Start the server and run until shutdown signal
    ///
    /// # Errors
    /// - Client construction or notifier validation errors
    /// - Address binding errors
    /// - Server runtime errors
    pub async fn run(self) -> anyhow::Result<()> {
        tracing::info!(
            app_name = %self.settings.application.name,
            app_version = %self.settings.application.version,
            environment = %Environment::from_env().as_str(),
            "Application starting"
        );

        tracing::info!(
            host = %self.settings.server.host,
            port = self.settings.server.port,
            body_limit = self.settings.server.body_limit,
            producer = %self.settings.producer.kind,
            "Server configuration loaded"
        );

        tracing::info!(
            level = %self.settings.logger.level,
            console_enabled = self.settings.logger.console.enabled,
            file_enabled = self.settings.logger.file.enabled,
            "Logger configuration loaded"
        );

        let state = self.build_state().await?;
        let router = create_router(state, self.settings.server.body_limit);
        tracing::info!("Router configured");

        let address = self.settings.server.address();
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!(error = %e, address = %address, "Failed to bind to address");
            anyhow::anyhow!("Failed to bind to {}: {}", address, e)
        })?;

        tracing::info!(address = %address, "Server listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}

/// Waits for a shutdown signal (Ctrl+C or SIGTERM).
///
/// If a handler cannot be installed the error is logged and that signal is
/// never awaited.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
