//! Serve command handler
//!
//! Handles the serve command including dry-run validation and server startup.

use crate::config::Settings;
use crate::error::AppResult;
use crate::server::Server;

/// Handler for the serve command
pub struct ServeCommandHandler {
    config: Settings,
}

impl ServeCommandHandler {
    /// Create a new serve command handler
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Run the server, or only check that it could run when `dry_run` is set.
    ///
    /// # Errors
    /// - Configuration validation errors
    /// - Client construction, bind or server runtime errors
    pub async fn execute(self, dry_run: bool) -> AppResult<()> {
        if dry_run {
            return self.validate_only().await;
        }

        Server::new(self.config).run().await?;
        Ok(())
    }

    /// Validate configuration and build the outbound clients without binding.
    pub async fn validate_only(&self) -> AppResult<()> {
        self.config.validate()?;
        println!("✓ Configuration is valid");

        Server::new(self.config.clone()).build_state().await?;
        println!("✓ TMDB client and Telegram notifier are ready");

        println!("✓ Server would bind to: {}", self.config.server.address());
        println!("✓ Producer: {}", self.config.producer.kind);
        println!("✓ Logger level: {}", self.config.logger.level);

        println!("Dry run completed successfully - configuration is ready for deployment");
        Ok(())
    }

    /// Get the configuration
    pub fn config(&self) -> &Settings {
        &self.config
    }
}
