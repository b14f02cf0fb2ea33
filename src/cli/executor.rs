//! Command executor for dispatching CLI commands
//!
//! This module provides the main entry point for executing CLI commands
//! after parsing and configuration loading.

use super::handlers::ServeCommandHandler;
use super::parser::{Cli, Commands};
use crate::config::Settings;
use crate::error::{AppError, AppResult};

/// Execute a CLI command with the given settings
///
/// No subcommand means `serve`.
///
/// # Errors
/// Returns errors from command handlers or validation failures
pub async fn execute_command(cli: &Cli, settings: Settings) -> AppResult<()> {
    validate_command_args(cli, &settings)?;

    match &cli.command {
        Some(Commands::Serve { dry_run, .. }) => {
            ServeCommandHandler::new(settings).execute(*dry_run).await
        }
        None => ServeCommandHandler::new(settings).execute(false).await,
    }
}

/// Check argument combinations before anything runs
fn validate_command_args(cli: &Cli, settings: &Settings) -> AppResult<()> {
    cli.validate().map_err(|msg| AppError::Validation {
        field: "cli_arguments".to_string(),
        reason: msg,
    })?;

    if settings.server.port < 1024 {
        tracing::warn!(
            port = settings.server.port,
            "Binding to a port below 1024 usually requires elevated privileges"
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn create_valid_config() -> Settings {
        let mut config = Settings::default();
        config.tmdb.api_key = "key".to_string();
        config.telegram.bot_token = "123:abc".to_string();
        config.telegram.chat_id = "-1001".to_string();
        config
    }

    #[tokio::test]
    async fn test_execute_serve_dry_run() {
        let cli = Cli::try_parse_from(["marquee-rs", "serve", "--dry-run"]).unwrap();
        let result = execute_command(&cli, create_valid_config()).await;
        assert!(result.is_ok());
    }

    #[test]
    fn test_validate_command_args() {
        let cli = Cli::try_parse_from(["marquee-rs", "serve", "--port", "8080"]).unwrap();
        assert!(validate_command_args(&cli, &create_valid_config()).is_ok());
    }

    #[test]
    fn test_validate_conflicting_args() {
        // built by hand, clap would refuse this combination
        let cli = Cli {
            command: None,
            config: None,
            env: None,
            verbose: true,
            quiet: true,
        };
        let result = validate_command_args(&cli, &create_valid_config());
        assert!(matches!(result, Err(AppError::Validation { .. })));
    }
}
