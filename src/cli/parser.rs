//! CLI argument parsing with clap
//!
//! This module defines the command-line interface structure using clap,
//! including all commands, arguments, and their documentation.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::build;

/// Announces new movies and series from your media server on Telegram
#[derive(Parser, Debug)]
#[command(name = "marquee-rs")]
#[command(about = "Announces new movies and series from your media server on Telegram")]
#[command(long_about = "
Marquee-rs receives \"new media\" webhooks from Plex, Jellyfin/Emby or
Jellyseerr, looks the title up on TMDB and posts an announcement with the
poster to a Telegram chat.

EXAMPLES:
    # Start the server with default configuration
    marquee-rs serve

    # Listen on another port
    marquee-rs serve --port 9000

    # Receive Jellyfin webhooks instead of Plex
    marquee-rs serve --producer jellyfin

    # Use a single configuration file
    marquee-rs --config /etc/marquee/marquee.toml serve

    # Check configuration without starting server
    marquee-rs serve --dry-run

Secrets are usually passed through the environment:
    MARQUEE_TMDB__API_KEY, MARQUEE_TELEGRAM__BOT_TOKEN, MARQUEE_TELEGRAM__CHAT_ID
")]
#[command(version = build::CLAP_LONG_VERSION)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file path
    ///
    /// Load this TOML file instead of the layered `config/` directory.
    /// `MARQUEE_*` environment variables still apply on top of it.
    ///
    /// Example: --config /etc/marquee/marquee.toml
    #[arg(short, long, value_name = "FILE", value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Override environment detection
    ///
    /// Selects which `{environment}.toml` overlay is read.
    #[arg(short, long, value_enum)]
    pub env: Option<Environment>,

    /// Enable verbose logging
    ///
    /// Sets the log level to debug. Cannot be used with --quiet.
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    ///
    /// Sets the log level to error. Cannot be used with --verbose.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the webhook server (default)
    ///
    /// Examples:
    ///   marquee-rs serve                        # Start with defaults
    ///   marquee-rs serve --host 127.0.0.1       # Local connections only
    ///   marquee-rs serve --dry-run              # Validate config without starting
    Serve {
        /// Host address to bind to
        ///
        /// Default: 0.0.0.0
        #[arg(long, value_name = "ADDRESS", value_parser = super::validation::validate_host_address)]
        host: Option<String>,

        /// Port number to listen on
        ///
        /// Default: 8100
        #[arg(short, long, value_name = "PORT", value_parser = super::validation::validate_port)]
        port: Option<u16>,

        /// Log level override
        ///
        /// Takes precedence over --verbose/--quiet and the configuration file.
        #[arg(long, value_enum)]
        log_level: Option<LogLevel>,

        /// Media server sending the webhooks
        #[arg(long, value_enum)]
        producer: Option<ProducerArg>,

        /// Validate configuration and exit
        ///
        /// Loads and validates the configuration and builds the TMDB and
        /// Telegram clients without binding the listener.
        /// Returns exit code 0 if valid, non-zero if invalid.
        #[arg(long)]
        dry_run: bool,
    },
}

/// Environment options
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Environment {
    #[value(name = "development", alias = "dev")]
    Development,
    #[value(name = "staging", alias = "stage")]
    Staging,
    #[value(name = "production", alias = "prod")]
    Production,
    #[value(name = "test")]
    Test,
}

/// Log level options
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum LogLevel {
    #[value(name = "error")]
    Error,
    #[value(name = "warn", alias = "warning")]
    Warn,
    #[value(name = "info")]
    Info,
    #[value(name = "debug")]
    Debug,
    #[value(name = "trace")]
    Trace,
}

/// Producer options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProducerArg {
    #[value(name = "plex")]
    Plex,
    #[value(name = "jellyfin", alias = "emby")]
    Jellyfin,
    #[value(name = "jellyseerr")]
    Jellyseerr,
}

impl Cli {
    /// Checks clap cannot express on its own.
    pub fn validate(&self) -> Result<(), String> {
        if self.verbose && self.quiet {
            return Err("Cannot use --verbose and --quiet together".to_string());
        }

        Ok(())
    }

    /// Whether the server should start after configuration is loaded
    pub fn dry_run(&self) -> bool {
        matches!(self.command, Some(Commands::Serve { dry_run: true, .. }))
    }

    /// Get detailed help for validation errors
    pub fn get_validation_help() -> &'static str {
        r#"
Common validation errors and solutions:

Missing secrets:
  - tmdb.api_key       -> MARQUEE_TMDB__API_KEY
  - telegram.bot_token -> MARQUEE_TELEGRAM__BOT_TOKEN
  - telegram.chat_id   -> MARQUEE_TELEGRAM__CHAT_ID

Port validation:
  - Port must be between 1 and 65535
  - Example: --port 8100

Producer validation:
  - One of: plex, jellyfin (alias emby), jellyseerr
  - Example: --producer jellyseerr

Configuration file validation:
  - File must exist and be readable
  - File must be in TOML format
  - Example: --config /path/to/config.toml

For more help, use: marquee-rs help <subcommand>
"#
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => "error".to_string(),
            LogLevel::Warn => "warn".to_string(),
            LogLevel::Info => "info".to_string(),
            LogLevel::Debug => "debug".to_string(),
            LogLevel::Trace => "trace".to_string(),
        }
    }
}

impl From<ProducerArg> for crate::webhook::Producer {
    fn from(producer: ProducerArg) -> Self {
        match producer {
            ProducerArg::Plex => crate::webhook::Producer::Plex,
            ProducerArg::Jellyfin => crate::webhook::Producer::Jellyfin,
            ProducerArg::Jellyseerr => crate::webhook::Producer::Jellyseerr,
        }
    }
}

impl From<Environment> for crate::config::Environment {
    fn from(env: Environment) -> Self {
        match env {
            Environment::Development => crate::config::Environment::Development,
            Environment::Staging => crate::config::Environment::Staging,
            Environment::Production => crate::config::Environment::Production,
            Environment::Test => crate::config::Environment::Test,
        }
    }
}
