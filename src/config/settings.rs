//! Configuration settings structures for marquee-rs
//!
//! Every struct here can be loaded from TOML files and `MARQUEE_*`
//! environment variables. Secrets have empty defaults so that a missing
//! value is caught by [`Settings::validate`] at startup.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;
use crate::logger::{ConsoleConfig, FileConfig, LogFormat, LoggerConfig};

// ============================================================================
// Default value functions
// ============================================================================

fn default_app_name() -> String {
    "marquee-rs".to_string()
}

fn default_app_version() -> String {
    crate::pkg_version().to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8100
}

fn default_body_limit() -> usize {
    10 * 1024 * 1024 // 10MB, Plex attaches a poster thumbnail
}

fn default_producer_kind() -> String {
    "plex".to_string()
}

fn default_tmdb_language() -> String {
    "fr-FR".to_string()
}

fn default_tmdb_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_tmdb_image_base_url() -> String {
    "https://image.tmdb.org/t/p/w500".to_string()
}

fn default_telegram_api_base_url() -> String {
    "https://api.telegram.org".to_string()
}

fn default_parse_mode() -> String {
    "Markdown".to_string()
}

fn default_outbound_timeout() -> u64 {
    10
}

fn default_headline() -> String {
    "Nouveautés sur la médiathèque".to_string()
}

fn default_tagline() -> String {
    "Ne ratez pas cette occasion de (re)découvrir ce chef-d'oeuvre !".to_string()
}

fn default_hashtag() -> String {
    "#Nouveauté".to_string()
}

fn default_overview_limit() -> usize {
    500
}

fn default_date_format() -> String {
    "%d/%m/%Y".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_log_path() -> String {
    "logs/marquee.log".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

// ============================================================================
// Application Configuration
// ============================================================================

/// Application basic information configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    #[serde(default = "default_app_name")]
    pub name: String,

    #[serde(default = "default_app_version")]
    pub version: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            version: default_app_version(),
        }
    }
}

// ============================================================================
// Server Configuration
// ============================================================================

/// Axum HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Maximum accepted request body in bytes
    #[serde(default = "default_body_limit")]
    pub body_limit: usize,
}

impl ServerConfig {
    /// Get the full server address as "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            body_limit: default_body_limit(),
        }
    }
}

// ============================================================================
// Producer Configuration
// ============================================================================

/// Which media server sends webhooks to this deployment.
///
/// Only one producer is active per process; the value is parsed into
/// [`crate::webhook::Producer`] during validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProducerConfig {
    /// `plex`, `jellyfin` (or `emby`), `jellyseerr`
    #[serde(default = "default_producer_kind")]
    pub kind: String,
}

impl Default for ProducerConfig {
    fn default() -> Self {
        Self {
            kind: default_producer_kind(),
        }
    }
}

// ============================================================================
// TMDB Configuration
// ============================================================================

/// The Movie Database API settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TmdbConfig {
    /// API key (v3). Required.
    #[serde(default)]
    pub api_key: String,

    /// Language used for titles, overviews and genre names
    #[serde(default = "default_tmdb_language")]
    pub language: String,

    #[serde(default = "default_tmdb_base_url")]
    pub base_url: String,

    /// Prefix joined with `poster_path` to build poster URLs
    #[serde(default = "default_tmdb_image_base_url")]
    pub image_base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_outbound_timeout")]
    pub timeout: u64,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            language: default_tmdb_language(),
            base_url: default_tmdb_base_url(),
            image_base_url: default_tmdb_image_base_url(),
            timeout: default_outbound_timeout(),
        }
    }
}

// ============================================================================
// Telegram Configuration
// ============================================================================

/// Telegram Bot API settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelegramConfig {
    /// Bot token from @BotFather. Required.
    #[serde(default)]
    pub bot_token: String,

    /// Destination chat or channel id (`-100...` or `@channel`). Required.
    #[serde(default)]
    pub chat_id: String,

    #[serde(default = "default_telegram_api_base_url")]
    pub api_base_url: String,

    /// Telegram `parse_mode` for captions
    #[serde(default = "default_parse_mode")]
    pub parse_mode: String,

    /// Request timeout in seconds
    #[serde(default = "default_outbound_timeout")]
    pub timeout: u64,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            chat_id: String::new(),
            api_base_url: default_telegram_api_base_url(),
            parse_mode: default_parse_mode(),
            timeout: default_outbound_timeout(),
        }
    }
}

// ============================================================================
// Announcement Configuration
// ============================================================================

/// Wording and limits of the announcement caption
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnouncementConfig {
    #[serde(default = "default_headline")]
    pub headline: String,

    #[serde(default = "default_tagline")]
    pub tagline: String,

    #[serde(default = "default_hashtag")]
    pub hashtag: String,

    /// Overview length (in characters) before it is cut with an ellipsis
    #[serde(default = "default_overview_limit")]
    pub overview_limit: usize,

    /// strftime pattern for the release date
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

impl Default for AnnouncementConfig {
    fn default() -> Self {
        Self {
            headline: default_headline(),
            tagline: default_tagline(),
            hashtag: default_hashtag(),
            overview_limit: default_overview_limit(),
            date_format: default_date_format(),
        }
    }
}

// ============================================================================
// Logger Settings
// ============================================================================

/// Console output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_true")]
    pub colored: bool,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            colored: default_true(),
        }
    }
}

/// File output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSettings {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_log_path")]
    pub path: String,

    /// Append to an existing file instead of truncating it
    #[serde(default = "default_true")]
    pub append: bool,

    /// Log format: "full", "compact", or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            path: default_log_path(),
            append: default_true(),
            format: default_log_format(),
        }
    }
}

/// Logger configuration settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerSettings {
    /// Minimum log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub console: ConsoleSettings,

    #[serde(default)]
    pub file: FileSettings,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            console: ConsoleSettings::default(),
            file: FileSettings::default(),
        }
    }
}

impl LoggerSettings {
    /// Convert the file representation into the runtime [`LoggerConfig`].
    pub fn into_logger_config(self) -> Result<LoggerConfig, ConfigError> {
        let format = self
            .file
            .format
            .parse::<LogFormat>()
            .map_err(|e| ConfigError::validation("logger.file.format", e.to_string()))?;

        let console = ConsoleConfig::new(self.console.enabled, self.console.colored);
        let file = FileConfig::new(
            self.file.enabled,
            PathBuf::from(self.file.path),
            self.file.append,
            format,
        );

        LoggerConfig::new(console, file, self.level)
            .map_err(|e| ConfigError::validation("logger", e.to_string()))
    }
}

// ============================================================================
// Main Settings Structure
// ============================================================================

/// Complete application settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub application: ApplicationConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub producer: ProducerConfig,

    #[serde(default)]
    pub tmdb: TmdbConfig,

    #[serde(default)]
    pub telegram: TelegramConfig,

    #[serde(default)]
    pub announcement: AnnouncementConfig,

    #[serde(default)]
    pub logger: LoggerSettings,
}
