//! Configuration validation logic
//!
//! Every section exposes a `validate()` returning the first problem found.
//! [`Settings::validate`] runs them all at startup so that a missing secret
//! stops the process before the listener is bound.

use crate::config::error::ConfigError;
use crate::config::settings::{
    AnnouncementConfig, FileSettings, LoggerSettings, ProducerConfig, ServerConfig, Settings,
    TelegramConfig, TmdbConfig,
};
use crate::webhook::Producer;

/// Valid log levels
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Valid log formats
const VALID_LOG_FORMATS: &[&str] = &["full", "compact", "json"];

/// Captions are escaped for Telegram's legacy Markdown only
const VALID_PARSE_MODES: &[&str] = &["Markdown"];

fn validate_base_url(field: &str, value: &str) -> Result<(), ConfigError> {
    match reqwest::Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(()),
        Ok(url) => Err(ConfigError::validation(
            field,
            format!("Unsupported URL scheme '{}'. Expected http or https.", url.scheme()),
        )),
        Err(e) => Err(ConfigError::validation(
            field,
            format!("Invalid URL '{}': {}", value, e),
        )),
    }
}

fn validate_timeout(field: &str, seconds: u64) -> Result<(), ConfigError> {
    if seconds == 0 {
        return Err(ConfigError::validation(
            field,
            "Timeout must be greater than 0 seconds.",
        ));
    }
    Ok(())
}

impl ServerConfig {
    /// Validate server configuration
    ///
    /// # Validation Rules
    /// - Port must be between 1 and 65535
    /// - Body limit must be greater than 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::validation(
                "server.port",
                "Port must be between 1 and 65535. Please specify a valid port number.",
            ));
        }

        if self.body_limit == 0 {
            return Err(ConfigError::validation(
                "server.body_limit",
                "Body limit must be greater than 0 bytes.",
            ));
        }

        Ok(())
    }
}

impl ProducerConfig {
    /// Resolve `kind` to one of the known adapters.
    pub fn producer(&self) -> Result<Producer, ConfigError> {
        self.kind
            .parse::<Producer>()
            .map_err(|e| ConfigError::validation("producer.kind", e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.producer().map(|_| ())
    }
}

impl TmdbConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::missing("tmdb.api_key", "MARQUEE_TMDB__API_KEY"));
        }
        validate_base_url("tmdb.base_url", &self.base_url)?;
        validate_base_url("tmdb.image_base_url", &self.image_base_url)?;
        validate_timeout("tmdb.timeout", self.timeout)
    }
}

impl TelegramConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bot_token.trim().is_empty() {
            return Err(ConfigError::missing(
                "telegram.bot_token",
                "MARQUEE_TELEGRAM__BOT_TOKEN",
            ));
        }
        if self.chat_id.trim().is_empty() {
            return Err(ConfigError::missing(
                "telegram.chat_id",
                "MARQUEE_TELEGRAM__CHAT_ID",
            ));
        }
        validate_base_url("telegram.api_base_url", &self.api_base_url)?;

        if !VALID_PARSE_MODES.contains(&self.parse_mode.as_str()) {
            return Err(ConfigError::ValidationError {
                field: "telegram.parse_mode".to_string(),
                message: format!(
                    "Invalid parse mode '{}'. Valid modes are: {}",
                    self.parse_mode,
                    VALID_PARSE_MODES.join(", ")
                ),
            });
        }

        validate_timeout("telegram.timeout", self.timeout)
    }
}

impl AnnouncementConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.overview_limit == 0 {
            return Err(ConfigError::validation(
                "announcement.overview_limit",
                "Overview limit must be greater than 0 characters.",
            ));
        }
        if self.date_format.trim().is_empty() {
            return Err(ConfigError::validation(
                "announcement.date_format",
                "Date format must not be empty.",
            ));
        }
        Ok(())
    }
}

impl FileSettings {
    /// Validate file settings
    fn validate(&self) -> Result<(), ConfigError> {
        // If file logging is enabled, path must not be empty
        if self.enabled && self.path.trim().is_empty() {
            return Err(ConfigError::validation(
                "logger.file.path",
                "File path is required when file logging is enabled.",
            ));
        }

        if !VALID_LOG_FORMATS.contains(&self.format.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.file.format".to_string(),
                message: format!(
                    "Invalid log format '{}'. Valid formats are: {}",
                    self.format,
                    VALID_LOG_FORMATS.join(", ")
                ),
            });
        }

        Ok(())
    }
}

impl LoggerSettings {
    /// Validate logger settings
    ///
    /// # Validation Rules
    /// - Log level must be one of: trace, debug, info, warn, error
    /// - If file logging is enabled, path must not be empty
    /// - Log format must be one of: full, compact, json
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !VALID_LOG_LEVELS.contains(&self.level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.level".to_string(),
                message: format!(
                    "Invalid log level '{}'. Valid levels are: {}",
                    self.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }

        self.file.validate()?;

        Ok(())
    }
}

impl Settings {
    /// Validate all configuration settings
    ///
    /// Returns the first validation error encountered.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.producer.validate()?;
        self.tmdb.validate()?;
        self.telegram.validate()?;
        self.announcement.validate()?;
        self.logger.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_settings() -> Settings {
        let mut settings = Settings::default();
        settings.tmdb.api_key = "tmdb-key".to_string();
        settings.telegram.bot_token = "123:abc".to_string();
        settings.telegram.chat_id = "-1001".to_string();
        settings
    }

    fn assert_field(result: Result<(), ConfigError>, expected: &str) {
        let err = result.unwrap_err();
        assert!(
            matches!(&err, ConfigError::ValidationError { field, .. } if field == expected),
            "expected error on {}, got {:?}",
            expected,
            err
        );
    }

    #[test]
    fn test_valid_settings_pass() {
        assert!(valid_settings().validate().is_ok());
    }

    #[test]
    fn test_defaults_fail_on_missing_tmdb_key() {
        assert_field(Settings::default().validate(), "tmdb.api_key");
    }

    #[test]
    fn test_missing_secret_mentions_env_var() {
        let mut settings = valid_settings();
        settings.telegram.bot_token = "  ".to_string();
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("MARQUEE_TELEGRAM__BOT_TOKEN"));
    }

    #[test]
    fn test_missing_chat_id() {
        let mut settings = valid_settings();
        settings.telegram.chat_id.clear();
        assert_field(settings.validate(), "telegram.chat_id");
    }

    #[test]
    fn test_server_port_zero() {
        let config = ServerConfig {
            port: 0,
            ..Default::default()
        };
        assert_field(config.validate(), "server.port");
    }

    #[test]
    fn test_server_port_boundaries() {
        for port in [1, 65535] {
            let config = ServerConfig {
                port,
                ..Default::default()
            };
            assert!(config.validate().is_ok());
        }
    }

    #[test]
    fn test_producer_kinds() {
        for kind in ["plex", "jellyfin", "emby", "jellyseerr", "PLEX"] {
            let config = ProducerConfig {
                kind: kind.to_string(),
            };
            assert!(config.validate().is_ok(), "kind should be valid: {}", kind);
        }

        let config = ProducerConfig {
            kind: "kodi".to_string(),
        };
        assert_field(config.validate(), "producer.kind");
    }

    #[test]
    fn test_zero_timeouts_rejected() {
        let mut settings = valid_settings();
        settings.tmdb.timeout = 0;
        assert_field(settings.validate(), "tmdb.timeout");

        let mut settings = valid_settings();
        settings.telegram.timeout = 0;
        assert_field(settings.validate(), "telegram.timeout");
    }

    #[test]
    fn test_base_url_scheme() {
        let mut settings = valid_settings();
        settings.tmdb.base_url = "ftp://api.themoviedb.org/3".to_string();
        assert_field(settings.validate(), "tmdb.base_url");

        let mut settings = valid_settings();
        settings.telegram.api_base_url = "not a url".to_string();
        assert_field(settings.validate(), "telegram.api_base_url");
    }

    #[test]
    fn test_parse_mode() {
        let mut settings = valid_settings();
        settings.telegram.parse_mode = "markdown".to_string();
        assert_field(settings.validate(), "telegram.parse_mode");

        settings.telegram.parse_mode = "HTML".to_string();
        assert_field(settings.validate(), "telegram.parse_mode");

        settings.telegram.parse_mode = "Markdown".to_string();
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_overview_limit_zero() {
        let mut settings = valid_settings();
        settings.announcement.overview_limit = 0;
        assert_field(settings.validate(), "announcement.overview_limit");
    }

    #[test]
    fn test_logger_levels() {
        for level in ["trace", "debug", "info", "warn", "error", "INFO"] {
            let settings = LoggerSettings {
                level: level.to_string(),
                ..Default::default()
            };
            assert!(settings.validate().is_ok(), "level should be valid: {}", level);
        }

        let settings = LoggerSettings {
            level: "verbose".to_string(),
            ..Default::default()
        };
        assert_field(settings.validate(), "logger.level");
    }

    #[test]
    fn test_file_logging_requires_path() {
        let settings = LoggerSettings {
            file: FileSettings {
                enabled: true,
                path: String::new(),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_field(settings.validate(), "logger.file.path");
    }

    #[test]
    fn test_file_logging_format() {
        let settings = LoggerSettings {
            file: FileSettings {
                format: "yaml".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_field(settings.validate(), "logger.file.format");
    }
}
