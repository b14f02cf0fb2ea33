//! Configuration merger for CLI arguments and config files
//!
//! CLI flags sit on top of the precedence chain:
//! files < `MARQUEE_*` environment variables < CLI flags.
//! Validation runs once, after every layer has been applied.

use std::path::Path;

use super::parser::{Cli, Commands};
use crate::config::error::ConfigError;
use crate::config::{ConfigLoader, Settings};
use crate::webhook::Producer;

/// Applies CLI overrides to file/env configuration.
pub struct ConfigurationMerger {
    base_config: Settings,
}

impl ConfigurationMerger {
    /// Wrap an already-loaded, not yet validated configuration
    pub fn new(base_config: Settings) -> Self {
        Self { base_config }
    }

    /// Load the base configuration selected by `--config` and `--env`.
    ///
    /// Without `--config` the layered `config/` directory is used, honoring
    /// `MARQUEE_CONFIG_DIR` / `MARQUEE_CONFIG_FILE`.
    ///
    /// # Errors
    /// Returns ConfigError if a file is missing or cannot be parsed.
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let loader = match cli.config.as_deref() {
            Some(path) => {
                Self::validate_config_file_access(path)?;
                ConfigLoader::with_file(path)
            }
            None => ConfigLoader::new()?,
        };

        let loader = match cli.env {
            Some(env) => loader.with_environment(env.into()),
            None => loader,
        };

        Ok(Self::new(loader.load_unvalidated()?))
    }

    /// Re-checked here because the file may have changed since clap saw it
    fn validate_config_file_access(path: &Path) -> Result<(), ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::validation(
                "config_file",
                format!("Configuration file does not exist: '{}'", path.display()),
            ));
        }

        std::fs::File::open(path).map(|_| ()).map_err(|e| {
            ConfigError::validation(
                "config_file",
                format!("Cannot read configuration file '{}': {}", path.display(), e),
            )
        })
    }

    /// Apply CLI overrides and validate the result.
    ///
    /// # Returns
    /// A new Settings instance with CLI overrides applied
    pub fn merge_cli_args(&self, cli: &Cli) -> Result<Settings, ConfigError> {
        let mut config = self.base_config.clone();

        Self::apply_global_overrides(&mut config, cli);

        if let Some(ref command) = cli.command {
            Self::apply_command_overrides(&mut config, command);
        }

        config.validate()?;

        Ok(config)
    }

    fn apply_global_overrides(config: &mut Settings, cli: &Cli) {
        if cli.verbose {
            config.logger.level = "debug".to_string();
        } else if cli.quiet {
            config.logger.level = "error".to_string();
        }
    }

    fn apply_command_overrides(config: &mut Settings, command: &Commands) {
        match command {
            Commands::Serve {
                host,
                port,
                log_level,
                producer,
                dry_run: _,
            } => {
                if let Some(host_addr) = host {
                    config.server.host = host_addr.clone();
                }

                if let Some(port_num) = port {
                    config.server.port = *port_num;
                }

                // command-level log level beats --verbose/--quiet
                if let Some(level) = log_level {
                    config.logger.level = (*level).into();
                }

                if let Some(producer) = producer {
                    config.producer.kind = Producer::from(*producer).as_str().to_string();
                }
            }
        }
    }

    /// Get the base configuration (before CLI overrides)
    pub fn config(&self) -> &Settings {
        &self.base_config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::loader::tests::{EnvGuard, TEST_MUTEX};
    use clap::Parser;
    use std::io::Write;

    fn create_valid_base_config() -> Settings {
        let mut config = Settings::default();
        config.tmdb.api_key = "key".to_string();
        config.telegram.bot_token = "123:abc".to_string();
        config.telegram.chat_id = "-1001".to_string();
        config
    }

    fn merge(args: &[&str]) -> Result<Settings, ConfigError> {
        let cli = Cli::try_parse_from(args).unwrap();
        ConfigurationMerger::new(create_valid_base_config()).merge_cli_args(&cli)
    }

    #[test]
    fn test_merge_verbose_flag() {
        assert_eq!(merge(&["marquee-rs", "--verbose"]).unwrap().logger.level, "debug");
    }

    #[test]
    fn test_merge_quiet_flag() {
        assert_eq!(merge(&["marquee-rs", "--quiet"]).unwrap().logger.level, "error");
    }

    #[test]
    fn test_merge_serve_overrides() {
        let config = merge(&[
            "marquee-rs",
            "serve",
            "--host",
            "127.0.0.1",
            "--port",
            "9000",
            "--producer",
            "jellyseerr",
        ])
        .unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.producer.kind, "jellyseerr");
    }

    #[test]
    fn test_command_log_level_overrides_global() {
        let config =
            merge(&["marquee-rs", "--verbose", "serve", "--log-level", "warn"]).unwrap();
        assert_eq!(config.logger.level, "warn");
    }

    #[test]
    fn test_merge_validates_result() {
        let cli = Cli::try_parse_from(["marquee-rs", "serve"]).unwrap();
        let result = ConfigurationMerger::new(Settings::default()).merge_cli_args(&cli);
        assert!(matches!(
            result,
            Err(ConfigError::ValidationError { ref field, .. }) if field == "tmdb.api_key"
        ));
    }

    #[test]
    fn test_from_cli_with_config_file() {
        let _lock = TEST_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        let mut guard = EnvGuard::new();
        guard.clean();
        guard.set("MARQUEE_TELEGRAM__CHAT_ID", "-42");

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[producer]
kind = "jellyfin"

[tmdb]
api_key = "from-file"

[telegram]
bot_token = "1:file"
"#
        )
        .unwrap();

        let path = file.path().to_str().unwrap();
        let cli = Cli::try_parse_from(["marquee-rs", "--config", path, "serve", "--port", "8200"])
            .unwrap();
        let config = ConfigurationMerger::from_cli(&cli)
            .unwrap()
            .merge_cli_args(&cli)
            .unwrap();

        assert_eq!(config.producer.kind, "jellyfin");
        assert_eq!(config.tmdb.api_key, "from-file");
        assert_eq!(config.telegram.chat_id, "-42");
        assert_eq!(config.server.port, 8200);
    }
}
