//! Deployment environment selection

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::error::ConfigError;

/// Deployment environment, decides which `{environment}.toml` overlay is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Test,
    Staging,
    Production,
}

impl Environment {
    /// Environment variable holding the current environment name
    pub const ENV_VAR: &'static str = "MARQUEE_APP_ENV";

    const ALL: [Environment; 4] = [
        Environment::Development,
        Environment::Test,
        Environment::Staging,
        Environment::Production,
    ];

    /// Read `MARQUEE_APP_ENV`, falling back to development when unset or invalid.
    pub fn from_env() -> Self {
        std::env::var(Self::ENV_VAR)
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Test => "test",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }

    fn short_alias(&self) -> Option<&'static str> {
        match self {
            Environment::Development => Some("dev"),
            Environment::Staging => Some("stage"),
            Environment::Production => Some("prod"),
            Environment::Test => None,
        }
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|env| env.as_str() == wanted || env.short_alias() == Some(wanted.as_str()))
            .ok_or_else(|| {
                ConfigError::EnvVarError(format!(
                    "Invalid environment '{}'. Valid values are: development, test, staging, production",
                    s
                ))
            })
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
