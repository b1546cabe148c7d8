//! Deployment environment selection

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;

/// Which `{environment}.toml` layer is loaded on top of `default.toml`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Test,
    Production,
}

impl Environment {
    pub const ENV_VAR: &'static str = "CATALOG_APP_ENV";

    /// Reads `CATALOG_APP_ENV`, falling back to development when unset or unparsable.
    pub fn from_env() -> Self {
        std::env::var(Self::ENV_VAR)
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Test => "test",
            Environment::Production => "production",
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "test" => Ok(Environment::Test),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(ConfigError::EnvVarError(format!(
                "Invalid environment '{}'. Valid values are: development, test, production",
                other
            ))),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        for (raw, expected) in [
            ("dev", Environment::Development),
            ("Development", Environment::Development),
            ("test", Environment::Test),
            ("PROD", Environment::Production),
            (" production ", Environment::Production),
        ] {
            assert_eq!(raw.parse::<Environment>().unwrap(), expected, "{raw}");
        }
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = "staging".parse::<Environment>().unwrap_err();
        assert!(err.to_string().contains("staging"));
    }

    #[test]
    fn test_display_matches_file_name() {
        assert_eq!(Environment::Test.to_string(), "test");
        assert!(Environment::Production.is_production());
        assert!(!Environment::default().is_production());
    }
}
