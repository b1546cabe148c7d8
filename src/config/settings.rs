//! Configuration settings structures
//!
//! Every section deserializes with defaults so that a partial TOML file
//! (or none at all plus `CATALOG_*` variables) yields a complete `Settings`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;
use crate::logger::{ConsoleConfig, FileConfig, LogFormat, LoggerConfig, Rotation};

fn default_app_name() -> String {
    "installer-catalog".to_string()
}

fn default_app_version() -> String {
    crate::pkg_version().to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_request_timeout() -> u64 {
    30
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_connection_timeout() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_log_directory() -> String {
    "logs".to_string()
}

fn default_log_file_prefix() -> String {
    "catalog.log".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

fn default_access_token_expiration() -> i64 {
    24
}

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

/// Axum HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
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
            request_timeout: default_request_timeout(),
        }
    }
}

/// Diesel database connection configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// Connection timeout in seconds
    #[serde(default = "default_connection_timeout")]
    pub connection_timeout: u64,

    /// Run pending migrations before the server starts accepting requests
    #[serde(default)]
    pub auto_migrate: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connection_timeout: default_connection_timeout(),
            auto_migrate: false,
        }
    }
}

/// JWT authentication configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtConfig {
    /// HS256 signing secret. Supply it through `CATALOG_JWT__SECRET`.
    #[serde(default)]
    pub secret: String,

    /// Access token lifetime in hours
    #[serde(default = "default_access_token_expiration")]
    pub access_token_expiration: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            access_token_expiration: default_access_token_expiration(),
        }
    }
}

impl JwtConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.secret.is_empty() {
            return Err(ConfigError::validation(
                "jwt.secret",
                "JWT secret cannot be empty",
            ));
        }

        if self.secret.len() < 32 {
            return Err(ConfigError::validation(
                "jwt.secret",
                "JWT secret should be at least 32 characters for security",
            ));
        }

        if self.access_token_expiration <= 0 {
            return Err(ConfigError::validation(
                "jwt.access_token_expiration",
                "Access token expiration must be positive",
            ));
        }

        Ok(())
    }
}

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
            enabled: true,
            colored: true,
        }
    }
}

/// File output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSettings {
    #[serde(default)]
    pub enabled: bool,

    /// Directory the rolling files are written into
    #[serde(default = "default_log_directory")]
    pub directory: String,

    /// File name prefix; the rotation suffix is appended to it
    #[serde(default = "default_log_file_prefix")]
    pub prefix: String,

    /// "full", "compact" or "json"
    #[serde(default = "default_log_format")]
    pub format: String,

    /// "never", "hourly" or "daily"
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            directory: default_log_directory(),
            prefix: default_log_file_prefix(),
            format: default_log_format(),
            rotation: default_rotation(),
        }
    }
}

/// Logger configuration settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerSettings {
    /// "trace", "debug", "info", "warn" or "error"
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
    /// Convert the file representation into the runtime `LoggerConfig`.
    pub fn into_logger_config(self) -> Result<LoggerConfig, ConfigError> {
        let console = ConsoleConfig {
            enabled: self.console.enabled,
            colored: self.console.colored,
        };
        let file = self.file.into_file_config()?;

        let config = LoggerConfig {
            level: self.level,
            console,
            file,
        };
        config
            .validate()
            .map_err(|e| ConfigError::validation("logger".to_string(), e.to_string()))?;
        Ok(config)
    }
}

impl FileSettings {
    pub fn into_file_config(self) -> Result<FileConfig, ConfigError> {
        let format = self
            .format
            .parse::<LogFormat>()
            .map_err(|e| ConfigError::validation("logger.file.format".to_string(), e.to_string()))?;
        let rotation = self.rotation.parse::<Rotation>().map_err(|e| {
            ConfigError::validation("logger.file.rotation".to_string(), e.to_string())
        })?;

        Ok(FileConfig {
            enabled: self.enabled,
            directory: PathBuf::from(self.directory),
            prefix: self.prefix,
            format,
            rotation,
        })
    }
}

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub application: ApplicationConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub jwt: JwtConfig,

    #[serde(default)]
    pub logger: LoggerSettings,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_settings() -> impl Strategy<Value = Settings> {
        (
            "[a-z][a-z0-9-]{0,15}",
            1u16..=65535,
            1u64..=600,
            1u32..=50,
            prop::bool::ANY,
            "[a-zA-Z0-9]{32,48}",
            1i64..=720,
            prop::sample::select(vec!["trace", "debug", "info", "warn", "error"]),
        )
            .prop_map(
                |(name, port, timeout, max_conn, auto_migrate, secret, exp, level)| Settings {
                    application: ApplicationConfig {
                        name,
                        version: "0.1.0".to_string(),
                    },
                    server: ServerConfig {
                        host: "127.0.0.1".to_string(),
                        port,
                        request_timeout: timeout,
                    },
                    database: DatabaseConfig {
                        url: "postgres://localhost/catalog".to_string(),
                        max_connections: max_conn,
                        min_connections: 1,
                        connection_timeout: 30,
                        auto_migrate,
                    },
                    jwt: JwtConfig {
                        secret,
                        access_token_expiration: exp,
                    },
                    logger: LoggerSettings {
                        level: level.to_string(),
                        ..LoggerSettings::default()
                    },
                },
            )
    }

    proptest! {
        #[test]
        fn prop_settings_toml_round_trip(settings in arb_settings()) {
            let encoded = toml::to_string(&settings).expect("serialize");
            let decoded: Settings = toml::from_str(&encoded).expect("deserialize");
            prop_assert_eq!(decoded, settings);
        }
    }

    #[test]
    fn test_server_config_address() {
        let config = ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 8080,
            ..ServerConfig::default()
        };
        assert_eq!(config.address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_settings_deserialize_partial() {
        let settings: Settings = toml::from_str(
            r#"
[server]
port = 9000

[database]
url = "postgres://db/catalog"
"#,
        )
        .expect("partial config should parse");

        assert_eq!(settings.server.port, 9000);
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.database.url, "postgres://db/catalog");
        assert_eq!(settings.database.max_connections, 10);
        assert_eq!(settings.jwt.access_token_expiration, 24);
        assert_eq!(settings.logger.level, "info");
    }

    #[test]
    fn test_jwt_config_validate() {
        let mut jwt = JwtConfig::default();
        assert!(jwt.validate().is_err());

        jwt.secret = "short".to_string();
        assert!(jwt.validate().is_err());

        jwt.secret = "a".repeat(32);
        assert!(jwt.validate().is_ok());

        jwt.access_token_expiration = 0;
        assert!(jwt.validate().is_err());
    }

    #[test]
    fn test_logger_settings_into_logger_config() {
        let settings = LoggerSettings {
            level: "debug".to_string(),
            console: ConsoleSettings {
                enabled: true,
                colored: false,
            },
            file: FileSettings {
                enabled: true,
                format: "compact".to_string(),
                rotation: "hourly".to_string(),
                ..FileSettings::default()
            },
        };

        let config = settings.into_logger_config().expect("valid logger settings");
        assert_eq!(config.level, "debug");
        assert!(!config.console.colored);
        assert_eq!(config.file.format, LogFormat::Compact);
        assert_eq!(config.file.rotation, Rotation::Hourly);
        assert_eq!(config.file.directory, PathBuf::from("logs"));
    }

    #[test]
    fn test_file_settings_bad_rotation() {
        let file = FileSettings {
            rotation: "weekly".to_string(),
            ..FileSettings::default()
        };
        assert!(file.into_file_config().is_err());
    }
}
