//! Configuration validation rules

use crate::config::error::ConfigError;
use crate::config::settings::{DatabaseConfig, LoggerSettings, ServerConfig, Settings};

const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

impl ServerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::validation(
                "server.port",
                "Port must be between 1 and 65535.",
            ));
        }

        if self.host.trim().is_empty() {
            return Err(ConfigError::validation("server.host", "Host cannot be empty."));
        }

        if self.request_timeout == 0 {
            return Err(ConfigError::validation(
                "server.request_timeout",
                "Request timeout must be greater than 0 seconds.",
            ));
        }

        Ok(())
    }
}

impl DatabaseConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.url.is_empty() {
            return Err(ConfigError::validation(
                "database.url",
                "Database URL is required.",
            ));
        }

        if !(self.url.starts_with("postgres://") || self.url.starts_with("postgresql://")) {
            return Err(ConfigError::validation(
                "database.url",
                "Expected a PostgreSQL URL: postgres://[user:password@]host[:port]/database",
            ));
        }

        if self.max_connections == 0 {
            return Err(ConfigError::validation(
                "database.max_connections",
                "Max connections must be greater than 0.",
            ));
        }

        if self.min_connections > self.max_connections {
            return Err(ConfigError::validation(
                "database.min_connections",
                format!(
                    "Min connections ({}) cannot exceed max connections ({}).",
                    self.min_connections, self.max_connections
                ),
            ));
        }

        if self.connection_timeout == 0 {
            return Err(ConfigError::validation(
                "database.connection_timeout",
                "Connection timeout must be greater than 0 seconds.",
            ));
        }

        Ok(())
    }
}

impl LoggerSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !VALID_LOG_LEVELS.contains(&self.level.to_lowercase().as_str()) {
            return Err(ConfigError::validation(
                "logger.level",
                format!(
                    "Invalid log level '{}'. Valid levels are: {}",
                    self.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            ));
        }

        if !self.console.enabled && !self.file.enabled {
            return Err(ConfigError::validation(
                "logger",
                "At least one output (console or file) must be enabled.",
            ));
        }

        if self.file.enabled && self.file.directory.trim().is_empty() {
            return Err(ConfigError::validation(
                "logger.file.directory",
                "A directory is required when file logging is enabled.",
            ));
        }

        // format and rotation names are checked by the conversion itself
        self.file.clone().into_file_config().map(|_| ())
    }
}

impl Settings {
    /// Validates every section, returning the first failure.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.database.validate()?;
        self.jwt.validate()?;
        self.logger.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_settings() -> Settings {
        let mut settings = Settings::default();
        settings.database.url = "postgres://localhost/catalog".to_string();
        settings.jwt.secret = "x".repeat(40);
        settings
    }

    #[test]
    fn test_valid_settings_pass() {
        assert!(valid_settings().validate().is_ok());
    }

    #[test]
    fn test_port_zero_rejected() {
        let mut settings = valid_settings();
        settings.server.port = 0;
        match settings.validate() {
            Err(ConfigError::ValidationError { field, .. }) => assert_eq!(field, "server.port"),
            other => panic!("Expected port validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_database_url_scheme() {
        let mut db = valid_settings().database;
        db.url = "mysql://localhost/catalog".to_string();
        assert!(db.validate().is_err());
        db.url = "postgresql://localhost/catalog".to_string();
        assert!(db.validate().is_ok());
    }

    #[test]
    fn test_min_connections_above_max() {
        let mut db = valid_settings().database;
        db.min_connections = 20;
        db.max_connections = 5;
        let err = db.validate().unwrap_err();
        assert!(err.to_string().contains("cannot exceed"));
    }

    #[test]
    fn test_logger_needs_an_output() {
        let mut logger = LoggerSettings::default();
        logger.console.enabled = false;
        assert!(logger.validate().is_err());
        logger.file.enabled = true;
        assert!(logger.validate().is_ok());
    }

    #[test]
    fn test_logger_level_case_insensitive() {
        let mut logger = LoggerSettings::default();
        logger.level = "WARN".to_string();
        assert!(logger.validate().is_ok());
        logger.level = "verbose".to_string();
        assert!(logger.validate().is_err());
    }
}
