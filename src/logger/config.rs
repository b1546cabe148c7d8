//! Runtime logger configuration

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::logger::error::LoggerError;

const VALID_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerConfig {
    /// Either a bare level or a full `EnvFilter` directive string
    pub level: String,
    pub console: ConsoleConfig,
    pub file: FileConfig,
}

impl LoggerConfig {
    pub fn validate(&self) -> Result<(), LoggerError> {
        let bare = self.level.to_lowercase();
        let is_directive = self.level.contains('=') || self.level.contains(',');
        if !is_directive && !VALID_LEVELS.contains(&bare.as_str()) {
            return Err(LoggerError::config(format!(
                "Invalid log level '{}'. Valid levels are: {}",
                self.level,
                VALID_LEVELS.join(", ")
            )));
        }

        if !self.console.enabled && !self.file.enabled {
            return Err(LoggerError::config(
                "At least one output (console or file) must be enabled",
            ));
        }

        if self.file.enabled && self.file.prefix.trim().is_empty() {
            return Err(LoggerError::config("Log file prefix cannot be empty"));
        }

        Ok(())
    }

    /// The filter directive handed to `EnvFilter`.
    pub fn filter_directive(&self) -> String {
        self.level.to_lowercase()
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            console: ConsoleConfig::default(),
            file: FileConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleConfig {
    pub enabled: bool,
    /// ANSI colors; only honored when stdout is a terminal
    pub colored: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            colored: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileConfig {
    pub enabled: bool,
    pub directory: PathBuf,
    pub prefix: String,
    pub format: LogFormat,
    pub rotation: Rotation,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            directory: PathBuf::from("logs"),
            prefix: "catalog.log".to_string(),
            format: LogFormat::Json,
            rotation: Rotation::Daily,
        }
    }
}

/// Line format of the file output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Full,
    Compact,
    Json,
}

impl FromStr for LogFormat {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" => Ok(LogFormat::Full),
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            _ => Err(LoggerError::format(format!(
                "Invalid log format '{}'. Valid formats are: full, compact, json",
                s
            ))),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogFormat::Full => "full",
            LogFormat::Compact => "compact",
            LogFormat::Json => "json",
        };
        f.write_str(name)
    }
}

/// How often the file appender starts a new file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rotation {
    Never,
    Hourly,
    Daily,
}

impl Rotation {
    pub fn to_appender_rotation(self) -> tracing_appender::rolling::Rotation {
        match self {
            Rotation::Never => tracing_appender::rolling::Rotation::NEVER,
            Rotation::Hourly => tracing_appender::rolling::Rotation::HOURLY,
            Rotation::Daily => tracing_appender::rolling::Rotation::DAILY,
        }
    }
}

impl FromStr for Rotation {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "never" | "none" => Ok(Rotation::Never),
            "hourly" => Ok(Rotation::Hourly),
            "daily" => Ok(Rotation::Daily),
            _ => Err(LoggerError::rotation(format!(
                "Invalid rotation '{}'. Valid values are: never, hourly, daily",
                s
            ))),
        }
    }
}
