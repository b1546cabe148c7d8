//! Logging setup
//!
//! A `tracing-subscriber` registry with:
//! - console output with color control
//! - optional file output (full, compact or JSON) through a rolling
//!   `tracing-appender` writer

pub mod config;
pub mod error;

pub use config::{ConsoleConfig, FileConfig, LogFormat, LoggerConfig, Rotation};
pub use error::LoggerError;

use std::io::IsTerminal;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::{
    EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Keeps the background file writer alive; drop it only at shutdown so
/// buffered lines are flushed.
#[must_use = "dropping the guard stops the file writer"]
pub struct LoggerGuard {
    _file: Option<WorkerGuard>,
}

/// Installs the global subscriber described by `config`.
pub fn init_logger(config: LoggerConfig) -> Result<LoggerGuard, LoggerError> {
    config.validate()?;

    let mut layers: Vec<BoxedLayer> = Vec::new();
    let mut file_guard = None;

    // File layer goes first so console ANSI settings cannot leak into
    // span fields rendered for the file (tokio-rs/tracing#1817).
    if config.file.enabled {
        let (layer, guard) = file_layer(&config)?;
        layers.push(layer);
        file_guard = Some(guard);
    }

    if config.console.enabled {
        let use_ansi = config.console.colored && std::io::stdout().is_terminal();
        layers.push(
            fmt::layer()
                .with_ansi(use_ansi)
                .with_target(true)
                .with_level(true)
                .with_filter(build_filter(&config)?)
                .boxed(),
        );
    }

    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .map_err(|e| LoggerError::Init {
            message: e.to_string(),
        })?;

    Ok(LoggerGuard { _file: file_guard })
}

fn build_filter(config: &LoggerConfig) -> Result<EnvFilter, LoggerError> {
    EnvFilter::try_new(config.filter_directive()).map_err(|e| {
        LoggerError::config(format!("Invalid filter directive '{}': {}", config.level, e))
    })
}

fn file_layer(config: &LoggerConfig) -> Result<(BoxedLayer, WorkerGuard), LoggerError> {
    std::fs::create_dir_all(&config.file.directory)?;

    let appender = RollingFileAppender::builder()
        .rotation(config.file.rotation.to_appender_rotation())
        .filename_prefix(config.file.prefix.clone())
        .build(&config.file.directory)
        .map_err(|e| LoggerError::rotation(e.to_string()))?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let base = fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(writer);
    let filter = build_filter(config)?;

    let layer = match config.file.format {
        LogFormat::Full => base.with_filter(filter).boxed(),
        LogFormat::Compact => base.compact().with_filter(filter).boxed(),
        LogFormat::Json => base.json().with_filter(filter).boxed(),
    };

    Ok((layer, guard))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_is_rejected_before_install() {
        let mut config = LoggerConfig::default();
        config.console.enabled = false;
        assert!(matches!(init_logger(config), Err(LoggerError::Config { .. })));
    }

    #[test]
    fn test_malformed_directive_is_an_error() {
        let config = LoggerConfig {
            level: "info,installer_catalog=[".to_string(),
            ..LoggerConfig::default()
        };
        assert!(config.validate().is_ok());
        assert!(matches!(build_filter(&config), Err(LoggerError::Config { .. })));

        let config = LoggerConfig {
            level: "info,installer_catalog=debug".to_string(),
            ..LoggerConfig::default()
        };
        assert!(build_filter(&config).is_ok());
    }

    #[test]
    fn test_file_layer_creates_directory() {
        let dir = tempfile::TempDir::new().expect("temp dir");
        let config = LoggerConfig {
            file: FileConfig {
                enabled: true,
                directory: dir.path().join("nested"),
                rotation: Rotation::Never,
                ..FileConfig::default()
            },
            ..LoggerConfig::default()
        };

        let (_layer, _guard) = file_layer(&config).expect("file layer");
        assert!(dir.path().join("nested").is_dir());
    }
}
