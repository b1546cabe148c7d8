//! Applies CLI flags on top of file and environment configuration.
//!
//! Precedence, lowest first: config files, `CATALOG_*` variables, global
//! flags (`--verbose`/`--quiet`), subcommand flags.

use super::parser::{Cli, Commands};
use crate::config::error::ConfigError;
use crate::config::{ConfigLoader, settings::Settings};

pub struct ConfigurationMerger {
    base_config: Settings,
}

impl ConfigurationMerger {
    pub fn new(base_config: Settings) -> Self {
        Self { base_config }
    }

    /// Loads the unvalidated base settings selected by `--config` and `--env`.
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let mut loader = match &cli.config {
            Some(path) => ConfigLoader::from_file(path),
            None => ConfigLoader::new()?,
        };
        if let Some(env) = cli.env {
            loader = loader.with_environment(env.into());
        }

        Ok(Self::new(loader.load_unvalidated()?))
    }

    /// Returns the merged settings after validating them.
    pub fn merge_cli_args(&self, cli: &Cli) -> Result<Settings, ConfigError> {
        let mut config = self.base_config.clone();

        if cli.verbose {
            config.logger.level = "debug".to_string();
        } else if cli.quiet {
            config.logger.level = "error".to_string();
        }

        if let Some(Commands::Serve {
            host,
            port,
            log_level,
            ..
        }) = &cli.command
        {
            if let Some(host) = host {
                config.server.host = host.clone();
            }
            if let Some(port) = port {
                config.server.port = *port;
            }
            if let Some(level) = log_level {
                config.logger.level = level.as_str().to_string();
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn config(&self) -> &Settings {
        &self.base_config
    }
}
