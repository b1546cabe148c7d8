//! `serve`: run the HTTP server, or only check the configuration.

use crate::config::settings::Settings;
use crate::server::Server;

pub struct ServeCommandHandler {
    config: Settings,
}

impl ServeCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    pub async fn execute(self, dry_run: bool) -> anyhow::Result<()> {
        if dry_run {
            return self.validate_only();
        }
        Server::new(self.config).run().await
    }

    /// Prints a summary of the effective configuration without binding.
    pub fn validate_only(&self) -> anyhow::Result<()> {
        self.config.validate()?;

        println!("✓ Configuration is valid");
        println!("✓ Server would bind to: {}", self.config.server.address());
        println!(
            "✓ Database pool: {}..={} connections",
            self.config.database.min_connections, self.config.database.max_connections
        );
        println!(
            "✓ Migrations on startup: {}",
            if self.config.database.auto_migrate { "yes" } else { "no" }
        );
        println!("✓ Log level: {}", self.config.logger.level);
        Ok(())
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Settings {
        let mut config = Settings::default();
        config.database.url = "postgres://localhost/catalog".to_string();
        config.jwt.secret = "s".repeat(32);
        config
    }

    #[tokio::test]
    async fn test_dry_run_with_valid_config() {
        let handler = ServeCommandHandler::new(valid_config());
        assert_eq!(handler.config().server.port, 3000);
        assert!(handler.execute(true).await.is_ok());
    }

    #[tokio::test]
    async fn test_dry_run_rejects_invalid_config() {
        let mut config = valid_config();
        config.server.port = 0;
        assert!(ServeCommandHandler::new(config).execute(true).await.is_err());
    }
}
