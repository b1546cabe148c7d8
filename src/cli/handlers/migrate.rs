//! `migrate`: apply, preview or revert embedded migrations.

use crate::config::settings::Settings;
use crate::db::{
    applied_migration_count, pending_migration_names, revert_migrations, run_pending_migrations,
};
use crate::error::{AppError, AppResult};

pub struct MigrateCommandHandler {
    config: Settings,
}

impl MigrateCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    pub async fn execute(&self, dry_run: bool, rollback: Option<u32>) -> AppResult<()> {
        if rollback == Some(0) {
            return Err(AppError::Validation {
                field: "rollback_steps".to_string(),
                reason: "Number of rollback steps must be greater than 0".to_string(),
            });
        }

        self.config.database.validate()?;
        let url = &self.config.database.url;

        if dry_run {
            let pending = pending_migration_names(url).await?;
            if pending.is_empty() {
                println!("✓ No pending migrations - database is up to date");
            } else {
                println!("Found {} pending migration(s):", pending.len());
                for name in &pending {
                    println!("  - {}", name);
                }
            }
            return Ok(());
        }

        match rollback {
            Some(steps) => {
                let applied = applied_migration_count(url).await?;
                if applied < steps as usize {
                    return Err(AppError::Validation {
                        field: "rollback_steps".to_string(),
                        reason: format!(
                            "Cannot roll back {} migration(s): only {} applied",
                            steps, applied
                        ),
                    });
                }

                let reverted = revert_migrations(url, steps).await?;
                tracing::info!(reverted, "Migrations reverted");
                println!("✓ Rolled back {} migration(s)", reverted);
            }
            None => {
                let applied = run_pending_migrations(url).await?;
                tracing::info!(count = applied.len(), "Migrations applied");
                if applied.is_empty() {
                    println!("✓ No migrations to apply - database is up to date");
                } else {
                    println!("✓ Applied {} migration(s):", applied.len());
                    for version in &applied {
                        println!("  - {}", version);
                    }
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_zero_rollback_steps_rejected_before_connecting() {
        let mut config = Settings::default();
        config.database.url = "postgres://localhost/catalog".to_string();

        let result = MigrateCommandHandler::new(config).execute(false, Some(0)).await;
        match result {
            Err(AppError::Validation { field, reason }) => {
                assert_eq!(field, "rollback_steps");
                assert!(reason.contains("greater than 0"));
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_database_url_rejected() {
        let result = MigrateCommandHandler::new(Settings::default())
            .execute(true, None)
            .await;
        assert!(matches!(result, Err(AppError::Configuration { .. })));
    }
}
