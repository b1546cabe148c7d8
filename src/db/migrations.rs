//! Embedded schema migrations.
//!
//! diesel's `MigrationHarness` is synchronous, so every helper opens a
//! dedicated `PgConnection` on the blocking thread pool.

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

use crate::error::{AppError, AppResult};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

fn migration_error(operation: &str, error: impl std::fmt::Display) -> AppError {
    AppError::Database {
        operation: operation.to_string(),
        source: anyhow::anyhow!("{}", error),
    }
}

async fn with_connection<T, F>(database_url: &str, operation: &'static str, f: F) -> AppResult<T>
where
    T: Send + 'static,
    F: FnOnce(&mut PgConnection) -> AppResult<T> + Send + 'static,
{
    let url = database_url.to_string();
    tokio::task::spawn_blocking(move || {
        let mut conn =
            PgConnection::establish(&url).map_err(|e| migration_error(operation, e))?;
        f(&mut conn)
    })
    .await
    .map_err(|e| AppError::Internal {
        source: anyhow::Error::from(e),
    })?
}

/// Names of migrations that have not been applied yet.
pub async fn pending_migration_names(database_url: &str) -> AppResult<Vec<String>> {
    with_connection(database_url, "check pending migrations", |conn| {
        let pending = conn
            .pending_migrations(MIGRATIONS)
            .map_err(|e| migration_error("check pending migrations", e))?;
        Ok(pending.iter().map(|m| m.name().to_string()).collect())
    })
    .await
}

/// Applies every pending migration and returns the applied versions.
pub async fn run_pending_migrations(database_url: &str) -> AppResult<Vec<String>> {
    with_connection(database_url, "run pending migrations", |conn| {
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| migration_error("run pending migrations", e))?;
        Ok(applied.iter().map(|v| v.to_string()).collect())
    })
    .await
}

pub async fn applied_migration_count(database_url: &str) -> AppResult<usize> {
    with_connection(database_url, "get applied migrations", |conn| {
        conn.applied_migrations()
            .map(|applied| applied.len())
            .map_err(|e| migration_error("get applied migrations", e))
    })
    .await
}

/// Reverts the last `steps` migrations, newest first.
pub async fn revert_migrations(database_url: &str, steps: u32) -> AppResult<usize> {
    with_connection(database_url, "revert migration", move |conn| {
        let mut reverted = 0;
        for _ in 0..steps {
            conn.revert_last_migration(MIGRATIONS)
                .map_err(|e| migration_error("revert migration", e))?;
            reverted += 1;
        }
        Ok(reverted)
    })
    .await
}
