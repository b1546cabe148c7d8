//! Async PostgreSQL connection pool (bb8 + diesel-async).

use std::time::Duration;

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::Pool;

use crate::config::DatabaseConfig;
use crate::error::{AppError, AppResult};

/// bb8::Pool wraps an Arc, so cloning only bumps a reference count.
pub type AsyncDbPool = Pool<AsyncPgConnection>;

/// Builds the pool and checks that at least one connection can be opened.
///
/// # Errors
///
/// `AppError::ConnectionPool` when the database is unreachable within
/// `connection_timeout` seconds.
pub async fn establish_async_connection_pool(config: &DatabaseConfig) -> AppResult<AsyncDbPool> {
    let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(config.url.as_str());

    let pool = Pool::builder()
        .max_size(config.max_connections)
        .min_idle(Some(config.min_connections))
        .connection_timeout(Duration::from_secs(config.connection_timeout))
        .build(manager)
        .await
        .map_err(|e| AppError::ConnectionPool {
            source: anyhow::anyhow!("Failed to build connection pool: {}", e),
        })?;

    tracing::debug!(
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        "Connection pool built"
    );

    Ok(pool)
}
