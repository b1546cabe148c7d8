//! HTTP server lifecycle: startup, optional migrations, graceful shutdown.

use std::time::Duration;

use tokio::net::TcpListener;
use tokio::signal;

use crate::api::routes::create_router;
use crate::config::{Environment, settings::Settings};
use crate::db::{establish_async_connection_pool, run_pending_migrations};
use crate::state::AppState;

pub struct Server {
    settings: Settings,
}

impl Server {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Runs until Ctrl+C or SIGTERM.
    pub async fn run(self) -> anyhow::Result<()> {
        let settings = &self.settings;

        tracing::info!(
            app_name = %settings.application.name,
            app_version = %settings.application.version,
            environment = %Environment::from_env().as_str(),
            "Application starting"
        );
        tracing::info!(
            host = %settings.server.host,
            port = settings.server.port,
            request_timeout = settings.server.request_timeout,
            "Server configuration loaded"
        );
        tracing::info!(
            max_connections = settings.database.max_connections,
            min_connections = settings.database.min_connections,
            connection_timeout = settings.database.connection_timeout,
            auto_migrate = settings.database.auto_migrate,
            "Database configuration loaded"
        );
        tracing::info!(
            access_token_expiration = settings.jwt.access_token_expiration,
            secret_configured = !settings.jwt.secret.is_empty(),
            "JWT configuration loaded"
        );

        settings.jwt.validate().map_err(|e| {
            tracing::error!(error = %e, "JWT configuration validation failed");
            anyhow::anyhow!("JWT configuration validation failed: {}", e)
        })?;

        if settings.database.auto_migrate {
            let applied = run_pending_migrations(&settings.database.url).await?;
            tracing::info!(count = applied.len(), migrations = ?applied, "Migrations applied");
        }

        let pool = establish_async_connection_pool(&settings.database).await?;
        tracing::info!("Database connection pool initialized");

        let state = AppState::new(pool, settings.jwt.clone());
        let router = create_router(state, Duration::from_secs(settings.server.request_timeout));

        let address = settings.server.address();
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!(error = %e, address = %address, "Failed to bind to address");
            anyhow::anyhow!("Failed to bind to {}: {}", address, e)
        })?;

        tracing::info!(address = %address, "Server listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

/// Resolves on Ctrl+C or SIGTERM. A handler that fails to install is logged
/// and never fires.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
