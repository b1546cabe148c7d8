//! Health check endpoints.
//!
//! `/health` checks the database through the pool directly; `/health/live`
//! never touches a dependency.

use std::collections::HashMap;
use std::time::Instant;

use axum::{Json, extract::State, http::StatusCode};
use diesel_async::RunQueryDsl;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::HEALTH_TAG;
use crate::api::dto::{ComponentHealth, HealthResponse, HealthStatus};
use crate::state::AppState;

pub fn health_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(health_check))
        .routes(routes!(liveness_check))
}

#[utoipa::path(
    get,
    path = "/health",
    tag = HEALTH_TAG,
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Service is unhealthy", body = HealthResponse)
    )
)]
async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let mut checks = HashMap::new();
    checks.insert("database".to_string(), check_database(&state).await);

    let response = HealthResponse::from_checks(crate::pkg_version().to_string(), checks);
    let status = match response.status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status, Json(response))
}

#[utoipa::path(
    get,
    path = "/health/live",
    tag = HEALTH_TAG,
    responses(
        (status = 200, description = "Service is alive")
    )
)]
async fn liveness_check() -> StatusCode {
    StatusCode::OK
}

async fn check_database(state: &AppState) -> ComponentHealth {
    let start = Instant::now();

    let outcome = match state.db_pool.get().await {
        Ok(mut conn) => diesel::sql_query("SELECT 1")
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|e| format!("Query failed: {}", e)),
        Err(e) => Err(format!("Connection failed: {}", e)),
    };
    let response_time_ms = Some(start.elapsed().as_millis() as u64);

    match outcome {
        Ok(()) => ComponentHealth {
            status: HealthStatus::Healthy,
            message: Some("Connected".to_string()),
            response_time_ms,
        },
        Err(message) => {
            tracing::warn!(error = %message, "Database health check failed");
            ComponentHealth {
                status: HealthStatus::Unhealthy,
                message: Some(message),
                response_time_ms,
            }
        }
    }
}
