//! Router assembly.

use std::time::Duration;

use axum::{Router, middleware};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::doc::ApiDoc;
use crate::api::handlers;
use crate::api::middleware::{
    auth_middleware, global_error_handler, logging_middleware, request_id_middleware,
};
use crate::state::AppState;

pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

/// Builds the application router.
///
/// Layers, outermost first: CORS, compression, request id, logging, error
/// normalization, authentication, timeout.
pub fn create_router(state: AppState, request_timeout: Duration) -> Router {
    let installer_routes = handlers::installers::installer_routes()
        .merge(handlers::revisions::revision_routes())
        .merge(handlers::issues::issue_routes());

    let api_routes = OpenApiRouter::new()
        .nest("/installers", installer_routes)
        .nest("/auth", handlers::auth::auth_routes())
        .merge(handlers::health::health_routes());

    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .nest("/api", api_routes)
        .split_for_parts();

    router
        .merge(SwaggerUi::new("/swagger-ui").url(OPENAPI_JSON_PATH, api))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .layer(middleware::from_fn(global_error_handler))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
