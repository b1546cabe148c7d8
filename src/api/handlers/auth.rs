//! Token issuance.

use axum::{Json, extract::State};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::AUTH_TAG;
use crate::api::dto::{ErrorResponse, LoginRequest, LoginResponse};
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::jwt::generate_access_token;
use crate::utils::validate::ValidatedJson;

pub fn auth_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(login))
}

/// Exchange username and password for a bearer token.
#[utoipa::path(
    post,
    path = "/login",
    tag = AUTH_TAG,
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Invalid request body", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    )
)]
async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let user = state
        .services
        .users
        .authenticate(&payload.username, &payload.password)
        .await?;

    let expiration_hours = state.jwt_config.access_token_expiration;
    let access_token = generate_access_token(
        user.id,
        user.username.clone(),
        user.is_staff,
        &state.jwt_config.secret,
        expiration_hours,
    )?;

    tracing::info!(user_id = user.id, "User logged in");

    Ok(Json(LoginResponse {
        access_token,
        token_type: "Bearer".to_string(),
        expires_in: expiration_hours * 3600,
        user_id: user.id,
        username: user.username,
        is_staff: user.is_staff,
    }))
}
