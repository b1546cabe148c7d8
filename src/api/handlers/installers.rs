//! Installer listing, detail and game-scoped lookups.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::INSTALLER_TAG;
use crate::api::dto::{
    ErrorResponse, GameRevisionsResponse, InstallerResponse, PagedResponse, PaginationParams,
    PatchInstallerRequest, PutInstallerRequest,
};
use crate::api::middleware::StaffUser;
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::validate::{ValidatedJson, ValidatedQuery};

/// Mounted under `/installers`.
pub fn installer_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_installers))
        .routes(routes!(
            get_installer,
            patch_installer,
            put_installer,
            delete_installer
        ))
        .routes(routes!(game_installers))
        .routes(routes!(game_revisions))
}

#[utoipa::path(
    get,
    path = "/",
    tag = INSTALLER_TAG,
    params(PaginationParams),
    responses(
        (status = 200, description = "Installers ordered by id", body = PagedResponse<InstallerResponse>),
        (status = 400, description = "Invalid pagination parameters", body = ErrorResponse)
    )
)]
async fn list_installers(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<PaginationParams>,
) -> AppResult<Json<PagedResponse<InstallerResponse>>> {
    let (installers, total) = state
        .services
        .installers
        .list_paginated(params.offset(), params.limit())
        .await?;

    let data = installers.into_iter().map(InstallerResponse::from).collect();
    Ok(Json(PagedResponse::new(data, &params, total)))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = INSTALLER_TAG,
    params(("id" = i32, Path, description = "Installer id")),
    responses(
        (status = 200, description = "Installer found", body = InstallerResponse),
        (status = 404, description = "Installer not found", body = ErrorResponse)
    )
)]
async fn get_installer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<InstallerResponse>> {
    let installer = state.services.installers.get_installer(id).await?;
    Ok(Json(installer.into()))
}

/// Partial update. Setting `published` to true records the caller as publisher.
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = INSTALLER_TAG,
    params(("id" = i32, Path, description = "Installer id")),
    request_body = PatchInstallerRequest,
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Installer updated", body = InstallerResponse),
        (status = 400, description = "Invalid request body", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Staff only", body = ErrorResponse),
        (status = 404, description = "Installer not found", body = ErrorResponse),
        (status = 409, description = "Slug already taken", body = ErrorResponse)
    )
)]
async fn patch_installer(
    State(state): State<AppState>,
    StaffUser(user): StaffUser,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<PatchInstallerRequest>,
) -> AppResult<Json<InstallerResponse>> {
    let installer = state
        .services
        .installers
        .update_installer(id, payload.into_update_installer(), user.user_id, &user.username)
        .await?;
    Ok(Json(installer.into()))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = INSTALLER_TAG,
    params(("id" = i32, Path, description = "Installer id")),
    request_body = PutInstallerRequest,
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Installer replaced", body = InstallerResponse),
        (status = 400, description = "Invalid request body", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Staff only", body = ErrorResponse),
        (status = 404, description = "Installer not found", body = ErrorResponse),
        (status = 409, description = "Slug already taken", body = ErrorResponse)
    )
)]
async fn put_installer(
    State(state): State<AppState>,
    StaffUser(user): StaffUser,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<PutInstallerRequest>,
) -> AppResult<Json<InstallerResponse>> {
    let installer = state
        .services
        .installers
        .update_installer(id, payload.into_update_installer(), user.user_id, &user.username)
        .await?;
    Ok(Json(installer.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = INSTALLER_TAG,
    params(("id" = i32, Path, description = "Installer id")),
    security(("bearerAuth" = [])),
    responses(
        (status = 204, description = "Installer deleted"),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Staff only", body = ErrorResponse),
        (status = 404, description = "Installer not found", body = ErrorResponse)
    )
)]
async fn delete_installer(
    State(state): State<AppState>,
    StaffUser(user): StaffUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.installers.delete_installer(id).await?;
    tracing::info!(installer_id = id, deleted_by = user.user_id, "Installer deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Installers whose game slug or own slug equals `slug`.
#[utoipa::path(
    get,
    path = "/game/{slug}",
    tag = INSTALLER_TAG,
    params(("slug" = String, Path, description = "Game or installer slug")),
    responses(
        (status = 200, description = "Matching installers, possibly empty", body = Vec<InstallerResponse>)
    )
)]
async fn game_installers(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<Vec<InstallerResponse>>> {
    let installers = state.services.installers.fuzzy_filter(&slug).await?;
    Ok(Json(installers.into_iter().map(InstallerResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/game/{slug}/revisions",
    tag = INSTALLER_TAG,
    params(("slug" = String, Path, description = "Slug of a canonical game")),
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Game with installers and their revisions", body = GameRevisionsResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Staff only", body = ErrorResponse),
        (status = 404, description = "No canonical game with that slug", body = ErrorResponse)
    )
)]
async fn game_revisions(
    State(state): State<AppState>,
    _staff: StaffUser,
    Path(slug): Path<String>,
) -> AppResult<Json<GameRevisionsResponse>> {
    let (game, installers) = state.services.installers.game_revisions(&slug).await?;
    Ok(Json(GameRevisionsResponse::new(game, installers)))
}
