//! Revision submission, inspection and moderation.

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::REVISION_TAG;
use crate::api::dto::{
    CreateRevisionRequest, ErrorResponse, InstallerResponse, RevisionActionRequest,
    RevisionResponse,
};
use crate::api::middleware::{AuthUser, StaffUser};
use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::utils::validate::ValidatedJson;

/// Mounted under `/installers`.
pub fn revision_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            list_revisions,
            submit_revision,
            clear_revisions
        ))
        .routes(routes!(
            get_revision,
            patch_revision,
            moderate_revision,
            delete_revision
        ))
}

/// Newest first.
#[utoipa::path(
    get,
    path = "/{id}/revisions",
    tag = REVISION_TAG,
    params(("id" = i32, Path, description = "Installer id")),
    responses(
        (status = 200, description = "Revisions of the installer", body = Vec<RevisionResponse>),
        (status = 404, description = "Installer not found", body = ErrorResponse)
    )
)]
async fn list_revisions(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<RevisionResponse>>> {
    let revisions = state.services.revisions.list_for_installer(id).await?;
    Ok(Json(revisions.into_iter().map(RevisionResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/{id}/revisions",
    tag = REVISION_TAG,
    params(("id" = i32, Path, description = "Installer id")),
    request_body = CreateRevisionRequest,
    security(("bearerAuth" = [])),
    responses(
        (status = 201, description = "Revision submitted", body = RevisionResponse),
        (status = 400, description = "Invalid request body", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 404, description = "Installer not found", body = ErrorResponse)
    )
)]
async fn submit_revision(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<CreateRevisionRequest>,
) -> AppResult<(StatusCode, Json<RevisionResponse>)> {
    let revision = state
        .services
        .revisions
        .submit(payload.into_new_revision(id, user.user_id))
        .await?;
    Ok((StatusCode::CREATED, Json(revision.into())))
}

/// Accepted for compatibility; revisions are never bulk-deleted.
#[utoipa::path(
    delete,
    path = "/{id}/revisions",
    tag = REVISION_TAG,
    params(("id" = i32, Path, description = "Installer id")),
    security(("bearerAuth" = [])),
    responses(
        (status = 204, description = "Nothing was removed"),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Staff only", body = ErrorResponse)
    )
)]
async fn clear_revisions(_staff: StaffUser, Path(_id): Path<i32>) -> StatusCode {
    StatusCode::NO_CONTENT
}

#[utoipa::path(
    get,
    path = "/revisions/{id}",
    tag = REVISION_TAG,
    params(("id" = i32, Path, description = "Revision id")),
    responses(
        (status = 200, description = "Revision found", body = RevisionResponse),
        (status = 404, description = "Revision not found", body = ErrorResponse)
    )
)]
async fn get_revision(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<RevisionResponse>> {
    let revision = state.services.revisions.get_revision(id).await?;
    Ok(Json(revision.into()))
}

/// Revisions are immutable; always 400 once the caller is staff.
#[utoipa::path(
    patch,
    path = "/revisions/{id}",
    tag = REVISION_TAG,
    params(("id" = i32, Path, description = "Revision id")),
    security(("bearerAuth" = [])),
    responses(
        (status = 400, description = "Revisions cannot be patched", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Staff only", body = ErrorResponse)
    )
)]
async fn patch_revision(_staff: StaffUser, Path(_id): Path<i32>) -> AppResult<StatusCode> {
    Err(AppError::bad_request("Revisions cannot be patched"))
}

/// `{"action": "accept"}` merges the revision into its installer and
/// consumes it. Any other action is a 404.
#[utoipa::path(
    put,
    path = "/revisions/{id}",
    tag = REVISION_TAG,
    params(("id" = i32, Path, description = "Revision id")),
    request_body = RevisionActionRequest,
    security(("bearerAuth" = [])),
    responses(
        (status = 202, description = "Revision accepted; the updated installer", body = InstallerResponse),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Staff only", body = ErrorResponse),
        (status = 404, description = "Unknown action or revision not found", body = ErrorResponse)
    )
)]
async fn moderate_revision(
    State(state): State<AppState>,
    StaffUser(user): StaffUser,
    Path(id): Path<i32>,
    body: Bytes,
) -> AppResult<(StatusCode, Json<InstallerResponse>)> {
    let request = RevisionActionRequest::from_body(&body)?;
    let installer = state
        .services
        .revisions
        .moderate(id, request.action.as_deref(), user.user_id)
        .await?;
    Ok((StatusCode::ACCEPTED, Json(installer.into())))
}

#[utoipa::path(
    delete,
    path = "/revisions/{id}",
    tag = REVISION_TAG,
    params(("id" = i32, Path, description = "Revision id")),
    security(("bearerAuth" = [])),
    responses(
        (status = 204, description = "Revision deleted"),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Staff only", body = ErrorResponse),
        (status = 404, description = "Revision not found", body = ErrorResponse)
    )
)]
async fn delete_revision(
    State(state): State<AppState>,
    StaffUser(user): StaffUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.revisions.delete_revision(id).await?;
    tracing::info!(revision_id = id, deleted_by = user.user_id, "Revision deleted");
    Ok(StatusCode::NO_CONTENT)
}
