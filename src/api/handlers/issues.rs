//! Issue threads filed against installers.
//!
//! Submitter and submission time are always taken from the caller's token
//! and the server clock.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::ISSUE_TAG;
use crate::api::dto::{
    CreateIssueRequest, CreateReplyRequest, ErrorResponse, InstallerIssuesResponse,
    IssueReplyResponse, IssueResponse, PatchIssueRequest, PutIssueRequest,
};
use crate::api::middleware::AuthUser;
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::validate::ValidatedJson;

/// Mounted under `/installers`.
pub fn issue_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(game_issues))
        .routes(routes!(create_issue))
        .routes(routes!(
            create_reply,
            get_issue,
            patch_issue,
            put_issue,
            delete_issue
        ))
}

#[utoipa::path(
    get,
    path = "/issues/{slug}",
    tag = ISSUE_TAG,
    params(("slug" = String, Path, description = "Game slug")),
    responses(
        (status = 200, description = "Installers of the game with their issues", body = Vec<InstallerIssuesResponse>),
        (status = 404, description = "Game not found", body = ErrorResponse)
    )
)]
async fn game_issues(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<Vec<InstallerIssuesResponse>>> {
    let threads = state.services.issues.threads_for_game(&slug).await?;
    Ok(Json(threads.into_iter().map(InstallerIssuesResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/issues/{slug}/{installer_slug}",
    tag = ISSUE_TAG,
    params(
        ("slug" = String, Path, description = "Game slug"),
        ("installer_slug" = String, Path, description = "Installer slug within the game")
    ),
    request_body = CreateIssueRequest,
    security(("bearerAuth" = [])),
    responses(
        (status = 201, description = "Issue created", body = IssueResponse),
        (status = 400, description = "Invalid request body", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 404, description = "Installer not found", body = ErrorResponse)
    )
)]
async fn create_issue(
    State(state): State<AppState>,
    user: AuthUser,
    Path((slug, installer_slug)): Path<(String, String)>,
    ValidatedJson(payload): ValidatedJson<CreateIssueRequest>,
) -> AppResult<(StatusCode, Json<IssueResponse>)> {
    let issue = state
        .services
        .issues
        .create_issue(&slug, &installer_slug, user.user_id, payload.description)
        .await?;
    Ok((StatusCode::CREATED, Json(issue.into())))
}

#[utoipa::path(
    post,
    path = "/issue/{id}",
    tag = ISSUE_TAG,
    params(("id" = i32, Path, description = "Issue id")),
    request_body = CreateReplyRequest,
    security(("bearerAuth" = [])),
    responses(
        (status = 201, description = "Reply created", body = IssueReplyResponse),
        (status = 400, description = "Invalid request body", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 404, description = "Issue not found", body = ErrorResponse)
    )
)]
async fn create_reply(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<CreateReplyRequest>,
) -> AppResult<(StatusCode, Json<IssueReplyResponse>)> {
    let reply = state
        .services
        .issues
        .create_reply(id, user.user_id, payload.description)
        .await?;
    Ok((StatusCode::CREATED, Json(reply.into())))
}

#[utoipa::path(
    get,
    path = "/issue/{id}",
    tag = ISSUE_TAG,
    params(("id" = i32, Path, description = "Issue id")),
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Issue with its replies", body = IssueResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 404, description = "Issue not found", body = ErrorResponse)
    )
)]
async fn get_issue(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<IssueResponse>> {
    let thread = state.services.issues.get_thread(id).await?;
    Ok(Json(thread.into()))
}

#[utoipa::path(
    patch,
    path = "/issue/{id}",
    tag = ISSUE_TAG,
    params(("id" = i32, Path, description = "Issue id")),
    request_body = PatchIssueRequest,
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Issue updated", body = IssueResponse),
        (status = 400, description = "Invalid request body", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not the submitter", body = ErrorResponse),
        (status = 404, description = "Issue not found", body = ErrorResponse)
    )
)]
async fn patch_issue(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<PatchIssueRequest>,
) -> AppResult<Json<IssueResponse>> {
    let issue = state
        .services
        .issues
        .update_issue(id, payload.into_update_issue(), user.user_id, user.is_staff)
        .await?;
    Ok(Json(issue.into()))
}

#[utoipa::path(
    put,
    path = "/issue/{id}",
    tag = ISSUE_TAG,
    params(("id" = i32, Path, description = "Issue id")),
    request_body = PutIssueRequest,
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Issue replaced", body = IssueResponse),
        (status = 400, description = "Invalid request body", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not the submitter", body = ErrorResponse),
        (status = 404, description = "Issue not found", body = ErrorResponse)
    )
)]
async fn put_issue(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<PutIssueRequest>,
) -> AppResult<Json<IssueResponse>> {
    let issue = state
        .services
        .issues
        .update_issue(id, payload.into_update_issue(), user.user_id, user.is_staff)
        .await?;
    Ok(Json(issue.into()))
}

#[utoipa::path(
    delete,
    path = "/issue/{id}",
    tag = ISSUE_TAG,
    params(("id" = i32, Path, description = "Issue id")),
    security(("bearerAuth" = [])),
    responses(
        (status = 204, description = "Issue deleted"),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not the submitter", body = ErrorResponse),
        (status = 404, description = "Issue not found", body = ErrorResponse)
    )
)]
async fn delete_issue(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state
        .services
        .issues
        .delete_issue(id, user.user_id, user.is_staff)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
