//! Router-level tests that never reach the database: authentication,
//! permission checks and fixed-status endpoints all resolve before a
//! connection is requested from the (lazy, unreachable) pool. Accounts are
//! served from memory.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::Pool;
use installer_catalog::AppState;
use installer_catalog::api::routes::create_router;
use installer_catalog::config::JwtConfig;
use installer_catalog::error::AppResult;
use installer_catalog::models::User;
use installer_catalog::services::AccountDirectory;
use installer_catalog::utils::jwt::generate_access_token;
use serde_json::Value;
use tower::ServiceExt;

const SECRET: &str = "router_test_secret_at_least_32_chars!";

const PLAYER_ID: i32 = 7;
const MODERATOR_ID: i32 = 8;
const DEMOTED_ID: i32 = 9;
const DELETED_ID: i32 = 99;

struct Accounts;

#[async_trait]
impl AccountDirectory for Accounts {
    async fn find_account(&self, user_id: i32) -> AppResult<Option<User>> {
        let (username, is_staff) = match user_id {
            PLAYER_ID => ("player", false),
            MODERATOR_ID => ("moderator", true),
            DEMOTED_ID => ("demoted", false),
            _ => return Ok(None),
        };
        let now = chrono::Utc::now().naive_utc();
        Ok(Some(User {
            id: user_id,
            username: username.to_string(),
            email: format!("{}@example.com", username),
            password: String::new(),
            is_staff,
            created_at: now,
            updated_at: now,
        }))
    }
}

fn app() -> Router {
    let manager =
        AsyncDieselConnectionManager::<AsyncPgConnection>::new("postgres://invalid:5432/catalog");
    let pool = Pool::builder()
        .connection_timeout(Duration::from_millis(200))
        .build_unchecked(manager);
    let jwt = JwtConfig {
        secret: SECRET.to_string(),
        access_token_expiration: 1,
    };
    let state = AppState::new(pool, jwt).with_accounts(Arc::new(Accounts));
    create_router(state, Duration::from_secs(5))
}

fn token_for(user_id: i32, is_staff: bool) -> String {
    generate_access_token(user_id, "tester".to_string(), is_staff, SECRET, 1).unwrap()
}

fn token(is_staff: bool) -> String {
    if is_staff {
        token_for(MODERATOR_ID, true)
    } else {
        token_for(PLAYER_ID, false)
    }
}

fn request(method: Method, uri: &str, bearer: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn send(req: Request<Body>) -> (StatusCode, Value) {
    let response = app().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn liveness_is_always_ok() {
    let (status, _) = send(request(Method::GET, "/api/health/live", None, "")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn request_id_is_echoed() {
    let req = Request::builder()
        .uri("/api/health/live")
        .header("x-request-id", "trace-me-123")
        .body(Body::empty())
        .unwrap();
    let response = app().oneshot(req).await.unwrap();
    assert_eq!(response.headers()["x-request-id"], "trace-me-123");
}

#[tokio::test]
async fn request_id_is_generated_when_missing() {
    let response = app()
        .oneshot(request(Method::GET, "/api/health/live", None, ""))
        .await
        .unwrap();
    let id = response.headers()["x-request-id"].to_str().unwrap();
    assert_eq!(id.len(), 36);
}

#[tokio::test]
async fn anonymous_issue_creation_is_rejected() {
    let (status, body) = send(request(
        Method::POST,
        "/api/installers/issues/quake/quake-gog",
        None,
        r#"{"description": "crashes on start"}"#,
    ))
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn anonymous_reply_creation_is_rejected() {
    let (status, _) = send(request(
        Method::POST,
        "/api/installers/issue/3",
        None,
        r#"{"description": "same here"}"#,
    ))
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn anonymous_issue_read_is_rejected() {
    let (status, _) = send(request(Method::GET, "/api/installers/issue/3", None, "")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn patching_a_revision_is_a_bad_request() {
    let staff = token(true);
    let (status, body) = send(request(
        Method::PATCH,
        "/api/installers/revisions/5",
        Some(&staff),
        r#"{"comment": "edit"}"#,
    ))
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn patching_a_revision_still_requires_staff() {
    let (status, _) = send(request(Method::PATCH, "/api/installers/revisions/5", None, "{}")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let user = token(false);
    let (status, _) = send(request(
        Method::PATCH,
        "/api/installers/revisions/5",
        Some(&user),
        "{}",
    ))
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn unknown_revision_action_is_not_found() {
    let staff = token(true);
    let (status, body) = send(request(
        Method::PUT,
        "/api/installers/revisions/5",
        Some(&staff),
        r#"{"action": "reject"}"#,
    ))
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn missing_action_is_not_found() {
    let staff = token(true);
    for body in ["", "{}", r#"{"action": null}"#] {
        let (status, _) = send(request(
            Method::PUT,
            "/api/installers/revisions/5",
            Some(&staff),
            body,
        ))
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND, "body {:?}", body);
    }
}

#[tokio::test]
async fn malformed_action_body_is_a_bad_request() {
    let staff = token(true);
    for body in ["not json", r#"{"action": "#] {
        let (status, response) = send(request(
            Method::PUT,
            "/api/installers/revisions/5",
            Some(&staff),
            body,
        ))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {:?}", body);
        assert_eq!(response["code"], "BAD_REQUEST");
    }
}

#[tokio::test]
async fn deleting_a_revision_list_is_a_no_op() {
    let staff = token(true);
    let (status, _) = send(request(
        Method::DELETE,
        "/api/installers/1/revisions",
        Some(&staff),
        "",
    ))
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn deleting_a_revision_list_requires_staff() {
    let user = token(false);
    let (status, _) = send(request(
        Method::DELETE,
        "/api/installers/1/revisions",
        Some(&user),
        "",
    ))
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn installer_writes_require_staff() {
    let payload = r#"{"published": true}"#;

    let (status, _) = send(request(Method::PATCH, "/api/installers/1", None, payload)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let user = token(false);
    let (status, body) = send(request(
        Method::PATCH,
        "/api/installers/1",
        Some(&user),
        payload,
    ))
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "FORBIDDEN");

    let (status, _) = send(request(Method::DELETE, "/api/installers/1", Some(&user), "")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn game_revisions_require_staff() {
    let (status, _) = send(request(
        Method::GET,
        "/api/installers/game/quake/revisions",
        None,
        "",
    ))
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn staff_claim_of_demoted_user_is_not_trusted() {
    let stale = token_for(DEMOTED_ID, true);
    let (status, body) = send(request(
        Method::PATCH,
        "/api/installers/1",
        Some(&stale),
        r#"{"published": true}"#,
    ))
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "FORBIDDEN");

    let (status, _) = send(request(
        Method::DELETE,
        "/api/installers/1/revisions",
        Some(&stale),
        "",
    ))
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn token_of_deleted_user_is_rejected() {
    let orphan = token_for(DELETED_ID, true);
    let (status, body) = send(request(
        Method::POST,
        "/api/installers/issues/quake/quake-gog",
        Some(&orphan),
        r#"{"description": "crashes on start"}"#,
    ))
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");

    let (status, _) = send(request(Method::GET, "/api/installers/1", Some(&orphan), "")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn invalid_token_is_rejected_even_on_open_routes() {
    let (status, body) = send(request(
        Method::GET,
        "/api/installers/1",
        Some("not.a.jwt"),
        "",
    ))
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn non_bearer_authorization_is_rejected() {
    let req = Request::builder()
        .uri("/api/health/live")
        .header(header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
        .body(Body::empty())
        .unwrap();
    let response = app().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn invalid_issue_body_is_a_bad_request() {
    let user = token(false);
    let (status, _) = send(request(
        Method::POST,
        "/api/installers/issues/quake/quake-gog",
        Some(&user),
        r#"{"description": "#,
    ))
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(request(
        Method::POST,
        "/api/installers/issues/quake/quake-gog",
        Some(&user),
        r#"{"description": ""}"#,
    ))
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn invalid_pagination_is_a_bad_request() {
    let (status, _) = send(request(
        Method::GET,
        "/api/installers?page=0",
        None,
        "",
    ))
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_route_gets_json_error_with_request_id() {
    let req = Request::builder()
        .uri("/api/nowhere")
        .header("x-request-id", "lost-42")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
    assert_eq!(body["request_id"], "lost-42");
}

#[tokio::test]
async fn wrong_method_gets_json_error() {
    let (status, body) = send(request(Method::POST, "/api/health/live", None, "")).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["code"], "METHOD_NOT_ALLOWED");
}

#[tokio::test]
async fn openapi_document_lists_catalog_paths() {
    let (status, body) = send(request(Method::GET, "/api-docs/openapi.json", None, "")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["info"]["title"], "Installer Catalog");

    let paths = body["paths"].as_object().unwrap();
    assert!(paths.contains_key("/api/installers/{id}"));
    assert!(paths.contains_key("/api/installers/revisions/{id}"));
    assert!(paths.contains_key("/api/installers/issues/{slug}/{installer_slug}"));
    assert!(paths.contains_key("/api/auth/login"));
}
