//! Conversion of `AppError` into HTTP responses, plus a layer that gives
//! framework-generated errors (405, path rejections, timeouts) the same body.

use axum::{
    Json,
    extract::Request,
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::api::dto::ErrorResponse;
use crate::api::middleware::RequestId;
use crate::error::AppError;

/// Largest framework error body we bother to read back.
const MAX_PLAIN_BODY: usize = 16 * 1024;

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Duplicate { .. } => StatusCode::CONFLICT,
            AppError::Validation { .. }
            | AppError::ValidationErrors { .. }
            | AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::Forbidden { .. } => StatusCode::FORBIDDEN,
            AppError::ConnectionPool { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Database { .. } | AppError::Configuration { .. } | AppError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Response body. Server-side failures never expose their source.
    pub fn to_error_response(&self) -> ErrorResponse {
        match self {
            AppError::NotFound { entity, field, value } => {
                ErrorResponse::not_found_error(entity, field, value)
            }
            AppError::Duplicate { entity, field, value } => {
                ErrorResponse::duplicate_error(entity, field, value)
            }
            AppError::Validation { field, reason } => ErrorResponse::validation_error(field, reason),
            AppError::ValidationErrors { errors } => ErrorResponse::validation_errors(errors),
            AppError::BadRequest { message } => ErrorResponse::new("BAD_REQUEST", message),
            AppError::Unauthorized { message } => ErrorResponse::new("UNAUTHORIZED", message),
            AppError::Forbidden { message } => ErrorResponse::new("FORBIDDEN", message),
            AppError::Database { operation, .. } => ErrorResponse::new(
                "DATABASE_ERROR",
                &format!("Database operation failed: {}", operation),
            )
            .with_details(json!({ "operation": operation })),
            AppError::Configuration { key, .. } => {
                ErrorResponse::new("CONFIGURATION_ERROR", &format!("Configuration error: {}", key))
            }
            AppError::ConnectionPool { .. } => {
                ErrorResponse::new("SERVICE_UNAVAILABLE", "Database connection unavailable")
            }
            AppError::Internal { .. } => {
                ErrorResponse::new("INTERNAL_ERROR", "An internal error occurred")
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = ?self, status = status.as_u16(), "Request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        (status, Json(self.to_error_response())).into_response()
    }
}

fn code_for_status(status: StatusCode) -> &'static str {
    match status {
        StatusCode::BAD_REQUEST => "BAD_REQUEST",
        StatusCode::NOT_FOUND => "NOT_FOUND",
        StatusCode::METHOD_NOT_ALLOWED => "METHOD_NOT_ALLOWED",
        StatusCode::UNSUPPORTED_MEDIA_TYPE => "UNSUPPORTED_MEDIA_TYPE",
        StatusCode::PAYLOAD_TOO_LARGE => "PAYLOAD_TOO_LARGE",
        StatusCode::REQUEST_TIMEOUT => "REQUEST_TIMEOUT",
        _ if status.is_server_error() => "INTERNAL_ERROR",
        _ => "UNKNOWN_ERROR",
    }
}

/// Rewrites non-JSON error responses into `ErrorResponse` bodies tagged
/// with the request id.
pub async fn global_error_handler(request: Request, next: Next) -> Response {
    let request_id = request.extensions().get::<RequestId>().map(|r| r.0.clone());
    let response = next.run(request).await;
    let status = response.status();

    if !(status.is_client_error() || status.is_server_error()) {
        return response;
    }

    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("application/json"));
    if is_json {
        return response;
    }

    let (parts, body) = response.into_parts();
    let text = axum::body::to_bytes(body, MAX_PLAIN_BODY)
        .await
        .map(|bytes| String::from_utf8_lossy(&bytes).trim().to_string())
        .unwrap_or_default();
    let message = if text.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string()
    } else {
        text
    };

    let mut error_response = ErrorResponse::new(code_for_status(status), &message);
    if let Some(id) = request_id.as_deref() {
        error_response = error_response.with_request_id(id);
    }

    let mut rewritten = (status, Json(error_response)).into_response();
    if let Some(allow) = parts.headers.get(header::ALLOW) {
        rewritten.headers_mut().insert(header::ALLOW, allow.clone());
    }
    rewritten
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::not_found("installer", "id", 1), StatusCode::NOT_FOUND),
            (AppError::bad_request("nope"), StatusCode::BAD_REQUEST),
            (
                AppError::ValidationErrors { errors: vec![] },
                StatusCode::BAD_REQUEST,
            ),
            (AppError::unauthorized("who"), StatusCode::UNAUTHORIZED),
            (AppError::forbidden("no"), StatusCode::FORBIDDEN),
            (
                AppError::Duplicate {
                    entity: "installer".to_string(),
                    field: "slug".to_string(),
                    value: "quake".to_string(),
                },
                StatusCode::CONFLICT,
            ),
            (
                AppError::ConnectionPool {
                    source: anyhow::anyhow!("timed out"),
                },
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                AppError::Internal {
                    source: anyhow::anyhow!("boom"),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.status_code(), expected, "{:?}", error);
        }
    }

    #[test]
    fn test_internal_details_are_hidden() {
        let error = AppError::Database {
            operation: "update installer".to_string(),
            source: anyhow::anyhow!("password=secret host=db"),
        };
        let body = serde_json::to_string(&error.to_error_response()).unwrap();
        assert!(body.contains("update installer"));
        assert!(!body.contains("secret"));
    }

    #[test]
    fn test_into_response_status() {
        let response = AppError::bad_request("Revisions cannot be patched").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
