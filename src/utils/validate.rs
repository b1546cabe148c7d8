use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// JSON body that must deserialize and pass `validator` rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> AppResult<Self> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::bad_request(rejection.body_text()))?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

/// Query string counterpart of [`ValidatedJson`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> AppResult<Self> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection: QueryRejection| AppError::bad_request(rejection.body_text()))?;
        value.validate()?;
        Ok(ValidatedQuery(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, header};
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct Comment {
        #[validate(length(min = 1, max = 20, message = "Text must be between 1 and 20 characters"))]
        text: String,
        #[validate(range(min = 1, max = 5, message = "Score must be between 1 and 5"))]
        score: u8,
    }

    fn json_request(body: &str, content_type: &str) -> Request {
        Request::builder()
            .method(Method::POST)
            .uri("/test")
            .header(header::CONTENT_TYPE, content_type)
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_json() {
        let request = json_request(r#"{"text":"works","score":4}"#, "application/json");
        let ValidatedJson(comment) = ValidatedJson::<Comment>::from_request(request, &())
            .await
            .expect("valid body");
        assert_eq!(comment.text, "works");
        assert_eq!(comment.score, 4);
    }

    #[tokio::test]
    async fn test_rule_violations_are_collected() {
        let request = json_request(r#"{"text":"","score":9}"#, "application/json");
        match ValidatedJson::<Comment>::from_request(request, &()).await {
            Err(AppError::ValidationErrors { errors }) => {
                let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
                assert_eq!(fields, vec!["score", "text"]);
            }
            other => panic!("Expected ValidationErrors, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let request = json_request(r#"{"text":"#, "application/json");
        assert!(matches!(
            ValidatedJson::<Comment>::from_request(request, &()).await,
            Err(AppError::BadRequest { .. })
        ));
    }

    #[tokio::test]
    async fn test_wrong_content_type_is_bad_request() {
        let request = json_request(r#"{"text":"x","score":1}"#, "text/plain");
        assert!(matches!(
            ValidatedJson::<Comment>::from_request(request, &()).await,
            Err(AppError::BadRequest { .. })
        ));
    }

    #[tokio::test]
    async fn test_query_validation() {
        let (mut parts, _) = Request::builder()
            .uri("/test?text=abc&score=0")
            .body(Body::empty())
            .unwrap()
            .into_parts();
        assert!(matches!(
            ValidatedQuery::<Comment>::from_request_parts(&mut parts, &()).await,
            Err(AppError::ValidationErrors { .. })
        ));
    }
}
