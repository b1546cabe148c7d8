use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Access token claims.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// User id
    pub sub: String,
    pub username: String,
    pub is_staff: bool,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(user_id: i32, username: String, is_staff: bool, expiration_hours: i64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(expiration_hours);

        Self {
            sub: user_id.to_string(),
            username,
            is_staff,
            iat: now.timestamp(),
            exp: exp.timestamp(),
        }
    }

    pub fn user_id(&self) -> AppResult<i32> {
        self.sub
            .parse()
            .map_err(|_| AppError::unauthorized("Invalid token subject"))
    }
}

/// Signs an HS256 access token.
pub fn generate_access_token(
    user_id: i32,
    username: String,
    is_staff: bool,
    secret: &str,
    expiration_hours: i64,
) -> AppResult<String> {
    let claims = Claims::new(user_id, username, is_staff, expiration_hours);

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal {
        source: anyhow::anyhow!("Failed to generate JWT token: {}", e),
    })
}

/// Verifies signature and expiry; every failure is `Unauthorized`.
pub fn validate_access_token(token: &str, secret: &str) -> AppResult<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
            AppError::unauthorized("Token has expired")
        }
        jsonwebtoken::errors::ErrorKind::InvalidSignature => {
            AppError::unauthorized("Invalid token signature")
        }
        jsonwebtoken::errors::ErrorKind::InvalidToken => AppError::unauthorized("Invalid token"),
        _ => AppError::unauthorized(format!("Token validation failed: {}", e)),
    })
}
