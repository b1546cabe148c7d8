//! JWT authentication.
//!
//! `auth_middleware` runs on every request. Requests without an
//! `Authorization` header pass through anonymously; a header that is present
//! but malformed, expired or badly signed is rejected with 401, as is a token
//! whose user no longer exists. The staff flag is read from the account row,
//! never from the token. Handlers state what they need through the
//! [`AuthUser`] and [`StaffUser`] extractors.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::Response,
};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::models::User;
use crate::services::AccountDirectory;
use crate::state::AppState;
use crate::utils::jwt::{Claims, validate_access_token};

/// Identity of the caller, taken from a verified access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub user_id: i32,
    pub username: String,
    pub is_staff: bool,
}

impl TryFrom<Claims> for AuthUser {
    type Error = AppError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: claims.user_id()?,
            username: claims.username,
            is_staff: claims.is_staff,
        })
    }
}

impl From<User> for AuthUser {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id,
            username: user.username,
            is_staff: user.is_staff,
        }
    }
}

/// Resolves the caller from the `Authorization` header.
///
/// `Ok(None)` when the header is absent.
pub fn authenticate_headers(headers: &HeaderMap, secret: &str) -> AppResult<Option<AuthUser>> {
    let Some(value) = headers.get(header::AUTHORIZATION) else {
        return Ok(None);
    };

    let token = value
        .to_str()
        .ok()
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            AppError::unauthorized("Invalid authorization header format. Expected: Bearer <token>")
        })?;

    let claims = validate_access_token(token, secret)?;
    AuthUser::try_from(claims).map(Some)
}

/// Reloads the token's subject from `accounts`.
pub async fn resolve_account(
    accounts: &dyn AccountDirectory,
    claimed: AuthUser,
) -> AppResult<AuthUser> {
    match accounts.find_account(claimed.user_id).await? {
        Some(user) => Ok(user.into()),
        None => {
            tracing::debug!(user_id = claimed.user_id, "Token subject no longer exists");
            Err(AppError::unauthorized("User not found"))
        }
    }
}

pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if let Some(claimed) = authenticate_headers(request.headers(), &state.jwt_config.secret)? {
        let user = resolve_account(state.accounts.as_ref(), claimed).await?;
        tracing::debug!(user_id = user.user_id, is_staff = user.is_staff, "Authenticated request");
        request.extensions_mut().insert(user);
    }

    Ok(next.run(request).await)
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> AppResult<Self> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(|| AppError::unauthorized("Authentication credentials were not provided"))
    }
}

/// An authenticated user with the staff flag; 403 for everyone else.
#[derive(Debug, Clone)]
pub struct StaffUser(pub AuthUser);

impl<S> FromRequestParts<S> for StaffUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> AppResult<Self> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.is_staff {
            return Err(AppError::forbidden(
                "You do not have permission to perform this action",
            ));
        }
        Ok(StaffUser(user))
    }
}
