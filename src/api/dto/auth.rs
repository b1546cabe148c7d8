//! Authentication DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 150, message = "Username must be between 1 and 150 characters"))]
    #[schema(example = "moderator", min_length = 1, max_length = 150)]
    pub username: String,
    #[validate(length(min = 1, message = "Password cannot be empty"))]
    #[schema(example = "password123", format = "password")]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    #[schema(example = "eyJ0eXAiOiJKV1QiLCJhbGc...")]
    pub access_token: String,
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Lifetime of the access token in seconds
    #[schema(example = 86400)]
    pub expires_in: i64,
    pub user_id: i32,
    pub username: String,
    pub is_staff: bool,
}
