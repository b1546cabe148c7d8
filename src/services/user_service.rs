//! Accounts and credential checks.

use async_trait::async_trait;

use crate::error::{AppError, AppResult};
use crate::models::{NewUser, User};
use crate::repositories::UserRepository;
use crate::utils::password::{hash_password, verify_password};

#[derive(Clone)]
pub struct UserService {
    repo: UserRepository,
}

impl UserService {
    pub fn new(repo: UserRepository) -> Self {
        Self { repo }
    }

    /// Creates an account, hashing the plain-text password first.
    pub async fn create_user(
        &self,
        username: String,
        email: String,
        password: &str,
        is_staff: bool,
    ) -> AppResult<User> {
        let new_user = NewUser {
            username,
            email,
            password: hash_password(password)?,
            is_staff,
        };
        self.repo.create(new_user).await
    }

    /// Unknown users and wrong passwords are indistinguishable to the caller.
    pub async fn authenticate(&self, username: &str, password: &str) -> AppResult<User> {
        let invalid = || AppError::unauthorized("Invalid username or password");

        let user = self.repo.find_by_username(username).await?.ok_or_else(invalid)?;
        if !verify_password(password, &user.password)? {
            tracing::warn!(username = %username, "Rejected login attempt");
            return Err(invalid());
        }

        Ok(user)
    }
}

/// Current account state for the subject of an access token.
#[async_trait]
pub trait AccountDirectory: Send + Sync {
    async fn find_account(&self, user_id: i32) -> AppResult<Option<User>>;
}

#[async_trait]
impl AccountDirectory for UserRepository {
    async fn find_account(&self, user_id: i32) -> AppResult<Option<User>> {
        self.find_by_id(user_id).await
    }
}
