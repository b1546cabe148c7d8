//! User repository for async database operations.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::AppResult;
use crate::models::{NewUser, User};

/// Since `AsyncDbPool` (bb8::Pool) uses `Arc` internally, cloning is cheap.
#[derive(Clone)]
pub struct UserRepository {
    pool: AsyncDbPool,
}

impl UserRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// Inserts a user whose password is already hashed.
    pub async fn create(&self, new_user: NewUser) -> AppResult<User> {
        use crate::schema::users::dsl::*;
        let mut conn = self.pool.get().await?;

        let user = diesel::insert_into(users)
            .values(&new_user)
            .returning(User::as_returning())
            .get_result(&mut conn)
            .await?;
        Ok(user)
    }

    pub async fn find_by_id(&self, user_id: i32) -> AppResult<Option<User>> {
        use crate::schema::users::dsl::*;
        let mut conn = self.pool.get().await?;

        let user = users
            .filter(id.eq(user_id))
            .select(User::as_select())
            .first(&mut conn)
            .await
            .optional()?;
        Ok(user)
    }

    pub async fn find_by_username(&self, name: &str) -> AppResult<Option<User>> {
        use crate::schema::users::dsl::*;
        let mut conn = self.pool.get().await?;

        let user = users
            .filter(username.eq(name))
            .select(User::as_select())
            .first(&mut conn)
            .await
            .optional()?;
        Ok(user)
    }
}
