//! Game lookups. Games are read-only from this service.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::AppResult;
use crate::models::Game;

#[derive(Clone)]
pub struct GameRepository {
    pool: AsyncDbPool,
}

impl GameRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// Any game with this slug, including pending change submissions.
    pub async fn find_by_slug(&self, game_slug: &str) -> AppResult<Option<Game>> {
        use crate::schema::games::dsl::*;
        let mut conn = self.pool.get().await?;

        let game = games
            .filter(slug.eq(game_slug))
            .select(Game::as_select())
            .first(&mut conn)
            .await
            .optional()?;
        Ok(game)
    }

    /// Only the canonical entry, never a change submission.
    pub async fn find_canonical_by_slug(&self, game_slug: &str) -> AppResult<Option<Game>> {
        use crate::schema::games::dsl::*;
        let mut conn = self.pool.get().await?;

        let game = games
            .filter(slug.eq(game_slug))
            .filter(change_for_id.is_null())
            .select(Game::as_select())
            .first(&mut conn)
            .await
            .optional()?;
        Ok(game)
    }
}
