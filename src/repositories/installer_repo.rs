//! Installer repository: listing, fuzzy lookup, updates and removal.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{Game, Installer, UpdateInstaller};
use crate::schema::{games, installers};

#[derive(Clone)]
pub struct InstallerRepository {
    pool: AsyncDbPool,
}

impl InstallerRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// One page of installers ordered by id, plus the total row count.
    pub async fn list_paginated(&self, offset: i64, limit: i64) -> AppResult<(Vec<Installer>, u64)> {
        let mut conn = self.pool.get().await?;

        let total = row_count(installers::table.count().get_result(&mut conn).await?)?;
        let rows = installers::table
            .order(installers::id.asc())
            .offset(offset)
            .limit(limit)
            .select(Installer::as_select())
            .load(&mut conn)
            .await?;

        Ok((rows, total))
    }

    pub async fn find_by_id(&self, installer_id: i32) -> AppResult<Option<Installer>> {
        let mut conn = self.pool.get().await?;

        let installer = installers::table
            .find(installer_id)
            .select(Installer::as_select())
            .first(&mut conn)
            .await
            .optional()?;
        Ok(installer)
    }

    /// Installers whose game slug or own slug equals `slug`.
    pub async fn fuzzy_filter(&self, slug: &str) -> AppResult<Vec<Installer>> {
        let mut conn = self.pool.get().await?;

        let rows = installers::table
            .inner_join(games::table)
            .filter(games::slug.eq(slug).or(installers::slug.eq(slug)))
            .select(Installer::as_select())
            .distinct()
            .order(installers::id.asc())
            .load(&mut conn)
            .await?;
        Ok(rows)
    }

    /// The installer with `installer_slug` that belongs to the game `game_slug`.
    pub async fn find_for_game(
        &self,
        game_slug: &str,
        installer_slug: &str,
    ) -> AppResult<Option<Installer>> {
        let mut conn = self.pool.get().await?;

        let installer = installers::table
            .inner_join(games::table)
            .filter(games::slug.eq(game_slug))
            .filter(installers::slug.eq(installer_slug))
            .select(Installer::as_select())
            .first(&mut conn)
            .await
            .optional()?;
        Ok(installer)
    }

    pub async fn list_for_game(&self, game: &Game) -> AppResult<Vec<Installer>> {
        let mut conn = self.pool.get().await?;

        let rows = Installer::belonging_to(game)
            .order(installers::id.asc())
            .select(Installer::as_select())
            .load(&mut conn)
            .await?;
        Ok(rows)
    }

    /// Returns `None` when no installer has this id.
    pub async fn update(
        &self,
        installer_id: i32,
        changes: UpdateInstaller,
    ) -> AppResult<Option<Installer>> {
        let mut conn = self.pool.get().await?;

        let installer = diesel::update(installers::table.find(installer_id))
            .set(&changes)
            .returning(Installer::as_returning())
            .get_result(&mut conn)
            .await
            .optional()?;
        Ok(installer)
    }

    /// Number of deleted rows (0 or 1). Revisions and issues cascade.
    pub async fn delete(&self, installer_id: i32) -> AppResult<usize> {
        let mut conn = self.pool.get().await?;

        let deleted = diesel::delete(installers::table.find(installer_id))
            .execute(&mut conn)
            .await?;
        Ok(deleted)
    }
}

/// `COUNT(*)` is never negative; anything else is a driver fault.
fn row_count(count: i64) -> AppResult<u64> {
    u64::try_from(count).map_err(|_| {
        AppError::from(anyhow::anyhow!(
            "Database returned a negative row count: {}",
            count
        ))
    })
}
