//! Installer reads, moderation updates and game-scoped lookups.

use chrono::Utc;

use crate::error::{AppError, AppResult};
use crate::models::{Game, Installer, InstallerRevision, UpdateInstaller};
use crate::repositories::{GameRepository, InstallerRepository, RevisionRepository};

#[derive(Clone)]
pub struct InstallerService {
    installers: InstallerRepository,
    games: GameRepository,
    revisions: RevisionRepository,
}

impl InstallerService {
    pub fn new(
        installers: InstallerRepository,
        games: GameRepository,
        revisions: RevisionRepository,
    ) -> Self {
        Self {
            installers,
            games,
            revisions,
        }
    }

    /// Returns `(page, total_count)`.
    pub async fn list_paginated(&self, offset: i64, limit: i64) -> AppResult<(Vec<Installer>, u64)> {
        self.installers.list_paginated(offset, limit).await
    }

    pub async fn get_installer(&self, id: i32) -> AppResult<Installer> {
        self.installers
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("installer", "id", id))
    }

    /// Applies `changes` on behalf of `editor_id`.
    ///
    /// Publishing records the editor as publisher.
    pub async fn update_installer(
        &self,
        id: i32,
        mut changes: UpdateInstaller,
        editor_id: i32,
        editor_name: &str,
    ) -> AppResult<Installer> {
        if changes.stamp_publisher(editor_id) {
            tracing::info!(
                installer_id = id,
                published_by = editor_id,
                "Installer is published by {}",
                editor_name
            );
        }
        changes.updated_at = Some(Utc::now().naive_utc());

        self.installers
            .update(id, changes)
            .await?
            .ok_or_else(|| AppError::not_found("installer", "id", id))
    }

    pub async fn delete_installer(&self, id: i32) -> AppResult<()> {
        match self.installers.delete(id).await? {
            0 => Err(AppError::not_found("installer", "id", id)),
            _ => Ok(()),
        }
    }

    /// Installers of the game `slug`, or the installer whose own slug is `slug`.
    pub async fn fuzzy_filter(&self, slug: &str) -> AppResult<Vec<Installer>> {
        self.installers.fuzzy_filter(slug).await
    }

    /// The canonical game with every installer and its revisions.
    pub async fn game_revisions(
        &self,
        slug: &str,
    ) -> AppResult<(Game, Vec<(Installer, Vec<InstallerRevision>)>)> {
        let game = self
            .games
            .find_canonical_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::not_found("game", "slug", slug))?;

        let installers = self.installers.list_for_game(&game).await?;
        let revisions = self.revisions.grouped_for_installers(&installers).await?;

        Ok((game, installers.into_iter().zip(revisions).collect()))
    }
}
