//! Installer revision repository.

use chrono::Utc;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{Installer, InstallerRevision, NewInstallerRevision};
use crate::schema::{installer_revisions, installers};

#[derive(Clone)]
pub struct RevisionRepository {
    pool: AsyncDbPool,
}

impl RevisionRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// Revisions of one installer, newest first.
    pub async fn list_for_installer(&self, installer: &Installer) -> AppResult<Vec<InstallerRevision>> {
        let mut conn = self.pool.get().await?;

        let rows = InstallerRevision::belonging_to(installer)
            .order((
                installer_revisions::created_at.desc(),
                installer_revisions::id.desc(),
            ))
            .select(InstallerRevision::as_select())
            .load(&mut conn)
            .await?;
        Ok(rows)
    }

    /// Revisions for each installer, in the same order as `parents`.
    pub async fn grouped_for_installers(
        &self,
        parents: &[Installer],
    ) -> AppResult<Vec<Vec<InstallerRevision>>> {
        let mut conn = self.pool.get().await?;

        let rows: Vec<InstallerRevision> = InstallerRevision::belonging_to(parents)
            .order((
                installer_revisions::created_at.desc(),
                installer_revisions::id.desc(),
            ))
            .select(InstallerRevision::as_select())
            .load(&mut conn)
            .await?;
        Ok(rows.grouped_by(parents))
    }

    pub async fn find_by_id(&self, revision_id: i32) -> AppResult<Option<InstallerRevision>> {
        let mut conn = self.pool.get().await?;

        let revision = installer_revisions::table
            .find(revision_id)
            .select(InstallerRevision::as_select())
            .first(&mut conn)
            .await
            .optional()?;
        Ok(revision)
    }

    pub async fn create(&self, new_revision: NewInstallerRevision) -> AppResult<InstallerRevision> {
        let mut conn = self.pool.get().await?;

        let revision = diesel::insert_into(installer_revisions::table)
            .values(&new_revision)
            .returning(InstallerRevision::as_returning())
            .get_result(&mut conn)
            .await?;
        Ok(revision)
    }

    /// Applies the revision to its installer and consumes it, atomically.
    ///
    /// Returns the updated installer, or `None` if the revision is gone.
    pub async fn accept(&self, revision_id: i32, moderator_id: i32) -> AppResult<Option<Installer>> {
        let mut conn = self.pool.get().await?;

        conn.transaction::<_, AppError, _>(|conn| {
            async move {
                let revision = installer_revisions::table
                    .find(revision_id)
                    .select(InstallerRevision::as_select())
                    .for_update()
                    .first(conn)
                    .await
                    .optional()?;

                let Some(revision) = revision else {
                    return Ok(None);
                };

                let changes = revision.acceptance_changeset(moderator_id, Utc::now().naive_utc());
                let installer = diesel::update(installers::table.find(revision.installer_id))
                    .set(&changes)
                    .returning(Installer::as_returning())
                    .get_result(conn)
                    .await?;

                diesel::delete(installer_revisions::table.find(revision.id))
                    .execute(conn)
                    .await?;

                Ok(Some(installer))
            }
            .scope_boxed()
        })
        .await
    }

    pub async fn delete(&self, revision_id: i32) -> AppResult<usize> {
        let mut conn = self.pool.get().await?;

        let deleted = diesel::delete(installer_revisions::table.find(revision_id))
            .execute(&mut conn)
            .await?;
        Ok(deleted)
    }
}
