//! Revision browsing, submission and moderation.

use crate::error::{AppError, AppResult};
use crate::models::{Installer, InstallerRevision, NewInstallerRevision};
use crate::repositories::{InstallerRepository, RevisionRepository};

/// The only moderation action a revision understands.
pub const ACCEPT_ACTION: &str = "accept";

#[derive(Clone)]
pub struct RevisionService {
    revisions: RevisionRepository,
    installers: InstallerRepository,
}

impl RevisionService {
    pub fn new(revisions: RevisionRepository, installers: InstallerRepository) -> Self {
        Self {
            revisions,
            installers,
        }
    }

    async fn installer(&self, installer_id: i32) -> AppResult<Installer> {
        self.installers
            .find_by_id(installer_id)
            .await?
            .ok_or_else(|| AppError::not_found("installer", "id", installer_id))
    }

    /// Newest first.
    pub async fn list_for_installer(&self, installer_id: i32) -> AppResult<Vec<InstallerRevision>> {
        let installer = self.installer(installer_id).await?;
        self.revisions.list_for_installer(&installer).await
    }

    pub async fn submit(&self, new_revision: NewInstallerRevision) -> AppResult<InstallerRevision> {
        self.installer(new_revision.installer_id).await?;
        let revision = self.revisions.create(new_revision).await?;

        tracing::info!(
            revision_id = revision.id,
            installer_id = revision.installer_id,
            created_by = ?revision.created_by,
            "Revision submitted"
        );
        Ok(revision)
    }

    pub async fn get_revision(&self, id: i32) -> AppResult<InstallerRevision> {
        self.revisions
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("revision", "id", id))
    }

    /// Runs a moderation `action` against revision `id`.
    ///
    /// Only [`ACCEPT_ACTION`] is recognised; anything else is reported as
    /// `NotFound`, as is a missing revision.
    pub async fn moderate(
        &self,
        id: i32,
        action: Option<&str>,
        moderator_id: i32,
    ) -> AppResult<Installer> {
        if action != Some(ACCEPT_ACTION) {
            return Err(AppError::not_found(
                "revision action",
                "action",
                action.unwrap_or_default(),
            ));
        }

        let installer = self
            .revisions
            .accept(id, moderator_id)
            .await?
            .ok_or_else(|| AppError::not_found("revision", "id", id))?;

        tracing::info!(
            revision_id = id,
            installer_id = installer.id,
            moderator_id,
            "Revision accepted"
        );
        Ok(installer)
    }

    pub async fn delete_revision(&self, id: i32) -> AppResult<()> {
        match self.revisions.delete(id).await? {
            0 => Err(AppError::not_found("revision", "id", id)),
            _ => Ok(()),
        }
    }
}
