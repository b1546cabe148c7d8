//! Issue threads reported against installers.

use crate::error::{AppError, AppResult};
use crate::models::{
    Installer, InstallerIssue, InstallerIssueReply, NewInstallerIssue, NewInstallerIssueReply,
    UpdateInstallerIssue,
};
use crate::repositories::{GameRepository, InstallerRepository, IssueRepository, IssueThread};

#[derive(Clone)]
pub struct IssueService {
    issues: IssueRepository,
    installers: InstallerRepository,
    games: GameRepository,
}

impl IssueService {
    pub fn new(issues: IssueRepository, installers: InstallerRepository, games: GameRepository) -> Self {
        Self {
            issues,
            installers,
            games,
        }
    }

    /// Every installer of the game with its issue threads.
    pub async fn threads_for_game(&self, slug: &str) -> AppResult<Vec<(Installer, Vec<IssueThread>)>> {
        let game = self
            .games
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::not_found("game", "slug", slug))?;

        let installers = self.installers.list_for_game(&game).await?;
        let threads = self.issues.threads_for_installers(&installers).await?;
        Ok(installers.into_iter().zip(threads).collect())
    }

    /// Files a new issue; submitter and time come from the caller's identity.
    pub async fn create_issue(
        &self,
        game_slug: &str,
        installer_slug: &str,
        submitter_id: i32,
        description: String,
    ) -> AppResult<InstallerIssue> {
        let installer = self
            .installers
            .find_for_game(game_slug, installer_slug)
            .await?
            .ok_or_else(|| AppError::not_found("installer", "slug", installer_slug))?;

        let issue = self
            .issues
            .create_issue(NewInstallerIssue::submitted_now(
                installer.id,
                submitter_id,
                description,
            ))
            .await?;

        tracing::info!(
            issue_id = issue.id,
            installer_id = installer.id,
            submitted_by = submitter_id,
            "Issue submitted"
        );
        Ok(issue)
    }

    pub async fn create_reply(
        &self,
        issue_id: i32,
        submitter_id: i32,
        description: String,
    ) -> AppResult<InstallerIssueReply> {
        let issue = self.get_issue(issue_id).await?;
        self.issues
            .create_reply(NewInstallerIssueReply::submitted_now(
                issue.id,
                submitter_id,
                description,
            ))
            .await
    }

    pub async fn get_issue(&self, id: i32) -> AppResult<InstallerIssue> {
        self.issues
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("issue", "id", id))
    }

    pub async fn get_thread(&self, id: i32) -> AppResult<IssueThread> {
        let issue = self.get_issue(id).await?;
        let replies = self.issues.replies_for(&issue).await?;
        Ok((issue, replies))
    }

    async fn modifiable_issue(&self, id: i32, user_id: i32, is_staff: bool) -> AppResult<InstallerIssue> {
        let issue = self.get_issue(id).await?;
        if !issue.can_be_modified_by(user_id, is_staff) {
            return Err(AppError::forbidden(
                "Only the submitter or staff can modify this issue",
            ));
        }
        Ok(issue)
    }

    pub async fn update_issue(
        &self,
        id: i32,
        changes: UpdateInstallerIssue,
        user_id: i32,
        is_staff: bool,
    ) -> AppResult<InstallerIssue> {
        self.modifiable_issue(id, user_id, is_staff).await?;
        self.issues
            .update(id, changes)
            .await?
            .ok_or_else(|| AppError::not_found("issue", "id", id))
    }

    pub async fn delete_issue(&self, id: i32, user_id: i32, is_staff: bool) -> AppResult<()> {
        self.modifiable_issue(id, user_id, is_staff).await?;
        match self.issues.delete(id).await? {
            0 => Err(AppError::not_found("issue", "id", id)),
            _ => Ok(()),
        }
    }
}
