//! Installer issues and their replies.

use std::collections::HashMap;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::AppResult;
use crate::models::{
    Installer, InstallerIssue, InstallerIssueReply, NewInstallerIssue, NewInstallerIssueReply,
    UpdateInstallerIssue,
};
use crate::schema::{installer_issue_replies, installer_issues};

/// An issue together with its replies, oldest reply first.
pub type IssueThread = (InstallerIssue, Vec<InstallerIssueReply>);

#[derive(Clone)]
pub struct IssueRepository {
    pool: AsyncDbPool,
}

impl IssueRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// Issue threads for each installer, in the same order as `parents`.
    pub async fn threads_for_installers(
        &self,
        parents: &[Installer],
    ) -> AppResult<Vec<Vec<IssueThread>>> {
        let mut conn = self.pool.get().await?;

        let issues: Vec<InstallerIssue> = InstallerIssue::belonging_to(parents)
            .order(installer_issues::id.asc())
            .select(InstallerIssue::as_select())
            .load(&mut conn)
            .await?;
        let replies: Vec<InstallerIssueReply> = InstallerIssueReply::belonging_to(&issues)
            .order(installer_issue_replies::id.asc())
            .select(InstallerIssueReply::as_select())
            .load(&mut conn)
            .await?;
        let replies = replies.grouped_by(&issues);

        let mut by_installer: HashMap<i32, Vec<IssueThread>> = HashMap::new();
        for (issue, issue_replies) in issues.into_iter().zip(replies) {
            by_installer
                .entry(issue.installer_id)
                .or_default()
                .push((issue, issue_replies));
        }

        Ok(parents
            .iter()
            .map(|installer| by_installer.remove(&installer.id).unwrap_or_default())
            .collect())
    }

    pub async fn find_by_id(&self, issue_id: i32) -> AppResult<Option<InstallerIssue>> {
        let mut conn = self.pool.get().await?;

        let issue = installer_issues::table
            .find(issue_id)
            .select(InstallerIssue::as_select())
            .first(&mut conn)
            .await
            .optional()?;
        Ok(issue)
    }

    pub async fn replies_for(&self, issue: &InstallerIssue) -> AppResult<Vec<InstallerIssueReply>> {
        let mut conn = self.pool.get().await?;

        let replies = InstallerIssueReply::belonging_to(issue)
            .order(installer_issue_replies::id.asc())
            .select(InstallerIssueReply::as_select())
            .load(&mut conn)
            .await?;
        Ok(replies)
    }

    pub async fn create_issue(&self, new_issue: NewInstallerIssue) -> AppResult<InstallerIssue> {
        let mut conn = self.pool.get().await?;

        let issue = diesel::insert_into(installer_issues::table)
            .values(&new_issue)
            .returning(InstallerIssue::as_returning())
            .get_result(&mut conn)
            .await?;
        Ok(issue)
    }

    pub async fn create_reply(
        &self,
        new_reply: NewInstallerIssueReply,
    ) -> AppResult<InstallerIssueReply> {
        let mut conn = self.pool.get().await?;

        let reply = diesel::insert_into(installer_issue_replies::table)
            .values(&new_reply)
            .returning(InstallerIssueReply::as_returning())
            .get_result(&mut conn)
            .await?;
        Ok(reply)
    }

    /// An empty changeset leaves the row as is and returns it unchanged.
    pub async fn update(
        &self,
        issue_id: i32,
        changes: UpdateInstallerIssue,
    ) -> AppResult<Option<InstallerIssue>> {
        if changes.description.is_none() && changes.solved.is_none() {
            return self.find_by_id(issue_id).await;
        }

        let mut conn = self.pool.get().await?;
        let issue = diesel::update(installer_issues::table.find(issue_id))
            .set(&changes)
            .returning(InstallerIssue::as_returning())
            .get_result(&mut conn)
            .await
            .optional()?;
        Ok(issue)
    }

    /// Replies cascade with the issue.
    pub async fn delete(&self, issue_id: i32) -> AppResult<usize> {
        let mut conn = self.pool.get().await?;

        let deleted = diesel::delete(installer_issues::table.find(issue_id))
            .execute(&mut conn)
            .await?;
        Ok(deleted)
    }
}
