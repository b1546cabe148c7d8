//! Issue and reply DTOs.
//!
//! Submission payloads only carry the text. Submitter, submission time and
//! target come from the request context; extra keys are ignored.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::format_timestamp;
use crate::models::{Installer, InstallerIssue, InstallerIssueReply, UpdateInstallerIssue};
use crate::repositories::IssueThread;

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateIssueRequest {
    #[validate(length(min = 1, message = "Description cannot be empty"))]
    #[schema(example = "Crashes right after the intro video")]
    pub description: String,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateReplyRequest {
    #[validate(length(min = 1, message = "Description cannot be empty"))]
    #[schema(example = "Setting the wine version to 8.0 fixed it for me")]
    pub description: String,
}

#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
pub struct PatchIssueRequest {
    #[validate(length(min = 1, message = "Description cannot be empty"))]
    pub description: Option<String>,
    pub solved: Option<bool>,
}

impl PatchIssueRequest {
    pub fn into_update_issue(self) -> UpdateInstallerIssue {
        UpdateInstallerIssue {
            description: self.description,
            solved: self.solved,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct PutIssueRequest {
    #[validate(length(min = 1, message = "Description cannot be empty"))]
    pub description: String,
    #[serde(default)]
    pub solved: bool,
}

impl PutIssueRequest {
    pub fn into_update_issue(self) -> UpdateInstallerIssue {
        UpdateInstallerIssue {
            description: Some(self.description),
            solved: Some(self.solved),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct IssueReplyResponse {
    pub id: i32,
    /// Issue id
    pub issue: i32,
    pub submitted_by: i32,
    pub submitted_on: String,
    pub description: String,
}

impl From<InstallerIssueReply> for IssueReplyResponse {
    fn from(reply: InstallerIssueReply) -> Self {
        Self {
            id: reply.id,
            issue: reply.issue_id,
            submitted_by: reply.submitted_by,
            submitted_on: format_timestamp(reply.submitted_on),
            description: reply.description,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct IssueResponse {
    pub id: i32,
    /// Installer id
    pub installer: i32,
    pub submitted_by: i32,
    pub submitted_on: String,
    pub description: String,
    pub solved: bool,
    pub replies: Vec<IssueReplyResponse>,
}

impl From<InstallerIssue> for IssueResponse {
    fn from(issue: InstallerIssue) -> Self {
        Self::from((issue, Vec::new()))
    }
}

impl From<IssueThread> for IssueResponse {
    fn from((issue, replies): IssueThread) -> Self {
        Self {
            id: issue.id,
            installer: issue.installer_id,
            submitted_by: issue.submitted_by,
            submitted_on: format_timestamp(issue.submitted_on),
            description: issue.description,
            solved: issue.solved,
            replies: replies.into_iter().map(IssueReplyResponse::from).collect(),
        }
    }
}

/// An installer and every issue reported against it.
#[derive(Debug, Serialize, ToSchema)]
pub struct InstallerIssuesResponse {
    pub id: i32,
    pub slug: String,
    pub runner: String,
    pub version: String,
    pub issues: Vec<IssueResponse>,
}

impl From<(Installer, Vec<IssueThread>)> for InstallerIssuesResponse {
    fn from((installer, threads): (Installer, Vec<IssueThread>)) -> Self {
        Self {
            id: installer.id,
            slug: installer.slug,
            runner: installer.runner,
            version: installer.version,
            issues: threads.into_iter().map(IssueResponse::from).collect(),
        }
    }
}
