//! Revision DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::{InstallerResponse, format_timestamp};
use crate::error::{AppError, AppResult};
use crate::models::{Game, Installer, InstallerRevision, NewInstallerRevision};

/// A proposed snapshot of an installer.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateRevisionRequest {
    /// Why the change is proposed
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub draft: bool,
    #[validate(length(min = 1, max = 64, message = "Runner must be between 1 and 64 characters"))]
    pub runner: String,
    #[validate(length(min = 1, max = 32, message = "Version must be between 1 and 32 characters"))]
    pub version: String,
    #[serde(default)]
    #[validate(length(max = 512, message = "Description must be at most 512 characters"))]
    pub description: Option<String>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub credits: String,
    pub content: String,
}

impl CreateRevisionRequest {
    /// The author is always the caller, never a value from the body.
    pub fn into_new_revision(self, installer_id: i32, created_by: i32) -> NewInstallerRevision {
        NewInstallerRevision {
            installer_id,
            created_by: Some(created_by),
            comment: self.comment,
            draft: self.draft,
            runner: self.runner,
            version: self.version,
            description: self.description.filter(|d| !d.is_empty()),
            notes: self.notes,
            credits: self.credits,
            content: self.content,
        }
    }
}

/// Moderation command for a revision. `"accept"` is the only action.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct RevisionActionRequest {
    #[schema(example = "accept")]
    pub action: Option<String>,
}

impl RevisionActionRequest {
    /// An empty body means "no action"; a body that is not a JSON object
    /// is a bad request.
    pub fn from_body(body: &[u8]) -> AppResult<Self> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(body)
            .map_err(|e| AppError::bad_request(format!("Malformed request body: {}", e)))
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RevisionResponse {
    pub id: i32,
    /// Installer id
    pub installer: i32,
    pub created_by: Option<i32>,
    pub comment: String,
    pub draft: bool,
    pub runner: String,
    pub version: String,
    pub description: Option<String>,
    pub notes: String,
    pub credits: String,
    pub content: String,
    pub created_at: String,
}

impl From<InstallerRevision> for RevisionResponse {
    fn from(revision: InstallerRevision) -> Self {
        Self {
            id: revision.id,
            installer: revision.installer_id,
            created_by: revision.created_by,
            comment: revision.comment,
            draft: revision.draft,
            runner: revision.runner,
            version: revision.version,
            description: revision.description,
            notes: revision.notes,
            credits: revision.credits,
            content: revision.content,
            created_at: format_timestamp(revision.created_at),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct InstallerWithRevisions {
    #[serde(flatten)]
    pub installer: InstallerResponse,
    pub revisions: Vec<RevisionResponse>,
}

/// A canonical game with the moderation queue of each installer.
#[derive(Debug, Serialize, ToSchema)]
pub struct GameRevisionsResponse {
    pub name: String,
    pub slug: String,
    pub year: Option<i32>,
    pub installers: Vec<InstallerWithRevisions>,
}

impl GameRevisionsResponse {
    pub fn new(game: Game, installers: Vec<(Installer, Vec<InstallerRevision>)>) -> Self {
        Self {
            name: game.name,
            slug: game.slug,
            year: game.year,
            installers: installers
                .into_iter()
                .map(|(installer, revisions)| InstallerWithRevisions {
                    installer: installer.into(),
                    revisions: revisions.into_iter().map(RevisionResponse::from).collect(),
                })
                .collect(),
        }
    }
}
