//! Installer DTOs.
//!
//! Neither request type has a `published_by` field: the publisher is always
//! the authenticated moderator, and unknown keys are ignored.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::format_timestamp;
use crate::models::{Installer, UpdateInstaller};

// ============================================================================
// Request DTOs
// ============================================================================

/// Partial update; absent keys are left untouched.
#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
pub struct PatchInstallerRequest {
    /// Id of the game the installer belongs to
    pub game: Option<i32>,
    #[validate(length(min = 1, max = 64, message = "Runner must be between 1 and 64 characters"))]
    pub runner: Option<String>,
    #[validate(length(min = 1, max = 32, message = "Version must be between 1 and 32 characters"))]
    pub version: Option<String>,
    #[validate(length(min = 1, max = 200, message = "Slug must be between 1 and 200 characters"))]
    pub slug: Option<String>,
    /// An empty string clears the description
    #[validate(length(max = 512, message = "Description must be at most 512 characters"))]
    pub description: Option<String>,
    pub notes: Option<String>,
    pub credits: Option<String>,
    /// Installer script body; stored verbatim
    pub content: Option<String>,
    #[validate(length(max = 24, message = "Rating must be at most 24 characters"))]
    pub rating: Option<String>,
    pub draft: Option<bool>,
    pub published: Option<bool>,
}

fn description_column(description: String) -> Option<String> {
    (!description.is_empty()).then_some(description)
}

impl PatchInstallerRequest {
    pub fn into_update_installer(self) -> UpdateInstaller {
        UpdateInstaller {
            game_id: self.game,
            runner: self.runner,
            version: self.version,
            slug: self.slug,
            description: self.description.map(description_column),
            notes: self.notes,
            credits: self.credits,
            content: self.content,
            rating: self.rating,
            draft: self.draft,
            published: self.published,
            ..UpdateInstaller::default()
        }
    }
}

/// Full replacement of every editable field.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct PutInstallerRequest {
    pub game: i32,
    #[validate(length(min = 1, max = 64, message = "Runner must be between 1 and 64 characters"))]
    pub runner: String,
    #[validate(length(min = 1, max = 32, message = "Version must be between 1 and 32 characters"))]
    pub version: String,
    #[validate(length(min = 1, max = 200, message = "Slug must be between 1 and 200 characters"))]
    pub slug: String,
    #[serde(default)]
    #[validate(length(max = 512, message = "Description must be at most 512 characters"))]
    pub description: Option<String>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub credits: String,
    pub content: String,
    #[serde(default)]
    #[validate(length(max = 24, message = "Rating must be at most 24 characters"))]
    pub rating: String,
    pub draft: bool,
    pub published: bool,
}

impl PutInstallerRequest {
    pub fn into_update_installer(self) -> UpdateInstaller {
        UpdateInstaller {
            game_id: Some(self.game),
            runner: Some(self.runner),
            version: Some(self.version),
            slug: Some(self.slug),
            description: Some(self.description.and_then(description_column)),
            notes: Some(self.notes),
            credits: Some(self.credits),
            content: Some(self.content),
            rating: Some(self.rating),
            draft: Some(self.draft),
            published: Some(self.published),
            ..UpdateInstaller::default()
        }
    }
}

// ============================================================================
// Response DTOs
// ============================================================================

#[derive(Debug, Serialize, ToSchema)]
pub struct InstallerResponse {
    pub id: i32,
    /// Game id
    pub game: i32,
    /// Author id
    pub user: i32,
    #[schema(example = "wine")]
    pub runner: String,
    #[schema(example = "GOG")]
    pub version: String,
    #[schema(example = "quake-gog")]
    pub slug: String,
    pub description: Option<String>,
    pub notes: String,
    pub credits: String,
    pub content: String,
    pub rating: String,
    pub draft: bool,
    pub published: bool,
    pub published_by: Option<i32>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Installer> for InstallerResponse {
    fn from(installer: Installer) -> Self {
        Self {
            id: installer.id,
            game: installer.game_id,
            user: installer.user_id,
            runner: installer.runner,
            version: installer.version,
            slug: installer.slug,
            description: installer.description,
            notes: installer.notes,
            credits: installer.credits,
            content: installer.content,
            rating: installer.rating,
            draft: installer.draft,
            published: installer.published,
            published_by: installer.published_by,
            created_at: format_timestamp(installer.created_at),
            updated_at: format_timestamp(installer.updated_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_ignores_client_publisher() {
        let request: PatchInstallerRequest =
            serde_json::from_str(r#"{"published": true, "published_by": 999}"#).unwrap();
        let mut update = request.into_update_installer();

        assert_eq!(update.published, Some(true));
        assert_eq!(update.published_by, None);

        update.stamp_publisher(3);
        assert_eq!(update.published_by, Some(3));
    }

    #[test]
    fn test_patch_only_sets_present_fields() {
        let request: PatchInstallerRequest =
            serde_json::from_str(r#"{"runner": "linux", "description": ""}"#).unwrap();
        let update = request.into_update_installer();

        assert_eq!(update.runner.as_deref(), Some("linux"));
        assert_eq!(update.description, Some(None));
        assert_eq!(update.slug, None);
        assert_eq!(update.published, None);
    }

    #[test]
    fn test_patch_validation() {
        let request = PatchInstallerRequest {
            runner: Some(String::new()),
            ..PatchInstallerRequest::default()
        };
        assert!(request.validate().is_err());
        assert!(PatchInstallerRequest::default().validate().is_ok());
    }

    #[test]
    fn test_put_requires_every_editable_field() {
        let missing = serde_json::from_str::<PutInstallerRequest>(r#"{"runner": "wine"}"#);
        assert!(missing.is_err());

        let request: PutInstallerRequest = serde_json::from_str(
            r#"{"game": 2, "runner": "wine", "version": "GOG", "slug": "quake-gog",
                "content": "files: []", "draft": false, "published": false}"#,
        )
        .unwrap();
        let update = request.into_update_installer();
        assert_eq!(update.game_id, Some(2));
        assert_eq!(update.description, Some(None));
        assert_eq!(update.notes.as_deref(), Some(""));
        assert_eq!(update.published, Some(false));
    }
}
