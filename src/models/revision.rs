use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::models::Installer;
use crate::schema::installer_revisions;

/// Immutable snapshot of an installer proposed for moderation.
#[derive(Debug, Queryable, Selectable, Identifiable, Associations, Clone)]
#[diesel(belongs_to(Installer))]
#[diesel(table_name = installer_revisions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct InstallerRevision {
    pub id: i32,
    pub installer_id: i32,
    pub created_by: Option<i32>,
    pub comment: String,
    pub draft: bool,
    pub runner: String,
    pub version: String,
    pub description: Option<String>,
    pub notes: String,
    pub credits: String,
    pub content: String,
    pub created_at: NaiveDateTime,
}

impl InstallerRevision {
    /// Changeset that applies this snapshot to the live installer and
    /// publishes it on behalf of `moderator_id`.
    pub fn acceptance_changeset(&self, moderator_id: i32, now: NaiveDateTime) -> AcceptRevision {
        AcceptRevision {
            runner: self.runner.clone(),
            version: self.version.clone(),
            description: self.description.clone(),
            notes: self.notes.clone(),
            credits: self.credits.clone(),
            content: self.content.clone(),
            draft: false,
            published: true,
            published_by: Some(moderator_id),
            updated_at: now,
        }
    }
}

#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = installer_revisions)]
pub struct NewInstallerRevision {
    pub installer_id: i32,
    pub created_by: Option<i32>,
    pub comment: String,
    pub draft: bool,
    pub runner: String,
    pub version: String,
    pub description: Option<String>,
    pub notes: String,
    pub credits: String,
    pub content: String,
}

/// Full overwrite of the installer's script fields.
#[derive(Debug, AsChangeset, Clone, PartialEq)]
#[diesel(table_name = crate::schema::installers)]
#[diesel(treat_none_as_null = true)]
pub struct AcceptRevision {
    pub runner: String,
    pub version: String,
    pub description: Option<String>,
    pub notes: String,
    pub credits: String,
    pub content: String,
    pub draft: bool,
    pub published: bool,
    pub published_by: Option<i32>,
    pub updated_at: NaiveDateTime,
}
