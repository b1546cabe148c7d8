use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;

use crate::models::Installer;
use crate::schema::{installer_issue_replies, installer_issues};

#[derive(Debug, Queryable, Selectable, Identifiable, Associations, Clone)]
#[diesel(belongs_to(Installer))]
#[diesel(table_name = installer_issues)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct InstallerIssue {
    pub id: i32,
    pub installer_id: i32,
    pub submitted_by: i32,
    pub submitted_on: NaiveDateTime,
    pub description: String,
    pub solved: bool,
}

impl InstallerIssue {
    /// Only the submitter or staff may change or remove an issue.
    pub fn can_be_modified_by(&self, user_id: i32, is_staff: bool) -> bool {
        is_staff || self.submitted_by == user_id
    }
}

#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = installer_issues)]
pub struct NewInstallerIssue {
    pub installer_id: i32,
    pub submitted_by: i32,
    pub submitted_on: NaiveDateTime,
    pub description: String,
    pub solved: bool,
}

impl NewInstallerIssue {
    /// A fresh, unsolved issue submitted by `submitted_by` right now.
    pub fn submitted_now(installer_id: i32, submitted_by: i32, description: String) -> Self {
        Self {
            installer_id,
            submitted_by,
            submitted_on: Utc::now().naive_utc(),
            description,
            solved: false,
        }
    }
}

#[derive(Debug, AsChangeset, Clone, Default)]
#[diesel(table_name = installer_issues)]
pub struct UpdateInstallerIssue {
    pub description: Option<String>,
    pub solved: Option<bool>,
}

#[derive(Debug, Queryable, Selectable, Identifiable, Associations, Clone)]
#[diesel(belongs_to(InstallerIssue, foreign_key = issue_id))]
#[diesel(table_name = installer_issue_replies)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct InstallerIssueReply {
    pub id: i32,
    pub issue_id: i32,
    pub submitted_by: i32,
    pub submitted_on: NaiveDateTime,
    pub description: String,
}

#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = installer_issue_replies)]
pub struct NewInstallerIssueReply {
    pub issue_id: i32,
    pub submitted_by: i32,
    pub submitted_on: NaiveDateTime,
    pub description: String,
}

impl NewInstallerIssueReply {
    pub fn submitted_now(issue_id: i32, submitted_by: i32, description: String) -> Self {
        Self {
            issue_id,
            submitted_by,
            submitted_on: Utc::now().naive_utc(),
            description,
        }
    }
}
