use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::models::Game;
use crate::schema::installers;

#[derive(Debug, Queryable, Selectable, Identifiable, Associations, Clone)]
#[diesel(belongs_to(Game))]
#[diesel(table_name = installers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Installer {
    pub id: i32,
    pub game_id: i32,
    pub user_id: i32,
    pub runner: String,
    pub version: String,
    pub slug: String,
    pub description: Option<String>,
    pub notes: String,
    pub credits: String,
    pub content: String,
    pub rating: String,
    pub draft: bool,
    pub published: bool,
    pub published_by: Option<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Changeset for PATCH/PUT. `None` leaves a column untouched.
///
/// `description` is doubly optional: `Some(None)` clears it.
#[derive(Debug, AsChangeset, Clone, Default, PartialEq)]
#[diesel(table_name = installers)]
pub struct UpdateInstaller {
    pub game_id: Option<i32>,
    pub runner: Option<String>,
    pub version: Option<String>,
    pub slug: Option<String>,
    pub description: Option<Option<String>>,
    pub notes: Option<String>,
    pub credits: Option<String>,
    pub content: Option<String>,
    pub rating: Option<String>,
    pub draft: Option<bool>,
    pub published: Option<bool>,
    pub published_by: Option<i32>,
    pub updated_at: Option<NaiveDateTime>,
}

impl UpdateInstaller {
    /// Records `user_id` as publisher when this update publishes the
    /// installer. Returns whether the stamp was applied.
    pub fn stamp_publisher(&mut self, user_id: i32) -> bool {
        if self.published == Some(true) {
            self.published_by = Some(user_id);
            true
        } else {
            false
        }
    }
}
