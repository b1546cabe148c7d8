use chrono::NaiveDateTime;
use diesel::prelude::*;

/// A catalog game. Rows with `change_for_id` set are pending change
/// submissions for another game rather than canonical entries.
#[derive(Debug, Queryable, Selectable, Identifiable, Clone)]
#[diesel(table_name = crate::schema::games)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Game {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub year: Option<i32>,
    pub change_for_id: Option<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
