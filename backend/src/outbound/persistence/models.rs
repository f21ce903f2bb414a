//! Internal Diesel row structs.
//!
//! These never leave the persistence layer; repositories convert them to
//! domain types and reject rows that violate domain invariants.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{exercises, users};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: String,
    pub username: String,
    pub log: Vec<String>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: &'a str,
    pub username: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = exercises)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ExerciseRow {
    pub id: String,
    pub user_id: String,
    pub description: String,
    pub duration: f64,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = exercises)]
pub(crate) struct NewExerciseRow<'a> {
    pub id: &'a str,
    pub user_id: &'a str,
    pub description: &'a str,
    pub duration: f64,
    pub date: DateTime<Utc>,
}
