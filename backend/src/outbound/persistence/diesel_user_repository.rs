//! PostgreSQL-backed `UserRepository`.
//!
//! Username uniqueness rides on the `users_username_key` unique index and log
//! appends are a single `UPDATE ... SET log = array_append(log, $1)`, so
//! neither needs an application-level lock.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_types::{Array, Text};
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{RecordId, User, Username};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error, failure_message};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

// PostgreSQL `array_append(anyarray, anyelement)` specialised to text.
diesel::define_sql_function! {
    fn array_append(array: Array<Text>, element: Text) -> Array<Text>;
}

/// Diesel adapter for the user collection.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Wrap a shared connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    UserPersistenceError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    match classify_diesel_error(&error) {
        DieselFailure::Connection => {
            UserPersistenceError::connection(failure_message(DieselFailure::Connection))
        }
        failure => UserPersistenceError::query(failure_message(failure)),
    }
}

fn corrupt_row(id: &str, detail: impl std::fmt::Display) -> UserPersistenceError {
    warn!(user_id = id, %detail, "stored user row failed validation");
    UserPersistenceError::query(format!("stored user {id} is invalid"))
}

fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let id = RecordId::parse(&row.id).map_err(|err| corrupt_row(&row.id, err))?;
    let username = Username::new(&row.username).map_err(|err| corrupt_row(&row.id, err))?;
    let log = row
        .log
        .iter()
        .map(RecordId::parse)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| corrupt_row(&row.id, err))?;
    Ok(User::new(id, username, log))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, username: &Username) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let id = RecordId::generate();
        let id_text = id.to_string();
        let row = NewUserRow {
            id: &id_text,
            username: username.as_ref(),
        };

        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(|err| match classify_diesel_error(&err) {
                DieselFailure::UniqueViolation => {
                    UserPersistenceError::duplicate_username(username.as_ref())
                }
                _ => map_diesel_error(err),
            })?;

        Ok(User::new(id, username.clone(), Vec::new()))
    }

    async fn find_by_id(&self, id: &RecordId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .find(id.to_string())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<UserRow> = users::table
            .order(users::id.asc())
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_user).collect()
    }

    async fn append_to_log(
        &self,
        user_id: &RecordId,
        exercise_id: &RecordId,
    ) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let updated = diesel::update(users::table.find(user_id.to_string()))
            .set(users::log.eq(array_append(users::log, exercise_id.to_string())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        if updated == 0 {
            return Err(UserPersistenceError::missing_user(user_id.to_string()));
        }
        Ok(())
    }
}
