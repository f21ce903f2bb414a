//! PostgreSQL-backed `ExerciseRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{ExercisePersistenceError, ExerciseRepository};
use crate::domain::{
    Description, DurationMinutes, Exercise, ExerciseDraft, LogWindow, RecordId,
};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error, failure_message};
use super::models::{ExerciseRow, NewExerciseRow};
use super::pool::{DbPool, PoolError};
use super::schema::exercises;

/// Diesel adapter for the exercise collection.
#[derive(Clone)]
pub struct DieselExerciseRepository {
    pool: DbPool,
}

impl DieselExerciseRepository {
    /// Wrap a shared connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ExercisePersistenceError {
    ExercisePersistenceError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error) -> ExercisePersistenceError {
    match classify_diesel_error(&error) {
        DieselFailure::Connection => {
            ExercisePersistenceError::connection(failure_message(DieselFailure::Connection))
        }
        failure => ExercisePersistenceError::query(failure_message(failure)),
    }
}

fn row_to_exercise(row: ExerciseRow) -> Result<Exercise, ExercisePersistenceError> {
    let corrupt = |detail: String| {
        warn!(exercise_id = %row.id, %detail, "stored exercise row failed validation");
        ExercisePersistenceError::query(format!("stored exercise {} is invalid", row.id))
    };
    let id = RecordId::parse(&row.id).map_err(|err| corrupt(err.to_string()))?;
    let user = RecordId::parse(&row.user_id).map_err(|err| corrupt(err.to_string()))?;
    let description =
        Description::new(&row.description).map_err(|err| corrupt(err.to_string()))?;
    let duration = DurationMinutes::new(row.duration).map_err(|err| corrupt(err.to_string()))?;
    Ok(Exercise::from_draft(
        id,
        ExerciseDraft {
            user,
            description,
            duration,
            date: row.date,
        },
    ))
}

fn to_sql_count(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[async_trait]
impl ExerciseRepository for DieselExerciseRepository {
    async fn insert(&self, draft: &ExerciseDraft) -> Result<Exercise, ExercisePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let id = RecordId::generate();
        let id_text = id.to_string();
        let user_text = draft.user.to_string();
        let row = NewExerciseRow {
            id: &id_text,
            user_id: &user_text,
            description: draft.description.as_ref(),
            duration: draft.duration.get(),
            date: draft.date,
        };

        diesel::insert_into(exercises::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(Exercise::from_draft(id, draft.clone()))
    }

    async fn find_in_window(
        &self,
        ids: &[RecordId],
        window: &LogWindow,
    ) -> Result<Vec<Exercise>, ExercisePersistenceError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let id_texts: Vec<String> = ids.iter().map(RecordId::to_string).collect();

        let mut query = exercises::table
            .filter(exercises::id.eq_any(id_texts))
            .filter(exercises::date.ge(window.from))
            .filter(exercises::date.le(window.to))
            .order((exercises::date.desc(), exercises::id.desc()))
            .offset(to_sql_count(window.skip))
            .select(ExerciseRow::as_select())
            .into_boxed();
        if let Some(limit) = window.limit {
            query = query.limit(to_sql_count(limit));
        }

        let rows: Vec<ExerciseRow> = query.load(&mut conn).await.map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_exercise).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rstest::rstest;

    fn row(description: &str, duration: f64) -> ExerciseRow {
        ExerciseRow {
            id: RecordId::generate().to_string(),
            user_id: RecordId::generate().to_string(),
            description: description.to_owned(),
            duration,
            date: Utc
                .with_ymd_and_hms(2024, 5, 1, 7, 30, 0)
                .single()
                .expect("valid date"),
        }
    }

    #[rstest]
    fn valid_rows_convert() {
        let source = row("swimming", 45.5);
        let expected_id = source.id.clone();

        let exercise = row_to_exercise(source).expect("valid row");

        assert_eq!(exercise.id().to_string(), expected_id);
        assert_eq!(exercise.description().as_ref(), "swimming");
        assert!((exercise.duration().get() - 45.5).abs() < f64::EPSILON);
    }

    #[rstest]
    #[case(row("ab", 10.0))]
    #[case(row("cycling", -1.0))]
    #[case(row("cycling", f64::NAN))]
    fn invalid_rows_are_query_errors(#[case] bad: ExerciseRow) {
        let err = row_to_exercise(bad).expect_err("invalid row");
        assert!(matches!(err, ExercisePersistenceError::Query { .. }));
    }

    #[rstest]
    #[case(0, 0)]
    #[case(25, 25)]
    #[case(u64::MAX, i64::MAX)]
    fn counts_saturate_into_sql_range(#[case] value: u64, #[case] expected: i64) {
        assert_eq!(to_sql_count(value), expected);
    }
}
