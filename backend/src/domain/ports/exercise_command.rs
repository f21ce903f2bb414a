//! Driving ports for recording exercises and reading a user's log.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Description, DurationMinutes, Error, Exercise, ExerciseLog, LogQuery, RecordId};

/// Validated input for recording an exercise.
#[derive(Debug, Clone, PartialEq)]
pub struct AddExerciseRequest {
    pub user_id: RecordId,
    pub description: Description,
    pub duration: DurationMinutes,
    /// Defaults to the time of handling when absent.
    pub date: Option<DateTime<Utc>>,
}

/// Use-case port for recording exercises.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExerciseCommand: Send + Sync {
    /// Record an exercise for an existing user and append it to their log.
    async fn add_exercise(&self, request: AddExerciseRequest) -> Result<Exercise, Error>;
}

/// Use-case port for reading a user's log.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExerciseLogQuery: Send + Sync {
    /// Resolve the user and one filtered page of their exercises.
    async fn get_log(&self, query: LogQuery) -> Result<ExerciseLog, Error>;
}
