//! Response bodies and their OpenAPI schemas.
//!
//! Domain types stay framework-agnostic; these DTOs fix the wire shape:
//! 24-hex ids as strings, RFC 3339 UTC dates with millisecond precision, and
//! durations as plain JSON numbers.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Number;
use utoipa::ToSchema;

use crate::domain::{DurationMinutes, Exercise, ExerciseLog, User};

/// Uniform error envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ErrorBody {
    /// HTTP status code, repeated in the body.
    #[schema(example = 404)]
    pub status: u16,
    #[schema(example = "User not found")]
    pub message: String,
}

/// Format a timestamp as `2018-08-01T00:00:00.000Z`.
pub fn format_date(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Render whole durations as integers so `10` round-trips as `10`, not `10.0`.
fn duration_number(duration: DurationMinutes) -> Number {
    let minutes = duration.get();
    if minutes.fract() == 0.0 && minutes.abs() < 9.0e15 {
        return Number::from(minutes as i64);
    }
    Number::from_f64(minutes).unwrap_or_else(|| Number::from(0))
}

/// A user without their log.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct UserResponse {
    #[schema(example = "5b6e1a2c3d4e5f6071829304")]
    pub id: String,
    #[schema(example = "ellie")]
    pub username: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            username: user.username().to_string(),
        }
    }
}

/// A freshly recorded exercise.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ExerciseResponse {
    #[schema(example = "5b6e1a2c3d4e5f6071829305")]
    pub id: String,
    /// Owning user's id.
    #[schema(example = "5b6e1a2c3d4e5f6071829304")]
    pub user: String,
    #[schema(example = "running")]
    pub description: String,
    /// Minutes.
    #[schema(value_type = f64, example = 10)]
    pub duration: Number,
    #[schema(example = "2018-08-01T00:00:00.000Z")]
    pub date: String,
}

impl From<&Exercise> for ExerciseResponse {
    fn from(exercise: &Exercise) -> Self {
        Self {
            id: exercise.id().to_string(),
            user: exercise.user().to_string(),
            description: exercise.description().to_string(),
            duration: duration_number(exercise.duration()),
            date: format_date(exercise.date()),
        }
    }
}

/// One log entry; the owner is implied by the enclosing log.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct LogEntryResponse {
    pub id: String,
    pub description: String,
    #[schema(value_type = f64)]
    pub duration: Number,
    pub date: String,
}

impl From<&Exercise> for LogEntryResponse {
    fn from(exercise: &Exercise) -> Self {
        Self {
            id: exercise.id().to_string(),
            description: exercise.description().to_string(),
            duration: duration_number(exercise.duration()),
            date: format_date(exercise.date()),
        }
    }
}

/// A user with one filtered page of their exercises.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ExerciseLogResponse {
    pub id: String,
    pub username: String,
    /// Number of entries in `log`.
    pub count: usize,
    pub log: Vec<LogEntryResponse>,
}

impl From<&ExerciseLog> for ExerciseLogResponse {
    fn from(log: &ExerciseLog) -> Self {
        Self {
            id: log.user().id().to_string(),
            username: log.user().username().to_string(),
            count: log.count(),
            log: log.entries().iter().map(LogEntryResponse::from).collect(),
        }
    }
}
