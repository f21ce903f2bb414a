//! Exercise entity and its field value objects.

use std::fmt;

use chrono::{DateTime, Utc};

use super::RecordId;

/// Minimum description length in characters, after trimming.
pub const DESCRIPTION_MIN: usize = 3;
/// Maximum description length in characters, after trimming.
pub const DESCRIPTION_MAX: usize = 140;

/// Validation errors for exercise fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExerciseValidationError {
    /// Fewer than `min` characters remained after trimming.
    #[error("description length must be at least {min} characters long")]
    DescriptionTooShort { min: usize },
    /// More than `max` characters remained after trimming.
    #[error("description length must be less than or equal to {max} characters long")]
    DescriptionTooLong { max: usize },
    /// NaN or infinite duration.
    #[error("duration must be a finite number")]
    DurationNotFinite,
    /// Duration below zero.
    #[error("duration must not be negative")]
    DurationNegative,
}

/// Free-text description of the activity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description(String);

impl Description {
    /// Trim and validate a description.
    ///
    /// # Examples
    /// ```
    /// use exercise_tracker::domain::Description;
    ///
    /// assert_eq!(Description::new("  running ").expect("valid").as_ref(), "running");
    /// assert!(Description::new("12").is_err());
    /// ```
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ExerciseValidationError> {
        let trimmed = raw.as_ref().trim();
        let length = trimmed.chars().count();
        if length < DESCRIPTION_MIN {
            return Err(ExerciseValidationError::DescriptionTooShort {
                min: DESCRIPTION_MIN,
            });
        }
        if length > DESCRIPTION_MAX {
            return Err(ExerciseValidationError::DescriptionTooLong {
                max: DESCRIPTION_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Description {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Elapsed time in minutes. Zero is allowed; negative and non-finite values
/// are not.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct DurationMinutes(f64);

impl DurationMinutes {
    /// Validate a duration.
    pub fn new(minutes: f64) -> Result<Self, ExerciseValidationError> {
        if !minutes.is_finite() {
            return Err(ExerciseValidationError::DurationNotFinite);
        }
        if minutes < 0.0 {
            return Err(ExerciseValidationError::DurationNegative);
        }
        // Normalise -0.0 so it renders as 0.
        Ok(Self(minutes.abs()))
    }

    /// Raw minute count.
    pub fn get(self) -> f64 {
        self.0
    }
}

/// Unsaved exercise, as handed to the repository.
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseDraft {
    pub user: RecordId,
    pub description: Description,
    pub duration: DurationMinutes,
    pub date: DateTime<Utc>,
}

/// Persisted activity record.
///
/// Immutable once created; `user` always names the owner that existed when
/// the record was written.
#[derive(Debug, Clone, PartialEq)]
pub struct Exercise {
    id: RecordId,
    user: RecordId,
    description: Description,
    duration: DurationMinutes,
    date: DateTime<Utc>,
}

impl Exercise {
    /// Attach a store-assigned id to a draft.
    pub fn from_draft(id: RecordId, draft: ExerciseDraft) -> Self {
        let ExerciseDraft {
            user,
            description,
            duration,
            date,
        } = draft;
        Self {
            id,
            user,
            description,
            duration,
            date,
        }
    }

    /// Store-assigned identifier.
    pub fn id(&self) -> &RecordId {
        &self.id
    }

    /// Identifier of the owning user.
    pub fn user(&self) -> &RecordId {
        &self.user
    }

    /// Validated description text.
    pub fn description(&self) -> &Description {
        &self.description
    }

    /// Duration in minutes.
    pub fn duration(&self) -> DurationMinutes {
        self.duration
    }

    /// When the activity took place; defaults to creation time.
    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }
}
