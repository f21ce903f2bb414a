//! Port abstraction for exercise persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{Exercise, ExerciseDraft, LogWindow, RecordId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by exercise repository adapters.
    pub enum ExercisePersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "exercise repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "exercise repository query failed: {message}",
    }
}

/// Driven port over the exercise collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExerciseRepository: Send + Sync {
    /// Persist a draft and return it with its assigned identifier.
    async fn insert(&self, draft: &ExerciseDraft) -> Result<Exercise, ExercisePersistenceError>;

    /// Load the exercises named in `ids` whose date lies within `window`,
    /// newest first (ties broken by id, descending), with the window's skip
    /// and limit applied after filtering.
    async fn find_in_window(
        &self,
        ids: &[RecordId],
        window: &LogWindow,
    ) -> Result<Vec<Exercise>, ExercisePersistenceError>;
}
