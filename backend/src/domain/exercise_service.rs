//! Exercise recording and log retrieval.
//!
//! Recording is two writes: the exercise insert, then the append onto the
//! owner's log. There is no transaction across them; if the append fails the
//! exercise row is left unreferenced and never surfaces in any log.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{error, info};

use crate::domain::ports::{
    AddExerciseRequest, ExerciseCommand, ExerciseLogQuery, ExercisePersistenceError,
    ExerciseRepository, UserRepository,
};
use crate::domain::user_service::map_user_persistence_error;
use crate::domain::{Error, Exercise, ExerciseDraft, ExerciseLog, LogQuery, RecordId, User};

const USER_NOT_FOUND: &str = "User not found";

/// Implements the exercise driving ports over the user and exercise stores.
#[derive(Clone)]
pub struct ExerciseService<U, E> {
    users: Arc<U>,
    exercises: Arc<E>,
    clock: Arc<dyn Clock>,
}

impl<U, E> ExerciseService<U, E> {
    /// Create a service.
    ///
    /// # Examples
    /// ```
    /// # use std::sync::Arc;
    /// # use mockable::DefaultClock;
    /// # use exercise_tracker::domain::ExerciseService;
    /// # use exercise_tracker::outbound::memory::InMemoryStore;
    /// let store = Arc::new(InMemoryStore::default());
    /// let _service = ExerciseService::new(store.clone(), store, Arc::new(DefaultClock));
    /// ```
    pub fn new(users: Arc<U>, exercises: Arc<E>, clock: Arc<dyn Clock>) -> Self {
        Self {
            users,
            exercises,
            clock,
        }
    }
}

fn map_exercise_persistence_error(err: ExercisePersistenceError) -> Error {
    error!(error = %err, "exercise repository failure");
    Error::internal(err.to_string())
}

impl<U, E> ExerciseService<U, E>
where
    U: UserRepository,
{
    async fn require_user(&self, id: &RecordId) -> Result<User, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(map_user_persistence_error)?
            .ok_or_else(|| Error::not_found(USER_NOT_FOUND))
    }
}

#[async_trait]
impl<U, E> ExerciseCommand for ExerciseService<U, E>
where
    U: UserRepository + 'static,
    E: ExerciseRepository + 'static,
{
    async fn add_exercise(&self, request: AddExerciseRequest) -> Result<Exercise, Error> {
        let AddExerciseRequest {
            user_id,
            description,
            duration,
            date,
        } = request;
        let user = self.require_user(&user_id).await?;

        let draft = ExerciseDraft {
            user: *user.id(),
            description,
            duration,
            date: date.unwrap_or_else(|| self.clock.utc()),
        };
        let exercise = self
            .exercises
            .insert(&draft)
            .await
            .map_err(map_exercise_persistence_error)?;

        self.users
            .append_to_log(user.id(), exercise.id())
            .await
            .map_err(|err| {
                error!(
                    exercise_id = %exercise.id(),
                    user_id = %user.id(),
                    error = %err,
                    "exercise stored but log append failed"
                );
                Error::internal(err.to_string())
            })?;

        info!(exercise_id = %exercise.id(), user_id = %user.id(), "exercise recorded");
        Ok(exercise)
    }
}

#[async_trait]
impl<U, E> ExerciseLogQuery for ExerciseService<U, E>
where
    U: UserRepository + 'static,
    E: ExerciseRepository + 'static,
{
    async fn get_log(&self, query: LogQuery) -> Result<ExerciseLog, Error> {
        let user = self.require_user(&query.user_id).await?;
        let window = query.window(self.clock.utc());
        let entries = self
            .exercises
            .find_in_window(user.log(), &window)
            .await
            .map_err(map_exercise_persistence_error)?;
        Ok(ExerciseLog::new(user, entries))
    }
}

#[cfg(test)]
#[path = "exercise_service_tests.rs"]
mod tests;
