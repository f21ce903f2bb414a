//! Process-local store implementing both repository ports.
//!
//! Used when no database URL is configured and by the HTTP tests. State lives
//! behind a single mutex, so username checks and log appends are atomic with
//! respect to concurrent requests. Data is lost on restart.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    ExercisePersistenceError, ExerciseRepository, UserPersistenceError, UserRepository,
};
use crate::domain::{Exercise, ExerciseDraft, LogWindow, RecordId, User, Username};

#[derive(Debug, Default)]
struct State {
    users: BTreeMap<RecordId, User>,
    usernames: HashMap<Username, RecordId>,
    exercises: HashMap<RecordId, Exercise>,
}

/// In-memory adapter for [`UserRepository`] and [`ExerciseRepository`].
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    fn lock(&self) -> Result<MutexGuard<'_, State>, String> {
        self.state
            .lock()
            .map_err(|_| "in-memory store lock poisoned".to_owned())
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn insert(&self, username: &Username) -> Result<User, UserPersistenceError> {
        let mut state = self.lock().map_err(UserPersistenceError::query)?;
        if state.usernames.contains_key(username) {
            return Err(UserPersistenceError::duplicate_username(username.as_ref()));
        }
        let user = User::new(RecordId::generate(), username.clone(), Vec::new());
        state.usernames.insert(username.clone(), *user.id());
        state.users.insert(*user.id(), user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &RecordId) -> Result<Option<User>, UserPersistenceError> {
        let state = self.lock().map_err(UserPersistenceError::query)?;
        Ok(state.users.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        let state = self.lock().map_err(UserPersistenceError::query)?;
        Ok(state.users.values().cloned().collect())
    }

    async fn append_to_log(
        &self,
        user_id: &RecordId,
        exercise_id: &RecordId,
    ) -> Result<(), UserPersistenceError> {
        let mut state = self.lock().map_err(UserPersistenceError::query)?;
        let user = state
            .users
            .get_mut(user_id)
            .ok_or_else(|| UserPersistenceError::missing_user(user_id.to_string()))?;
        user.push_log_entry(*exercise_id);
        Ok(())
    }
}

#[async_trait]
impl ExerciseRepository for InMemoryStore {
    async fn insert(&self, draft: &ExerciseDraft) -> Result<Exercise, ExercisePersistenceError> {
        let mut state = self.lock().map_err(ExercisePersistenceError::query)?;
        let exercise = Exercise::from_draft(RecordId::generate(), draft.clone());
        state.exercises.insert(*exercise.id(), exercise.clone());
        Ok(exercise)
    }

    async fn find_in_window(
        &self,
        ids: &[RecordId],
        window: &LogWindow,
    ) -> Result<Vec<Exercise>, ExercisePersistenceError> {
        let state = self.lock().map_err(ExercisePersistenceError::query)?;
        let mut matching: Vec<Exercise> = ids
            .iter()
            .filter_map(|id| state.exercises.get(id))
            .filter(|exercise| window.contains(exercise.date()))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.date().cmp(&a.date()).then_with(|| b.id().cmp(a.id())));
        Ok(window.paginate(matching))
    }
}
