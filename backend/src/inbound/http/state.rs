//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and depend only on the driving
//! ports, so they can be exercised with mocks or the in-memory store.

use std::sync::Arc;

use crate::domain::ports::{ExerciseCommand, ExerciseLogQuery, UsersCommand, UsersQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<dyn UsersCommand>,
    pub users_query: Arc<dyn UsersQuery>,
    pub exercises: Arc<dyn ExerciseCommand>,
    pub exercise_log: Arc<dyn ExerciseLogQuery>,
}

impl HttpState {
    /// Bundle ports for one service that implements all four.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use exercise_tracker::inbound::http::state::HttpState;
    /// use exercise_tracker::outbound::memory::InMemoryStore;
    ///
    /// let state = HttpState::in_memory(Arc::new(InMemoryStore::default()));
    /// let _users = state.users.clone();
    /// ```
    pub fn new<U, E>(users: Arc<U>, exercises: Arc<E>) -> Self
    where
        U: UsersCommand + UsersQuery + 'static,
        E: ExerciseCommand + ExerciseLogQuery + 'static,
    {
        Self {
            users: users.clone(),
            users_query: users,
            exercises: exercises.clone(),
            exercise_log: exercises,
        }
    }

    /// Wire the services over a single in-memory store with the system clock.
    pub fn in_memory(store: Arc<crate::outbound::memory::InMemoryStore>) -> Self {
        use crate::domain::{ExerciseService, UserService};

        let users = Arc::new(UserService::new(store.clone()));
        let exercises = Arc::new(ExerciseService::new(
            store.clone(),
            store,
            Arc::new(mockable::DefaultClock),
        ));
        Self::new(users, exercises)
    }
}
