//! Wiring of repositories and services into the HTTP state.

use std::sync::Arc;

use mockable::DefaultClock;
use tracing::info;

use exercise_tracker::domain::{ExerciseService, UserService};
use exercise_tracker::inbound::http::state::HttpState;
use exercise_tracker::outbound::memory::InMemoryStore;
use exercise_tracker::outbound::persistence::{DieselExerciseRepository, DieselUserRepository};

use super::ServerConfig;

/// Diesel-backed services when a pool is configured, the in-memory store otherwise.
pub(super) fn build_http_state(config: &ServerConfig) -> HttpState {
    match &config.db_pool {
        Some(pool) => {
            info!("using PostgreSQL repositories");
            let users = Arc::new(DieselUserRepository::new(pool.clone()));
            let exercises = Arc::new(DieselExerciseRepository::new(pool.clone()));
            HttpState::new(
                Arc::new(UserService::new(users.clone())),
                Arc::new(ExerciseService::new(
                    users,
                    exercises,
                    Arc::new(DefaultClock),
                )),
            )
        }
        None => {
            info!("no database configured; using the in-memory store");
            HttpState::in_memory(Arc::new(InMemoryStore::default()))
        }
    }
}
