//! HTTP inbound adapter exposing the exercise REST endpoints.
//!
//! The exercise routes are mounted twice, at `/exercise` and under
//! `/api/exercise`. Each mount answers unmatched paths with the JSON 404
//! envelope and turns malformed JSON or query strings into 400s.

pub mod error;
pub mod exercises;
pub mod health;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

use actix_web::{Scope, web};

pub use error::ApiResult;

/// Path prefixes the exercise routes are served under.
pub const EXERCISE_SCOPES: [&str; 2] = ["/exercise", "/api/exercise"];

fn exercise_scope(path: &str) -> Scope {
    web::scope(path)
        .app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(error::query_error_handler))
        .service(users::list_users)
        .service(users::create_user)
        .service(exercises::add_exercise)
        .service(exercises::get_log)
        .default_service(web::to(error::not_found))
}

/// Register the exercise routes under every prefix in [`EXERCISE_SCOPES`].
///
/// The caller supplies [`state::HttpState`] as app data.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use actix_web::{App, web};
/// use exercise_tracker::inbound::http::{configure, state::HttpState};
/// use exercise_tracker::outbound::memory::InMemoryStore;
///
/// let state = HttpState::in_memory(Arc::new(InMemoryStore::default()));
/// let _app = App::new().app_data(web::Data::new(state)).configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    for path in EXERCISE_SCOPES {
        cfg.service(exercise_scope(path));
    }
}
