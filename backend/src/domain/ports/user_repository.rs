//! Port abstraction for user persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{RecordId, User, Username};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// The unique username constraint rejected an insert.
        DuplicateUsername { username: String } => "username {username} is already taken",
        /// A log append targeted a user that does not exist.
        MissingUser { id: String } => "user {id} does not exist",
    }
}

/// Driven port over the user collection.
///
/// Identifiers are assigned by the adapter on insert. Adapters must enforce
/// username uniqueness atomically and must make [`UserRepository::append_to_log`]
/// a single atomic update, so concurrent appends never lose an entry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user with an empty log.
    async fn insert(&self, username: &Username) -> Result<User, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &RecordId) -> Result<Option<User>, UserPersistenceError>;

    /// Every user, oldest first.
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Append `exercise_id` to the end of the user's log.
    async fn append_to_log(
        &self,
        user_id: &RecordId,
        exercise_id: &RecordId,
    ) -> Result<(), UserPersistenceError>;
}
