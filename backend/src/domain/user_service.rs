//! User registration and listing.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use crate::domain::ports::{
    CreateUserRequest, UserPersistenceError, UserRepository, UsersCommand, UsersQuery,
};
use crate::domain::{Error, User};

/// Implements the user driving ports over a [`UserRepository`].
#[derive(Clone)]
pub struct UserService<R> {
    users: Arc<R>,
}

impl<R> UserService<R> {
    pub fn new(users: Arc<R>) -> Self {
        Self { users }
    }
}

pub(crate) fn map_user_persistence_error(err: UserPersistenceError) -> Error {
    match err {
        UserPersistenceError::DuplicateUsername { username } => {
            Error::invalid_request(format!("username {username} is already taken"))
        }
        UserPersistenceError::MissingUser { .. } => Error::not_found("User not found"),
        other => {
            error!(error = %other, "user repository failure");
            Error::internal(other.to_string())
        }
    }
}

#[async_trait]
impl<R> UsersCommand for UserService<R>
where
    R: UserRepository + 'static,
{
    async fn create_user(&self, request: CreateUserRequest) -> Result<User, Error> {
        let user = self
            .users
            .insert(&request.username)
            .await
            .map_err(map_user_persistence_error)?;
        info!(user_id = %user.id(), username = %user.username(), "user created");
        Ok(user)
    }
}

#[async_trait]
impl<R> UsersQuery for UserService<R>
where
    R: UserRepository + 'static,
{
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        self.users.list().await.map_err(map_user_persistence_error)
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
