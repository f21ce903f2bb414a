//! Driving ports for user registration and listing.

use async_trait::async_trait;

use crate::domain::{Error, User, Username};

/// Validated input for creating a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUserRequest {
    pub username: Username,
}

/// Use-case port for registering users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Register a user; a taken username is an invalid request.
    async fn create_user(&self, request: CreateUserRequest) -> Result<User, Error>;
}

/// Use-case port for listing users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Every registered user, oldest first.
    async fn list_users(&self) -> Result<Vec<User>, Error>;
}
