//! Domain ports for the hexagonal boundary.
//!
//! Driving ports (`UsersCommand`, `UsersQuery`, `ExerciseCommand`,
//! `ExerciseLogQuery`) are what inbound adapters call. Driven ports
//! (`UserRepository`, `ExerciseRepository`) are what services call and
//! outbound adapters implement.

mod macros;
pub(crate) use macros::define_port_error;

mod exercise_command;
mod exercise_repository;
mod user_repository;
mod users_command;

#[cfg(test)]
pub use exercise_command::{MockExerciseCommand, MockExerciseLogQuery};
pub use exercise_command::{AddExerciseRequest, ExerciseCommand, ExerciseLogQuery};
#[cfg(test)]
pub use exercise_repository::MockExerciseRepository;
pub use exercise_repository::{ExercisePersistenceError, ExerciseRepository};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
#[cfg(test)]
pub use users_command::{MockUsersCommand, MockUsersQuery};
pub use users_command::{CreateUserRequest, UsersCommand, UsersQuery};
