//! Shared Diesel failure classification for the repositories.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

/// Coarse category of a Diesel failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DieselFailure {
    /// The connection dropped mid-operation.
    Connection,
    /// A unique index rejected the write.
    UniqueViolation,
    /// Anything else the database or query builder reported.
    Query,
}

/// Log the failure at debug level and classify it.
pub(crate) fn classify_diesel_error(error: &DieselError) -> DieselFailure {
    match error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            DieselFailure::Connection
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            DieselFailure::UniqueViolation
        }
        _ => DieselFailure::Query,
    }
}

/// Client-safe summary for a classified failure.
pub(crate) fn failure_message(failure: DieselFailure) -> &'static str {
    match failure {
        DieselFailure::Connection => "database connection error",
        DieselFailure::UniqueViolation => "unique constraint violated",
        DieselFailure::Query => "database error",
    }
}
