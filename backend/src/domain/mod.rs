//! Domain primitives, aggregates, ports, and services.
//!
//! Purpose: define the strongly typed entities shared by the HTTP and
//! persistence layers, plus the services that orchestrate user registration,
//! exercise recording, and log retrieval. Adapters depend on this module;
//! it depends on none of them.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - RecordId: 24-hex identifier shared by users and exercises.
//! - User / Username: account with its ordered exercise log.
//! - Exercise / ExerciseDraft / Description / DurationMinutes: activity records.
//! - LogQuery / LogWindow / ExerciseLog: log filtering and the composed view.
//! - UserService / ExerciseService: driving port implementations.

pub mod error;
pub mod exercise;
pub mod exercise_log;
pub mod exercise_service;
pub mod ports;
pub mod record_id;
pub mod trace_id;
pub mod user;
pub mod user_service;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::exercise::{
    DESCRIPTION_MAX, DESCRIPTION_MIN, Description, DurationMinutes, Exercise, ExerciseDraft,
    ExerciseValidationError,
};
pub use self::exercise_log::{ExerciseLog, LogQuery, LogWindow};
pub use self::exercise_service::ExerciseService;
pub use self::record_id::{RECORD_ID_HEX_LEN, RecordId, RecordIdError};
pub use self::trace_id::TraceId;
pub use self::user::{User, UserValidationError, Username};
pub use self::user_service::UserService;

/// HTTP header name used to propagate trace identifiers.
pub const TRACE_ID_HEADER: &str = "trace-id";

/// Convenient API result alias.
pub type ApiResult<T> = Result<T, Error>;
