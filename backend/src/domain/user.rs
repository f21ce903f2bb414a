//! User entity and its username value object.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use super::RecordId;

/// Validation errors returned by [`Username::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// Nothing left after trimming.
    #[error("username must not be empty")]
    EmptyUsername,
    /// Something outside `A-Z`, `a-z`, `0-9`, `_`, `-` and `.`.
    #[error("username may only contain word characters, hyphens, or dots")]
    UsernameInvalidCharacters,
}

static USERNAME_RE: OnceLock<Regex> = OnceLock::new();

fn username_regex() -> &'static Regex {
    USERNAME_RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9_.-]+$")
            .unwrap_or_else(|error| panic!("username regex failed to compile: {error}"))
    })
}

/// Unique, trimmed handle for a user.
///
/// Comparison is exact and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// Trim and validate a username.
    ///
    /// # Examples
    /// ```
    /// use exercise_tracker::domain::Username;
    ///
    /// let name = Username::new("  ellie.b-2 ").expect("valid username");
    /// assert_eq!(name.as_ref(), "ellie.b-2");
    /// assert!(Username::new("ellie b").is_err());
    /// ```
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        if !username_regex().is_match(trimmed) {
            return Err(UserValidationError::UsernameInvalidCharacters);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Application user.
///
/// ## Invariants
/// - `log` holds exercise ids in insertion order and only ever grows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: RecordId,
    username: Username,
    log: Vec<RecordId>,
}

impl User {
    /// Rehydrate a user from stored parts.
    pub fn new(id: RecordId, username: Username, log: Vec<RecordId>) -> Self {
        Self { id, username, log }
    }

    /// Store-assigned identifier.
    pub fn id(&self) -> &RecordId {
        &self.id
    }

    /// Unique username.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Exercise references, oldest first.
    pub fn log(&self) -> &[RecordId] {
        &self.log
    }

    /// Record a new exercise reference at the end of the log.
    pub fn push_log_entry(&mut self, exercise_id: RecordId) {
        self.log.push(exercise_id);
    }
}
