//! Store-assigned record identifiers.
//!
//! Identifiers are 12 bytes rendered as 24 lowercase hex characters:
//! a big-endian 4-byte Unix timestamp (seconds), 5 bytes chosen once per
//! process, and a 3-byte wrapping counter.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicU32, Ordering};

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Length of the textual form.
pub const RECORD_ID_HEX_LEN: usize = 24;

const COUNTER_MASK: u32 = 0x00FF_FFFF;

static PROCESS_BYTES: OnceLock<[u8; 5]> = OnceLock::new();
static COUNTER: OnceLock<AtomicU32> = OnceLock::new();

/// Errors raised when parsing a [`RecordId`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordIdError {
    /// Input was not 24 characters long.
    #[error("identifier must be exactly {RECORD_ID_HEX_LEN} characters, got {actual}")]
    InvalidLength { actual: usize },
    /// Input contained a non-hex character.
    #[error("identifier must contain only hexadecimal characters")]
    InvalidHex,
}

/// Opaque identifier for users and exercises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RecordId([u8; 12]);

impl RecordId {
    /// Mint a new identifier.
    pub fn generate() -> Self {
        let seconds = u32::try_from(Utc::now().timestamp()).unwrap_or(u32::MAX);
        let process = PROCESS_BYTES.get_or_init(rand::random::<[u8; 5]>);
        let count = COUNTER
            .get_or_init(|| AtomicU32::new(rand::random::<u32>() & COUNTER_MASK))
            .fetch_add(1, Ordering::Relaxed)
            & COUNTER_MASK;

        let mut bytes = [0_u8; 12];
        bytes[..4].copy_from_slice(&seconds.to_be_bytes());
        bytes[4..9].copy_from_slice(process);
        bytes[9..].copy_from_slice(&count.to_be_bytes()[1..]);
        Self(bytes)
    }

    /// Parse the 24-character hex form. Upper-case digits are accepted and
    /// normalised.
    ///
    /// # Examples
    /// ```
    /// use exercise_tracker::domain::RecordId;
    ///
    /// let id = RecordId::parse("5AD06B68DB71E8A38F518470").expect("valid id");
    /// assert_eq!(id.to_string(), "5ad06b68db71e8a38f518470");
    /// assert!(RecordId::parse("not-an-id").is_err());
    /// ```
    pub fn parse(raw: impl AsRef<str>) -> Result<Self, RecordIdError> {
        let raw = raw.as_ref();
        if raw.len() != RECORD_ID_HEX_LEN {
            return Err(RecordIdError::InvalidLength { actual: raw.len() });
        }
        let mut bytes = [0_u8; 12];
        hex::decode_to_slice(raw, &mut bytes).map_err(|_| RecordIdError::InvalidHex)?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl FromStr for RecordId {
    type Err = RecordIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<RecordId> for String {
    fn from(value: RecordId) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for RecordId {
    type Error = RecordIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn generated_ids_render_as_24_lowercase_hex() {
        let text = RecordId::generate().to_string();
        assert_eq!(text.len(), RECORD_ID_HEX_LEN);
        assert!(text.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[rstest]
    fn successive_ids_are_distinct() {
        let first = RecordId::generate();
        let second = RecordId::generate();
        assert_ne!(first, second);
        assert_eq!(first.0[4..9], second.0[4..9]);
    }

    #[rstest]
    #[case("", RecordIdError::InvalidLength { actual: 0 })]
    #[case("5ad06b68db71e8a38f51847", RecordIdError::InvalidLength { actual: 23 })]
    #[case("5ad06b68db71e8a38f51847z", RecordIdError::InvalidHex)]
    #[case("invalid ID with 24 chars", RecordIdError::InvalidHex)]
    fn parse_rejects_malformed_input(#[case] raw: &str, #[case] expected: RecordIdError) {
        assert_eq!(RecordId::parse(raw), Err(expected));
    }

    #[rstest]
    fn serde_uses_the_hex_form() {
        let id = RecordId::parse("5ad06b68db71e8a38f518470").expect("valid id");
        let json = serde_json::to_string(&id).expect("serialises");
        assert_eq!(json, "\"5ad06b68db71e8a38f518470\"");
        let back: RecordId = serde_json::from_str(&json).expect("deserialises");
        assert_eq!(back, id);
    }
}
