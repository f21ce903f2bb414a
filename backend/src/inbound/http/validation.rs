//! Shared validation helpers for inbound HTTP adapters.
//!
//! Handlers collect every failing field into [`FieldErrors`] before touching
//! the domain, so a single 400 response names all offending fields. Field
//! messages are joined with `". "`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::{Value, json};

use crate::domain::{Error, RecordId};

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub(crate) fn as_str(&self) -> &'static str {
        self.0
    }
}

/// Accumulates per-field failures for one request.
#[derive(Debug, Default)]
pub(crate) struct FieldErrors {
    entries: Vec<(FieldName, String)>,
}

impl FieldErrors {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, field: FieldName, message: impl Into<String>) {
        self.entries.push((field, message.into()));
    }

    /// Keep the `Ok` value, recording the error otherwise.
    pub(crate) fn check<T>(&mut self, result: Result<T, (FieldName, String)>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err((field, message)) => {
                self.push(field, message);
                None
            }
        }
    }

    /// Fail with a single invalid-request error if anything was recorded.
    pub(crate) fn finish(self) -> Result<(), Error> {
        if self.entries.is_empty() {
            return Ok(());
        }
        let message = self
            .entries
            .iter()
            .map(|(_, message)| message.as_str())
            .collect::<Vec<_>>()
            .join(". ");
        let fields: Vec<Value> = self
            .entries
            .iter()
            .map(|(field, message)| json!({ "field": field.as_str(), "message": message }))
            .collect();
        Err(Error::invalid_request(message).with_details(json!({ "fields": fields })))
    }

    /// Finish, then unwrap the value assembled from the checked fields.
    ///
    /// `value` is `None` only when some field failed, which `finish` has
    /// already reported; a `None` with no recorded errors is a handler bug.
    pub(crate) fn resolve<T>(self, value: Option<T>) -> Result<T, Error> {
        self.finish()?;
        value.ok_or_else(|| Error::internal("request validation produced no value"))
    }
}

type FieldResult<T> = Result<T, (FieldName, String)>;

fn fail<T>(field: FieldName, message: String) -> FieldResult<T> {
    Err((field, message))
}

fn required(field: FieldName) -> (FieldName, String) {
    (field, format!("\"{}\" is required", field.as_str()))
}

fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|value| !value.is_null())
}

/// A required JSON string, trimmed and non-empty.
pub(crate) fn required_string(value: Option<&Value>, field: FieldName) -> FieldResult<String> {
    match present(value) {
        None => Err(required(field)),
        Some(Value::String(raw)) if raw.trim().is_empty() => fail(
            field,
            format!("\"{}\" is not allowed to be empty", field.as_str()),
        ),
        Some(Value::String(raw)) => Ok(raw.trim().to_owned()),
        Some(_) => fail(field, format!("\"{}\" must be a string", field.as_str())),
    }
}

/// A required number, given either as a JSON number or a numeric string.
pub(crate) fn required_number(value: Option<&Value>, field: FieldName) -> FieldResult<f64> {
    let parsed = match present(value) {
        None => return Err(required(field)),
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(raw)) => raw.trim().parse::<f64>().ok(),
        Some(_) => None,
    };
    match parsed {
        Some(number) if number.is_finite() => Ok(number),
        _ => fail(field, format!("\"{}\" must be a number", field.as_str())),
    }
}

/// A 24-hex record identifier from trimmed text.
pub(crate) fn record_id(raw: &str, field: FieldName) -> FieldResult<RecordId> {
    RecordId::parse(raw.trim()).map_err(|_| {
        (
            field,
            format!(
                "\"{}\" with value \"{}\" must be a 24-character hex identifier",
                field.as_str(),
                raw.trim()
            ),
        )
    })
}

/// Parse a date from text.
///
/// Accepts RFC 3339 timestamps, `YYYY-MM-DD` (midnight UTC), offset-less
/// `YYYY-MM-DDTHH:MM:SS[.fff]` (UTC), and integer epoch milliseconds.
pub(crate) fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    if !raw.is_empty() && raw.bytes().all(|byte| byte.is_ascii_digit() || byte == b'-') {
        return raw
            .parse::<i64>()
            .ok()
            .and_then(DateTime::from_timestamp_millis);
    }
    None
}

fn invalid_date(field: FieldName) -> (FieldName, String) {
    (field, format!("\"{}\" must be a valid date", field.as_str()))
}

/// An optional date from a JSON string or integer epoch milliseconds.
pub(crate) fn optional_date_value(
    value: Option<&Value>,
    field: FieldName,
) -> FieldResult<Option<DateTime<Utc>>> {
    match present(value) {
        None => Ok(None),
        Some(Value::String(raw)) => parse_date(raw).map(Some).ok_or_else(|| invalid_date(field)),
        Some(Value::Number(number)) => number
            .as_i64()
            .and_then(DateTime::from_timestamp_millis)
            .map(Some)
            .ok_or_else(|| invalid_date(field)),
        Some(_) => Err(invalid_date(field)),
    }
}

/// An optional date from a query parameter; empty strings count as absent.
pub(crate) fn optional_date_param(
    raw: Option<&str>,
    field: FieldName,
) -> FieldResult<Option<DateTime<Utc>>> {
    match raw.map(str::trim).filter(|raw| !raw.is_empty()) {
        None => Ok(None),
        Some(raw) => parse_date(raw).map(Some).ok_or_else(|| invalid_date(field)),
    }
}

/// An optional non-negative integer from a query parameter.
pub(crate) fn optional_count_param(raw: Option<&str>, field: FieldName) -> FieldResult<Option<u64>> {
    match raw.map(str::trim).filter(|raw| !raw.is_empty()) {
        None => Ok(None),
        Some(raw) => raw.parse::<u64>().map(Some).map_err(|_| {
            (
                field,
                format!("\"{}\" must be a non-negative integer", field.as_str()),
            )
        }),
    }
}
