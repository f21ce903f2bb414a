//! Log query parameters and the composed log view.

use chrono::{DateTime, Utc};

use super::{Exercise, RecordId, User};

/// Caller-supplied filters for a user's log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogQuery {
    /// Owner of the log.
    pub user_id: RecordId,
    /// Inclusive lower date bound.
    pub from: Option<DateTime<Utc>>,
    /// Inclusive upper date bound.
    pub to: Option<DateTime<Utc>>,
    /// Page size; zero is treated as unlimited.
    pub limit: Option<u64>,
    /// Entries to drop from the front of the sorted result.
    pub skip: Option<u64>,
}

impl LogQuery {
    /// Unfiltered query for `user_id`.
    pub fn for_user(user_id: RecordId) -> Self {
        Self {
            user_id,
            from: None,
            to: None,
            limit: None,
            skip: None,
        }
    }

    /// Resolve open bounds against `now`.
    ///
    /// The lower bound defaults to the Unix epoch and the upper bound to
    /// `now`; both are inclusive. A limit of zero means "no limit".
    ///
    /// # Examples
    /// ```
    /// use chrono::{DateTime, TimeZone, Utc};
    /// use exercise_tracker::domain::{LogQuery, RecordId};
    ///
    /// let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    /// let mut query = LogQuery::for_user(RecordId::generate());
    /// query.limit = Some(0);
    /// let window = query.window(now);
    /// assert_eq!(window.from, DateTime::<Utc>::UNIX_EPOCH);
    /// assert_eq!(window.to, now);
    /// assert_eq!(window.limit, None);
    /// ```
    pub fn window(&self, now: DateTime<Utc>) -> LogWindow {
        LogWindow {
            from: self.from.unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
            to: self.to.unwrap_or(now),
            limit: self.limit.filter(|limit| *limit > 0),
            skip: self.skip.unwrap_or(0),
        }
    }
}

/// Fully resolved date range and page bounds handed to the repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogWindow {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    /// `None` means every matching entry.
    pub limit: Option<u64>,
    pub skip: u64,
}

impl LogWindow {
    /// Whether `date` falls inside the inclusive range.
    pub fn contains(&self, date: DateTime<Utc>) -> bool {
        self.from <= date && date <= self.to
    }

    /// Apply skip/limit to entries already filtered and sorted.
    pub fn paginate<T>(&self, entries: impl IntoIterator<Item = T>) -> Vec<T> {
        let skip = usize::try_from(self.skip).unwrap_or(usize::MAX);
        let limited = entries.into_iter().skip(skip);
        match self.limit {
            Some(limit) => limited
                .take(usize::try_from(limit).unwrap_or(usize::MAX))
                .collect(),
            None => limited.collect(),
        }
    }
}

/// A user together with one page of their exercises, newest first.
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseLog {
    user: User,
    entries: Vec<Exercise>,
}

impl ExerciseLog {
    /// Pair `user` with `entries`, which must already be sorted and paged.
    pub fn new(user: User, entries: Vec<Exercise>) -> Self {
        Self { user, entries }
    }

    /// Owner of the log.
    pub fn user(&self) -> &User {
        &self.user
    }

    /// Entries in this page, newest first.
    pub fn entries(&self) -> &[Exercise] {
        &self.entries
    }

    /// Number of entries in this page, not the user's lifetime total.
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Consume the log, yielding the owner and entries.
    pub fn into_parts(self) -> (User, Vec<Exercise>) {
        (self.user, self.entries)
    }
}
