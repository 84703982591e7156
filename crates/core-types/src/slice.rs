use chrono::{DateTime, Utc};

/// Anything indexed by time that can be cut down to a date range.
pub trait TimeSliceable: Sized {
    /// Keeps entries with `start <= ts` and, when `end` is given, `ts <= end`.
    fn slice_between(&self, start: DateTime<Utc>, end: Option<DateTime<Utc>>) -> Self;
}
