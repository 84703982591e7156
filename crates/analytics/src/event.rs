use crate::error::AnalyticsError;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use configuration::EventSettings;
use core_types::TimeSliceable;
use serde::Serialize;

/// A named calendar interval, e.g. a crisis period, used to cut series down
/// for regime analysis. Both bounds are inclusive; without an `end` the window
/// runs through the latest available data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventWindow {
    name: String,
    start: DateTime<Utc>,
    end: Option<DateTime<Utc>>,
}

impl EventWindow {
    pub fn new(
        name: impl Into<String>,
        start: DateTime<Utc>,
        end: Option<DateTime<Utc>>,
    ) -> Result<Self, AnalyticsError> {
        let name = name.into();
        if end.is_some_and(|end| end < start) {
            return Err(AnalyticsError::InvalidArgument(format!(
                "event '{name}' ends before it starts"
            )));
        }
        Ok(Self { name, start, end })
    }

    /// A window with no end date.
    pub fn open_ended(name: impl Into<String>, start: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            start,
            end: None,
        }
    }

    /// Builds a window from calendar dates, each taken at midnight UTC.
    pub fn from_dates(
        name: impl Into<String>,
        start: NaiveDate,
        end: Option<NaiveDate>,
    ) -> Result<Self, AnalyticsError> {
        Self::new(name, midnight_utc(start), end.map(midnight_utc))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> Option<DateTime<Utc>> {
        self.end
    }

    pub fn is_open_ended(&self) -> bool {
        self.end.is_none()
    }

    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        ts >= self.start && self.end.is_none_or(|end| ts <= end)
    }

    /// The part of `data` that falls inside this window.
    pub fn slice<T: TimeSliceable>(&self, data: &T) -> T {
        slice_period(data, self.start, self.end)
    }
}

impl TryFrom<&EventSettings> for EventWindow {
    type Error = AnalyticsError;

    fn try_from(settings: &EventSettings) -> Result<Self, Self::Error> {
        Self::from_dates(settings.name.clone(), settings.start, settings.end)
    }
}

/// Rows of `data` with `start <= ts` and, when `end` is given, `ts <= end`.
///
/// This only filters; returns, volatility and correlation are not recomputed.
pub fn slice_period<T: TimeSliceable>(
    data: &T,
    start: DateTime<Utc>,
    end: Option<DateTime<Utc>>,
) -> T {
    data.slice_between(start, end)
}

fn midnight_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}
