use crate::error::CoreError;
use crate::slice::TimeSliceable;
use crate::values_match;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A single named series over a strictly increasing time index.
#[derive(Debug, Clone, Serialize)]
pub struct TimeSeries {
    name: String,
    index: Vec<DateTime<Utc>>,
    values: Vec<f64>,
}

/// Rolling average pairwise correlation, indexed by window end.
pub type MarketShiftIndex = TimeSeries;

impl TimeSeries {
    pub fn new(
        name: impl Into<String>,
        index: Vec<DateTime<Utc>>,
        values: Vec<f64>,
    ) -> Result<Self, CoreError> {
        if index.len() != values.len() {
            return Err(CoreError::ShapeMismatch(format!(
                "{} timestamps but {} values",
                index.len(),
                values.len()
            )));
        }
        if let Some(pair) = index.windows(2).find(|pair| pair[0] >= pair[1]) {
            return Err(if pair[0] == pair[1] {
                CoreError::DuplicateTimestamp(pair[1])
            } else {
                CoreError::UnsortedIndex(pair[1])
            });
        }

        Ok(Self {
            name: name.into(),
            index,
            values,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn index(&self) -> &[DateTime<Utc>] {
        &self.index
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (DateTime<Utc>, f64)> + '_ {
        self.index.iter().copied().zip(self.values.iter().copied())
    }

    pub fn get(&self, ts: DateTime<Utc>) -> Option<f64> {
        self.index
            .binary_search(&ts)
            .ok()
            .map(|i| self.values[i])
    }

    /// The most recent non-missing observation.
    pub fn last_valid(&self) -> Option<(DateTime<Utc>, f64)> {
        self.iter().rev().find(|(_, v)| !v.is_nan())
    }

    /// Mean of the non-missing values; NaN when there are none.
    pub fn nan_mean(&self) -> f64 {
        let (sum, count) = self
            .values
            .iter()
            .filter(|v| !v.is_nan())
            .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
        if count == 0 {
            f64::NAN
        } else {
            sum / count as f64
        }
    }
}

impl PartialEq for TimeSeries {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.index == other.index
            && values_match(&self.values, &other.values)
    }
}

impl TimeSliceable for TimeSeries {
    fn slice_between(&self, start: DateTime<Utc>, end: Option<DateTime<Utc>>) -> Self {
        let (index, values) = self
            .iter()
            .filter(|(ts, _)| *ts >= start && end.is_none_or(|end| *ts <= end))
            .unzip();

        Self {
            name: self.name.clone(),
            index,
            values,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_rejects_unsorted_index() {
        let result = TimeSeries::new("s", vec![day(2), day(1)], vec![1.0, 2.0]);
        assert_eq!(result, Err(CoreError::UnsortedIndex(day(1))));

        let result = TimeSeries::new("s", vec![day(1), day(1)], vec![1.0, 2.0]);
        assert_eq!(result, Err(CoreError::DuplicateTimestamp(day(1))));
    }

    #[test]
    fn test_nan_mean_and_last_valid() {
        let series =
            TimeSeries::new("s", vec![day(1), day(2), day(3)], vec![0.2, 0.4, f64::NAN]).unwrap();

        assert!((series.nan_mean() - 0.3).abs() < 1e-12);
        assert_eq!(series.last_valid(), Some((day(2), 0.4)));
        assert_eq!(series.get(day(2)), Some(0.4));
        assert_eq!(series.get(day(9)), None);
    }

    #[test]
    fn test_slice_keeps_name() {
        let series =
            TimeSeries::new("msi", vec![day(1), day(2), day(3)], vec![0.1, 0.2, 0.3]).unwrap();
        let sliced = series.slice_between(day(2), None);

        assert_eq!(sliced.name(), "msi");
        assert_eq!(sliced.values(), &[0.2, 0.3]);
    }

    #[test]
    fn test_serializes_missing_as_null() {
        let series = TimeSeries::new("msi", vec![day(1), day(2)], vec![0.5, f64::NAN]).unwrap();
        let json = serde_json::to_value(&series).unwrap();

        assert_eq!(json["name"], "msi");
        assert_eq!(json["values"][0], 0.5);
        assert!(json["values"][1].is_null());
    }
}
