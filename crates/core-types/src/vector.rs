use crate::error::CoreError;
use crate::values_match;
use serde::Serialize;
use std::cmp::Ordering;

/// One scalar per asset, in the column order of the frame it was derived from.
#[derive(Debug, Clone, Serialize)]
pub struct AssetVector {
    names: Vec<String>,
    values: Vec<f64>,
}

/// Annualized volatility per asset.
pub type VolatilityVector = AssetVector;

/// Most negative drawdown per asset.
pub type MaxDrawdownVector = AssetVector;

impl AssetVector {
    pub fn new(names: Vec<String>, values: Vec<f64>) -> Result<Self, CoreError> {
        if names.len() != values.len() {
            return Err(CoreError::ShapeMismatch(format!(
                "{} names but {} values",
                names.len(),
                values.len()
            )));
        }
        Ok(Self::from_parts(names, values))
    }

    pub(crate) fn from_parts(names: Vec<String>, values: Vec<f64>) -> Self {
        Self { names, values }
    }

    pub fn names(&self) -> &[String] {
        &self.names
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

    pub fn get(&self, name: &str) -> Option<f64> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| self.values[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }

    /// Median of the valid values; NaN when none are valid.
    pub fn median(&self) -> f64 {
        let mut valid: Vec<f64> = self.values.iter().copied().filter(|v| !v.is_nan()).collect();
        if valid.is_empty() {
            return f64::NAN;
        }
        valid.sort_by(f64::total_cmp);

        let mid = valid.len() / 2;
        if valid.len() % 2 == 0 {
            (valid[mid - 1] + valid[mid]) / 2.0
        } else {
            valid[mid]
        }
    }

    /// Entries ordered from largest to smallest. Missing values go last.
    pub fn sorted_descending(&self) -> Vec<(String, f64)> {
        self.sorted_by(|a, b| b.total_cmp(a))
    }

    /// Entries ordered from smallest to largest. Missing values go last.
    pub fn sorted_ascending(&self) -> Vec<(String, f64)> {
        self.sorted_by(f64::total_cmp)
    }

    /// The `n` largest entries.
    pub fn top(&self, n: usize) -> Vec<(String, f64)> {
        let mut sorted = self.sorted_descending();
        sorted.truncate(n);
        sorted
    }

    fn sorted_by<F>(&self, cmp: F) -> Vec<(String, f64)>
    where
        F: Fn(&f64, &f64) -> Ordering,
    {
        let mut entries: Vec<(String, f64)> = self
            .iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect();
        // Stable sort keeps column order among ties.
        entries.sort_by(|(_, a), (_, b)| match (a.is_nan(), b.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => cmp(a, b),
        });
        entries
    }
}

impl PartialEq for AssetVector {
    fn eq(&self, other: &Self) -> bool {
        self.names == other.names && values_match(&self.values, &other.values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vector(values: &[f64]) -> AssetVector {
        let names = (0..values.len()).map(|i| format!("X{i}")).collect();
        AssetVector::new(names, values.to_vec()).unwrap()
    }

    #[test]
    fn test_median_ignores_missing() {
        assert_eq!(vector(&[3.0, f64::NAN, 1.0, 2.0]).median(), 2.0);
        assert_eq!(vector(&[4.0, 1.0, 3.0, 2.0]).median(), 2.5);
        assert!(vector(&[f64::NAN]).median().is_nan());
    }

    #[test]
    fn test_sorting_puts_missing_last() {
        let v = vector(&[0.2, f64::NAN, 0.5, 0.1]);

        let desc: Vec<String> = v.sorted_descending().into_iter().map(|(n, _)| n).collect();
        assert_eq!(desc, vec!["X2", "X0", "X3", "X1"]);

        let asc: Vec<String> = v.sorted_ascending().into_iter().map(|(n, _)| n).collect();
        assert_eq!(asc, vec!["X3", "X0", "X2", "X1"]);

        assert_eq!(v.top(2), vec![("X2".to_string(), 0.5), ("X0".to_string(), 0.2)]);
    }

    #[test]
    fn test_rejects_length_mismatch() {
        let result = AssetVector::new(vec!["A".to_string()], vec![]);
        assert!(matches!(result, Err(CoreError::ShapeMismatch(_))));
    }
}
