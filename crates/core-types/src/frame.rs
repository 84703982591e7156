use crate::error::CoreError;
use crate::slice::TimeSliceable;
use crate::vector::AssetVector;
use chrono::{DateTime, Utc};
use ndarray::{Array2, ArrayView1, ArrayView2, Axis};
use serde::Serialize;
use std::collections::HashSet;

/// A time-indexed table of per-asset values, one column per asset.
///
/// Cells live in a dense `rows x assets` array and missing observations are
/// stored as `f64::NAN`. Frames built from raw data enforce the same
/// invariants:
///
/// - at least one column, with unique names, in caller-supplied order;
/// - rows sorted ascending by timestamp, with no duplicate timestamps;
/// - rows that are missing for every asset are dropped.
///
/// A frame is immutable once built; every transform produces a new frame.
#[derive(Debug, Clone, Serialize)]
pub struct AssetFrame {
    index: Vec<DateTime<Utc>>,
    columns: Vec<String>,
    values: Array2<f64>,
}

/// Asset prices, as handed over by a price-history provider.
pub type PriceMatrix = AssetFrame;

/// Natural-log returns between consecutive rows of a `PriceMatrix`.
pub type ReturnsMatrix = AssetFrame;

/// Ratio of each price to its running maximum, minus one.
pub type DrawdownMatrix = AssetFrame;

impl AssetFrame {
    /// Builds a frame from a `timestamps x assets` array.
    ///
    /// Rows may arrive in any order; they are sorted by timestamp.
    pub fn new(
        index: Vec<DateTime<Utc>>,
        columns: Vec<String>,
        values: Array2<f64>,
    ) -> Result<Self, CoreError> {
        validate_columns(&columns)?;

        if values.dim() != (index.len(), columns.len()) {
            return Err(CoreError::ShapeMismatch(format!(
                "{} timestamps and {} columns but the values are {}x{}",
                index.len(),
                columns.len(),
                values.nrows(),
                values.ncols()
            )));
        }

        let mut order: Vec<usize> = (0..index.len()).collect();
        order.sort_by_key(|&i| index[i]);

        if let Some(pair) = order.windows(2).find(|pair| index[pair[0]] == index[pair[1]]) {
            return Err(CoreError::DuplicateTimestamp(index[pair[0]]));
        }

        let keep: Vec<usize> = order
            .into_iter()
            .filter(|&i| values.row(i).iter().any(|v| !v.is_nan()))
            .collect();

        Ok(Self {
            index: keep.iter().map(|&i| index[i]).collect(),
            columns,
            values: values.select(Axis(0), &keep),
        })
    }

    /// Builds a frame from column-major data, one `(name, values)` pair per asset.
    pub fn from_columns(
        index: Vec<DateTime<Utc>>,
        columns: Vec<(String, Vec<f64>)>,
    ) -> Result<Self, CoreError> {
        if columns.is_empty() {
            return Err(CoreError::NoColumns);
        }

        let views: Vec<ArrayView1<'_, f64>> = columns
            .iter()
            .map(|(_, values)| ArrayView1::from(values.as_slice()))
            .collect();
        let values = ndarray::stack(Axis(1), &views)
            .map_err(|e| CoreError::ShapeMismatch(format!("columns differ in length: {e}")))?;
        let names = columns.into_iter().map(|(name, _)| name).collect();

        Self::new(index, names, values)
    }

    /// Replaces the cell values, keeping the index and columns unchanged.
    ///
    /// No row is dropped, even one that ends up missing for every asset.
    pub fn with_values(&self, values: Array2<f64>) -> Result<Self, CoreError> {
        if values.dim() != self.values.dim() {
            return Err(CoreError::ShapeMismatch(format!(
                "expected {}x{} values, got {}x{}",
                self.n_rows(),
                self.n_cols(),
                values.nrows(),
                values.ncols()
            )));
        }
        Ok(Self {
            index: self.index.clone(),
            columns: self.columns.clone(),
            values,
        })
    }

    pub fn index(&self) -> &[DateTime<Utc>] {
        &self.index
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// The `rows x assets` cell array.
    pub fn values(&self) -> ArrayView2<'_, f64> {
        self.values.view()
    }

    pub fn n_rows(&self) -> usize {
        self.values.nrows()
    }

    pub fn n_cols(&self) -> usize {
        self.values.ncols()
    }

    /// True when the frame has no rows. A frame always has columns.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn row(&self, i: usize) -> Option<ArrayView1<'_, f64>> {
        (i < self.n_rows()).then(|| self.values.row(i))
    }

    /// Iterates over `(timestamp, row)` pairs in chronological order.
    pub fn rows(&self) -> impl Iterator<Item = (DateTime<Utc>, ArrayView1<'_, f64>)> + '_ {
        self.index
            .iter()
            .copied()
            .zip(self.values.axis_iter(Axis(0)))
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.values.get((row, col)).copied()
    }

    pub fn column_position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Values of column `col`, top to bottom.
    pub fn column(&self, col: usize) -> Option<ArrayView1<'_, f64>> {
        (col < self.n_cols()).then(|| self.values.column(col))
    }

    pub fn column_by_name(&self, name: &str) -> Result<ArrayView1<'_, f64>, CoreError> {
        self.column_position(name)
            .map(|col| self.values.column(col))
            .ok_or_else(|| CoreError::UnknownColumn(name.to_string()))
    }

    /// Minimum of each column, ignoring missing values.
    ///
    /// A column with no valid value yields NaN.
    pub fn column_min(&self) -> AssetVector {
        // `f64::min` returns the non-NaN operand, so NaN only survives an all-NaN column.
        let mins = self.values.fold_axis(Axis(0), f64::NAN, |&acc, &v| acc.min(v));
        AssetVector::from_parts(self.columns.clone(), mins.to_vec())
    }

    /// Keeps the rows whose timestamp satisfies `keep`. Columns are preserved
    /// even when no row survives.
    pub fn filter_rows<F>(&self, mut keep: F) -> Self
    where
        F: FnMut(&DateTime<Utc>) -> bool,
    {
        let positions: Vec<usize> = self
            .index
            .iter()
            .enumerate()
            .filter(|(_, ts)| keep(ts))
            .map(|(i, _)| i)
            .collect();

        Self {
            index: positions.iter().map(|&i| self.index[i]).collect(),
            columns: self.columns.clone(),
            values: self.values.select(Axis(0), &positions),
        }
    }

    /// Restricts the frame to the named columns, in the order given.
    ///
    /// Rows that become missing for every selected asset are dropped.
    pub fn select_columns<S: AsRef<str>>(&self, names: &[S]) -> Result<Self, CoreError> {
        let positions = names
            .iter()
            .map(|name| {
                self.column_position(name.as_ref())
                    .ok_or_else(|| CoreError::UnknownColumn(name.as_ref().to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let columns = positions.iter().map(|&p| self.columns[p].clone()).collect();

        Self::new(
            self.index.clone(),
            columns,
            self.values.select(Axis(1), &positions),
        )
    }
}

impl PartialEq for AssetFrame {
    /// Missing cells compare equal to each other.
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
            && self.columns == other.columns
            && self.values.dim() == other.values.dim()
            && self
                .values
                .iter()
                .zip(other.values.iter())
                .all(|(x, y)| x == y || (x.is_nan() && y.is_nan()))
    }
}

impl TimeSliceable for AssetFrame {
    fn slice_between(&self, start: DateTime<Utc>, end: Option<DateTime<Utc>>) -> Self {
        self.filter_rows(|ts| *ts >= start && end.is_none_or(|end| *ts <= end))
    }
}

fn validate_columns(columns: &[String]) -> Result<(), CoreError> {
    if columns.is_empty() {
        return Err(CoreError::NoColumns);
    }
    let mut seen = HashSet::with_capacity(columns.len());
    for name in columns {
        if !seen.insert(name.as_str()) {
            return Err(CoreError::DuplicateColumn(name.clone()));
        }
    }
    Ok(())
}
