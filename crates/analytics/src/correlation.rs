//! Pearson correlation over return columns.
//!
//! Two conventions are used in this crate and they differ only in how they
//! treat missing cells:
//!
//! - [`full_sample_correlation`] works on an already-filtered block of rows.
//!   A column that still contains a missing cell, or has zero variance,
//!   produces NaN for every pair it is part of. The rolling Market Shift Index
//!   uses this and then averages the remaining pairs.
//! - [`correlation_matrix`] is pairwise-complete: each pair uses the rows
//!   where both assets have a value.

use crate::error::AnalyticsError;
use core_types::{CorrelationMatrix, ReturnsMatrix};
use ndarray::{Array2, ArrayView2, Axis};

/// Full-sample Pearson correlation between the columns of a `rows x assets` block.
///
/// Coefficients are clipped to [-1, 1]. A block without rows is all NaN.
pub fn full_sample_correlation(block: ArrayView2<'_, f64>) -> Array2<f64> {
    let n = block.ncols();
    let Some(means) = block.mean_axis(Axis(0)) else {
        return Array2::from_elem((n, n), f64::NAN);
    };

    let deviations = &block - &means;
    let cross = deviations.t().dot(&deviations);
    let norms = cross.diag().mapv(f64::sqrt);

    Array2::from_shape_fn((n, n), |(i, j)| {
        (cross[[i, j]] / (norms[i] * norms[j])).clamp(-1.0, 1.0)
    })
}

/// Pairwise-complete Pearson correlation across all columns of `returns`.
///
/// A pair with fewer than two overlapping observations, or with zero variance
/// on the overlap, is NaN. The diagonal is 1 for any column with at least two
/// observations and non-zero variance.
pub fn correlation_matrix(returns: &ReturnsMatrix) -> Result<CorrelationMatrix, AnalyticsError> {
    let values = returns.values();
    let n = values.ncols();

    let mut matrix = Array2::from_elem((n, n), f64::NAN);
    for i in 0..n {
        for j in i..n {
            let overlap: Vec<usize> = values
                .axis_iter(Axis(0))
                .enumerate()
                .filter(|(_, row)| !row[i].is_nan() && !row[j].is_nan())
                .map(|(t, _)| t)
                .collect();

            let r = if overlap.len() < 2 {
                f64::NAN
            } else {
                let pair = values.select(Axis(1), &[i, j]).select(Axis(0), &overlap);
                full_sample_correlation(pair.view())[[0, 1]]
            };
            let r = if i == j && !r.is_nan() { 1.0 } else { r };

            matrix[[i, j]] = r;
            matrix[[j, i]] = r;
        }
    }

    Ok(CorrelationMatrix::new(returns.columns().to_vec(), matrix)?)
}
