use crate::correlation::full_sample_correlation;
use crate::error::AnalyticsError;
use crate::stats::nan_mean;
use core_types::{MarketShiftIndex, ReturnsMatrix, TimeSeries, upper_triangle};
use ndarray::{ArrayView2, Axis, s};
use tracing::debug;

/// Name carried by every series produced by [`rolling_average_pairwise_correlation`].
pub const MARKET_SHIFT_INDEX: &str = "market_shift_index";

/// The Market Shift Index: average pairwise return correlation over a
/// trailing window of `window` rows.
///
/// One point is emitted per full window, stamped with the window's last
/// timestamp, so the output has `n_rows - window + 1` entries (none when the
/// history is shorter than the window). Within each window:
///
/// 1. assets with no return at all in the window are dropped;
/// 2. rows missing for every remaining asset are dropped, while rows with
///    only some assets missing are kept;
/// 3. fewer than two assets or two rows left yields NaN for that window;
/// 4. the mean of the strictly-upper-triangular correlations is taken,
///    ignoring NaN pairs (see [`full_sample_correlation`] for which pairs are NaN).
///
/// Pairs are enumerated in the column order of `returns`, so identical input
/// always produces bit-identical output.
///
/// # Errors
///
/// `InvalidArgument` when `window < 2`, before any computation.
pub fn rolling_average_pairwise_correlation(
    returns: &ReturnsMatrix,
    window: usize,
) -> Result<MarketShiftIndex, AnalyticsError> {
    if window < 2 {
        return Err(AnalyticsError::InvalidArgument(format!(
            "window must be at least 2 sessions, got {window}"
        )));
    }

    let values = returns.values();
    let n_rows = values.nrows();
    let positions = n_rows.saturating_sub(window - 1);

    let mut index = Vec::with_capacity(positions);
    let mut averages = Vec::with_capacity(positions);
    for end in window..=n_rows {
        averages.push(window_average_correlation(values.slice(s![end - window..end, ..])));
        index.push(returns.index()[end - 1]);
    }

    let undefined = averages.iter().filter(|v| v.is_nan()).count();
    debug!(
        window,
        assets = returns.n_cols(),
        points = averages.len(),
        undefined,
        "Computed market shift index"
    );

    Ok(TimeSeries::new(MARKET_SHIFT_INDEX, index, averages)?)
}

fn window_average_correlation(block: ArrayView2<'_, f64>) -> f64 {
    let assets: Vec<usize> = block
        .axis_iter(Axis(1))
        .enumerate()
        .filter(|(_, column)| column.iter().any(|v| !v.is_nan()))
        .map(|(col, _)| col)
        .collect();
    if assets.len() < 2 {
        return f64::NAN;
    }
    let block = block.select(Axis(1), &assets);

    let kept: Vec<usize> = block
        .axis_iter(Axis(0))
        .enumerate()
        .filter(|(_, row)| row.iter().any(|v| !v.is_nan()))
        .map(|(t, _)| t)
        .collect();
    if kept.len() < 2 {
        return f64::NAN;
    }
    let block = block.select(Axis(0), &kept);

    let matrix = full_sample_correlation(block.view());
    nan_mean(upper_triangle(matrix.view()))
}
