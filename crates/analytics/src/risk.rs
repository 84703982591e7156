use crate::error::AnalyticsError;
use crate::stats::sample_std;
use core_types::{
    AssetVector, DrawdownMatrix, MaxDrawdownVector, PriceMatrix, ReturnsMatrix, VolatilityVector,
};
use ndarray::Axis;

/// Per-asset sample standard deviation of returns, scaled by `sqrt(periods_per_year)`.
///
/// Missing returns are excluded from the sample, not treated as zero. An
/// asset with fewer than two valid observations yields NaN.
pub fn annualized_volatility(
    returns: &ReturnsMatrix,
    periods_per_year: u32,
) -> Result<VolatilityVector, AnalyticsError> {
    if periods_per_year == 0 {
        return Err(AnalyticsError::InvalidArgument(
            "periods_per_year must be positive".to_string(),
        ));
    }
    let scale = f64::from(periods_per_year).sqrt();

    let values = returns
        .values()
        .axis_iter(Axis(1))
        .map(|column| sample_std(column.iter().copied()) * scale)
        .collect();

    Ok(AssetVector::new(returns.columns().to_vec(), values)?)
}

/// Ratio of each price to its running maximum, minus one.
///
/// The running maximum is taken left to right over the full history and
/// skips missing prices; a missing price yields a missing drawdown. Cells are
/// never positive and are exactly zero wherever the price sets or matches its
/// running high.
pub fn drawdown_series(prices: &PriceMatrix) -> Result<DrawdownMatrix, AnalyticsError> {
    let mut drawdown = prices.values().to_owned();
    for mut column in drawdown.axis_iter_mut(Axis(1)) {
        let mut peak = f64::NAN;
        for cell in column.iter_mut() {
            let price = *cell;
            if price > peak || (peak.is_nan() && !price.is_nan()) {
                peak = price;
            }
            *cell = price / peak - 1.0;
        }
    }

    Ok(prices.with_values(drawdown)?)
}

/// The most negative drawdown per asset.
///
/// Always the column-wise minimum of [`drawdown_series`], so the two can
/// never disagree. A column with no valid drawdown yields NaN.
pub fn max_drawdown(prices: &PriceMatrix) -> Result<MaxDrawdownVector, AnalyticsError> {
    Ok(drawdown_series(prices)?.column_min())
}
