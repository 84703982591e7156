use crate::error::AnalyticsError;
use core_types::{AssetFrame, PriceMatrix, ReturnsMatrix};
use ndarray::s;

/// Natural-log returns between consecutive rows of `prices`.
///
/// `return[t] = ln(price[t] / price[t-1])` per asset. The first row has no
/// predecessor and is removed; a missing price on either side yields a missing
/// return for that asset only. Rows missing for every asset are dropped.
/// Fewer than two input rows produce an empty matrix.
pub fn log_returns(prices: &PriceMatrix) -> Result<ReturnsMatrix, AnalyticsError> {
    let n = prices.n_rows();
    if n < 2 {
        return Ok(prices.filter_rows(|_| false));
    }

    // Ascending order is an `AssetFrame` invariant, so neighbours are consecutive in time.
    let values = prices.values();
    let ratios = &values.slice(s![1.., ..]) / &values.slice(s![..n - 1, ..]);

    Ok(AssetFrame::new(
        prices.index()[1..].to_vec(),
        prices.columns().to_vec(),
        ratios.mapv(f64::ln),
    )?)
}

/// Rebases every column to 1.0 at the first row.
///
/// A column with no price on the first row has no base and becomes missing.
/// The index is kept as is, so a session whose only prices belong to such
/// columns stays in the result as an all-missing row.
pub fn normalized_prices(prices: &PriceMatrix) -> Result<PriceMatrix, AnalyticsError> {
    let Some(base) = prices.row(0) else {
        return Ok(prices.clone());
    };

    let rebased = &prices.values() / &base;
    Ok(prices.with_values(rebased)?)
}
