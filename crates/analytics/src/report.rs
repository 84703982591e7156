use crate::error::AnalyticsError;
use crate::event::EventWindow;
use core_types::{
    CorrelationMatrix, CoreError, DrawdownMatrix, MarketShiftIndex, MaxDrawdownVector,
    ReturnsMatrix, VolatilityVector,
};
use serde::Serialize;
use std::cmp::Ordering;

/// Volatility and max drawdown side by side, one row per asset.
#[derive(Debug, Clone, Serialize)]
pub struct RiskSnapshot {
    pub rows: Vec<RiskSnapshotRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RiskSnapshotRow {
    pub asset: String,
    pub annualized_vol: f64,
    pub max_drawdown: f64,
}

impl RiskSnapshot {
    /// Joins the two vectors. They must cover the same assets in the same order.
    pub fn new(
        volatility: &VolatilityVector,
        max_drawdown: &MaxDrawdownVector,
    ) -> Result<Self, AnalyticsError> {
        if volatility.names() != max_drawdown.names() {
            return Err(CoreError::ShapeMismatch(
                "volatility and max drawdown cover different assets".to_string(),
            )
            .into());
        }

        let rows = volatility
            .iter()
            .zip(max_drawdown.values())
            .map(|((asset, vol), &dd)| RiskSnapshotRow {
                asset: asset.to_string(),
                annualized_vol: vol,
                max_drawdown: dd,
            })
            .collect();

        Ok(Self { rows })
    }

    /// Most volatile first. Missing values go last.
    pub fn sorted_by_volatility(&self) -> Vec<RiskSnapshotRow> {
        self.sorted_by(|row| row.annualized_vol, true)
    }

    /// Deepest drawdown first. Missing values go last.
    pub fn sorted_by_drawdown(&self) -> Vec<RiskSnapshotRow> {
        self.sorted_by(|row| row.max_drawdown, false)
    }

    fn sorted_by<F>(&self, key: F, descending: bool) -> Vec<RiskSnapshotRow>
    where
        F: Fn(&RiskSnapshotRow) -> f64,
    {
        let mut rows = self.rows.clone();
        rows.sort_by(|a, b| {
            let (x, y) = (key(a), key(b));
            match (x.is_nan(), y.is_nan()) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                (false, false) if descending => y.total_cmp(&x),
                (false, false) => x.total_cmp(&y),
            }
        });
        rows
    }
}

/// Everything the presentation layer renders for the full history.
///
/// This struct is the final output of `AnalyticsEngine::analyze`.
#[derive(Debug, Clone, Serialize)]
pub struct MarketReport {
    pub asset_count: usize,
    /// Number of price rows (sessions) analysed.
    pub sample_length: usize,
    pub returns: ReturnsMatrix,
    pub volatility: VolatilityVector,
    /// NaN when no asset has a defined volatility.
    pub median_volatility: f64,
    pub drawdown: DrawdownMatrix,
    pub max_drawdown: MaxDrawdownVector,
    pub market_shift_index: MarketShiftIndex,
    pub risk_snapshot: RiskSnapshot,
}

/// Metrics recomputed on the slice of history covered by one event window.
#[derive(Debug, Clone, Serialize)]
pub struct RegimeReport {
    pub event: EventWindow,
    pub sample_length: usize,
    pub volatility: VolatilityVector,
    pub max_drawdown: MaxDrawdownVector,
    pub market_shift_index: MarketShiftIndex,
    /// Mean of the defined Market Shift Index points inside the window.
    pub mean_market_shift: f64,
    /// Pairwise-complete return correlations over the whole window.
    pub correlation: CorrelationMatrix,
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::AssetVector;

    fn vector(values: &[f64]) -> AssetVector {
        let names = ["XLK", "XLE", "XLU"].iter().map(|s| s.to_string()).collect();
        AssetVector::new(names, values.to_vec()).unwrap()
    }

    #[test]
    fn test_snapshot_sorting() {
        let snapshot = RiskSnapshot::new(
            &vector(&[0.25, f64::NAN, 0.18]),
            &vector(&[-0.30, -0.55, -0.20]),
        )
        .unwrap();

        let by_vol: Vec<String> = snapshot
            .sorted_by_volatility()
            .into_iter()
            .map(|row| row.asset)
            .collect();
        assert_eq!(by_vol, vec!["XLK", "XLU", "XLE"]);

        let by_dd: Vec<String> = snapshot
            .sorted_by_drawdown()
            .into_iter()
            .map(|row| row.asset)
            .collect();
        assert_eq!(by_dd, vec!["XLE", "XLK", "XLU"]);
    }

    #[test]
    fn test_snapshot_rejects_mismatched_assets() {
        let other = AssetVector::new(vec!["SPY".to_string()], vec![-0.1]).unwrap();
        let result = RiskSnapshot::new(&vector(&[0.1, 0.2, 0.3]), &other);

        assert!(matches!(
            result,
            Err(AnalyticsError::Core(CoreError::ShapeMismatch(_)))
        ));
    }
}
