use crate::comovement::rolling_average_pairwise_correlation;
use crate::correlation::correlation_matrix;
use crate::error::AnalyticsError;
use crate::event::EventWindow;
use crate::report::{MarketReport, RegimeReport, RiskSnapshot};
use crate::returns::log_returns;
use crate::risk::{annualized_volatility, drawdown_series, max_drawdown};
use configuration::AnalyticsSettings;
use core_types::PriceMatrix;
use tracing::{info, warn};

/// A stateless calculator that runs the full pipeline over a price matrix.
///
/// The engine holds only its parameters; every call recomputes from the
/// input it is given.
#[derive(Debug, Clone, Default)]
pub struct AnalyticsEngine {
    settings: AnalyticsSettings,
}

impl AnalyticsEngine {
    /// Validates `settings` up front so no analysis can fail on a bad parameter midway.
    pub fn new(settings: AnalyticsSettings) -> Result<Self, AnalyticsError> {
        settings
            .validate()
            .map_err(|e| AnalyticsError::InvalidArgument(e.to_string()))?;
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &AnalyticsSettings {
        &self.settings
    }

    /// The main entry point: every metric over the full history of `prices`.
    pub fn analyze(&self, prices: &PriceMatrix) -> Result<MarketReport, AnalyticsError> {
        let returns = log_returns(prices)?;
        let volatility = annualized_volatility(&returns, self.settings.periods_per_year)?;
        let drawdown = drawdown_series(prices)?;
        // Same matrix as `drawdown`, so the two outputs always agree.
        let max_drawdown = drawdown.column_min();
        let market_shift_index =
            rolling_average_pairwise_correlation(&returns, self.settings.msi_window)?;
        let risk_snapshot = RiskSnapshot::new(&volatility, &max_drawdown)?;

        info!(
            assets = prices.n_cols(),
            sessions = prices.n_rows(),
            msi_points = market_shift_index.len(),
            "Market analysis complete"
        );

        Ok(MarketReport {
            asset_count: prices.n_cols(),
            sample_length: prices.n_rows(),
            median_volatility: volatility.median(),
            returns,
            volatility,
            drawdown,
            max_drawdown,
            market_shift_index,
            risk_snapshot,
        })
    }

    /// Re-runs the pipeline on the part of `prices` inside `event`.
    ///
    /// Returns are derived from the sliced prices, so the first session of
    /// the window has no return.
    pub fn analyze_event(
        &self,
        prices: &PriceMatrix,
        event: &EventWindow,
    ) -> Result<RegimeReport, AnalyticsError> {
        let sliced = event.slice(prices);
        if sliced.n_rows() < 2 {
            warn!(
                event = event.name(),
                sessions = sliced.n_rows(),
                "Event window holds too little history for return-based metrics"
            );
        }

        let returns = log_returns(&sliced)?;
        let volatility = annualized_volatility(&returns, self.settings.periods_per_year)?;
        let max_drawdown = max_drawdown(&sliced)?;
        let market_shift_index =
            rolling_average_pairwise_correlation(&returns, self.settings.msi_window)?;
        let correlation = correlation_matrix(&returns)?;

        info!(
            event = event.name(),
            sessions = sliced.n_rows(),
            msi_points = market_shift_index.len(),
            "Regime analysis complete"
        );

        Ok(RegimeReport {
            event: event.clone(),
            sample_length: sliced.n_rows(),
            volatility,
            max_drawdown,
            mean_market_shift: market_shift_index.nan_mean(),
            market_shift_index,
            correlation,
        })
    }

    /// [`analyze_event`](Self::analyze_event) for each window, in order.
    pub fn analyze_events(
        &self,
        prices: &PriceMatrix,
        events: &[EventWindow],
    ) -> Result<Vec<RegimeReport>, AnalyticsError> {
        events
            .iter()
            .map(|event| self.analyze_event(prices, event))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use core_types::AssetFrame;

    fn prices(n: usize) -> PriceMatrix {
        let start: DateTime<Utc> = Utc.with_ymd_and_hms(2021, 6, 1, 0, 0, 0).unwrap();
        let index = (0..n as i64).map(|i| start + Duration::days(i)).collect();
        let series = |phase: f64, drift: f64| -> Vec<f64> {
            (0..n)
                .map(|i| 100.0 * (1.0 + drift * i as f64) + 5.0 * (i as f64 * 0.3 + phase).sin())
                .collect()
        };
        AssetFrame::from_columns(
            index,
            vec![
                ("XLK".to_string(), series(0.0, 0.002)),
                ("XLF".to_string(), series(0.8, 0.001)),
                ("XLE".to_string(), series(2.1, -0.001)),
            ],
        )
        .unwrap()
    }

    fn engine(window: usize) -> AnalyticsEngine {
        AnalyticsEngine::new(AnalyticsSettings {
            periods_per_year: 252,
            msi_window: window,
        })
        .unwrap()
    }

    #[test]
    fn test_rejects_invalid_settings() {
        let result = AnalyticsEngine::new(AnalyticsSettings {
            periods_per_year: 252,
            msi_window: 1,
        });
        assert!(matches!(result, Err(AnalyticsError::InvalidArgument(_))));
    }

    #[test]
    fn test_analyze_assembles_consistent_report() {
        let px = prices(40);
        let report = engine(10).analyze(&px).unwrap();

        assert_eq!(report.asset_count, 3);
        assert_eq!(report.sample_length, 40);
        assert_eq!(report.returns.n_rows(), 39);
        assert_eq!(report.market_shift_index.len(), 30);
        assert_eq!(report.max_drawdown, max_drawdown(&px).unwrap());
        assert_eq!(report.risk_snapshot.rows.len(), 3);
        assert_eq!(report.volatility.names(), px.columns());
        assert!(report.median_volatility > 0.0);
    }

    #[test]
    fn test_analyze_event_recomputes_on_slice() {
        let px = prices(60);
        let start = px.index()[10];
        let end = px.index()[39];
        let event = EventWindow::new("stress", start, Some(end)).unwrap();

        let report = engine(5).analyze_event(&px, &event).unwrap();

        assert_eq!(report.sample_length, 30);
        // 30 prices -> 29 returns -> 25 windows of 5.
        assert_eq!(report.market_shift_index.len(), 25);
        assert_eq!(report.market_shift_index.index()[0], px.index()[15]);
        assert_eq!(report.correlation.size(), 3);
        assert!(!report.mean_market_shift.is_nan());
    }

    #[test]
    fn test_event_outside_history_degrades_gracefully() {
        let px = prices(20);
        let far = px.index()[19] + Duration::days(365);
        let event = EventWindow::open_ended("future", far);

        let report = engine(5).analyze_event(&px, &event).unwrap();

        assert_eq!(report.sample_length, 0);
        assert!(report.market_shift_index.is_empty());
        assert!(report.mean_market_shift.is_nan());
        assert!(report.volatility.values().iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_report_serializes_to_json() {
        let report = engine(10).analyze(&prices(30)).unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["asset_count"], 3);
        assert_eq!(json["market_shift_index"]["name"], "market_shift_index");
    }
}
