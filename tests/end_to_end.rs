use chrono::{DateTime, Datelike, Duration, TimeZone, Utc, Weekday};
use market_pulse::prelude::*;

/// `n` consecutive business days starting on Monday 2024-01-01.
fn business_days(n: usize) -> Vec<DateTime<Utc>> {
    let mut day = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let mut days = Vec::with_capacity(n);
    while days.len() < n {
        if !matches!(day.weekday(), Weekday::Sat | Weekday::Sun) {
            days.push(day);
        }
        day += Duration::days(1);
    }
    days
}

/// A deterministic price path: a shared market factor plus an asset-specific wave.
fn price_path(n: usize, frequency: f64, phase: f64) -> Vec<f64> {
    let mut price = 100.0;
    (0..n)
        .map(|t| {
            let t = t as f64;
            let market = 0.008 * (t * 0.37).sin();
            let own = 0.01 * (t * frequency + phase).sin();
            price *= (market + own).exp();
            price
        })
        .collect()
}

fn sector_prices(n: usize, missing_d: usize) -> PriceMatrix {
    let mut d = price_path(n, 1.3, 2.2);
    d.iter_mut().take(missing_d).for_each(|p| *p = f64::NAN);

    AssetFrame::from_columns(
        business_days(n),
        vec![
            ("A".to_string(), price_path(n, 0.9, 0.0)),
            ("B".to_string(), price_path(n, 1.1, 0.7)),
            ("C".to_string(), price_path(n, 0.5, 1.4)),
            ("D".to_string(), d),
        ],
    )
    .unwrap()
}

#[test]
fn test_late_listing_asset_is_dropped_not_propagated() {
    let prices = sector_prices(100, 70);
    let returns = log_returns(&prices).unwrap();
    let msi = rolling_average_pairwise_correlation(&returns, 63).unwrap();

    assert_eq!(returns.n_rows(), 99);
    assert_eq!(msi.len(), 99 - 63 + 1);
    assert!(msi.values().iter().all(|v| v.is_finite()));

    // D never has a complete window, so every point is the A/B/C average.
    let without_d = returns.select_columns(&["A", "B", "C"]).unwrap();
    let reference = rolling_average_pairwise_correlation(&without_d, 63).unwrap();
    for (got, want) in msi.values().iter().zip(reference.values()) {
        assert!((got - want).abs() < 1e-15);
    }
    assert_eq!(msi.index(), reference.index());
}

#[test]
fn test_msi_is_stamped_with_window_end() {
    let prices = sector_prices(100, 0);
    let returns = log_returns(&prices).unwrap();
    let msi = rolling_average_pairwise_correlation(&returns, 63).unwrap();

    assert_eq!(msi.index()[0], returns.index()[62]);
    assert_eq!(msi.index().last(), returns.index().last());
    assert!(msi.index().windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_log_returns_never_contain_the_first_row() {
    let prices = sector_prices(30, 10);
    let returns = log_returns(&prices).unwrap();

    assert!(returns.n_rows() < prices.n_rows());
    assert!(!returns.index().contains(&prices.index()[0]));
}

#[test]
fn test_drawdown_identity_and_bounds() {
    let prices = sector_prices(100, 70);
    let drawdown = drawdown_series(&prices).unwrap();
    let max_dd = max_drawdown(&prices).unwrap();

    assert_eq!(max_dd, drawdown.column_min());
    for (_, row) in drawdown.rows() {
        assert!(row.iter().filter(|v| !v.is_nan()).all(|v| *v <= 0.0));
    }

    // Each column hits exactly zero at its running high.
    for col in 0..prices.n_cols() {
        let mut peak = f64::NAN;
        let price_column = prices.column(col).unwrap();
        let drawdown_column = drawdown.column(col).unwrap();
        for (&price, &dd) in price_column.iter().zip(drawdown_column.iter()) {
            if price.is_nan() {
                continue;
            }
            if peak.is_nan() || price >= peak {
                peak = price;
                assert_eq!(dd, 0.0);
            }
        }
    }
}

#[test]
fn test_strictly_rising_asset_has_no_drawdown() {
    let n = 50;
    let prices = AssetFrame::from_columns(
        business_days(n),
        vec![
            ("UP".to_string(), (0..n).map(|i| 10.0 + i as f64 * 0.5).collect()),
            ("WAVE".to_string(), price_path(n, 0.9, 0.0)),
        ],
    )
    .unwrap();

    let drawdown = drawdown_series(&prices).unwrap();
    assert!(drawdown.column(0).unwrap().iter().all(|v| *v == 0.0));
    assert_eq!(max_drawdown(&prices).unwrap().get("UP"), Some(0.0));
}

#[test]
fn test_identical_assets_and_lone_assets() {
    let n = 40;
    let path = price_path(n, 0.9, 0.3);
    let twins = AssetFrame::from_columns(
        business_days(n),
        vec![("A".to_string(), path.clone()), ("B".to_string(), path.clone())],
    )
    .unwrap();
    let twin_msi = rolling_average_pairwise_correlation(&log_returns(&twins).unwrap(), 10).unwrap();
    assert!(twin_msi.values().iter().all(|v| (v - 1.0).abs() < 1e-12));

    let lone = AssetFrame::from_columns(
        business_days(n),
        vec![("A".to_string(), path), ("EMPTY".to_string(), vec![f64::NAN; n])],
    )
    .unwrap();
    let lone_msi = rolling_average_pairwise_correlation(&log_returns(&lone).unwrap(), 10).unwrap();
    assert_eq!(lone_msi.len(), 30);
    assert!(lone_msi.values().iter().all(|v| v.is_nan()));
}

#[test]
fn test_window_bounds() {
    let returns = log_returns(&sector_prices(20, 0)).unwrap();

    assert!(matches!(
        rolling_average_pairwise_correlation(&returns, 1),
        Err(AnalyticsError::InvalidArgument(_))
    ));
    assert!(rolling_average_pairwise_correlation(&returns, 20).unwrap().is_empty());
}

#[test]
fn test_volatility_is_defined_only_with_two_returns() {
    let prices = sector_prices(100, 98);
    let returns = log_returns(&prices).unwrap();
    let vol = annualized_volatility(&returns, 252).unwrap();

    // D has prices on the last two days only: a single return.
    assert!(vol.get("D").unwrap().is_nan());
    assert!(vol.get("A").unwrap() > 0.0);
}

#[test]
fn test_rejects_matrix_without_assets() {
    let result = AssetFrame::from_columns(business_days(5), vec![]);
    assert_eq!(result, Err(CoreError::NoColumns));
}
