//! # Market Pulse Analytics
//!
//! Descriptive risk and co-movement statistics for a basket of asset prices:
//! log returns, annualized volatility, drawdowns, and the Market Shift Index
//! (rolling average pairwise correlation of returns).
//!
//! ## Architectural Principles
//!
//! - **Pure logic:** no I/O and no knowledge of where prices come from. It
//!   depends only on `core-types` for its data model and `configuration` for
//!   its parameters.
//! - **Stateless calculation:** every function takes immutable input and
//!   returns new values. Parameters such as the rolling window are passed per
//!   call; there is no process-wide default state.
//! - **Degrade, don't fail:** insufficient data yields NaN for the affected
//!   asset, window or pair. Only structurally invalid arguments are errors.
//!
//! ## Public API
//!
//! - `log_returns`, `annualized_volatility`, `drawdown_series`, `max_drawdown`
//! - `rolling_average_pairwise_correlation`: the Market Shift Index.
//! - `EventWindow` / `slice_period`: cut any series down to a regime.
//! - `AnalyticsEngine`: runs the full pipeline into a `MarketReport` or `RegimeReport`.

// Declare the modules that constitute this crate.
pub mod comovement;
pub mod correlation;
pub mod engine;
pub mod error;
pub mod event;
pub mod report;
pub mod returns;
pub mod risk;
pub mod stats;

// Re-export the key components to create a clean, public-facing API.
pub use comovement::{MARKET_SHIFT_INDEX, rolling_average_pairwise_correlation};
pub use correlation::correlation_matrix;
pub use engine::AnalyticsEngine;
pub use error::AnalyticsError;
pub use event::{EventWindow, slice_period};
pub use report::{MarketReport, RegimeReport, RiskSnapshot, RiskSnapshotRow};
pub use returns::{log_returns, normalized_prices};
pub use risk::{annualized_volatility, drawdown_series, max_drawdown};
