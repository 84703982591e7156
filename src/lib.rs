//! # Market Pulse
//!
//! Risk and co-movement analytics for a basket of asset price series.
//!
//! This package only ties the workspace together:
//!
//! - [`core_types`]: the `PriceMatrix` / `ReturnsMatrix` / vector / series value types.
//! - [`analytics`]: log returns, volatility, drawdowns, the Market Shift Index,
//!   event windows and the `AnalyticsEngine`.
//! - [`configuration`]: typed settings from `config.toml` and the environment,
//!   plus logging setup.
//! - [`price_provider`]: the boundary through which price history enters.
//!
//! ```rust,ignore
//! use market_pulse::prelude::*;
//!
//! let config = configuration::load_config()?;
//! let _guard = configuration::init_logging(&config.logging)?;
//!
//! let request = PriceRequest::from_universe(&config.universe, chrono::Utc::now())?;
//! let prices = provider.price_history(&request)?;
//!
//! let engine = AnalyticsEngine::new(config.analytics)?;
//! let report = engine.analyze(&prices)?;
//! ```

pub use analytics;
pub use configuration;
pub use core_types;
pub use price_provider;

/// Common imports
pub mod prelude {
    pub use analytics::{
        AnalyticsEngine, AnalyticsError, EventWindow, MarketReport, RegimeReport, RiskSnapshot,
        annualized_volatility, correlation_matrix, drawdown_series, log_returns, max_drawdown,
        normalized_prices, rolling_average_pairwise_correlation, slice_period,
    };
    pub use configuration::{AnalyticsSettings, Config};
    pub use core_types::{
        AssetFrame, AssetVector, CoreError, CorrelationMatrix, DrawdownMatrix, MarketShiftIndex,
        MaxDrawdownVector, PriceMatrix, ReturnsMatrix, TimeSeries, TimeSliceable,
        VolatilityVector,
    };
    pub use price_provider::{
        FieldFrame, InMemoryProvider, PriceField, PriceHistoryProvider, PriceRequest,
        ProviderError,
    };
}
