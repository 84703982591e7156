use crate::error::ConfigError;
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
///
/// Every section is optional in the file; missing sections take their defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub analytics: AnalyticsSettings,
    pub universe: Universe,
    /// Named market regimes to analyse separately (e.g., a crisis period).
    pub events: Vec<EventSettings>,
    pub logging: LoggingSettings,
}

/// Parameters passed explicitly to every analytics call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AnalyticsSettings {
    /// Number of return periods in a year, used to annualize volatility.
    /// 252 corresponds to trading days.
    pub periods_per_year: u32,
    /// Rolling window, in sessions, for the Market Shift Index.
    pub msi_window: usize,
}

/// The basket of assets to analyse and the history to request for it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Universe {
    pub tickers: Vec<String>,
    pub start_date: Option<NaiveDate>,
    /// Exclusive upper bound of the requested history. Open when absent.
    pub end_date: Option<NaiveDate>,
    /// The provider field to read prices from (e.g., "Adj Close").
    pub price_field: String,
}

/// A named calendar interval. `end` is inclusive; absent means "through today".
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EventSettings {
    pub name: String,
    pub start: NaiveDate,
    #[serde(default)]
    pub end: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive; `RUST_LOG` takes precedence when set.
    pub level: String,
    pub format: LogFormat,
    /// When set, logs go to a daily rolling file in this directory instead of stdout.
    pub directory: Option<PathBuf>,
    pub file_prefix: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable format
    Pretty,
    /// JSON format for log aggregation
    Json,
    Compact,
}

// --- Default Implementations ---

impl Default for AnalyticsSettings {
    fn default() -> Self {
        Self {
            periods_per_year: 252,
            msi_window: 63,
        }
    }
}

impl Default for Universe {
    fn default() -> Self {
        Self {
            // The eleven SPDR sector ETFs.
            tickers: [
                "XLK", "XLV", "XLF", "XLE", "XLP", "XLI", "XLC", "XLB", "XLU", "XLRE", "XLY",
            ]
            .iter()
            .map(|t| t.to_string())
            .collect(),
            start_date: None,
            end_date: None,
            price_field: "Adj Close".to_string(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            directory: None,
            file_prefix: "market-pulse.log".to_string(),
        }
    }
}

// --- Validation ---

impl Config {
    /// Rejects structurally invalid values before any computation runs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.analytics.validate()?;
        self.universe.validate()?;
        for event in &self.events {
            event.validate()?;
        }
        Ok(())
    }
}

impl AnalyticsSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.msi_window < 2 {
            return Err(ConfigError::ValidationError(format!(
                "analytics.msi_window must be at least 2 sessions, got {}",
                self.msi_window
            )));
        }
        if self.periods_per_year == 0 {
            return Err(ConfigError::ValidationError(
                "analytics.periods_per_year must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl Universe {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tickers.is_empty() {
            return Err(ConfigError::ValidationError(
                "universe.tickers must name at least one asset".to_string(),
            ));
        }
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if start >= end {
                return Err(ConfigError::ValidationError(format!(
                    "universe.start_date ({start}) must be strictly before end_date ({end})"
                )));
            }
        }
        Ok(())
    }
}

impl EventSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.end {
            Some(end) if end < self.start => Err(ConfigError::ValidationError(format!(
                "event '{}' ends ({end}) before it starts ({})",
                self.name, self.start
            ))),
            _ => Ok(()),
        }
    }
}
