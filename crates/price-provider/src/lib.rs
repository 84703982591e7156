//! # Price Provider Boundary
//!
//! The analytics core never fetches data. Whatever source is used (a market
//! data API, a file, a fixture) hands over a single normalised `PriceMatrix`
//! through the [`PriceHistoryProvider`] trait. Choosing a price field out of a
//! multi-field download lives here too, not in the analytics crate.

use chrono::{DateTime, NaiveTime, Utc};
use configuration::Universe;
use core_types::PriceMatrix;

pub mod error;
pub mod field;
pub mod frame;
pub mod memory;

// --- Public API ---
pub use error::ProviderError;
pub use field::PriceField;
pub use frame::FieldFrame;
pub use memory::InMemoryProvider;

/// The contract every price-history source implements.
///
/// Implementations must return data meeting the `PriceMatrix` invariants
/// (sorted, unique timestamps, no all-missing rows), which `AssetFrame`
/// construction already enforces.
pub trait PriceHistoryProvider {
    fn price_history(&self, request: &PriceRequest) -> Result<PriceMatrix, ProviderError>;
}

/// Which tickers, over which range, and from which price field.
///
/// `start` is inclusive and `end` exclusive, as price-history downloads are.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceRequest {
    pub tickers: Vec<String>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub price_field: PriceField,
}

impl PriceRequest {
    pub fn new(
        tickers: Vec<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        price_field: PriceField,
    ) -> Result<Self, ProviderError> {
        if tickers.is_empty() {
            return Err(ProviderError::InvalidRequest(
                "at least one ticker is required".to_string(),
            ));
        }
        if start >= end {
            return Err(ProviderError::InvalidRequest(format!(
                "start ({start}) must be strictly before end ({end})"
            )));
        }
        Ok(Self {
            tickers,
            start,
            end,
            price_field,
        })
    }

    /// Builds the request described by the configured universe.
    ///
    /// A missing start date requests all available history; a missing end
    /// date requests everything up to `now`.
    pub fn from_universe(universe: &Universe, now: DateTime<Utc>) -> Result<Self, ProviderError> {
        let midnight = |date: chrono::NaiveDate| date.and_time(NaiveTime::MIN).and_utc();

        Self::new(
            universe.tickers.clone(),
            universe
                .start_date
                .map(midnight)
                .unwrap_or(DateTime::<Utc>::MIN_UTC),
            universe.end_date.map(midnight).unwrap_or(now),
            universe.price_field.parse()?,
        )
    }
}
