use crate::error::ProviderError;
use crate::frame::FieldFrame;
use crate::{PriceHistoryProvider, PriceRequest};
use core_types::{CoreError, PriceMatrix};
use tracing::debug;

/// Serves price history from a download already held in memory.
#[derive(Debug, Clone)]
pub struct InMemoryProvider {
    data: FieldFrame,
}

impl InMemoryProvider {
    pub fn new(data: FieldFrame) -> Self {
        Self { data }
    }
}

impl PriceHistoryProvider for InMemoryProvider {
    fn price_history(&self, request: &PriceRequest) -> Result<PriceMatrix, ProviderError> {
        let prices = self.data.select_price_field(request.price_field)?;

        let selected = prices
            .select_columns(&request.tickers)
            .map_err(|e| match e {
                CoreError::UnknownColumn(ticker) => ProviderError::UnknownTicker(ticker),
                other => ProviderError::Core(other),
            })?;
        let ranged = selected.filter_rows(|ts| *ts >= request.start && *ts < request.end);

        if ranged.is_empty() {
            return Err(ProviderError::NoData);
        }

        debug!(
            tickers = ranged.n_cols(),
            sessions = ranged.n_rows(),
            field = %request.price_field,
            "Served price history from memory"
        );

        Ok(ranged)
    }
}
