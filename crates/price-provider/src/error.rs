use crate::field::PriceField;
use core_types::CoreError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    #[error("Requested price field '{0}' not found in download")]
    MissingField(PriceField),

    #[error("Unknown price field label '{0}'")]
    UnknownField(String),

    #[error("No price data retrieved for the request")]
    NoData,

    #[error("Ticker '{0}' is not available from this provider")]
    UnknownTicker(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}
