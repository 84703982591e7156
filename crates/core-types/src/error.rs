use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("A frame must contain at least one asset column")]
    NoColumns,

    #[error("Duplicate asset column '{0}'")]
    DuplicateColumn(String),

    #[error("Duplicate timestamp {0} in time index")]
    DuplicateTimestamp(DateTime<Utc>),

    #[error("Time index is not strictly increasing at {0}")]
    UnsortedIndex(DateTime<Utc>),

    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("Unknown asset column '{0}'")]
    UnknownColumn(String),
}
