//! # Market Pulse Core Types
//!
//! Layer 0 of the workspace: the value objects every other crate passes around.
//! Nothing here performs analytics; it only guarantees the shape invariants the
//! analytics crate relies on (sorted unique timestamps, ordered unique columns,
//! no all-missing rows).

pub mod correlation;
pub mod error;
pub mod frame;
pub mod series;
pub mod slice;
pub mod vector;

// Re-export the core types to provide a clean public API.
pub use correlation::{CorrelationMatrix, upper_triangle};
pub use error::CoreError;
pub use frame::{AssetFrame, DrawdownMatrix, PriceMatrix, ReturnsMatrix};
pub use series::{MarketShiftIndex, TimeSeries};
pub use slice::TimeSliceable;
pub use vector::{AssetVector, MaxDrawdownVector, VolatilityVector};

// Frames are built from and expose `ndarray` arrays.
pub use ndarray;

/// Element-wise equality where two missing values are considered equal.
pub(crate) fn values_match(a: &[f64], b: &[f64]) -> bool {
    a.len() == b.len()
        && a
            .iter()
            .zip(b)
            .all(|(x, y)| x == y || (x.is_nan() && y.is_nan()))
}
