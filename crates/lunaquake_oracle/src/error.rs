//! Oracle error type.

use thiserror::Error;

/// Failure of an astronomical oracle query.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum OracleError {
    /// The underlying ephemeris could not answer.
    #[error("ephemeris failure: {0}")]
    Failed(String),
    /// The oracle returned NaN or infinity.
    #[error("non-finite {quantity}")]
    NonFinite { quantity: &'static str },
    /// The oracle returned a finite value outside its documented range.
    #[error("{quantity} out of range: {value}")]
    OutOfRange { quantity: &'static str, value: f64 },
}
