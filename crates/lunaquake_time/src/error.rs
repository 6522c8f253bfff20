//! Error types for instant parsing and time-scale conversions.

use thiserror::Error;

/// Errors from instant construction, parsing, or Julian Date conversion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum TimeError {
    /// Text could not be parsed as a UTC instant.
    #[error("cannot parse instant `{input}`: expected YYYY-MM-DDThh:mm:ss[.fff]Z or YYYY-MM-DD")]
    Parse { input: String },
    /// Calendar fields or epoch value outside the representable range.
    #[error("instant out of range: {0}")]
    OutOfRange(&'static str),
    /// A NaN or infinite Julian Date / offset was supplied.
    #[error("non-finite time value")]
    NonFinite,
}
