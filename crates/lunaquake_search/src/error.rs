//! Error types for syzygy, perigee and window search.

use lunaquake_oracle::OracleError;
use lunaquake_time::Instant;
use thiserror::Error;

/// Errors from the search engine.
///
/// None of these are retried internally: scans are deterministic, so the
/// same query against the same oracle fails the same way.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum SearchError {
    /// The oracle failed or returned a non-finite / out-of-range value.
    #[error("astronomical oracle unavailable at {at}: {source}")]
    OracleUnavailable {
        at: Instant,
        #[source]
        source: OracleError,
    },
    /// A scan produced no syzygy where the caller required one.
    #[error("no syzygy found in the search window")]
    NoSyzygyFound,
    /// Invalid search parameters.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
}
