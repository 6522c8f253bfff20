//! Error types for seismic event sources.

use thiserror::Error;

/// Failure to obtain or decode a seismic event feed.
///
/// Callers treat every variant the same way: the feed is unavailable and
/// window computation carries on without events.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EventSourceError {
    #[error("event feed request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("event feed returned HTTP {0}")]
    Status(u16),
    #[error("event feed is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("event feed could not be read: {0}")]
    Io(#[from] std::io::Error),
    #[error("event feed is malformed: {0}")]
    InvalidFeed(String),
}
