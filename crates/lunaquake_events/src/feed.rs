//! Degraded-state wrapper around an event fetch.

use serde::Serialize;
use tracing::warn;

use crate::event::SeismicEvent;
use crate::source::EventSource;

/// Outcome of loading an event feed. A failed fetch is a state, not an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EventFeed {
    Available { events: Vec<SeismicEvent> },
    Unavailable { reason: String },
}

impl EventFeed {
    /// Fetch from `source`, turning any failure into [`EventFeed::Unavailable`].
    pub async fn load<S>(source: &S, window_days: u32) -> Self
    where
        S: EventSource + ?Sized,
    {
        match source.fetch_recent_events(window_days).await {
            Ok(events) => Self::Available { events },
            Err(e) => {
                warn!(error = %e, "seismic event source unavailable");
                Self::Unavailable {
                    reason: e.to_string(),
                }
            }
        }
    }

    pub fn events(&self) -> Option<&[SeismicEvent]> {
        match self {
            Self::Available { events } => Some(events),
            Self::Unavailable { .. } => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available { .. })
    }
}
