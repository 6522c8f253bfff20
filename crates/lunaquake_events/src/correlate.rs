//! Event correlation: which events fall inside which window.

use lunaquake_search::{SeismicWindow, WindowSet};
use lunaquake_time::Instant;
use serde::Serialize;

use crate::event::SeismicEvent;
use crate::feed::EventFeed;

/// Events with an origin time in `[start, end]`, in their supplied order.
pub fn filter_in_range(
    events: &[SeismicEvent],
    start: Instant,
    end: Instant,
) -> Vec<&SeismicEvent> {
    events
        .iter()
        .filter(|e| e.occurred_within(start, end))
        .collect()
}

/// [`filter_in_range`] over a window's bounds.
pub fn filter_window<'a>(
    events: &'a [SeismicEvent],
    window: &SeismicWindow,
) -> Vec<&'a SeismicEvent> {
    filter_in_range(events, window.window_start(), window.window_end())
}

/// Per-window event list, or the marker that no feed was available.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "events", rename_all = "snake_case")]
pub enum CorrelatedEvents {
    Matched(Vec<SeismicEvent>),
    Unavailable,
}

impl CorrelatedEvents {
    pub fn matched(&self) -> Option<&[SeismicEvent]> {
        match self {
            Self::Matched(events) => Some(events),
            Self::Unavailable => None,
        }
    }
}

/// A window with its primary flag and correlated events.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowReport {
    pub window: SeismicWindow,
    pub is_primary: bool,
    pub events: CorrelatedEvents,
}

/// Merge a window set with an event feed, one report per window in set order.
pub fn correlate(windows: &WindowSet, feed: &EventFeed) -> Vec<WindowReport> {
    let primary = windows.primary_index();
    windows
        .iter()
        .enumerate()
        .map(|(i, w)| WindowReport {
            window: *w,
            is_primary: primary == Some(i),
            events: match feed.events() {
                Some(events) => CorrelatedEvents::Matched(
                    filter_window(events, w).into_iter().cloned().collect(),
                ),
                None => CorrelatedEvents::Unavailable,
            },
        })
        .collect()
}
