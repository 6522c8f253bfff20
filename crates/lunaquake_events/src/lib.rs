//! Seismic event feeds and their correlation with lunar windows.
//!
//! This crate provides:
//! - `SeismicEvent` and USGS GeoJSON decoding
//! - The async `EventSource` trait with HTTP, file and static sources
//! - `EventFeed`, which turns a failed fetch into a degraded state
//! - Inclusive-range filtering and per-window correlation reports

pub mod correlate;
pub mod error;
pub mod event;
pub mod feed;
pub mod geojson;
pub mod source;

pub use correlate::{CorrelatedEvents, WindowReport, correlate, filter_in_range, filter_window};
pub use error::EventSourceError;
pub use event::{Coordinates, SeismicEvent};
pub use feed::EventFeed;
pub use geojson::parse_feed;
pub use source::{
    EventSource, GeoJsonFileSource, StaticEventSource, USGS_FDSN_URL, UsgsFeedConfig,
    UsgsFeedSource,
};
