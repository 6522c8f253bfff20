//! Seismic event sources.
//!
//! The correlator never fetches anything itself; it is handed whatever an
//! [`EventSource`] produced. Three sources ship here:
//! - [`UsgsFeedSource`]: USGS FDSN event service over HTTP
//! - [`GeoJsonFileSource`]: a saved GeoJSON feed on disk
//! - [`StaticEventSource`]: a fixed list, mainly for tests

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use lunaquake_time::Instant;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::EventSourceError;
use crate::event::SeismicEvent;
use crate::geojson::parse_feed;

/// USGS FDSN event query endpoint.
pub const USGS_FDSN_URL: &str = "https://earthquake.usgs.gov/fdsnws/event/1/query";

/// Asynchronous provider of recent seismic events.
#[async_trait]
pub trait EventSource: Send + Sync {
    /// Events from the last `window_days` days, in source order.
    async fn fetch_recent_events(
        &self,
        window_days: u32,
    ) -> Result<Vec<SeismicEvent>, EventSourceError>;
}

/// Keep events whose origin time lies in `[reference − window_days, reference]`.
fn retain_recent(events: &mut Vec<SeismicEvent>, reference: Instant, window_days: u32) {
    let start = reference.add_days(-f64::from(window_days));
    events.retain(|e| e.occurred_within(start, reference));
}

/// HTTP settings for [`UsgsFeedSource`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UsgsFeedConfig {
    pub url: String,
    pub min_magnitude: Option<f64>,
    pub timeout_secs: u64,
}

impl Default for UsgsFeedConfig {
    fn default() -> Self {
        Self {
            url: USGS_FDSN_URL.to_string(),
            min_magnitude: Some(4.5),
            timeout_secs: 20,
        }
    }
}

/// Events from the USGS FDSN event service, ending at a fixed reference instant.
#[derive(Debug, Clone)]
pub struct UsgsFeedSource {
    client: Client,
    config: UsgsFeedConfig,
    reference: Instant,
}

impl UsgsFeedSource {
    pub fn new(config: UsgsFeedConfig, reference: Instant) -> Result<Self, EventSourceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("lunaquake/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            config,
            reference,
        })
    }

    /// Query parameters for a `window_days` request.
    pub fn query_params(&self, window_days: u32) -> Vec<(&'static str, String)> {
        let start = self.reference.add_days(-f64::from(window_days));
        let mut params = vec![
            ("format", "geojson".to_string()),
            ("orderby", "time".to_string()),
            ("starttime", start.to_string()),
            ("endtime", self.reference.to_string()),
        ];
        if let Some(m) = self.config.min_magnitude {
            params.push(("minmagnitude", m.to_string()));
        }
        params
    }
}

#[async_trait]
impl EventSource for UsgsFeedSource {
    async fn fetch_recent_events(
        &self,
        window_days: u32,
    ) -> Result<Vec<SeismicEvent>, EventSourceError> {
        debug!(url = %self.config.url, window_days, "fetching USGS events");
        let response = self
            .client
            .get(&self.config.url)
            .query(&self.query_params(window_days))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(EventSourceError::Status(status.as_u16()));
        }
        let body = response.text().await?;
        let mut events = parse_feed(&body)?;
        retain_recent(&mut events, self.reference, window_days);
        debug!(count = events.len(), "USGS events decoded");
        Ok(events)
    }
}

/// A GeoJSON feed saved to disk, filtered relative to a reference instant.
#[derive(Debug, Clone)]
pub struct GeoJsonFileSource {
    path: PathBuf,
    reference: Instant,
}

impl GeoJsonFileSource {
    pub fn new(path: impl Into<PathBuf>, reference: Instant) -> Self {
        Self {
            path: path.into(),
            reference,
        }
    }
}

#[async_trait]
impl EventSource for GeoJsonFileSource {
    async fn fetch_recent_events(
        &self,
        window_days: u32,
    ) -> Result<Vec<SeismicEvent>, EventSourceError> {
        let body = tokio::fs::read_to_string(&self.path).await?;
        let mut events = parse_feed(&body)?;
        retain_recent(&mut events, self.reference, window_days);
        debug!(path = %self.path.display(), count = events.len(), "file events loaded");
        Ok(events)
    }
}

/// Fixed event list returned as is, whatever the window.
#[derive(Debug, Clone, Default)]
pub struct StaticEventSource {
    events: Vec<SeismicEvent>,
}

impl StaticEventSource {
    pub fn new(events: Vec<SeismicEvent>) -> Self {
        Self { events }
    }
}

#[async_trait]
impl EventSource for StaticEventSource {
    async fn fetch_recent_events(
        &self,
        _window_days: u32,
    ) -> Result<Vec<SeismicEvent>, EventSourceError> {
        Ok(self.events.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Coordinates;

    fn at(s: &str) -> Instant {
        s.parse().unwrap()
    }

    fn event(id: &str, instant: Option<Instant>) -> SeismicEvent {
        SeismicEvent {
            id: id.into(),
            magnitude: Some(4.8),
            place: None,
            instant,
            source_url: None,
            coordinates: Coordinates {
                longitude_deg: 0.0,
                latitude_deg: 0.0,
                depth_km: None,
            },
        }
    }

    #[test]
    fn recency_filter_is_inclusive() {
        let reference = at("2024-02-01T00:00:00Z");
        let mut events = vec![
            event("old", Some(at("2024-01-01T23:59:59Z"))),
            event("edge", Some(at("2024-01-02T00:00:00Z"))),
            event("now", Some(reference)),
            event("future", Some(at("2024-02-01T00:00:01Z"))),
            event("untimed", None),
        ];
        retain_recent(&mut events, reference, 30);
        let ids: Vec<_> = events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["edge", "now"]);
    }

    #[test]
    fn query_params_cover_window() {
        let source =
            UsgsFeedSource::new(UsgsFeedConfig::default(), at("2024-02-01T00:00:00Z")).unwrap();
        let params = source.query_params(30);
        assert!(params.contains(&("format", "geojson".to_string())));
        assert!(params.contains(&("starttime", "2024-01-02T00:00:00Z".to_string())));
        assert!(params.contains(&("endtime", "2024-02-01T00:00:00Z".to_string())));
        assert!(params.contains(&("minmagnitude", "4.5".to_string())));
    }

    #[test]
    fn query_params_without_magnitude_floor() {
        let config = UsgsFeedConfig {
            min_magnitude: None,
            ..UsgsFeedConfig::default()
        };
        let source = UsgsFeedSource::new(config, at("2024-02-01")).unwrap();
        assert!(source.query_params(7).iter().all(|(k, _)| *k != "minmagnitude"));
    }

    #[tokio::test]
    async fn static_source_ignores_window() {
        let source = StaticEventSource::new(vec![event("a", None), event("b", None)]);
        let events = source.fetch_recent_events(1).await.unwrap();
        assert_eq!(events.len(), 2);
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let source =
            GeoJsonFileSource::new("/nonexistent/lunaquake/feed.geojson", at("2024-02-01"));
        assert!(matches!(
            source.fetch_recent_events(30).await,
            Err(EventSourceError::Io(_))
        ));
    }
}
