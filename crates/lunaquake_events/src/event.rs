//! Seismic event data model.

use lunaquake_time::Instant;
use serde::{Deserialize, Serialize};

/// Epicentre location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub longitude_deg: f64,
    pub latitude_deg: f64,
    pub depth_km: Option<f64>,
}

/// One earthquake as reported by an event source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeismicEvent {
    pub id: String,
    pub magnitude: Option<f64>,
    pub place: Option<String>,
    /// Origin time. Events without one never match a window.
    pub instant: Option<Instant>,
    pub source_url: Option<String>,
    pub coordinates: Coordinates,
}

impl SeismicEvent {
    /// Whether the origin time lies in `[start, end]`.
    pub fn occurred_within(&self, start: Instant, end: Instant) -> bool {
        self.instant.is_some_and(|t| t >= start && t <= end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(instant: Option<Instant>) -> SeismicEvent {
        SeismicEvent {
            id: "us7000test".into(),
            magnitude: Some(5.1),
            place: None,
            instant,
            source_url: None,
            coordinates: Coordinates {
                longitude_deg: 142.3,
                latitude_deg: 38.1,
                depth_km: Some(10.0),
            },
        }
    }

    #[test]
    fn missing_instant_never_within() {
        let start: Instant = "2024-01-01".parse().unwrap();
        let end: Instant = "2024-12-31".parse().unwrap();
        assert!(!event(None).occurred_within(start, end));
        assert!(event(Some(start)).occurred_within(start, end));
    }
}
