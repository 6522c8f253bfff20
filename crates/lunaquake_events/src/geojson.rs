//! USGS GeoJSON feed decoding.
//!
//! Covers both the summary feeds (`/earthquakes/feed/v1.0/summary/*.geojson`)
//! and FDSN event queries with `format=geojson`. Only the fields the
//! correlator needs are read; everything else in `properties` is ignored.

use lunaquake_time::Instant;
use serde::Deserialize;
use tracing::debug;

use crate::error::EventSourceError;
use crate::event::{Coordinates, SeismicEvent};

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    id: Option<String>,
    properties: Properties,
    geometry: Option<Geometry>,
}

#[derive(Debug, Deserialize)]
struct Properties {
    mag: Option<f64>,
    place: Option<String>,
    /// Milliseconds since the Unix epoch.
    time: Option<i64>,
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    coordinates: Vec<Option<f64>>,
}

/// Decode a USGS GeoJSON `FeatureCollection` into events, in feed order.
///
/// Features without a usable point geometry are skipped.
pub fn parse_feed(body: &str) -> Result<Vec<SeismicEvent>, EventSourceError> {
    let collection: FeatureCollection = serde_json::from_str(body)?;
    if collection.kind != "FeatureCollection" {
        return Err(EventSourceError::InvalidFeed(format!(
            "expected FeatureCollection, got {}",
            collection.kind
        )));
    }

    let total = collection.features.len();
    let events: Vec<SeismicEvent> = collection
        .features
        .into_iter()
        .enumerate()
        .filter_map(|(i, f)| to_event(i, f))
        .collect();

    if events.len() < total {
        debug!(skipped = total - events.len(), "features without point geometry");
    }
    Ok(events)
}

fn to_event(index: usize, feature: Feature) -> Option<SeismicEvent> {
    let coords = feature.geometry?.coordinates;
    let longitude_deg = (*coords.first()?)?;
    let latitude_deg = (*coords.get(1)?)?;
    let depth_km = coords.get(2).copied().flatten();

    let props = feature.properties;
    Some(SeismicEvent {
        id: feature.id.unwrap_or_else(|| format!("feature-{index}")),
        magnitude: props.mag,
        place: props.place,
        instant: props.time.and_then(|ms| Instant::from_unix_millis(ms).ok()),
        source_url: props.url,
        coordinates: Coordinates {
            longitude_deg,
            latitude_deg,
            depth_km,
        },
    })
}
