//! Text and JSON rendering of command results.

use lunaquake_events::{CorrelatedEvents, EventFeed, SeismicEvent, WindowReport};
use lunaquake_search::{PerigeeEstimate, Syzygy};
use lunaquake_time::Instant;
use serde::Serialize;

/// Conventional name for a synodic phase fraction.
pub fn phase_name(phase: f64) -> &'static str {
    const NAMES: [&str; 8] = [
        "New Moon",
        "Waxing Crescent",
        "First Quarter",
        "Waxing Gibbous",
        "Full Moon",
        "Waning Gibbous",
        "Last Quarter",
        "Waning Crescent",
    ];
    let idx = ((phase.rem_euclid(1.0) * 8.0 + 0.5).floor() as usize) % 8;
    NAMES[idx]
}

pub fn print_syzygy(label: &str, s: &Syzygy) {
    println!("{label}: {} at {}", s.kind, s.instant);
}

pub fn print_perigee(center: Instant, p: &PerigeeEstimate) {
    println!("Perigee near {center}: {}", p.instant);
    println!(
        "  Distance: {:.0} km  ({:+.2} days from centre)",
        p.distance_km,
        p.instant.days_since(center)
    );
}

fn event_line(e: &SeismicEvent) -> String {
    let mag = e
        .magnitude
        .map_or_else(|| "M?".to_string(), |m| format!("M{m:.1}"));
    let when = e.instant.map_or_else(|| "unknown time".to_string(), |t| t.to_string());
    let place = e.place.as_deref().unwrap_or("unknown location");
    format!("{mag:<5} {when}  {place}")
}

pub fn print_reports(now: Instant, feed: &EventFeed, reports: &[WindowReport]) {
    println!("Reference: {now}");
    if reports.is_empty() {
        println!("No window available: no syzygy found in the scan range");
        return;
    }
    if let EventFeed::Unavailable { reason } = feed {
        println!("Events: unavailable ({reason})");
    }

    for (i, r) in reports.iter().enumerate() {
        let w = &r.window;
        let flag = if r.is_primary { " [primary]" } else { "" };
        println!();
        println!("Window {}{flag}: {} at {}", i + 1, w.syzygy().kind, w.syzygy().instant);
        println!("  Range:   {} .. {}", w.window_start(), w.window_end());
        println!(
            "  Perigee: {} ({:.0} km), {:.2} days from syzygy",
            w.perigee_instant(),
            w.perigee_distance_km(),
            w.perigee_delta_days()
        );
        match &r.events {
            CorrelatedEvents::Matched(events) if events.is_empty() => {
                println!("  Events:  none");
            }
            CorrelatedEvents::Matched(events) => {
                println!("  Events:  {}", events.len());
                for e in events {
                    println!("    {}", event_line(e));
                }
            }
            CorrelatedEvents::Unavailable => println!("  Events:  unavailable"),
        }
    }
}

/// JSON document for the `windows` command.
#[derive(Debug, Serialize)]
pub struct WindowsDocument<'a> {
    pub reference: Instant,
    pub primary_index: Option<usize>,
    pub feed: FeedStatus<'a>,
    pub windows: &'a [WindowReport],
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FeedStatus<'a> {
    Available { events: usize },
    Unavailable { reason: &'a str },
}

impl<'a> FeedStatus<'a> {
    pub fn of(feed: &'a EventFeed) -> Self {
        match feed {
            EventFeed::Available { events } => Self::Available {
                events: events.len(),
            },
            EventFeed::Unavailable { reason } => Self::Unavailable { reason },
        }
    }
}
