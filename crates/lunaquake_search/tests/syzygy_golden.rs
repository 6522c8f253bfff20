//! Golden-value integration tests against the analytic oracle.
//!
//! Validates against NASA new/full moon dates and published perigee times.

use lunaquake_oracle::MeeusOracle;
use lunaquake_search::{
    ForecastConfig, SyzygyKind, estimate_perigee, find_syzygies, forecast, next_full_moon,
    next_new_moon, search_syzygies,
};
use lunaquake_time::Instant;

fn at(s: &str) -> Instant {
    s.parse().unwrap()
}

fn assert_near(got: Instant, expected: &str, hours: f64) {
    let diff = got.hours_since(at(expected)).abs();
    assert!(diff < hours, "off by {diff:.2}h, got {got}, expected {expected}");
}

/// NASA: Full Moon 2024-Jan-25 17:54 UTC
#[test]
fn full_moon_jan_2024() {
    let event = next_full_moon(&MeeusOracle::new(), at("2024-01-01T00:00:00Z"))
        .unwrap()
        .expect("should find full moon");
    assert_eq!(event.kind, SyzygyKind::FullMoon);
    assert_near(event.instant, "2024-01-25T17:54:00Z", 1.0);
}

/// NASA: New Moon 2024-Jan-11 11:57 UTC
#[test]
fn new_moon_jan_2024() {
    let event = next_new_moon(&MeeusOracle::new(), at("2024-01-01T00:00:00Z"))
        .unwrap()
        .expect("should find new moon");
    assert_near(event.instant, "2024-01-11T11:57:00Z", 1.0);
}

/// NASA: Full Moon 2024-Feb-24 12:30 UTC
#[test]
fn full_moon_feb_2024() {
    let event = next_full_moon(&MeeusOracle::new(), at("2024-02-01T00:00:00Z"))
        .unwrap()
        .expect("should find full moon");
    assert_near(event.instant, "2024-02-24T12:30:00Z", 1.0);
}

/// Two full moons in 60 days from 2024-01-01, about one synodic month apart.
#[test]
fn sixty_day_full_moon_scenario() {
    let found = find_syzygies(&MeeusOracle::new(), at("2024-01-01T00:00:00Z"), 60.0, 0.5, 2)
        .unwrap();
    assert_eq!(found.len(), 2);
    assert!(found[0] < found[1]);
    assert!(found[1].days_since(found[0]) >= 24.0);
    assert_near(found[0], "2024-01-25T17:54:00Z", 1.0);
    assert_near(found[1], "2024-02-24T12:30:00Z", 1.0);
}

/// 2024 has 12 full moons and 13 new moons.
#[test]
fn syzygy_counts_2024() {
    let oracle = MeeusOracle::new();
    let start = at("2024-01-01T00:00:00Z");
    let end = at("2024-12-31T23:59:59Z");
    let full = search_syzygies(&oracle, start, end, SyzygyKind::FullMoon).unwrap();
    let new = search_syzygies(&oracle, start, end, SyzygyKind::NewMoon).unwrap();
    assert_eq!(full.len(), 12, "full moons: {full:?}");
    assert_eq!(new.len(), 13, "new moons: {new:?}");
    assert_near(new[12].instant, "2024-12-30T22:27:00Z", 1.0);
}

/// Perigee 2024-Feb-10 ~18:52 UTC at ~358,088 km.
#[test]
fn perigee_feb_2024() {
    let p = estimate_perigee(&MeeusOracle::new(), at("2024-02-09T22:59:00Z")).unwrap();
    assert_near(p.instant, "2024-02-10T18:52:00Z", 4.0);
    assert!((p.distance_km - 358_088.0).abs() < 50.0, "distance {}", p.distance_km);
}

#[test]
fn forecast_jan_2024() {
    let set = forecast(&MeeusOracle::new(), at("2024-01-01T00:00:00Z"), &ForecastConfig::default())
        .unwrap();
    assert_eq!(set.len(), 4);
    // New moons of Jan/Feb 2024 sit within two days of perigee; full moons near apogee.
    let primary = set.require_primary().unwrap();
    assert_eq!(primary.syzygy().kind, SyzygyKind::NewMoon);
    assert!(primary.perigee_delta_days() < 2.0);
}
