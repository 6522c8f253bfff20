//! Shared helpers: validated oracle probes and the phase distance metric.

use lunaquake_oracle::{LunarOracle, distance_sample, phase_sample};
use lunaquake_time::Instant;

use crate::error::SearchError;

/// Illumination at `at`, validated, with failures tagged by instant.
pub(crate) fn phase_at<O>(oracle: &O, at: Instant) -> Result<f64, SearchError>
where
    O: LunarOracle + ?Sized,
{
    phase_sample(oracle, at)
        .map(|s| s.illumination)
        .map_err(|source| SearchError::OracleUnavailable { at, source })
}

/// Distance at `at`, validated, with failures tagged by instant.
pub(crate) fn distance_at<O>(oracle: &O, at: Instant) -> Result<f64, SearchError>
where
    O: LunarOracle + ?Sized,
{
    distance_sample(oracle, at)
        .map(|s| s.distance_km)
        .map_err(|source| SearchError::OracleUnavailable { at, source })
}

/// Distance between a phase and a target on the unit cycle, in [0, 0.5].
///
/// Phase wraps from 1 back to 0 at new moon, so a target of 0.0 must see
/// 0.98 and 0.02 as equally close.
pub fn phase_distance(phase: f64, target: f64) -> f64 {
    let d = (phase - target).abs().rem_euclid(1.0);
    d.min(1.0 - d)
}

/// Check a target phase is a valid point on the cycle.
pub(crate) fn validate_target_phase(target: f64) -> Result<(), SearchError> {
    if !target.is_finite() || !(0.0..=1.0).contains(&target) {
        return Err(SearchError::InvalidConfig("target_phase must be in [0, 1]"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_full_target_matches_abs() {
        assert!((phase_distance(0.48, 0.5) - 0.02).abs() < 1e-12);
        assert!((phase_distance(0.0, 0.5) - 0.5).abs() < 1e-12);
        assert!((phase_distance(1.0, 0.5) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn distance_wraps_for_new_moon() {
        assert!((phase_distance(0.98, 0.0) - 0.02).abs() < 1e-12);
        assert!((phase_distance(0.02, 0.0) - 0.02).abs() < 1e-12);
        assert!((phase_distance(0.02, 1.0) - 0.02).abs() < 1e-12);
    }

    #[test]
    fn distance_bounded() {
        for i in 0..=100 {
            let p = i as f64 / 100.0;
            let d = phase_distance(p, 0.3);
            assert!((0.0..=0.5).contains(&d), "p={p} d={d}");
        }
    }

    #[test]
    fn target_validation() {
        assert!(validate_target_phase(0.0).is_ok());
        assert!(validate_target_phase(1.0).is_ok());
        assert!(validate_target_phase(-0.1).is_err());
        assert!(validate_target_phase(f64::NAN).is_err());
    }
}
