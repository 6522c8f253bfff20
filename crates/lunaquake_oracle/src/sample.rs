//! Validated oracle samples.
//!
//! Every value the search engine consumes passes through these helpers, so
//! a misbehaving oracle surfaces as an error at the instant it misbehaved
//! instead of as a silently wrong window.

use lunaquake_time::Instant;

use crate::{LunarOracle, OracleError};

/// Illumination (synodic phase fraction) at an instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseSample {
    pub instant: Instant,
    /// Phase fraction in [0, 1]: 0 = new, 0.5 = full.
    pub illumination: f64,
}

/// Earth–Moon distance at an instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceSample {
    pub instant: Instant,
    pub distance_km: f64,
}

/// Query and validate the illumination at `at`.
pub fn phase_sample<O>(oracle: &O, at: Instant) -> Result<PhaseSample, OracleError>
where
    O: LunarOracle + ?Sized,
{
    let illumination = oracle.illumination(at)?;
    if !illumination.is_finite() {
        return Err(OracleError::NonFinite {
            quantity: "illumination",
        });
    }
    if !(0.0..=1.0).contains(&illumination) {
        return Err(OracleError::OutOfRange {
            quantity: "illumination",
            value: illumination,
        });
    }
    Ok(PhaseSample {
        instant: at,
        illumination,
    })
}

/// Query and validate the distance at `at`.
pub fn distance_sample<O>(oracle: &O, at: Instant) -> Result<DistanceSample, OracleError>
where
    O: LunarOracle + ?Sized,
{
    let distance_km = oracle.distance_km(at)?;
    if !distance_km.is_finite() {
        return Err(OracleError::NonFinite {
            quantity: "distance_km",
        });
    }
    if distance_km <= 0.0 {
        return Err(OracleError::OutOfRange {
            quantity: "distance_km",
            value: distance_km,
        });
    }
    Ok(DistanceSample {
        instant: at,
        distance_km,
    })
}
