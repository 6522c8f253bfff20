//! Astronomical oracle capability.
//!
//! The search engine never computes lunar positions itself; it queries a
//! [`LunarOracle`] for two scalar functions of time:
//! - `illumination`: synodic phase fraction in [0, 1] (0 = new, 0.25 = first
//!   quarter, 0.5 = full, 0.75 = last quarter)
//! - `distance_km`: geocentric Earth–Moon distance
//!
//! Implementations must be pure functions of the instant. This crate ships
//! [`MeeusOracle`], an analytic model good to a few arc-minutes, and
//! [`FnOracle`] for closure-backed synthetic oracles.

use std::sync::Arc;

use lunaquake_time::Instant;

pub mod error;
pub mod meeus;
pub mod sample;

pub use error::OracleError;
pub use meeus::{MeeusOracle, MoonPosition, moon_position, sun_apparent_longitude_deg};
pub use sample::{DistanceSample, PhaseSample, distance_sample, phase_sample};

/// Source of lunar phase and distance at arbitrary instants.
pub trait LunarOracle: Send + Sync {
    /// Synodic phase fraction in [0, 1]: 0 = new moon, 0.5 = full moon.
    fn illumination(&self, at: Instant) -> Result<f64, OracleError>;

    /// Earth–Moon distance in kilometres.
    fn distance_km(&self, at: Instant) -> Result<f64, OracleError>;
}

impl<T: LunarOracle + ?Sized> LunarOracle for &T {
    fn illumination(&self, at: Instant) -> Result<f64, OracleError> {
        (**self).illumination(at)
    }

    fn distance_km(&self, at: Instant) -> Result<f64, OracleError> {
        (**self).distance_km(at)
    }
}

impl<T: LunarOracle + ?Sized> LunarOracle for Box<T> {
    fn illumination(&self, at: Instant) -> Result<f64, OracleError> {
        (**self).illumination(at)
    }

    fn distance_km(&self, at: Instant) -> Result<f64, OracleError> {
        (**self).distance_km(at)
    }
}

impl<T: LunarOracle + ?Sized> LunarOracle for Arc<T> {
    fn illumination(&self, at: Instant) -> Result<f64, OracleError> {
        (**self).illumination(at)
    }

    fn distance_km(&self, at: Instant) -> Result<f64, OracleError> {
        (**self).distance_km(at)
    }
}

/// Oracle backed by two closures. Mainly for synthetic test oracles.
pub struct FnOracle<P, D> {
    phase: P,
    distance: D,
}

impl<P, D> FnOracle<P, D>
where
    P: Fn(Instant) -> Result<f64, OracleError> + Send + Sync,
    D: Fn(Instant) -> Result<f64, OracleError> + Send + Sync,
{
    pub fn new(phase: P, distance: D) -> Self {
        Self { phase, distance }
    }
}

impl<P, D> LunarOracle for FnOracle<P, D>
where
    P: Fn(Instant) -> Result<f64, OracleError> + Send + Sync,
    D: Fn(Instant) -> Result<f64, OracleError> + Send + Sync,
{
    fn illumination(&self, at: Instant) -> Result<f64, OracleError> {
        (self.phase)(at)
    }

    fn distance_km(&self, at: Instant) -> Result<f64, OracleError> {
        (self.distance)(at)
    }
}

impl<P, D> std::fmt::Debug for FnOracle<P, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("FnOracle")
    }
}
