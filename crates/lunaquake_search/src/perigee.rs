//! Perigee estimation around a centre instant.
//!
//! Brute-force grid over `[center − half_span, center + half_span]`. The
//! result is the best grid sample, so its precision is bounded by the step.
//! An optional refinement pass minimises distance around that sample.

use lunaquake_oracle::LunarOracle;
use lunaquake_time::Instant;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SearchError;
use crate::refine::{RefineConfig, refine_minimum};
use crate::search_util::distance_at;

/// Closest approach found near a centre instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerigeeEstimate {
    /// Instant of the smallest distance found.
    pub instant: Instant,
    /// Moon distance at that instant, kilometres.
    pub distance_km: f64,
}

/// Widest accepted half-span, days.
pub const MAX_HALF_SPAN_DAYS: f64 = 30.0;

/// Hard ceiling on grid samples per estimate.
pub const MAX_PERIGEE_SAMPLES: f64 = 10_000.0;

/// Configuration for [`estimate_perigee_with`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerigeeConfig {
    /// Half-width of the scan in days (default 7).
    pub half_span_days: f64,
    /// Grid step in hours (default 2).
    pub step_hours: f64,
    /// Refine the best grid sample instead of returning it as is (default false).
    pub refine: bool,
}

impl Default for PerigeeConfig {
    fn default() -> Self {
        Self {
            half_span_days: 7.0,
            step_hours: 2.0,
            refine: false,
        }
    }
}

impl PerigeeConfig {
    /// Default grid with the refinement pass enabled.
    pub fn refined() -> Self {
        Self {
            refine: true,
            ..Self::default()
        }
    }

    /// Number of grid samples, both ends included.
    pub fn sample_count(&self) -> u64 {
        (2.0 * self.half_span_days * 24.0 / self.step_hours).floor() as u64 + 1
    }

    /// Validate the configuration.
    pub(crate) fn validate(&self) -> Result<(), &'static str> {
        if !self.half_span_days.is_finite() || self.half_span_days <= 0.0 {
            return Err("half_span_days must be positive");
        }
        if self.half_span_days > MAX_HALF_SPAN_DAYS {
            return Err("half_span_days must be <= 30");
        }
        if !self.step_hours.is_finite() || self.step_hours <= 0.0 {
            return Err("step_hours must be positive");
        }
        if self.step_hours > 24.0 {
            return Err("step_hours must be <= 24");
        }
        if 2.0 * self.half_span_days * 24.0 / self.step_hours >= MAX_PERIGEE_SAMPLES {
            return Err("perigee grid exceeds the sample ceiling");
        }
        Ok(())
    }
}

/// Estimate the perigee nearest `center` with the default 2-hour grid.
pub fn estimate_perigee<O>(oracle: &O, center: Instant) -> Result<PerigeeEstimate, SearchError>
where
    O: LunarOracle + ?Sized,
{
    estimate_perigee_with(oracle, center, &PerigeeConfig::default())
}

/// Estimate the perigee nearest `center`. Ties keep the earliest sample.
pub fn estimate_perigee_with<O>(
    oracle: &O,
    center: Instant,
    config: &PerigeeConfig,
) -> Result<PerigeeEstimate, SearchError>
where
    O: LunarOracle + ?Sized,
{
    config.validate().map_err(SearchError::InvalidConfig)?;

    let first = center.add_days(-config.half_span_days);
    let mut best = PerigeeEstimate {
        instant: first,
        distance_km: distance_at(oracle, first)?,
    };

    for i in 1..config.sample_count() {
        let t = first.add_hours(i as f64 * config.step_hours);
        let d = distance_at(oracle, t)?;
        if d < best.distance_km {
            best = PerigeeEstimate {
                instant: t,
                distance_km: d,
            };
        }
    }

    if config.refine {
        let refine = RefineConfig::with_half_window(config.step_hours);
        let (instant, distance_km) =
            refine_minimum(best.instant, &refine, |t| distance_at(oracle, t))?;
        best = PerigeeEstimate {
            instant,
            distance_km,
        };
    }

    debug!(%center, perigee = %best.instant, distance_km = best.distance_km, "perigee estimate");
    Ok(best)
}
