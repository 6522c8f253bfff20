//! Derivative-free local minimisation around a coarse seed.
//!
//! Each round samples evenly across `[best − w, best + w]`, adopts any
//! strictly lower score, then halves `w`. This is a shrinking-grid search,
//! not a root solver: it assumes the seed already sits near the true
//! extremum (the coarse scans guarantee that to within one step).
//!
//! A round that finds nothing better ends the search once `w` has dropped
//! to `settle_half_window_hours`. Wider rounds keep halving, since a miss at
//! a coarse spacing only means the optimum lies between two samples.

use lunaquake_oracle::LunarOracle;
use lunaquake_time::Instant;
use tracing::trace;

use crate::error::SearchError;
use crate::search_util::{phase_at, phase_distance, validate_target_phase};

const MAX_ROUNDS: u32 = 64;
const MAX_SAMPLES_PER_ROUND: u32 = 1024;

/// Parameters for [`refine_minimum`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RefineConfig {
    /// Half-width of the first round's sampling window, hours (default 12).
    pub initial_half_window_hours: f64,
    /// Maximum number of rounds (default 10).
    pub max_rounds: u32,
    /// Samples per round, including both window edges (default 9).
    pub samples_per_round: u32,
    /// Half-window at or below which a round without improvement ends the search (default 1 h).
    pub settle_half_window_hours: f64,
}

impl Default for RefineConfig {
    fn default() -> Self {
        Self {
            initial_half_window_hours: 12.0,
            max_rounds: 10,
            samples_per_round: 9,
            settle_half_window_hours: 1.0,
        }
    }
}

impl RefineConfig {
    /// Default schedule with a different starting half-window.
    pub fn with_half_window(hours: f64) -> Self {
        Self {
            initial_half_window_hours: hours,
            ..Self::default()
        }
    }

    /// Upper bound on score evaluations, seed included.
    pub fn max_evaluations(&self) -> u32 {
        1 + self.max_rounds * self.samples_per_round
    }

    /// Validate the configuration.
    pub(crate) fn validate(&self) -> Result<(), &'static str> {
        if !self.initial_half_window_hours.is_finite() || self.initial_half_window_hours <= 0.0 {
            return Err("initial_half_window_hours must be positive");
        }
        if self.initial_half_window_hours > 24.0 * 30.0 {
            return Err("initial_half_window_hours must be <= 720");
        }
        if self.max_rounds == 0 || self.max_rounds > MAX_ROUNDS {
            return Err("max_rounds must be in 1..=64");
        }
        if !(2..=MAX_SAMPLES_PER_ROUND).contains(&self.samples_per_round) {
            return Err("samples_per_round must be in 2..=1024");
        }
        if !self.settle_half_window_hours.is_finite() || self.settle_half_window_hours < 0.0 {
            return Err("settle_half_window_hours must be non-negative");
        }
        Ok(())
    }
}

/// Minimise `score` near `seed`. Returns the best instant and its score.
pub fn refine_minimum<F>(
    seed: Instant,
    config: &RefineConfig,
    mut score: F,
) -> Result<(Instant, f64), SearchError>
where
    F: FnMut(Instant) -> Result<f64, SearchError>,
{
    config.validate().map_err(SearchError::InvalidConfig)?;

    let mut best = seed;
    let mut best_score = score(seed)?;
    let mut half = config.initial_half_window_hours;
    let last = f64::from(config.samples_per_round - 1);

    for round in 0..config.max_rounds {
        let center = best;
        let mut improved = false;

        for k in 0..config.samples_per_round {
            let offset = -half + 2.0 * half * f64::from(k) / last;
            let t = center.add_hours(offset);
            let s = score(t)?;
            if s < best_score {
                best = t;
                best_score = s;
                improved = true;
            }
        }

        trace!(round, half_window_hours = half, %best, best_score, improved, "refine round");

        if !improved && half <= config.settle_half_window_hours {
            break;
        }
        half *= 0.5;
    }

    Ok((best, best_score))
}

/// Refine a coarse syzygy seed toward the instant whose phase is closest to `target_phase`.
pub fn refine_phase<O>(
    oracle: &O,
    seed: Instant,
    target_phase: f64,
    config: &RefineConfig,
) -> Result<Instant, SearchError>
where
    O: LunarOracle + ?Sized,
{
    validate_target_phase(target_phase)?;
    let (best, _) = refine_minimum(seed, config, |t| {
        Ok(phase_distance(phase_at(oracle, t)?, target_phase))
    })?;
    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lunaquake_oracle::{FnOracle, OracleError};

    fn origin() -> Instant {
        "2024-01-01T00:00:00Z".parse().unwrap()
    }

    /// |t − target| in hours, a V-shaped score.
    fn v_score(target: Instant) -> impl FnMut(Instant) -> Result<f64, SearchError> {
        move |t| Ok(t.hours_since(target).abs())
    }

    #[test]
    fn defaults() {
        let c = RefineConfig::default();
        assert!((c.initial_half_window_hours - 12.0).abs() < 1e-12);
        assert_eq!(c.max_rounds, 10);
        assert_eq!(c.samples_per_round, 9);
        assert_eq!(c.max_evaluations(), 91);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn rejects_bad_config() {
        let mut c = RefineConfig::default();
        c.samples_per_round = 1;
        assert!(c.validate().is_err());
        let mut c = RefineConfig::default();
        c.max_rounds = 0;
        assert!(c.validate().is_err());
        let c = RefineConfig::with_half_window(0.0);
        assert!(c.validate().is_err());
        let mut c = RefineConfig::default();
        c.max_rounds = u32::MAX;
        assert!(c.validate().is_err());
        let mut c = RefineConfig::default();
        c.samples_per_round = 1_000_000;
        assert!(c.validate().is_err());
    }

    #[test]
    fn converges_from_far_seed() {
        let target = origin().add_hours(11.0);
        let (best, _) =
            refine_minimum(origin(), &RefineConfig::default(), v_score(target)).unwrap();
        assert!(best.hours_since(target).abs() < 0.25, "best = {best}");
    }

    #[test]
    fn converges_when_seed_between_coarse_samples() {
        // 1.4 h is missed by the first round's 3 h spacing.
        let target = origin().add_hours(1.4);
        let (best, _) =
            refine_minimum(origin(), &RefineConfig::default(), v_score(target)).unwrap();
        assert!(best.hours_since(target).abs() < 0.25, "best = {best}");
    }

    #[test]
    fn seed_at_minimum_stays() {
        let (best, score) =
            refine_minimum(origin(), &RefineConfig::default(), v_score(origin())).unwrap();
        assert_eq!(best, origin());
        assert_eq!(score, 0.0);
    }

    #[test]
    fn evaluation_budget_respected() {
        let mut calls = 0_u32;
        let target = origin().add_hours(5.3);
        let config = RefineConfig::default();
        refine_minimum(origin(), &config, |t| {
            calls += 1;
            Ok(t.hours_since(target).abs())
        })
        .unwrap();
        assert!(calls <= config.max_evaluations(), "calls = {calls}");
    }

    #[test]
    fn score_error_propagates() {
        let result = refine_minimum(origin(), &RefineConfig::default(), |_| {
            Err(SearchError::InvalidConfig("boom"))
        });
        assert_eq!(result, Err(SearchError::InvalidConfig("boom")));
    }

    #[test]
    fn phase_refine_rejects_bad_target() {
        let oracle = FnOracle::new(|_| Ok(0.5), |_| Ok(1.0));
        assert!(matches!(
            refine_phase(&oracle, origin(), 1.5, &RefineConfig::default()),
            Err(SearchError::InvalidConfig(_))
        ));
    }

    #[test]
    fn phase_refine_reports_oracle_failure() {
        let oracle = FnOracle::new(|_| Err(OracleError::Failed("down".into())), |_| Ok(1.0));
        let err = refine_phase(&oracle, origin(), 0.5, &RefineConfig::default()).unwrap_err();
        assert!(matches!(err, SearchError::OracleUnavailable { at, .. } if at == origin()));
    }
}
