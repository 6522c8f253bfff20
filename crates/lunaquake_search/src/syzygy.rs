//! Syzygy (new/full moon) search engine.
//!
//! Steps forward at a fixed interval measuring how far the oracle's phase is
//! from a target on the unit cycle. When that distance rises, the previous
//! sample is a candidate and is handed to the phase refiner. Refined results
//! too close to the last accepted one are discarded.
//!
//! Inside the scan a candidate always follows a falling stretch, so it
//! brackets a minimum. The start sample has no history: a rise on the first
//! step means the minimum lies behind `start` or just after it, or that the
//! scan began on a rising slope far from any minimum. Its refined instant is
//! kept only if one coarse step either side scores worse.

use lunaquake_oracle::LunarOracle;
use lunaquake_time::Instant;
use tracing::{debug, trace};

use crate::error::SearchError;
use crate::refine::refine_phase;
use crate::search_util::{phase_at, phase_distance, validate_target_phase};
use crate::syzygy_types::{Syzygy, SyzygyConfig, SyzygyKind};

/// Days scanned by [`next_syzygy`]; one synodic month plus margin.
const NEXT_SCAN_DAYS: f64 = 40.0;

/// Longest accepted scan, about ten years.
pub const MAX_DAYS_FORWARD: f64 = 3660.0;

/// Hard ceiling on coarse scan steps per call.
pub const MAX_SCAN_STEPS: f64 = 100_000.0;

/// Find up to `max_results` instants where the phase is closest to `target_phase`,
/// scanning `days_forward` days from `start` with the default configuration.
pub fn find_syzygies<O>(
    oracle: &O,
    start: Instant,
    days_forward: f64,
    target_phase: f64,
    max_results: usize,
) -> Result<Vec<Instant>, SearchError>
where
    O: LunarOracle + ?Sized,
{
    find_syzygies_with(
        oracle,
        start,
        days_forward,
        target_phase,
        max_results,
        &SyzygyConfig::default(),
    )
}

/// [`find_syzygies`] with an explicit scan configuration.
///
/// Results are strictly increasing. A refined instant may fall before
/// `start` or after `start + days_forward` by at most the refinement reach.
pub fn find_syzygies_with<O>(
    oracle: &O,
    start: Instant,
    days_forward: f64,
    target_phase: f64,
    max_results: usize,
    config: &SyzygyConfig,
) -> Result<Vec<Instant>, SearchError>
where
    O: LunarOracle + ?Sized,
{
    config.validate().map_err(SearchError::InvalidConfig)?;
    validate_target_phase(target_phase)?;
    validate_days_forward(days_forward).map_err(SearchError::InvalidConfig)?;
    let step = config.step_hours;
    let steps = (days_forward * 24.0 / step).floor();
    if steps > MAX_SCAN_STEPS {
        return Err(SearchError::InvalidConfig("scan exceeds the step ceiling"));
    }
    if max_results == 0 {
        return Ok(Vec::new());
    }

    let steps = steps as u64;
    let mut found: Vec<Instant> = Vec::with_capacity(max_results.min(64));

    let mut t_prev = start;
    let mut d_prev = phase_distance(phase_at(oracle, start)?, target_phase);
    let mut falling = false;

    for i in 1..=steps {
        let t_curr = start.add_hours(i as f64 * step);
        let d_curr = phase_distance(phase_at(oracle, t_curr)?, target_phase);

        let mut candidate = None;
        if d_curr > d_prev {
            if falling {
                candidate = Some(refine_phase(oracle, t_prev, target_phase, &config.refine)?);
            } else if i == 1 {
                let refined = refine_phase(oracle, t_prev, target_phase, &config.refine)?;
                if is_bracketed_minimum(oracle, refined, target_phase, step)? {
                    candidate = Some(refined);
                } else {
                    trace!(%refined, "start sample is not near a minimum");
                }
            }
            falling = false;
        } else if d_curr < d_prev {
            falling = true;
        }

        if let Some(refined) = candidate {
            let accept = found
                .last()
                .is_none_or(|last| refined.hours_since(*last) > config.dedup_hours);
            if accept {
                debug!(seed = %t_prev, %refined, target_phase, "syzygy candidate accepted");
                found.push(refined);
                if found.len() >= max_results {
                    break;
                }
            } else {
                trace!(%refined, "syzygy candidate dropped as duplicate");
            }
        }

        t_prev = t_curr;
        d_prev = d_curr;
    }

    Ok(found)
}

pub(crate) fn validate_days_forward(days_forward: f64) -> Result<(), &'static str> {
    if !days_forward.is_finite() || days_forward <= 0.0 {
        return Err("days_forward must be positive");
    }
    if days_forward > MAX_DAYS_FORWARD {
        return Err("days_forward must be <= 3660");
    }
    Ok(())
}

/// True when samples `step_hours` either side of `at` are both farther from the target.
fn is_bracketed_minimum<O>(
    oracle: &O,
    at: Instant,
    target_phase: f64,
    step_hours: f64,
) -> Result<bool, SearchError>
where
    O: LunarOracle + ?Sized,
{
    let d = phase_distance(phase_at(oracle, at)?, target_phase);
    let before = phase_distance(phase_at(oracle, at.add_hours(-step_hours))?, target_phase);
    let after = phase_distance(phase_at(oracle, at.add_hours(step_hours))?, target_phase);
    Ok(before > d && after > d)
}

/// Find the next syzygy of `kind` at or after `from`.
pub fn next_syzygy<O>(
    oracle: &O,
    from: Instant,
    kind: SyzygyKind,
) -> Result<Option<Syzygy>, SearchError>
where
    O: LunarOracle + ?Sized,
{
    let hits = find_syzygies(oracle, from, NEXT_SCAN_DAYS, kind.target_phase(), 3)?;
    Ok(hits
        .into_iter()
        .find(|t| *t >= from)
        .map(|t| Syzygy::new(kind, t)))
}

/// Find the next full moon at or after `from`.
pub fn next_full_moon<O>(oracle: &O, from: Instant) -> Result<Option<Syzygy>, SearchError>
where
    O: LunarOracle + ?Sized,
{
    next_syzygy(oracle, from, SyzygyKind::FullMoon)
}

/// Find the next new moon at or after `from`.
pub fn next_new_moon<O>(oracle: &O, from: Instant) -> Result<Option<Syzygy>, SearchError>
where
    O: LunarOracle + ?Sized,
{
    next_syzygy(oracle, from, SyzygyKind::NewMoon)
}

/// Search for all syzygies of `kind` in `[start, end]`.
pub fn search_syzygies<O>(
    oracle: &O,
    start: Instant,
    end: Instant,
    kind: SyzygyKind,
) -> Result<Vec<Syzygy>, SearchError>
where
    O: LunarOracle + ?Sized,
{
    if end <= start {
        return Err(SearchError::InvalidConfig("end must be after start"));
    }
    let days = end.days_since(start);
    let hits = find_syzygies(oracle, start, days, kind.target_phase(), usize::MAX)?;
    Ok(hits
        .into_iter()
        .filter(|t| *t >= start && *t <= end)
        .map(|t| Syzygy::new(kind, t))
        .collect())
}
