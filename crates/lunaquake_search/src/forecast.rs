//! End-to-end window forecast from an explicit reference instant.

use lunaquake_oracle::LunarOracle;
use lunaquake_time::Instant;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SearchError;
use crate::perigee::PerigeeConfig;
use crate::syzygy::{find_syzygies_with, validate_days_forward};
use crate::syzygy_types::{ALL_SYZYGY_KINDS, Syzygy, SyzygyConfig};
use crate::window::build_windows_with;
use crate::window_types::WindowSet;

/// Parameters for [`forecast`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Days scanned forward from the reference instant (default 60).
    pub days_forward: f64,
    /// Maximum syzygies collected per kind (default 2).
    pub per_kind: usize,
    /// Maximum windows built (default 4).
    pub max_windows: usize,
    /// Perigee scan around each syzygy.
    pub perigee: PerigeeConfig,
    /// Coarse scan and refinement schedule. Not read from configuration files.
    #[serde(skip)]
    pub syzygy: SyzygyConfig,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            days_forward: 60.0,
            per_kind: 2,
            max_windows: 4,
            perigee: PerigeeConfig::default(),
            syzygy: SyzygyConfig::default(),
        }
    }
}

impl ForecastConfig {
    /// Validate the configuration.
    pub(crate) fn validate(&self) -> Result<(), &'static str> {
        validate_days_forward(self.days_forward)?;
        self.perigee.validate()?;
        self.syzygy.validate()
    }
}

/// Collect new and full moons after `now` and build the ranked window set.
///
/// `now` is the only notion of current time; the result depends on nothing
/// else but the oracle.
pub fn forecast<O>(
    oracle: &O,
    now: Instant,
    config: &ForecastConfig,
) -> Result<WindowSet, SearchError>
where
    O: LunarOracle + ?Sized,
{
    config.validate().map_err(SearchError::InvalidConfig)?;

    let mut syzygies: Vec<Syzygy> = Vec::new();
    for kind in ALL_SYZYGY_KINDS {
        let found = find_syzygies_with(
            oracle,
            now,
            config.days_forward,
            kind.target_phase(),
            config.per_kind,
            &config.syzygy,
        )?;
        syzygies.extend(found.into_iter().map(|t| Syzygy::new(kind, t)));
    }
    debug!(%now, syzygies = syzygies.len(), "forecast syzygies collected");

    build_windows_with(oracle, &syzygies, config.max_windows, &config.perigee)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syzygy_types::SyzygyKind;
    use lunaquake_oracle::FnOracle;

    const SYNODIC_DAYS: f64 = 29.530588;

    fn at(s: &str) -> Instant {
        s.parse().unwrap()
    }

    #[test]
    fn defaults() {
        let c = ForecastConfig::default();
        assert!((c.days_forward - 60.0).abs() < 1e-12);
        assert_eq!(c.per_kind, 2);
        assert_eq!(c.max_windows, 4);
        assert!(!c.perigee.refine);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn partial_toml_style_config_fills_defaults() {
        let c: ForecastConfig =
            serde_json::from_str(r#"{"per_kind": 1, "perigee": {"refine": true}}"#).unwrap();
        assert_eq!(c.per_kind, 1);
        assert_eq!(c.max_windows, 4);
        assert!(c.perigee.refine);
        assert!((c.perigee.step_hours - 2.0).abs() < 1e-12);
    }

    #[test]
    fn interleaves_kinds_chronologically() {
        let epoch = at("2024-01-11T11:57:00Z");
        let perigee = at("2024-01-13T10:00:00Z");
        let oracle = FnOracle::new(
            move |t: Instant| Ok((t.days_since(epoch) / SYNODIC_DAYS).rem_euclid(1.0)),
            move |t: Instant| Ok(360_000.0 + t.days_since(perigee).abs() * 1_000.0),
        );
        let set = forecast(&oracle, at("2024-01-01"), &ForecastConfig::default()).unwrap();
        assert_eq!(set.len(), 4);
        let kinds: Vec<_> = set.iter().map(|w| w.syzygy().kind).collect();
        assert_eq!(
            kinds,
            [
                SyzygyKind::NewMoon,
                SyzygyKind::FullMoon,
                SyzygyKind::NewMoon,
                SyzygyKind::FullMoon
            ]
        );
        assert_eq!(set.primary_index(), Some(0));
    }

    #[test]
    fn syzygy_just_before_now_keeps_its_window() {
        let epoch = at("2024-01-11T11:57:00Z");
        let full = epoch.add_days(SYNODIC_DAYS / 2.0);
        let oracle = FnOracle::new(
            move |t: Instant| Ok((t.days_since(epoch) / SYNODIC_DAYS).rem_euclid(1.0)),
            |_| Ok(380_000.0),
        );
        let now = full.add_hours(2.0);
        let set = forecast(&oracle, now, &ForecastConfig::default()).unwrap();
        let w = set.window_containing(now).expect("window around the recent full moon");
        assert_eq!(w.syzygy().kind, SyzygyKind::FullMoon);
        assert!(w.syzygy().instant < now);
        assert!(w.syzygy().instant.hours_since(full).abs() < 1.0);
    }

    #[test]
    fn rejects_oversized_horizon() {
        let oracle = FnOracle::new(|_| Ok(0.3), |_| Ok(380_000.0));
        let config = ForecastConfig {
            days_forward: 1e12,
            ..ForecastConfig::default()
        };
        assert!(matches!(
            forecast(&oracle, at("2024-01-01"), &config),
            Err(SearchError::InvalidConfig(_))
        ));
    }

    #[test]
    fn rejects_invalid_config() {
        let oracle = FnOracle::new(|_| Ok(0.5), |_| Ok(380_000.0));
        let config = ForecastConfig {
            days_forward: -1.0,
            ..ForecastConfig::default()
        };
        assert!(matches!(
            forecast(&oracle, at("2024-01-01"), &config),
            Err(SearchError::InvalidConfig(_))
        ));
    }
}
