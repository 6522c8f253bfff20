//! Types for syzygy (new/full moon) search.

use std::fmt::{Display, Formatter};

use lunaquake_time::Instant;
use serde::{Deserialize, Serialize};

use crate::refine::RefineConfig;

/// Which alignment of Earth, Moon and Sun.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyzygyKind {
    /// Moon between Earth and Sun (phase 0).
    NewMoon,
    /// Earth between Moon and Sun (phase 0.5).
    FullMoon,
}

/// Both kinds, new moon first.
pub const ALL_SYZYGY_KINDS: [SyzygyKind; 2] = [SyzygyKind::NewMoon, SyzygyKind::FullMoon];

impl SyzygyKind {
    /// Illumination value the finder aims for.
    pub const fn target_phase(self) -> f64 {
        match self {
            Self::NewMoon => 0.0,
            Self::FullMoon => 0.5,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::NewMoon => "New Moon",
            Self::FullMoon => "Full Moon",
        }
    }
}

impl Display for SyzygyKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A detected new or full moon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Syzygy {
    pub kind: SyzygyKind,
    pub instant: Instant,
}

impl Syzygy {
    pub fn new(kind: SyzygyKind, instant: Instant) -> Self {
        Self { kind, instant }
    }
}

/// Configuration for the coarse syzygy scan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SyzygyConfig {
    /// Coarse scan step in hours (default 1).
    pub step_hours: f64,
    /// Minimum spacing between accepted results in hours (default 6).
    pub dedup_hours: f64,
    /// Local refinement applied to each coarse minimum.
    pub refine: RefineConfig,
}

impl Default for SyzygyConfig {
    fn default() -> Self {
        Self {
            step_hours: 1.0,
            dedup_hours: 6.0,
            refine: RefineConfig::default(),
        }
    }
}

impl SyzygyConfig {
    /// Validate the configuration.
    pub(crate) fn validate(&self) -> Result<(), &'static str> {
        if !self.step_hours.is_finite() || self.step_hours <= 0.0 {
            return Err("step_hours must be positive");
        }
        if self.step_hours > 24.0 {
            return Err("step_hours must be <= 24");
        }
        if !self.dedup_hours.is_finite() || self.dedup_hours < 0.0 {
            return Err("dedup_hours must be non-negative");
        }
        // Half a synodic month; a wider gap would swallow real syzygies.
        if self.dedup_hours >= 354.0 {
            return Err("dedup_hours must be < 354");
        }
        self.refine.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_phases() {
        assert_eq!(SyzygyKind::NewMoon.target_phase(), 0.0);
        assert_eq!(SyzygyKind::FullMoon.target_phase(), 0.5);
    }

    #[test]
    fn defaults() {
        let c = SyzygyConfig::default();
        assert!((c.step_hours - 1.0).abs() < 1e-12);
        assert!((c.dedup_hours - 6.0).abs() < 1e-12);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn rejects_zero_step() {
        let c = SyzygyConfig {
            step_hours: 0.0,
            ..SyzygyConfig::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn rejects_coarse_step_and_wide_dedup() {
        let c = SyzygyConfig {
            step_hours: 48.0,
            ..SyzygyConfig::default()
        };
        assert!(c.validate().is_err());
        let c = SyzygyConfig {
            dedup_hours: 400.0,
            ..SyzygyConfig::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn rejects_bad_refine() {
        let mut c = SyzygyConfig::default();
        c.refine.max_rounds = 0;
        assert!(c.validate().is_err());
    }

    #[test]
    fn kind_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&SyzygyKind::FullMoon).unwrap(),
            "\"full_moon\""
        );
    }
}
