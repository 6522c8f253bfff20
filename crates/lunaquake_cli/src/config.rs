//! TOML configuration for the `windows` command.
//!
//! ```toml
//! [forecast]
//! days_forward = 60
//! per_kind = 2
//! max_windows = 4
//!
//! [perigee]
//! half_span_days = 7
//! step_hours = 2
//! refine = false
//!
//! [feed]
//! url = "https://earthquake.usgs.gov/fdsnws/event/1/query"
//! days = 30
//! min_magnitude = 4.5
//! timeout_secs = 20
//! ```
//!
//! Every key is optional. Command-line flags override file values.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use lunaquake_events::UsgsFeedConfig;
use lunaquake_search::{ForecastConfig, PerigeeConfig};
use serde::Deserialize;

/// Whole configuration file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub forecast: ForecastSection,
    pub perigee: PerigeeConfig,
    pub feed: FeedSection,
}

/// `[forecast]` section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ForecastSection {
    pub days_forward: f64,
    pub per_kind: usize,
    pub max_windows: usize,
}

impl Default for ForecastSection {
    fn default() -> Self {
        let d = ForecastConfig::default();
        Self {
            days_forward: d.days_forward,
            per_kind: d.per_kind,
            max_windows: d.max_windows,
        }
    }
}

/// `[feed]` section. Without `url` or `file` no feed is loaded.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FeedSection {
    pub url: Option<String>,
    pub file: Option<PathBuf>,
    pub days: u32,
    pub min_magnitude: Option<f64>,
    pub timeout_secs: u64,
}

impl Default for FeedSection {
    fn default() -> Self {
        let usgs = UsgsFeedConfig::default();
        Self {
            url: None,
            file: None,
            days: 30,
            min_magnitude: usgs.min_magnitude,
            timeout_secs: usgs.timeout_secs,
        }
    }
}

impl FeedSection {
    /// HTTP settings for a configured URL.
    pub fn usgs_config(&self, url: String) -> UsgsFeedConfig {
        UsgsFeedConfig {
            url,
            min_magnitude: self.min_magnitude,
            timeout_secs: self.timeout_secs,
        }
    }
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    /// Search pipeline settings from the `[forecast]` and `[perigee]` sections.
    pub fn forecast_config(&self) -> ForecastConfig {
        ForecastConfig {
            days_forward: self.forecast.days_forward,
            per_kind: self.forecast.per_kind,
            max_windows: self.forecast.max_windows,
            perigee: self.perigee,
            ..ForecastConfig::default()
        }
    }
}
