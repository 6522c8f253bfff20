//! Lunar-timing search engine: syzygies, perigees and seismic windows.
//!
//! This crate provides:
//! - Syzygy (new/full moon) finder with a coarse hourly scan and local refinement
//! - Perigee estimation on a fixed grid around a centre instant
//! - Window building and primary-window ranking
//! - A forecast pipeline driven by an explicit reference instant
//!
//! Every operation is generic over [`lunaquake_oracle::LunarOracle`].

pub mod error;
pub mod forecast;
pub mod perigee;
pub mod refine;
pub(crate) mod search_util;
pub mod syzygy;
pub mod syzygy_types;
pub mod window;
pub mod window_types;

pub use error::SearchError;
pub use forecast::{ForecastConfig, forecast};
pub use perigee::{PerigeeConfig, PerigeeEstimate, estimate_perigee, estimate_perigee_with};
pub use refine::{RefineConfig, refine_minimum, refine_phase};
pub use search_util::phase_distance;
pub use syzygy::{
    find_syzygies, find_syzygies_with, next_full_moon, next_new_moon, next_syzygy,
    search_syzygies,
};
pub use syzygy_types::{ALL_SYZYGY_KINDS, Syzygy, SyzygyConfig, SyzygyKind};
pub use window::{build_windows, build_windows_with};
pub use window_types::{
    DAYS_AFTER_SYZYGY, DAYS_BEFORE_SYZYGY, SeismicWindow, WindowSet, rank_primary,
};
