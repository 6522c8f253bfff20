//! Window builder: pairs syzygies with their nearest perigee.

use lunaquake_oracle::LunarOracle;
use tracing::debug;

use crate::error::SearchError;
use crate::perigee::{PerigeeConfig, estimate_perigee_with};
use crate::syzygy_types::Syzygy;
use crate::window_types::{SeismicWindow, WindowSet};

/// Build windows for the first `max_windows` syzygies (chronologically).
pub fn build_windows<O>(
    oracle: &O,
    syzygies: &[Syzygy],
    max_windows: usize,
) -> Result<WindowSet, SearchError>
where
    O: LunarOracle + ?Sized,
{
    build_windows_with(oracle, syzygies, max_windows, &PerigeeConfig::default())
}

/// [`build_windows`] with an explicit perigee configuration.
///
/// Any oracle failure aborts the whole set.
pub fn build_windows_with<O>(
    oracle: &O,
    syzygies: &[Syzygy],
    max_windows: usize,
    perigee: &PerigeeConfig,
) -> Result<WindowSet, SearchError>
where
    O: LunarOracle + ?Sized,
{
    perigee.validate().map_err(SearchError::InvalidConfig)?;

    let mut ordered = syzygies.to_vec();
    ordered.sort_by_key(|s| s.instant);
    ordered.truncate(max_windows);

    let windows = ordered
        .into_iter()
        .map(|s| {
            let p = estimate_perigee_with(oracle, s.instant, perigee)?;
            Ok(SeismicWindow::new(s, p))
        })
        .collect::<Result<Vec<_>, SearchError>>()?;

    let set = WindowSet::new(windows);
    debug!(windows = set.len(), primary = ?set.primary_index(), "window set built");
    Ok(set)
}
