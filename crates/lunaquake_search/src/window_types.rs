//! Seismic window types.

use lunaquake_time::Instant;
use serde::Serialize;

use crate::error::SearchError;
use crate::perigee::PerigeeEstimate;
use crate::syzygy_types::Syzygy;

/// Days from window start to the syzygy.
pub const DAYS_BEFORE_SYZYGY: f64 = 3.0;
/// Days from the syzygy to window end.
pub const DAYS_AFTER_SYZYGY: f64 = 4.0;

/// A −3 d/+4 d interval around a syzygy, paired with its nearest perigee.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeismicWindow {
    syzygy: Syzygy,
    window_start: Instant,
    window_end: Instant,
    perigee_instant: Instant,
    perigee_distance_km: f64,
    perigee_delta_days: f64,
}

impl SeismicWindow {
    pub(crate) fn new(syzygy: Syzygy, perigee: PerigeeEstimate) -> Self {
        Self {
            syzygy,
            window_start: syzygy.instant.add_days(-DAYS_BEFORE_SYZYGY),
            window_end: syzygy.instant.add_days(DAYS_AFTER_SYZYGY),
            perigee_instant: perigee.instant,
            perigee_distance_km: perigee.distance_km,
            perigee_delta_days: syzygy.instant.days_since(perigee.instant).abs(),
        }
    }

    /// The syzygy the window is centred on.
    pub fn syzygy(&self) -> Syzygy {
        self.syzygy
    }

    /// Syzygy instant minus 3 days.
    pub fn window_start(&self) -> Instant {
        self.window_start
    }

    /// Syzygy instant plus 4 days.
    pub fn window_end(&self) -> Instant {
        self.window_end
    }

    /// Perigee estimated around the syzygy.
    pub fn perigee_instant(&self) -> Instant {
        self.perigee_instant
    }

    /// Moon distance at the perigee, kilometres.
    pub fn perigee_distance_km(&self) -> f64 {
        self.perigee_distance_km
    }

    /// Absolute days between syzygy and perigee.
    pub fn perigee_delta_days(&self) -> f64 {
        self.perigee_delta_days
    }

    /// Whether `t` lies in `[window_start, window_end]`.
    pub fn contains(&self, t: Instant) -> bool {
        t >= self.window_start && t <= self.window_end
    }
}

/// Index of the window whose perigee is closest to its syzygy.
///
/// Equal deltas keep the earlier index. `None` only for an empty slice.
pub fn rank_primary(windows: &[SeismicWindow]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, w) in windows.iter().enumerate() {
        match best {
            Some((_, d)) if w.perigee_delta_days >= d => {}
            _ => best = Some((i, w.perigee_delta_days)),
        }
    }
    best.map(|(i, _)| i)
}

/// Chronological windows plus the primary selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WindowSet {
    windows: Vec<SeismicWindow>,
    primary: Option<usize>,
}

impl WindowSet {
    /// Sort by syzygy instant (stable) and rank.
    pub fn new(mut windows: Vec<SeismicWindow>) -> Self {
        windows.sort_by_key(|w| w.syzygy.instant);
        let primary = rank_primary(&windows);
        Self { windows, primary }
    }

    pub fn windows(&self) -> &[SeismicWindow] {
        &self.windows
    }

    pub fn primary_index(&self) -> Option<usize> {
        self.primary
    }

    pub fn primary(&self) -> Option<&SeismicWindow> {
        self.primary.map(|i| &self.windows[i])
    }

    /// The primary window, or `NoSyzygyFound` when the set is empty.
    pub fn require_primary(&self) -> Result<&SeismicWindow, SearchError> {
        self.primary().ok_or(SearchError::NoSyzygyFound)
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SeismicWindow> {
        self.windows.iter()
    }

    /// First window containing `t`. Adjacent windows can overlap.
    pub fn window_containing(&self, t: Instant) -> Option<&SeismicWindow> {
        self.windows.iter().find(|w| w.contains(t))
    }
}

impl<'a> IntoIterator for &'a WindowSet {
    type Item = &'a SeismicWindow;
    type IntoIter = std::slice::Iter<'a, SeismicWindow>;

    fn into_iter(self) -> Self::IntoIter {
        self.windows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syzygy_types::SyzygyKind;

    fn at(s: &str) -> Instant {
        s.parse().unwrap()
    }

    fn window(syzygy: &str, delta_days: f64) -> SeismicWindow {
        let s = Syzygy::new(SyzygyKind::FullMoon, at(syzygy));
        SeismicWindow::new(
            s,
            PerigeeEstimate {
                instant: s.instant.add_days(delta_days),
                distance_km: 360_000.0,
            },
        )
    }

    #[test]
    fn bounds_follow_syzygy() {
        let w = window("2024-01-25T17:54:00Z", -1.5);
        assert_eq!(w.window_start(), at("2024-01-22T17:54:00Z"));
        assert_eq!(w.window_end(), at("2024-01-29T17:54:00Z"));
        assert!((w.window_end().days_since(w.window_start()) - 7.0).abs() < 1e-12);
        assert!((w.perigee_delta_days() - 1.5).abs() < 1e-9);
    }

    #[test]
    fn contains_is_inclusive() {
        let w = window("2024-01-25T00:00:00Z", 0.0);
        assert!(w.contains(w.window_start()));
        assert!(w.contains(w.window_end()));
        assert!(!w.contains(w.window_end().add_hours(1.0)));
    }

    #[test]
    fn rank_prefers_smallest_delta() {
        let ws = [window("2024-01-11", 1.2), window("2024-01-25", -0.4)];
        assert_eq!(rank_primary(&ws), Some(1));
    }

    #[test]
    fn rank_ties_keep_first() {
        let ws = [
            window("2024-01-11", 2.0),
            window("2024-01-25", 0.5),
            window("2024-02-09", -0.5),
        ];
        assert_eq!(rank_primary(&ws), Some(1));
    }

    #[test]
    fn rank_empty_and_single() {
        assert_eq!(rank_primary(&[]), None);
        assert_eq!(rank_primary(&[window("2024-01-11", 9.0)]), Some(0));
    }

    #[test]
    fn set_sorts_chronologically() {
        let set = WindowSet::new(vec![window("2024-02-09", 0.1), window("2024-01-25", 3.0)]);
        assert_eq!(set.len(), 2);
        assert!(set.windows()[0].syzygy().instant < set.windows()[1].syzygy().instant);
        assert_eq!(set.primary_index(), Some(1));
    }

    #[test]
    fn empty_set_has_no_primary() {
        let set = WindowSet::new(Vec::new());
        assert!(set.is_empty());
        assert_eq!(set.primary(), None);
        assert_eq!(set.require_primary(), Err(SearchError::NoSyzygyFound));
    }

    #[test]
    fn window_lookup() {
        let set = WindowSet::new(vec![window("2024-01-11", 0.0), window("2024-01-25", 0.0)]);
        let hit = set.window_containing(at("2024-01-27")).unwrap();
        assert_eq!(hit.syzygy().instant, at("2024-01-25"));
        assert!(set.window_containing(at("2024-01-20")).is_none());
    }
}
