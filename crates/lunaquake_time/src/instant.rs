//! UTC instant with millisecond resolution.
//!
//! Provides `Instant`, the canonical time representation used throughout
//! the search engine. Arithmetic saturates at the ends of chrono's range
//! instead of panicking.

use std::fmt::{Display, Formatter};
use std::ops::{Add, Sub};
use std::str::FromStr;

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TimeError;
use crate::julian::{MILLIS_PER_DAY, UNIX_EPOCH_JD};

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// A UTC point in time, truncated to whole milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "DateTime<Utc>", into = "DateTime<Utc>")]
pub struct Instant(DateTime<Utc>);

impl Instant {
    /// Wrap a chrono timestamp, dropping anything finer than a millisecond.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        let ms = dt.timestamp_millis();
        Self(DateTime::from_timestamp_millis(ms).unwrap_or(dt))
    }

    /// Build from UTC calendar fields.
    pub fn from_ymd_hms(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Result<Self, TimeError> {
        let naive = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_opt(hour, minute, second))
            .ok_or(TimeError::OutOfRange("invalid calendar date or time of day"))?;
        Ok(Self(naive.and_utc()))
    }

    /// Build from milliseconds since the Unix epoch.
    pub fn from_unix_millis(ms: i64) -> Result<Self, TimeError> {
        DateTime::from_timestamp_millis(ms)
            .map(Self)
            .ok_or(TimeError::OutOfRange("unix milliseconds outside supported range"))
    }

    /// Build from a Julian Date on the UTC axis.
    pub fn from_jd_utc(jd: f64) -> Result<Self, TimeError> {
        if !jd.is_finite() {
            return Err(TimeError::NonFinite);
        }
        let ms = ((jd - UNIX_EPOCH_JD) * MILLIS_PER_DAY).round();
        if ms.abs() >= i64::MAX as f64 {
            return Err(TimeError::OutOfRange("julian date outside supported range"));
        }
        Self::from_unix_millis(ms as i64)
    }

    /// The current wall-clock time.
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    /// Underlying chrono timestamp.
    pub fn datetime(&self) -> DateTime<Utc> {
        self.0
    }

    /// Milliseconds since the Unix epoch.
    pub fn unix_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// Julian Date on the UTC axis.
    pub fn to_jd_utc(&self) -> f64 {
        UNIX_EPOCH_JD + self.unix_millis() as f64 / MILLIS_PER_DAY
    }

    /// Decimal year, using the mid-month convention of the ΔT fits.
    pub fn decimal_year(&self) -> f64 {
        self.0.year() as f64 + (self.0.month() as f64 - 0.5) / 12.0
    }

    /// Shift by a (possibly fractional) number of hours, rounded to the millisecond.
    pub fn add_hours(self, hours: f64) -> Self {
        self + millis_duration(hours * MILLIS_PER_HOUR)
    }

    /// Shift by a (possibly fractional) number of days, rounded to the millisecond.
    pub fn add_days(self, days: f64) -> Self {
        self + millis_duration(days * MILLIS_PER_DAY)
    }

    /// Signed days from `earlier` to `self`.
    pub fn days_since(&self, earlier: Instant) -> f64 {
        (self.unix_millis() - earlier.unix_millis()) as f64 / MILLIS_PER_DAY
    }

    /// Signed hours from `earlier` to `self`.
    pub fn hours_since(&self, earlier: Instant) -> f64 {
        (self.unix_millis() - earlier.unix_millis()) as f64 / MILLIS_PER_HOUR
    }
}

/// Convert a millisecond count to a `Duration`, clamping NaN to zero and
/// saturating at the representable range.
fn millis_duration(ms: f64) -> Duration {
    if ms.is_nan() {
        return Duration::zero();
    }
    let ms = ms.round().clamp(-(i64::MAX as f64), i64::MAX as f64) as i64;
    Duration::try_milliseconds(ms).unwrap_or(if ms < 0 {
        Duration::MIN
    } else {
        Duration::MAX
    })
}

impl From<DateTime<Utc>> for Instant {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::from_datetime(dt)
    }
}

impl From<Instant> for DateTime<Utc> {
    fn from(instant: Instant) -> Self {
        instant.0
    }
}

impl Add<Duration> for Instant {
    type Output = Instant;

    fn add(self, rhs: Duration) -> Instant {
        match self.0.checked_add_signed(rhs) {
            Some(dt) => Self::from_datetime(dt),
            None if rhs < Duration::zero() => Self(DateTime::<Utc>::MIN_UTC),
            None => Self::from_datetime(DateTime::<Utc>::MAX_UTC),
        }
    }
}

impl Sub<Duration> for Instant {
    type Output = Instant;

    fn sub(self, rhs: Duration) -> Instant {
        match self.0.checked_sub_signed(rhs) {
            Some(dt) => Self::from_datetime(dt),
            None if rhs < Duration::zero() => Self::from_datetime(DateTime::<Utc>::MAX_UTC),
            None => Self(DateTime::<Utc>::MIN_UTC),
        }
    }
}

impl Sub<Instant> for Instant {
    type Output = Duration;

    fn sub(self, rhs: Instant) -> Duration {
        self.0.signed_duration_since(rhs.0)
    }
}

impl Display for Instant {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.unix_millis().rem_euclid(1000) == 0 {
            write!(f, "{}", self.0.format("%Y-%m-%dT%H:%M:%SZ"))
        } else {
            write!(f, "{}", self.0.format("%Y-%m-%dT%H:%M:%S%.3fZ"))
        }
    }
}

impl FromStr for Instant {
    type Err = TimeError;

    /// Accepts RFC 3339 (`2024-01-25T17:54:00Z`, `...+02:00`), a naive
    /// `YYYY-MM-DDThh:mm:ss[.fff]` taken as UTC, or a bare `YYYY-MM-DD`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(Self::from_datetime(dt.with_timezone(&Utc)));
        }
        let naive = s.trim_end_matches('Z');
        if let Ok(ndt) = NaiveDateTime::parse_from_str(naive, "%Y-%m-%dT%H:%M:%S%.f") {
            return Ok(Self::from_datetime(ndt.and_utc()));
        }
        if let Ok(date) = NaiveDate::parse_from_str(naive, "%Y-%m-%d") {
            if let Some(ndt) = date.and_hms_opt(0, 0, 0) {
                return Ok(Self(ndt.and_utc()));
            }
        }
        Err(TimeError::Parse {
            input: s.to_string(),
        })
    }
}
