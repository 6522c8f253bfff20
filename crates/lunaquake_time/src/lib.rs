//! Time handling for the lunaquake search engine.
//!
//! This crate provides:
//! - `Instant`, a millisecond-resolution UTC timestamp with saturating arithmetic
//! - Calendar to Julian Date conversion
//! - A ΔT (TT − UT) estimate for feeding TT-based ephemerides

pub mod delta_t;
pub mod error;
pub mod instant;
pub mod julian;

pub use delta_t::delta_t_seconds;
pub use error::TimeError;
pub use instant::Instant;
pub use julian::{
    DAYS_PER_CENTURY, J2000_JD, MILLIS_PER_DAY, SECONDS_PER_DAY, UNIX_EPOCH_JD, calendar_to_jd,
    jd_to_centuries,
};

/// Julian Date on the TT axis for a UTC instant (UTC + ΔT).
pub fn jd_tt(instant: Instant) -> f64 {
    instant.to_jd_utc() + delta_t_seconds(instant.decimal_year()) / SECONDS_PER_DAY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tt_ahead_of_utc() {
        let i: Instant = "2024-01-01T00:00:00Z".parse().unwrap();
        let diff_s = (jd_tt(i) - i.to_jd_utc()) * SECONDS_PER_DAY;
        assert!(diff_s > 60.0 && diff_s < 80.0, "diff = {diff_s}");
    }
}
