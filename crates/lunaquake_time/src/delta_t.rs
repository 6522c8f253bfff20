//! ΔT = TT − UT estimate.
//!
//! Polynomial fits from Espenak & Meeus (NASA Five Millennium Canon of
//! Solar Eclipses, 2006), 1900 onwards; the long-term parabola outside
//! that range. Good to a few seconds over 1950–2050, which is far below
//! the resolution of the syzygy search.

/// ΔT in seconds for a decimal year (e.g. 2024.5).
pub fn delta_t_seconds(year: f64) -> f64 {
    if !year.is_finite() {
        return 0.0;
    }
    match year {
        y if y < 1900.0 => long_term(y),
        y if y < 1920.0 => {
            let t = y - 1900.0;
            -2.79 + 1.494119 * t - 0.0598939 * t.powi(2) + 0.0061966 * t.powi(3)
                - 0.000197 * t.powi(4)
        }
        y if y < 1941.0 => {
            let t = y - 1920.0;
            21.20 + 0.84493 * t - 0.076100 * t.powi(2) + 0.0020936 * t.powi(3)
        }
        y if y < 1961.0 => {
            let t = y - 1950.0;
            29.07 + 0.407 * t - t.powi(2) / 233.0 + t.powi(3) / 2547.0
        }
        y if y < 1986.0 => {
            let t = y - 1975.0;
            45.45 + 1.067 * t - t.powi(2) / 260.0 - t.powi(3) / 718.0
        }
        y if y < 2005.0 => {
            let t = y - 2000.0;
            63.86 + 0.3345 * t - 0.060374 * t.powi(2)
                + 0.0017275 * t.powi(3)
                + 0.000651814 * t.powi(4)
                + 0.00002373599 * t.powi(5)
        }
        y if y < 2050.0 => {
            let t = y - 2000.0;
            62.92 + 0.32217 * t + 0.005589 * t.powi(2)
        }
        y if y < 2150.0 => long_term(y) - 0.5628 * (2150.0 - y),
        y => long_term(y),
    }
}

fn long_term(year: f64) -> f64 {
    let u = (year - 1820.0) / 100.0;
    -20.0 + 32.0 * u * u
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_2000() {
        let dt = delta_t_seconds(2000.0);
        assert!((dt - 63.86).abs() < 0.01, "dt = {dt}");
    }

    #[test]
    fn year_2024_about_a_minute() {
        let dt = delta_t_seconds(2024.0);
        assert!((60.0..80.0).contains(&dt), "dt = {dt}");
    }

    #[test]
    fn continuous_at_2005() {
        let before = delta_t_seconds(2004.9999);
        let after = delta_t_seconds(2005.0);
        assert!((before - after).abs() < 1.0);
    }

    #[test]
    fn continuous_at_2150() {
        let before = delta_t_seconds(2149.9999);
        let after = delta_t_seconds(2150.0);
        assert!((before - after).abs() < 0.01);
    }

    #[test]
    fn non_finite_is_zero() {
        assert_eq!(delta_t_seconds(f64::NAN), 0.0);
    }
}
