//! Analytic lunar/solar model.
//!
//! Moon: geocentric ecliptic longitude and distance from the principal
//! periodic terms of Meeus, *Astronomical Algorithms* (2nd ed.), ch. 47,
//! Table 47.A, plus the A1/A2 additive longitude terms.
//!
//! Sun: apparent longitude from the low-precision series of ch. 25.
//!
//! Illumination is the elongation of the Moon from the Sun measured along
//! the ecliptic, as a fraction of a full cycle. Accuracy is a few
//! arc-minutes in longitude and a few km in distance, i.e. syzygy and
//! perigee times to within minutes.

use lunaquake_time::{Instant, jd_to_centuries, jd_tt};

use crate::{LunarOracle, OracleError};

/// Mean Earth–Moon distance term of the distance series, km.
const MEAN_DISTANCE_KM: f64 = 385_000.56;

/// Table 47.A: `[D, M, M', F, Σl coefficient (1e-6 deg), Σr coefficient (1e-3 km)]`.
#[rustfmt::skip]
static LONGITUDE_DISTANCE_TERMS: [[f64; 6]; 60] = [
    [0.0,  0.0,  1.0,  0.0,  6_288_774.0, -20_905_355.0],
    [2.0,  0.0, -1.0,  0.0,  1_274_027.0,  -3_699_111.0],
    [2.0,  0.0,  0.0,  0.0,    658_314.0,  -2_955_968.0],
    [0.0,  0.0,  2.0,  0.0,    213_618.0,    -569_925.0],
    [0.0,  1.0,  0.0,  0.0,   -185_116.0,      48_888.0],
    [0.0,  0.0,  0.0,  2.0,   -114_332.0,      -3_149.0],
    [2.0,  0.0, -2.0,  0.0,     58_793.0,     246_158.0],
    [2.0, -1.0, -1.0,  0.0,     57_066.0,    -152_138.0],
    [2.0,  0.0,  1.0,  0.0,     53_322.0,    -170_733.0],
    [2.0, -1.0,  0.0,  0.0,     45_758.0,    -204_586.0],
    [0.0,  1.0, -1.0,  0.0,    -40_923.0,    -129_620.0],
    [1.0,  0.0,  0.0,  0.0,    -34_720.0,     108_743.0],
    [0.0,  1.0,  1.0,  0.0,    -30_383.0,     104_755.0],
    [2.0,  0.0,  0.0, -2.0,     15_327.0,      10_321.0],
    [0.0,  0.0,  1.0,  2.0,    -12_528.0,           0.0],
    [0.0,  0.0,  1.0, -2.0,     10_980.0,      79_661.0],
    [4.0,  0.0, -1.0,  0.0,     10_675.0,     -34_782.0],
    [0.0,  0.0,  3.0,  0.0,     10_034.0,     -23_210.0],
    [4.0,  0.0, -2.0,  0.0,      8_548.0,     -21_636.0],
    [2.0,  1.0, -1.0,  0.0,     -7_888.0,      24_208.0],
    [2.0,  1.0,  0.0,  0.0,     -6_766.0,      30_824.0],
    [1.0,  0.0, -1.0,  0.0,     -5_163.0,      -8_379.0],
    [1.0,  1.0,  0.0,  0.0,      4_987.0,     -16_675.0],
    [2.0, -1.0,  1.0,  0.0,      4_036.0,     -12_831.0],
    [2.0,  0.0,  2.0,  0.0,      3_994.0,     -10_445.0],
    [4.0,  0.0,  0.0,  0.0,      3_861.0,     -11_650.0],
    [2.0,  0.0, -3.0,  0.0,      3_665.0,      14_403.0],
    [0.0,  1.0, -2.0,  0.0,     -2_689.0,      -7_003.0],
    [2.0,  0.0, -1.0,  2.0,     -2_602.0,           0.0],
    [2.0, -1.0, -2.0,  0.0,      2_390.0,      10_056.0],
    [1.0,  0.0,  1.0,  0.0,     -2_348.0,       6_322.0],
    [2.0, -2.0,  0.0,  0.0,      2_236.0,      -9_884.0],
    [0.0,  1.0,  2.0,  0.0,     -2_120.0,       5_751.0],
    [0.0,  2.0,  0.0,  0.0,     -2_069.0,           0.0],
    [2.0, -2.0, -1.0,  0.0,      2_048.0,      -4_950.0],
    [2.0,  0.0,  1.0, -2.0,     -1_773.0,       4_130.0],
    [2.0,  0.0,  0.0,  2.0,     -1_595.0,           0.0],
    [4.0, -1.0, -1.0,  0.0,      1_215.0,      -3_958.0],
    [0.0,  0.0,  2.0,  2.0,     -1_110.0,           0.0],
    [3.0,  0.0, -1.0,  0.0,       -892.0,       3_258.0],
    [2.0,  1.0,  1.0,  0.0,       -810.0,       2_616.0],
    [4.0, -1.0, -2.0,  0.0,        759.0,      -1_897.0],
    [0.0,  2.0, -1.0,  0.0,       -713.0,      -2_117.0],
    [2.0,  2.0, -1.0,  0.0,       -700.0,       2_354.0],
    [2.0,  1.0, -2.0,  0.0,        691.0,           0.0],
    [2.0, -1.0,  0.0, -2.0,        596.0,           0.0],
    [4.0,  0.0,  1.0,  0.0,        549.0,      -1_423.0],
    [0.0,  0.0,  4.0,  0.0,        537.0,      -1_117.0],
    [4.0, -1.0,  0.0,  0.0,        520.0,      -1_571.0],
    [1.0,  0.0, -2.0,  0.0,       -487.0,      -1_739.0],
    [2.0,  1.0,  0.0, -2.0,       -399.0,           0.0],
    [0.0,  0.0,  2.0, -2.0,       -381.0,      -4_421.0],
    [1.0,  1.0,  1.0,  0.0,        351.0,           0.0],
    [3.0,  0.0, -2.0,  0.0,       -340.0,           0.0],
    [4.0,  0.0, -3.0,  0.0,        330.0,           0.0],
    [2.0, -1.0,  2.0,  0.0,        327.0,           0.0],
    [0.0,  2.0,  1.0,  0.0,       -323.0,       1_165.0],
    [1.0,  1.0, -1.0,  0.0,        299.0,           0.0],
    [2.0,  0.0,  3.0,  0.0,        294.0,           0.0],
    [2.0,  0.0, -1.0, -2.0,          0.0,       8_752.0],
];

/// Geocentric lunar position (geometric, mean equinox of date).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoonPosition {
    /// Ecliptic longitude in degrees [0, 360).
    pub longitude_deg: f64,
    /// Earth–Moon centre distance in km.
    pub distance_km: f64,
}

fn normalize_deg(deg: f64) -> f64 {
    deg.rem_euclid(360.0)
}

/// Lunar longitude and distance at a Julian Ephemeris Day (TT).
pub fn moon_position(jd_tt: f64) -> MoonPosition {
    let t = jd_to_centuries(jd_tt);
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;

    let l_prime = 218.316_447_7 + 481_267.881_234_21 * t - 0.001_578_6 * t2 + t3 / 538_841.0
        - t4 / 65_194_000.0;
    let d = 297.850_192_1 + 445_267.111_403_4 * t - 0.001_881_9 * t2 + t3 / 545_868.0
        - t4 / 113_065_000.0;
    let m = 357.529_109_2 + 35_999.050_290_9 * t - 0.000_153_6 * t2 + t3 / 24_490_000.0;
    let m_prime = 134.963_396_4 + 477_198.867_505_5 * t + 0.008_741_4 * t2 + t3 / 69_699.0
        - t4 / 14_712_000.0;
    let f = 93.272_095_0 + 483_202.017_523_3 * t - 0.003_653_9 * t2 - t3 / 3_526_000.0
        + t4 / 863_310_000.0;

    let a1 = 119.75 + 131.849 * t;
    let a2 = 53.09 + 479_264.290 * t;

    // Eccentricity of Earth's orbit; scales terms containing M.
    let e = 1.0 - 0.002_516 * t - 0.000_007_4 * t2;

    let (d_r, m_r, mp_r, f_r) = (
        d.to_radians(),
        m.to_radians(),
        m_prime.to_radians(),
        f.to_radians(),
    );

    let mut sum_l = 0.0_f64;
    let mut sum_r = 0.0_f64;
    for term in &LONGITUDE_DISTANCE_TERMS {
        let arg = term[0] * d_r + term[1] * m_r + term[2] * mp_r + term[3] * f_r;
        let e_factor = match term[1].abs() as u8 {
            1 => e,
            2 => e * e,
            _ => 1.0,
        };
        sum_l += term[4] * e_factor * arg.sin();
        sum_r += term[5] * e_factor * arg.cos();
    }

    sum_l += 3958.0 * a1.to_radians().sin()
        + 1962.0 * (l_prime - f).to_radians().sin()
        + 318.0 * a2.to_radians().sin();

    MoonPosition {
        longitude_deg: normalize_deg(l_prime + sum_l / 1_000_000.0),
        distance_km: MEAN_DISTANCE_KM + sum_r / 1000.0,
    }
}

/// Longitude of the Moon's ascending node, degrees (low precision).
fn node_longitude_deg(t: f64) -> f64 {
    125.04 - 1934.136 * t
}

/// Apparent solar longitude at a Julian Ephemeris Day (TT), degrees [0, 360).
///
/// Includes aberration and the dominant nutation term.
pub fn sun_apparent_longitude_deg(jd_tt: f64) -> f64 {
    let t = jd_to_centuries(jd_tt);
    let t2 = t * t;
    let l0 = 280.466_46 + 36_000.769_83 * t + 0.000_303_2 * t2;
    let m = (357.529_11 + 35_999.050_29 * t - 0.000_153_7 * t2).to_radians();
    let c = (1.914_602 - 0.004_817 * t - 0.000_014 * t2) * m.sin()
        + (0.019_993 - 0.000_101 * t) * (2.0 * m).sin()
        + 0.000_289 * (3.0 * m).sin();
    let omega = node_longitude_deg(t).to_radians();
    normalize_deg(l0 + c - 0.005_69 - 0.004_78 * omega.sin())
}

/// Apparent Moon − Sun ecliptic elongation, degrees [0, 360).
///
/// 0 at new moon, 180 at full moon.
pub fn elongation_deg(jd_tt: f64) -> f64 {
    let t = jd_to_centuries(jd_tt);
    let nutation = -0.004_78 * node_longitude_deg(t).to_radians().sin();
    let moon = moon_position(jd_tt).longitude_deg + nutation;
    normalize_deg(moon - sun_apparent_longitude_deg(jd_tt))
}

/// Oracle backed by the analytic Meeus series.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeeusOracle;

impl MeeusOracle {
    pub fn new() -> Self {
        Self
    }
}

impl LunarOracle for MeeusOracle {
    fn illumination(&self, at: Instant) -> Result<f64, OracleError> {
        let fraction = elongation_deg(jd_tt(at)) / 360.0;
        // rem_euclid can return exactly 360.0 for tiny negative inputs.
        Ok(if fraction >= 1.0 { 0.0 } else { fraction })
    }

    fn distance_km(&self, at: Instant) -> Result<f64, OracleError> {
        Ok(moon_position(jd_tt(at)).distance_km)
    }
}
