//! Lunar theory: truncated Meeus Ch. 47 periodic series.
//!
//! Carries the top terms of Tables 47.A / 47.B plus the A1-A3 additive
//! corrections, giving ~0.3° in longitude, comfortably inside the 45°
//! moon-phase buckets this feeds.

use super::frames::DEG;
use crate::models::normalize_degrees;

/// Geocentric ecliptic position of the Moon.
#[derive(Debug, Clone, Copy)]
pub struct MoonPosition {
    pub longitude_deg: f64,
    pub latitude_deg: f64,
    pub distance_km: f64,
}

// Periodic terms for longitude and distance (Table 47.A).
// Each entry: (D, M, M', F, coeff_l [1e-6 deg], coeff_r [1e-3 km])
#[rustfmt::skip]
const TERMS_LR: [(f64, f64, f64, f64, f64, f64); 20] = [
    (0.0, 0.0,  1.0,  0.0, 6288774.0, -20905355.0),
    (2.0, 0.0, -1.0,  0.0, 1274027.0,  -3699111.0),
    (2.0, 0.0,  0.0,  0.0,  658314.0,  -2955968.0),
    (0.0, 0.0,  2.0,  0.0,  213618.0,   -569925.0),
    (0.0, 1.0,  0.0,  0.0, -185116.0,     48888.0),
    (0.0, 0.0,  0.0,  2.0, -114332.0,     -3149.0),
    (2.0, 0.0, -2.0,  0.0,   58793.0,    246158.0),
    (2.0, -1.0, -1.0, 0.0,   57066.0,   -152138.0),
    (2.0, 0.0,  1.0,  0.0,   53322.0,   -170733.0),
    (2.0, -1.0, 0.0,  0.0,   45758.0,   -204586.0),
    (0.0, 1.0, -1.0,  0.0,  -40923.0,   -129620.0),
    (1.0, 0.0,  0.0,  0.0,  -34720.0,    108743.0),
    (0.0, 1.0,  1.0,  0.0,  -30383.0,    104755.0),
    (2.0, 0.0,  0.0, -2.0,   15327.0,     10321.0),
    (0.0, 0.0,  1.0,  2.0,  -12528.0,         0.0),
    (0.0, 0.0,  1.0, -2.0,   10980.0,     79661.0),
    (4.0, 0.0, -1.0,  0.0,   10675.0,    -34782.0),
    (0.0, 0.0,  3.0,  0.0,   10034.0,    -23210.0),
    (4.0, 0.0, -2.0,  0.0,    8548.0,    -21636.0),
    (2.0, 1.0, -1.0,  0.0,   -7888.0,     24208.0),
];

// Periodic terms for latitude (Table 47.B).
// Each entry: (D, M, M', F, coeff_b [1e-6 deg])
#[rustfmt::skip]
const TERMS_B: [(f64, f64, f64, f64, f64); 20] = [
    (0.0, 0.0,  0.0,  1.0, 5128122.0),
    (0.0, 0.0,  1.0,  1.0,  280602.0),
    (0.0, 0.0,  1.0, -1.0,  277693.0),
    (2.0, 0.0,  0.0, -1.0,  173237.0),
    (2.0, 0.0, -1.0,  1.0,   55413.0),
    (2.0, 0.0, -1.0, -1.0,   46271.0),
    (2.0, 0.0,  0.0,  1.0,   32573.0),
    (0.0, 0.0,  2.0,  1.0,   17198.0),
    (2.0, 0.0,  1.0, -1.0,    9266.0),
    (0.0, 0.0,  2.0, -1.0,    8822.0),
    (2.0, -1.0, 0.0, -1.0,    8216.0),
    (2.0, 0.0, -2.0, -1.0,    4324.0),
    (2.0, 0.0,  1.0,  1.0,    4200.0),
    (2.0, 1.0,  0.0, -1.0,   -3359.0),
    (2.0, -1.0, -1.0, 1.0,    2463.0),
    (2.0, -1.0, 0.0,  1.0,    2211.0),
    (2.0, -1.0, -1.0, -1.0,   2065.0),
    (0.0, 1.0, -1.0, -1.0,   -1870.0),
    (4.0, 0.0, -1.0, -1.0,    1828.0),
    (0.0, 1.0,  0.0,  1.0,   -1794.0),
];

/// Moon mean longitude L', degrees.
fn mean_longitude(t: f64) -> f64 {
    normalize_degrees(
        218.3164477 + 481267.88123421 * t - 0.0015786 * t * t + t * t * t / 538841.0
            - t * t * t * t / 65194000.0,
    )
}

/// Mean elongation of the Moon from the Sun D, degrees.
fn mean_elongation(t: f64) -> f64 {
    normalize_degrees(
        297.8501921 + 445267.1114034 * t - 0.0018819 * t * t + t * t * t / 545868.0
            - t * t * t * t / 113065000.0,
    )
}

/// Sun mean anomaly M, degrees.
fn sun_mean_anomaly(t: f64) -> f64 {
    normalize_degrees(357.5291092 + 35999.0502909 * t - 0.0001536 * t * t + t * t * t / 24490000.0)
}

/// Moon mean anomaly M', degrees.
fn moon_mean_anomaly(t: f64) -> f64 {
    normalize_degrees(
        134.9633964 + 477198.8675055 * t + 0.0087414 * t * t + t * t * t / 69699.0
            - t * t * t * t / 14712000.0,
    )
}

/// Moon argument of latitude F, degrees.
fn argument_of_latitude(t: f64) -> f64 {
    normalize_degrees(
        93.2720950 + 483202.0175233 * t - 0.0036539 * t * t - t * t * t / 3526000.0
            + t * t * t * t / 863310000.0,
    )
}

/// Geocentric ecliptic position of the Moon at Julian centuries `t`.
pub fn position(t: f64) -> MoonPosition {
    let lp = mean_longitude(t);
    let d = mean_elongation(t);
    let m = sun_mean_anomaly(t);
    let mp = moon_mean_anomaly(t);
    let f = argument_of_latitude(t);

    // Earth eccentricity damping for terms involving M
    let e = 1.0 - 0.002516 * t - 0.0000074 * t * t;
    let e2 = e * e;
    let e_factor = |tm: f64| match tm.abs() as i32 {
        1 => e,
        2 => e2,
        _ => 1.0,
    };

    let mut sum_l: f64 = 0.0;
    let mut sum_r: f64 = 0.0;
    for &(td, tm, tmp, tf, cl, cr) in &TERMS_LR {
        let arg = (td * d + tm * m + tmp * mp + tf * f) * DEG;
        sum_l += cl * e_factor(tm) * arg.sin();
        sum_r += cr * e_factor(tm) * arg.cos();
    }

    let mut sum_b: f64 = 0.0;
    for &(td, tm, tmp, tf, cb) in &TERMS_B {
        let arg = (td * d + tm * m + tmp * mp + tf * f) * DEG;
        sum_b += cb * e_factor(tm) * arg.sin();
    }

    // Additive corrections A1 (Venus), A2 (Jupiter), A3
    let a1 = normalize_degrees(119.75 + 131.849 * t);
    let a2 = normalize_degrees(53.09 + 479264.290 * t);
    let a3 = normalize_degrees(313.45 + 481266.484 * t);

    sum_l += 3958.0 * (a1 * DEG).sin() + 1962.0 * ((lp - f) * DEG).sin() + 318.0 * (a2 * DEG).sin();
    sum_b += -2235.0 * (lp * DEG).sin()
        + 382.0 * (a3 * DEG).sin()
        + 175.0 * ((a1 - f) * DEG).sin()
        + 175.0 * ((a1 + f) * DEG).sin()
        + 127.0 * ((lp - mp) * DEG).sin()
        - 115.0 * ((lp + mp) * DEG).sin();

    MoonPosition {
        longitude_deg: normalize_degrees(lp + sum_l / 1_000_000.0),
        latitude_deg: sum_b / 1_000_000.0,
        distance_km: 385000.56 + sum_r / 1000.0,
    }
}

/// Horizontal parallax correction for the Moon's altitude, degrees.
///
/// The Moon is close enough (~0.95° parallax) that the topocentric
/// altitude differs visibly from the geocentric one. Other bodies are far
/// enough away that the correction is noise.
pub fn parallax_altitude_correction(geocentric_altitude_deg: f64, distance_km: f64) -> f64 {
    let hp = (6378.14 / distance_km).asin();
    let parallax = hp * (geocentric_altitude_deg * DEG).cos();
    geocentric_altitude_deg - parallax / DEG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meeus_example_47a() {
        // Meeus Example 47.a: 1992 April 12, 0h TD (JD 2448724.5)
        let t = (2448724.5 - 2451545.0) / 36525.0;
        let pos = position(t);
        assert!(
            (pos.longitude_deg - 133.17).abs() < 0.5,
            "longitude: expected ~133.17°, got {:.2}°",
            pos.longitude_deg
        );
        assert!(
            (pos.latitude_deg - (-3.23)).abs() < 0.5,
            "latitude: expected ~-3.23°, got {:.2}°",
            pos.latitude_deg
        );
        assert!(
            (pos.distance_km - 368409.0).abs() < 2000.0,
            "distance: expected ~368409 km, got {:.0} km",
            pos.distance_km
        );
    }

    #[test]
    fn test_distance_bounds() {
        for i in -20..=20 {
            let pos = position(i as f64 / 20.0);
            assert!(pos.distance_km > 350_000.0 && pos.distance_km < 410_000.0);
        }
    }

    #[test]
    fn test_latitude_bounded_by_inclination() {
        // Orbital inclination ~5.1°; series stays within ~5.3°
        for i in -50..=50 {
            let pos = position(i as f64 / 25.0);
            assert!(pos.latitude_deg.abs() < 5.5);
        }
    }

    #[test]
    fn test_parallax_lowers_altitude() {
        let corrected = parallax_altitude_correction(45.0, 384400.0);
        assert!(corrected < 45.0);
        assert!((45.0 - corrected) < 1.0);
    }
}
