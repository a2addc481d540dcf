//! Reference-frame machinery: obliquity, nutation, sidereal time, and the
//! coordinate transforms between ecliptic, equatorial, and horizontal frames.
//!
//! Angles are degrees unless a name says otherwise. Longitude-valued
//! results come back normalized into [0, 360); signed differences
//! (hour angles) into (-180, 180].

use std::f64::consts::PI;

use crate::models::{normalize_degrees, normalize_signed_degrees};

pub const DEG: f64 = PI / 180.0;

/// Mean obliquity of the ecliptic, degrees (Meeus 22.2).
pub fn mean_obliquity(t: f64) -> f64 {
    23.0 + (26.0 + (21.448 - t * (46.815 + t * (0.00059 - t * 0.001813))) / 60.0) / 60.0
}

/// Nutation in longitude Δψ and obliquity Δε, degrees.
///
/// Truncated 4-term lunisolar model (Meeus Ch. 22 low-precision form),
/// good to ~0.5″, ample for sign-level and hour-angle work.
pub fn nutation(t: f64) -> (f64, f64) {
    let omega = (125.04452 - 1934.136261 * t) * DEG;
    let l_sun = (280.4665 + 36000.7698 * t) * DEG;
    let l_moon = (218.3165 + 481267.8813 * t) * DEG;

    let dpsi_arcsec = -17.20 * omega.sin() - 1.32 * (2.0 * l_sun).sin()
        - 0.23 * (2.0 * l_moon).sin()
        + 0.21 * (2.0 * omega).sin();
    let deps_arcsec = 9.20 * omega.cos()
        + 0.57 * (2.0 * l_sun).cos()
        + 0.10 * (2.0 * l_moon).cos()
        - 0.09 * (2.0 * omega).cos();

    (dpsi_arcsec / 3600.0, deps_arcsec / 3600.0)
}

/// True obliquity of the ecliptic (mean + nutation), degrees.
pub fn true_obliquity(t: f64) -> f64 {
    let (_, deps) = nutation(t);
    mean_obliquity(t) + deps
}

/// Greenwich Mean Sidereal Time, degrees in [0, 360).
pub fn gmst_degrees(jd: f64) -> f64 {
    let d = jd - 2451545.0;
    let t = d / 36525.0;
    normalize_degrees(
        280.46061837 + 360.98564736629 * d + 0.000387933 * t * t - t * t * t / 38710000.0,
    )
}

/// Greenwich Apparent Sidereal Time: GMST plus the equation of the
/// equinoxes, degrees in [0, 360).
pub fn gast_degrees(jd: f64) -> f64 {
    let t = (jd - 2451545.0) / 36525.0;
    let (dpsi, _) = nutation(t);
    let eps = true_obliquity(t);
    normalize_degrees(gmst_degrees(jd) + dpsi * (eps * DEG).cos())
}

/// Local apparent sidereal time for an observer east longitude, degrees.
pub fn local_sidereal_degrees(jd: f64, longitude_east: f64) -> f64 {
    normalize_degrees(gast_degrees(jd) + longitude_east)
}

/// Ecliptic to equatorial coordinate transform.
/// Returns (right_ascension_deg, declination_deg).
pub fn ecliptic_to_equatorial(lon: f64, lat: f64, obliquity: f64) -> (f64, f64) {
    let lon_r = lon * DEG;
    let lat_r = lat * DEG;
    let obl_r = obliquity * DEG;

    let sin_ra = lon_r.sin() * obl_r.cos() - lat_r.tan() * obl_r.sin();
    let cos_ra = lon_r.cos();
    let ra = normalize_degrees(sin_ra.atan2(cos_ra) / DEG);

    let sin_dec = lat_r.sin() * obl_r.cos() + lat_r.cos() * obl_r.sin() * lon_r.sin();
    let dec = sin_dec.asin() / DEG;

    (ra, dec)
}

/// Equatorial to horizontal coordinate transform.
/// Returns (altitude_deg, azimuth_deg), azimuth from north through east.
pub fn equatorial_to_horizontal(ra: f64, dec: f64, lat: f64, lst: f64) -> (f64, f64) {
    let ha = (normalize_degrees(lst - ra)) * DEG;
    let dec_r = dec * DEG;
    let lat_r = lat * DEG;

    let sin_alt = lat_r.sin() * dec_r.sin() + lat_r.cos() * dec_r.cos() * ha.cos();
    let sin_alt = sin_alt.clamp(-1.0, 1.0);
    let alt = sin_alt.asin() / DEG;

    let cos_alt_cos_lat = sin_alt.asin().cos() * lat_r.cos();
    let azimuth = if cos_alt_cos_lat.abs() > 1e-12 {
        let cos_az = (dec_r.sin() - sin_alt * lat_r.sin()) / cos_alt_cos_lat;
        let az = cos_az.clamp(-1.0, 1.0).acos() / DEG;
        if ha.sin() > 0.0 {
            360.0 - az
        } else {
            az
        }
    } else {
        // Body at the zenith or observer at a pole: azimuth degenerate
        if dec >= 0.0 {
            180.0
        } else {
            0.0
        }
    };

    (alt, normalize_degrees(azimuth))
}

/// Hour angle of a body west of the local meridian, degrees in (-180, 180].
pub fn hour_angle_degrees(lst: f64, ra: f64) -> f64 {
    normalize_signed_degrees(lst - ra)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_obliquity_at_j2000() {
        // ε₀ ≈ 23.4393° at J2000.0
        assert!((mean_obliquity(0.0) - 23.4393).abs() < 1e-3);
    }

    #[test]
    fn test_nutation_magnitude() {
        // Nutation in longitude never exceeds ~17.3″ in this model
        for i in -10..=10 {
            let (dpsi, deps) = nutation(i as f64 / 10.0);
            assert!(dpsi.abs() < 19.0 / 3600.0);
            assert!(deps.abs() < 10.5 / 3600.0);
        }
    }

    #[test]
    fn test_gmst_meeus_example_12a() {
        // Meeus Example 12.a: 1987-04-10 00:00 UT → GMST 13h10m46.3668s
        let jd = 2446895.5;
        let expected = (13.0 + 10.0 / 60.0 + 46.3668 / 3600.0) * 15.0;
        assert!((gmst_degrees(jd) - expected).abs() < 1e-3);
    }

    #[test]
    fn test_gast_close_to_gmst() {
        let jd = 2451545.0;
        assert!((gast_degrees(jd) - gmst_degrees(jd)).abs() < 20.0 / 3600.0);
    }

    #[test]
    fn test_ecliptic_equatorial_meeus_example_13a() {
        // Meeus Example 13.a: λ=113.21563°, β=6.68417°, ε=23.4392911°
        // → α=116.328942°, δ=28.026183°
        let (ra, dec) = ecliptic_to_equatorial(113.21563, 6.68417, 23.4392911);
        assert!((ra - 116.328942).abs() < 1e-4);
        assert!((dec - 28.026183).abs() < 1e-4);
    }

    #[test]
    fn test_ecliptic_equatorial_zero_obliquity_identity() {
        let (ra, dec) = ecliptic_to_equatorial(123.456, 0.0, 0.0);
        assert!((ra - 123.456).abs() < 1e-9);
        assert!(dec.abs() < 1e-9);
    }

    #[test]
    fn test_horizontal_transit_altitude() {
        // Body on the meridian (ha = 0): altitude = 90 - |φ - δ|
        let (alt, az) = equatorial_to_horizontal(100.0, 20.0, 40.0, 100.0);
        assert!((alt - (90.0 - (40.0 - 20.0))).abs() < 1e-9);
        // South of the zenith for φ > δ
        assert!((az - 180.0).abs() < 1e-6);
    }

    #[test]
    fn test_hour_angle_sign() {
        // Body east of the meridian has a negative hour angle
        assert!(hour_angle_degrees(100.0, 130.0) < 0.0);
        assert!(hour_angle_degrees(130.0, 100.0) > 0.0);
        assert_eq!(hour_angle_degrees(280.0, 100.0), 180.0);
    }
}
