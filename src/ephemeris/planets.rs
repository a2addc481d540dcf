//! Planetary positions from JPL approximate Keplerian elements.
//!
//! Elements and century rates are the JPL "Approximate Positions of the
//! Planets" table valid 1800–2050. Propagation: elements at date, Kepler's
//! equation by Newton iteration, rotation into the J2000 ecliptic,
//! heliocentric → geocentric differencing with one light-time iteration.
//! Accuracy is a few arcminutes for the classical planets and ~1° for
//! Pluto, well inside the 30° sectors downstream consumers care about.

use super::frames::DEG;
use crate::models::{normalize_degrees, normalize_signed_degrees};

/// Bodies carried in the orbital-element table. `EmBary` is the
/// Earth-Moon barycenter, used as the observer's heliocentric position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanetId {
    Mercury,
    Venus,
    EmBary,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

/// Keplerian elements at J2000 plus per-century rates.
/// Angles in degrees, semi-major axis in AU.
#[derive(Debug, Clone, Copy)]
struct OrbitalElements {
    a: f64,
    e: f64,
    i: f64,
    l: f64,
    long_peri: f64,
    long_node: f64,
    a_dot: f64,
    e_dot: f64,
    i_dot: f64,
    l_dot: f64,
    long_peri_dot: f64,
    long_node_dot: f64,
}

#[rustfmt::skip]
const ELEMENT_TABLE: [(PlanetId, OrbitalElements); 9] = [
    (PlanetId::Mercury, OrbitalElements {
        a: 0.38709927, e: 0.20563593, i: 7.00497902,
        l: 252.25032350, long_peri: 77.45779628, long_node: 48.33076593,
        a_dot: 0.00000037, e_dot: 0.00001906, i_dot: -0.00594749,
        l_dot: 149472.67411175, long_peri_dot: 0.16047689, long_node_dot: -0.12534081,
    }),
    (PlanetId::Venus, OrbitalElements {
        a: 0.72333566, e: 0.00677672, i: 3.39467605,
        l: 181.97909950, long_peri: 131.60246718, long_node: 76.67984255,
        a_dot: 0.00000390, e_dot: -0.00004107, i_dot: -0.00078890,
        l_dot: 58517.81538729, long_peri_dot: 0.00268329, long_node_dot: -0.27769418,
    }),
    (PlanetId::EmBary, OrbitalElements {
        a: 1.00000261, e: 0.01671123, i: -0.00001531,
        l: 100.46457166, long_peri: 102.93768193, long_node: 0.0,
        a_dot: 0.00000562, e_dot: -0.00004392, i_dot: -0.01294668,
        l_dot: 35999.37244981, long_peri_dot: 0.32327364, long_node_dot: 0.0,
    }),
    (PlanetId::Mars, OrbitalElements {
        a: 1.52371034, e: 0.09339410, i: 1.84969142,
        l: -4.55343205, long_peri: -23.94362959, long_node: 49.55953891,
        a_dot: 0.00001847, e_dot: 0.00007882, i_dot: -0.00813131,
        l_dot: 19140.30268499, long_peri_dot: 0.44441088, long_node_dot: -0.29257343,
    }),
    (PlanetId::Jupiter, OrbitalElements {
        a: 5.20288700, e: 0.04838624, i: 1.30439695,
        l: 34.39644051, long_peri: 14.72847983, long_node: 100.47390909,
        a_dot: -0.00011607, e_dot: -0.00013253, i_dot: -0.00183714,
        l_dot: 3034.74612775, long_peri_dot: 0.21252668, long_node_dot: 0.20469106,
    }),
    (PlanetId::Saturn, OrbitalElements {
        a: 9.53667594, e: 0.05386179, i: 2.48599187,
        l: 49.95424423, long_peri: 92.59887831, long_node: 113.66242448,
        a_dot: -0.00125060, e_dot: -0.00050991, i_dot: 0.00193609,
        l_dot: 1222.49362201, long_peri_dot: -0.41897216, long_node_dot: -0.28867794,
    }),
    (PlanetId::Uranus, OrbitalElements {
        a: 19.18916464, e: 0.04725744, i: 0.77263783,
        l: 313.23810451, long_peri: 170.95427630, long_node: 74.01692503,
        a_dot: -0.00196176, e_dot: -0.00004397, i_dot: -0.00242939,
        l_dot: 428.48202785, long_peri_dot: 0.40805281, long_node_dot: 0.04240589,
    }),
    (PlanetId::Neptune, OrbitalElements {
        a: 30.06992276, e: 0.00859048, i: 1.77004347,
        l: -55.12002969, long_peri: 44.96476227, long_node: 131.78422574,
        a_dot: 0.00026291, e_dot: 0.00005105, i_dot: 0.00035372,
        l_dot: 218.45945325, long_peri_dot: -0.32241464, long_node_dot: -0.00508664,
    }),
    (PlanetId::Pluto, OrbitalElements {
        a: 39.48211675, e: 0.24882730, i: 17.14001206,
        l: 238.92903833, long_peri: 224.06891629, long_node: 110.30393684,
        a_dot: -0.00031596, e_dot: 0.00005170, i_dot: 0.00004818,
        l_dot: 145.20780515, long_peri_dot: -0.04062942, long_node_dot: -0.01183482,
    }),
];

/// Light travel time across one AU, in days.
const LIGHT_DAYS_PER_AU: f64 = 499.00478 / 86400.0;

/// Geocentric ecliptic position (J2000 frame).
#[derive(Debug, Clone, Copy)]
pub struct GeocentricPosition {
    pub longitude_j2000_deg: f64,
    pub latitude_deg: f64,
    pub distance_au: f64,
}

fn elements_for(planet: PlanetId) -> &'static OrbitalElements {
    ELEMENT_TABLE
        .iter()
        .find(|(id, _)| *id == planet)
        .map(|(_, el)| el)
        .expect("orbital element table covers every PlanetId")
}

/// Verify the element table covers every body with finite values.
/// Run once at ephemeris load.
pub fn validate_table() -> Result<(), String> {
    const ALL: [PlanetId; 9] = [
        PlanetId::Mercury,
        PlanetId::Venus,
        PlanetId::EmBary,
        PlanetId::Mars,
        PlanetId::Jupiter,
        PlanetId::Saturn,
        PlanetId::Uranus,
        PlanetId::Neptune,
        PlanetId::Pluto,
    ];
    for id in ALL {
        let found = ELEMENT_TABLE.iter().find(|(tid, _)| *tid == id);
        let Some((_, el)) = found else {
            return Err(format!("missing orbital elements for {:?}", id));
        };
        if !(el.a.is_finite() && el.e.is_finite() && el.a > 0.0 && (0.0..1.0).contains(&el.e)) {
            return Err(format!("degenerate orbital elements for {:?}", id));
        }
    }
    Ok(())
}

/// Solve Kepler's equation E - e·sin(E) = M by Newton iteration.
/// All quantities in radians.
fn solve_kepler(mean_anomaly: f64, e: f64) -> f64 {
    let m = mean_anomaly;
    let mut ecc_anomaly = m + e * m.sin();
    for _ in 0..12 {
        let delta = (ecc_anomaly - e * ecc_anomaly.sin() - m) / (1.0 - e * ecc_anomaly.cos());
        ecc_anomaly -= delta;
        if delta.abs() < 1e-12 {
            break;
        }
    }
    ecc_anomaly
}

/// Heliocentric position in the J2000 ecliptic frame, AU.
fn heliocentric_position(planet: PlanetId, t: f64) -> [f64; 3] {
    let el = elements_for(planet);

    let a = el.a + el.a_dot * t;
    let e = el.e + el.e_dot * t;
    let i = (el.i + el.i_dot * t) * DEG;
    let l = el.l + el.l_dot * t;
    let long_peri = el.long_peri + el.long_peri_dot * t;
    let long_node = el.long_node + el.long_node_dot * t;

    let m = normalize_signed_degrees(l - long_peri) * DEG;
    let arg_peri = (long_peri - long_node) * DEG;
    let node = long_node * DEG;

    let ecc_anomaly = solve_kepler(m, e);

    // Position in the orbital plane
    let xp = a * (ecc_anomaly.cos() - e);
    let yp = a * (1.0 - e * e).sqrt() * ecc_anomaly.sin();

    // Rotate by argument of perihelion, inclination, ascending node
    let (sin_w, cos_w) = arg_peri.sin_cos();
    let (sin_o, cos_o) = node.sin_cos();
    let (sin_i, cos_i) = i.sin_cos();

    [
        (cos_w * cos_o - sin_w * sin_o * cos_i) * xp + (-sin_w * cos_o - cos_w * sin_o * cos_i) * yp,
        (cos_w * sin_o + sin_w * cos_o * cos_i) * xp + (-sin_w * sin_o + cos_w * cos_o * cos_i) * yp,
        (sin_w * sin_i) * xp + (cos_w * sin_i) * yp,
    ]
}

/// Geocentric ecliptic position of a planet at Julian centuries `t`,
/// with one light-time iteration for the apparent direction.
pub fn geocentric_position(planet: PlanetId, t: f64) -> GeocentricPosition {
    // The Moon's offset from the EM barycenter is < 5e-5 AU: irrelevant
    // at planetary distances, so the barycenter stands in for Earth.
    let earth = heliocentric_position(PlanetId::EmBary, t);

    let mut body = heliocentric_position(planet, t);
    let mut geo = sub(body, earth);
    let dist = norm(geo);

    // Re-evaluate the target at emission time; the observer stays put.
    let tau_centuries = dist * LIGHT_DAYS_PER_AU / 36525.0;
    body = heliocentric_position(planet, t - tau_centuries);
    geo = sub(body, earth);

    let distance_au = norm(geo);
    let longitude = normalize_degrees(geo[1].atan2(geo[0]) / DEG);
    let latitude = (geo[2] / distance_au).asin() / DEG;

    GeocentricPosition {
        longitude_j2000_deg: longitude,
        latitude_deg: latitude,
        distance_au,
    }
}

/// Heliocentric ecliptic longitude of the EM barycenter, degrees.
/// Exposed for cross-checks against the solar theory.
pub fn earth_heliocentric_longitude(t: f64) -> f64 {
    let earth = heliocentric_position(PlanetId::EmBary, t);
    normalize_degrees(earth[1].atan2(earth[0]) / DEG)
}

/// Convert a J2000 ecliptic longitude to the ecliptic of date:
/// general precession in longitude plus nutation.
pub fn longitude_of_date(longitude_j2000_deg: f64, t: f64) -> f64 {
    let precession = (5029.0966 * t + 1.11113 * t * t) / 3600.0;
    let (dpsi, _) = super::frames::nutation(t);
    normalize_degrees(longitude_j2000_deg + precession + dpsi)
}

fn sub(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn norm(v: [f64; 3]) -> f64 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::solar;

    #[test]
    fn test_table_validates() {
        validate_table().unwrap();
    }

    #[test]
    fn test_kepler_solver_residual() {
        for &e in &[0.0, 0.0167, 0.2056, 0.2488] {
            for step in 0..24 {
                let m = step as f64 * 15.0 * DEG - std::f64::consts::PI;
                let big_e = solve_kepler(m, e);
                assert!((big_e - e * big_e.sin() - m).abs() < 1e-10);
            }
        }
    }

    #[test]
    fn test_heliocentric_distances_within_orbit_bounds() {
        let checks = [
            (PlanetId::Mercury, 0.30, 0.48),
            (PlanetId::Venus, 0.71, 0.74),
            (PlanetId::EmBary, 0.97, 1.02),
            (PlanetId::Mars, 1.35, 1.70),
            (PlanetId::Jupiter, 4.9, 5.5),
            (PlanetId::Saturn, 8.9, 10.15),
            (PlanetId::Uranus, 18.2, 20.2),
            (PlanetId::Neptune, 29.6, 30.5),
            (PlanetId::Pluto, 29.0, 49.5),
        ];
        for quarter in -80..=80 {
            let t = quarter as f64 / 40.0; // 1800..2200
            for &(planet, lo, hi) in &checks {
                let r = norm(heliocentric_position(planet, t));
                assert!(
                    r > lo && r < hi,
                    "{:?} at t={} has r={}",
                    planet,
                    t,
                    r
                );
            }
        }
    }

    #[test]
    fn test_inner_planet_elongation_bounds() {
        // Geocentric elongation from the Sun can never exceed the
        // geometry of the inner orbit: ~28° for Mercury, ~48° for Venus.
        for week in 0..200 {
            let t = week as f64 * 7.0 / 36525.0; // 2000..~2004
            let sun = solar::apparent_longitude(t);
            for (planet, max_elong) in [(PlanetId::Mercury, 29.0), (PlanetId::Venus, 48.8)] {
                let pos = geocentric_position(planet, t);
                let lon = longitude_of_date(pos.longitude_j2000_deg, t);
                let elong = normalize_signed_degrees(lon - sun).abs();
                assert!(
                    elong < max_elong,
                    "{:?} elongation {} at t={}",
                    planet,
                    elong,
                    t
                );
            }
        }
    }

    #[test]
    fn test_earth_longitude_opposes_sun() {
        // Heliocentric Earth and geocentric Sun differ by 180° (modulo
        // aberration/nutation in the apparent solar longitude).
        for month in 0..48 {
            let t = month as f64 * 30.0 / 36525.0;
            let earth = earth_heliocentric_longitude(t);
            let sun_geo = solar::apparent_longitude(t);
            let diff = normalize_signed_degrees(earth + 180.0 - sun_geo).abs();
            assert!(diff < 0.05, "diff {} at t={}", diff, t);
        }
    }

    #[test]
    fn test_geocentric_distance_ranges() {
        // Mars swings between ~0.37 AU (opposition) and ~2.7 AU
        for month in 0..60 {
            let t = month as f64 * 30.0 / 36525.0;
            let mars = geocentric_position(PlanetId::Mars, t);
            assert!(mars.distance_au > 0.35 && mars.distance_au < 2.75);
        }
    }
}
