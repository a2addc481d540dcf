//! Ephemeris engine and query facade.
//!
//! The engine is an analytic theory compiled into the crate: Meeus solar
//! and lunar series plus JPL approximate Keplerian elements for the
//! planets. It is loaded exactly once at process startup ([`Ephemeris::load`]
//! runs a self-check and table validation), shared read-only behind an
//! `Arc`, and never mutated afterwards. Request handlers only ever see the
//! single capability [`Ephemeris::observe`].

pub mod frames;
pub mod lunar;
pub mod planets;
pub mod solar;

use crate::error::{AstroError, AstroResult};
use crate::models::{normalize_degrees, JulianDate, Observer};

use planets::PlanetId;

/// Celestial bodies the facade can observe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

impl Body {
    /// The eight planets reported in chart output, Mercury..Pluto order.
    pub const PLANETS: [Body; 8] = [
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
        Body::Pluto,
    ];

    /// Display name used as a JSON map key.
    pub fn name(&self) -> &'static str {
        match self {
            Body::Sun => "Sun",
            Body::Moon => "Moon",
            Body::Mercury => "Mercury",
            Body::Venus => "Venus",
            Body::Mars => "Mars",
            Body::Jupiter => "Jupiter",
            Body::Saturn => "Saturn",
            Body::Uranus => "Uranus",
            Body::Neptune => "Neptune",
            Body::Pluto => "Pluto",
        }
    }
}

/// Apparent geometry of one body for one observer at one instant.
#[derive(Debug, Clone, Copy)]
pub struct BodyGeometry {
    /// Altitude above the observer's true horizon, degrees
    pub altitude_deg: f64,
    /// Azimuth from north through east, degrees in [0, 360)
    pub azimuth_deg: f64,
    /// Apparent ecliptic longitude of date, degrees in [0, 360)
    pub ecliptic_longitude_deg: f64,
    /// Hour angle west of the local meridian, hours in (-12, 12]
    pub hour_angle_hours: f64,
}

/// The loaded ephemeris engine.
///
/// A zero-sized handle over static series tables; constructing it through
/// [`Ephemeris::load`] is what guarantees the tables passed their startup
/// check before any request can observe through them.
#[derive(Debug)]
pub struct Ephemeris {
    _private: (),
}

impl Ephemeris {
    /// Load and self-check the ephemeris engine.
    ///
    /// Fails with [`AstroError::EphemerisUnavailable`] if the orbital
    /// element table is incomplete or a probe evaluation at J2000 returns
    /// out-of-range values. A failure here is fatal to process start.
    pub fn load() -> AstroResult<Self> {
        planets::validate_table().map_err(AstroError::EphemerisUnavailable)?;

        let sun_probe = solar::apparent_longitude(0.0);
        if !sun_probe.is_finite() || !(0.0..360.0).contains(&sun_probe) {
            return Err(AstroError::EphemerisUnavailable(format!(
                "solar theory probe at J2000 returned {}",
                sun_probe
            )));
        }

        let moon_probe = lunar::position(0.0);
        if !moon_probe.longitude_deg.is_finite() || !moon_probe.distance_km.is_finite() {
            return Err(AstroError::EphemerisUnavailable(
                "lunar series probe at J2000 returned non-finite values".to_string(),
            ));
        }

        Ok(Self { _private: () })
    }

    /// Observe a body: apparent altitude, azimuth, ecliptic longitude of
    /// date, and hour angle for the given observer.
    pub fn observe(&self, body: Body, observer: &Observer) -> BodyGeometry {
        let jd = JulianDate::from_datetime(observer.instant);
        let t = jd.centuries_since_j2000();

        let planet_arm = |id: PlanetId| {
            let pos = planets::geocentric_position(id, t);
            (
                planets::longitude_of_date(pos.longitude_j2000_deg, t),
                pos.latitude_deg,
                None,
            )
        };

        let (longitude, latitude, moon_distance_km) = match body {
            Body::Sun => (solar::apparent_longitude(t), 0.0, None),
            Body::Moon => {
                let pos = lunar::position(t);
                let (dpsi, _) = frames::nutation(t);
                (
                    normalize_degrees(pos.longitude_deg + dpsi),
                    pos.latitude_deg,
                    Some(pos.distance_km),
                )
            }
            Body::Mercury => planet_arm(PlanetId::Mercury),
            Body::Venus => planet_arm(PlanetId::Venus),
            Body::Mars => planet_arm(PlanetId::Mars),
            Body::Jupiter => planet_arm(PlanetId::Jupiter),
            Body::Saturn => planet_arm(PlanetId::Saturn),
            Body::Uranus => planet_arm(PlanetId::Uranus),
            Body::Neptune => planet_arm(PlanetId::Neptune),
            Body::Pluto => planet_arm(PlanetId::Pluto),
        };

        let obliquity = frames::true_obliquity(t);
        let (ra, dec) = frames::ecliptic_to_equatorial(longitude, latitude, obliquity);
        let lst = frames::local_sidereal_degrees(jd.value(), observer.coordinate.longitude);
        let (mut altitude, azimuth) =
            frames::equatorial_to_horizontal(ra, dec, observer.coordinate.latitude, lst);

        if let Some(distance_km) = moon_distance_km {
            altitude = lunar::parallax_altitude_correction(altitude, distance_km);
        }

        BodyGeometry {
            altitude_deg: altitude,
            azimuth_deg: azimuth,
            ecliptic_longitude_deg: longitude,
            hour_angle_hours: frames::hour_angle_degrees(lst, ra) / 15.0,
        }
    }

    /// Geocentric apparent ecliptic longitude of the Sun, degrees in
    /// [0, 360). The solar-return residual evaluates this directly so the
    /// search target and the search function share one definition.
    pub fn sun_ecliptic_longitude(&self, jd: JulianDate) -> f64 {
        solar::apparent_longitude(jd.centuries_since_j2000())
    }

    /// Sun-Moon elongation in ecliptic longitude, degrees in [0, 360).
    /// 0° at new moon, 180° at full moon.
    pub fn moon_sun_elongation(&self, jd: JulianDate) -> f64 {
        let t = jd.centuries_since_j2000();
        let moon = lunar::position(t).longitude_deg;
        let sun = solar::true_longitude(t);
        normalize_degrees(moon - sun)
    }

    /// Local apparent sidereal time in hours for an observer, used by the
    /// ascendant computation.
    pub fn local_sidereal_hours(&self, jd: JulianDate, longitude_east: f64) -> f64 {
        frames::local_sidereal_degrees(jd.value(), longitude_east) / 15.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{parse_civil_utc, GeoCoordinate};

    fn observer(lat: f64, lon: f64, date: &str, time: &str) -> Observer {
        Observer::new(
            GeoCoordinate::new(lat, lon),
            parse_civil_utc(date, time).unwrap(),
        )
    }

    #[test]
    fn test_load_succeeds() {
        Ephemeris::load().unwrap();
    }

    #[test]
    fn test_observe_sun_altitude_at_greenwich_noon() {
        // Summer solstice noon at Greenwich: Sun near upper culmination,
        // altitude ≈ 90 - 51.48 + 23.44 ≈ 62°
        let eph = Ephemeris::load().unwrap();
        let obs = observer(51.4769, 0.0, "2024-06-20", "12:00:00");
        let geom = eph.observe(Body::Sun, &obs);
        assert!(
            (geom.altitude_deg - 62.0).abs() < 1.5,
            "altitude {}",
            geom.altitude_deg
        );
        // Near the meridian: azimuth close to south, hour angle near zero
        assert!((geom.azimuth_deg - 180.0).abs() < 5.0);
        assert!(geom.hour_angle_hours.abs() < 0.2);
    }

    #[test]
    fn test_observe_sun_below_horizon_at_midnight() {
        let eph = Ephemeris::load().unwrap();
        let obs = observer(51.4769, 0.0, "2024-06-21", "00:00:00");
        let geom = eph.observe(Body::Sun, &obs);
        assert!(geom.altitude_deg < 0.0);
    }

    #[test]
    fn test_observe_all_bodies_in_range() {
        let eph = Ephemeris::load().unwrap();
        let obs = observer(40.7, -74.0, "1990-05-15", "14:30:00");
        let mut bodies = vec![Body::Sun, Body::Moon];
        bodies.extend(Body::PLANETS);
        for body in bodies {
            let geom = eph.observe(body, &obs);
            assert!((-90.0..=90.0).contains(&geom.altitude_deg), "{:?}", body);
            assert!((0.0..360.0).contains(&geom.azimuth_deg), "{:?}", body);
            assert!(
                (0.0..360.0).contains(&geom.ecliptic_longitude_deg),
                "{:?}",
                body
            );
            assert!(
                geom.hour_angle_hours > -12.0 && geom.hour_angle_hours <= 12.0,
                "{:?}",
                body
            );
        }
    }

    #[test]
    fn test_sun_longitude_mid_may_is_taurus_sector() {
        let eph = Ephemeris::load().unwrap();
        let jd = JulianDate::from_datetime(parse_civil_utc("1990-05-15", "14:30:00").unwrap());
        let lon = eph.sun_ecliptic_longitude(jd);
        assert!((30.0..60.0).contains(&lon), "got {}", lon);
    }

    #[test]
    fn test_elongation_at_known_full_moon() {
        // 2025-01-13 ~22:27 UTC was a full moon
        let eph = Ephemeris::load().unwrap();
        let jd = JulianDate::from_datetime(parse_civil_utc("2025-01-13", "22:00:00").unwrap());
        let elong = eph.moon_sun_elongation(jd);
        assert!(
            (elong - 180.0).abs() < 10.0,
            "full-moon elongation {}",
            elong
        );
    }

    #[test]
    fn test_elongation_at_known_new_moon() {
        // 2024-04-08 was the total-eclipse new moon (~18:20 UTC)
        let eph = Ephemeris::load().unwrap();
        let jd = JulianDate::from_datetime(parse_civil_utc("2024-04-08", "18:20:00").unwrap());
        let elong = eph.moon_sun_elongation(jd);
        let from_zero = elong.min(360.0 - elong);
        assert!(from_zero < 5.0, "new-moon elongation {}", elong);
    }

    #[test]
    fn test_observe_is_pure() {
        let eph = Ephemeris::load().unwrap();
        let obs = observer(28.7624, -17.8892, "2020-02-02", "02:02:02");
        let a = eph.observe(Body::Mars, &obs);
        let b = eph.observe(Body::Mars, &obs);
        assert_eq!(a.ecliptic_longitude_deg, b.ecliptic_longitude_deg);
        assert_eq!(a.altitude_deg, b.altitude_deg);
        assert_eq!(a.azimuth_deg, b.azimuth_deg);
        assert_eq!(a.hour_angle_hours, b.hour_angle_hours);
    }
}
