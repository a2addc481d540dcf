//! Chart computation service backing `POST /analyze`.
//!
//! Pure function of resolved coordinates and a parsed UTC instant: one
//! ephemeris pass for the Sun, the Moon phase, and the eight planets,
//! then string derivations on top.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::astrology::{self, MoonPhase, ZodiacSign};
use crate::ephemeris::{Body, Ephemeris};
use crate::models::{decimal_hours, GeoCoordinate, JulianDate, Observer};
use crate::routes::chart::{
    AstroChartData, CoordinatesDto, MoonPositionDto, PlanetPositionDto, SunPositionDto,
};

/// Compute the full chart for an event.
pub fn compute_chart(
    ephemeris: &Ephemeris,
    coordinate: GeoCoordinate,
    instant: DateTime<Utc>,
) -> AstroChartData {
    let observer = Observer::new(coordinate, instant);
    let jd = JulianDate::from_datetime(instant);

    let sun = ephemeris.observe(Body::Sun, &observer);
    let solar_hours = (sun.hour_angle_hours + 12.0).rem_euclid(24.0);
    let true_solar_time = astrology::true_solar_time(sun.hour_angle_hours);
    let civil_time_difference = astrology::civil_offset(solar_hours, decimal_hours(instant));

    let zodiac_sign = ZodiacSign::from_longitude(sun.ecliptic_longitude_deg);
    let moon_phase = MoonPhase::from_elongation(ephemeris.moon_sun_elongation(jd));

    let planets: BTreeMap<String, PlanetPositionDto> = Body::PLANETS
        .iter()
        .map(|&body| {
            let geometry = ephemeris.observe(body, &observer);
            let longitude = geometry.ecliptic_longitude_deg;
            (
                body.name().to_string(),
                PlanetPositionDto {
                    longitude,
                    zodiac_sign: ZodiacSign::from_longitude(longitude).name().to_string(),
                    degree: longitude.rem_euclid(30.0),
                },
            )
        })
        .collect();

    AstroChartData {
        coordinates: CoordinatesDto {
            latitude: coordinate.latitude,
            longitude: coordinate.longitude,
        },
        true_solar_time,
        civil_time_difference,
        sun_position: SunPositionDto {
            azimuth: sun.azimuth_deg,
            altitude: sun.altitude_deg,
            constellation: zodiac_sign.name().to_string(),
            longitude: sun.ecliptic_longitude_deg,
        },
        zodiac_sign: zodiac_sign.name().to_string(),
        moon_position: MoonPositionDto {
            phase: moon_phase.name().to_string(),
            constellation: "Unknown".to_string(),
        },
        planets,
        cosmic_fact: astrology::cosmic_fact(zodiac_sign, moon_phase),
        equation_of_time: "N/A".to_string(),
        temperature: String::new(),
    }
}
