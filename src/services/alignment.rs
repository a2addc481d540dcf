//! Alignment inverse-solver backing `POST /perfect-alignment`.
//!
//! Finds the longitude at which the Sun's local hour angle at a target
//! instant equals the birth local hour angle. At longitude 0 the local
//! and Greenwich hour angles coincide, so one Greenwich observation gives
//! GHA and the solve is a subtraction:
//! `required_longitude = LHA_birth - GHA_target`, folded into (-180, 180].
//! Latitude is held at the birth latitude; this does not preserve the
//! birth declination geometry exactly and is kept as documented behavior.

use chrono::{DateTime, Utc};

use crate::ephemeris::{Body, Ephemeris};
use crate::geocode::{self, Geocoder};
use crate::models::{normalize_signed_degrees, GeoCoordinate, Observer};
use crate::routes::alignment::AlignmentData;
use crate::routes::chart::CoordinatesDto;

/// Geometric part of the solve, before any naming.
#[derive(Debug, Clone, Copy)]
pub struct AlignmentSolution {
    pub coordinate: GeoCoordinate,
    pub birth_sun_altitude_deg: f64,
    pub birth_sun_azimuth_deg: f64,
}

/// Best-effort name for a coordinate after the layered fallback.
#[derive(Debug, Clone)]
pub struct ResolvedPlaceName {
    pub city: String,
    pub country: String,
    pub country_code: Option<String>,
}

/// Solve for the recurrence longitude of the birth solar hour angle.
pub fn solve_alignment(
    ephemeris: &Ephemeris,
    birth: &Observer,
    target_instant: DateTime<Utc>,
) -> AlignmentSolution {
    let birth_sun = ephemeris.observe(Body::Sun, birth);
    let birth_lha_deg = birth_sun.hour_angle_hours * 15.0;

    // Observed from longitude 0 the local hour angle *is* the Greenwich
    // hour angle.
    let greenwich = Observer::new(GeoCoordinate::new(0.0, 0.0), target_instant);
    let target_gha_deg = ephemeris.observe(Body::Sun, &greenwich).hour_angle_hours * 15.0;

    let required_longitude = normalize_signed_degrees(birth_lha_deg - target_gha_deg);

    AlignmentSolution {
        coordinate: GeoCoordinate::new(birth.coordinate.latitude, required_longitude),
        birth_sun_altitude_deg: birth_sun.altitude_deg,
        birth_sun_azimuth_deg: birth_sun.azimuth_deg,
    }
}

/// Name a coordinate through the layered fallback chain:
/// address fields, display-name parsing, ocean/sea heuristic, static
/// bounding boxes, and finally a raw-coordinate string. Provider errors
/// never propagate out of here.
pub async fn name_coordinate(
    geocoder: &dyn Geocoder,
    coordinate: GeoCoordinate,
) -> ResolvedPlaceName {
    let reverse = geocode::reverse_best_effort(geocoder, coordinate).await;

    let mut city: Option<String> = None;
    let mut country: Option<String> = None;
    let mut country_code: Option<String> = None;

    if let Some(result) = &reverse {
        city = result.address.locality();
        country = result
            .address
            .country
            .clone()
            .filter(|c| !c.trim().is_empty());
        country_code = result.address.country_code.clone();

        // Free-text fallback: first display-name component
        if city.is_none() {
            city = result
                .display_name
                .as_deref()
                .and_then(|name| name.split(',').next())
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(str::to_string);
        }

        // Open-water hits often name only the sea or ocean
        if city.is_none() {
            city = result.display_name.as_deref().and_then(|name| {
                name.split(',')
                    .map(str::trim)
                    .find(|part| part.contains("Ocean") || part.contains("Sea"))
                    .map(str::to_string)
            });
        }
    }

    let city = city.unwrap_or_else(|| "Unknown".to_string());

    let country = match country {
        Some(country) => country,
        None => {
            let lat = coordinate.latitude;
            let lon = coordinate.longitude;
            if (50.0..=80.0).contains(&lat) && (20.0..=180.0).contains(&lon) {
                country_code = Some("ru".to_string());
                "Russia".to_string()
            } else if (-10.0..=60.0).contains(&lat) && (-10.0..=40.0).contains(&lon) {
                "Europe/Africa".to_string()
            } else if (25.0..=50.0).contains(&lat) && (-130.0..=-65.0).contains(&lon) {
                country_code = Some("us".to_string());
                "United States".to_string()
            } else {
                format!("Coordinates: {:.2}°, {:.2}°", lat, lon)
            }
        }
    };

    ResolvedPlaceName {
        city,
        country,
        country_code,
    }
}

/// Full alignment computation: solve the longitude, name the point, and
/// assemble the response.
pub async fn compute_alignment(
    ephemeris: &Ephemeris,
    geocoder: &dyn Geocoder,
    birth: &Observer,
    target_instant: DateTime<Utc>,
) -> AlignmentData {
    let solution = solve_alignment(ephemeris, birth, target_instant);
    let name = name_coordinate(geocoder, solution.coordinate).await;

    let local_date = target_instant.format("%Y-%m-%d").to_string();
    let local_time = target_instant.format("%H:%M:%S").to_string();

    let reasoning = format!(
        "Optimal location where solar geometry at {} matches birth alignment. \
         Sun altitude: {:.1}°, azimuth: {:.1}°.",
        local_date, solution.birth_sun_altitude_deg, solution.birth_sun_azimuth_deg
    );

    AlignmentData {
        city: name.city,
        country: name.country,
        country_code: name.country_code,
        coordinates: CoordinatesDto {
            latitude: solution.coordinate.latitude,
            longitude: solution.coordinate.longitude,
        },
        reasoning,
        local_date_at_return: local_date,
        local_time_at_return: local_time,
    }
}
