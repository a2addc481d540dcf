use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Geographic coordinate in decimal degrees.
///
/// Latitude is in [-90, 90], longitude in (-180, 180].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoCoordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Structured address fragment used as geocoding input.
///
/// Never persisted; it exists only to build provider queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Place {
    pub city: String,
    pub country: String,
    pub state: Option<String>,
}

impl Place {
    pub fn new(city: impl Into<String>, country: impl Into<String>, state: Option<String>) -> Self {
        Self {
            city: city.into(),
            country: country.into(),
            state,
        }
    }
}

/// Earth-surface observer at an instant.
///
/// Ephemeral: constructed fresh per request, never cached.
#[derive(Debug, Clone, Copy)]
pub struct Observer {
    pub coordinate: GeoCoordinate,
    pub instant: DateTime<Utc>,
}

impl Observer {
    pub fn new(coordinate: GeoCoordinate, instant: DateTime<Utc>) -> Self {
        Self {
            coordinate,
            instant,
        }
    }
}

/// Normalize an angle into [0, 360).
pub fn normalize_degrees(deg: f64) -> f64 {
    deg.rem_euclid(360.0)
}

/// Normalize a signed angular difference into (-180, 180].
pub fn normalize_signed_degrees(deg: f64) -> f64 {
    let d = deg.rem_euclid(360.0);
    if d > 180.0 {
        d - 360.0
    } else {
        d
    }
}
