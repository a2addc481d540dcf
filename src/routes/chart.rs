use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Resolved event coordinates echoed back to the caller.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CoordinatesDto {
    pub latitude: f64,
    pub longitude: f64,
}

/// Apparent solar geometry for the event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SunPositionDto {
    pub azimuth: f64,
    pub altitude: f64,
    /// Zodiac sector name (kept under the wire name the frontend expects)
    pub constellation: String,
    pub longitude: f64,
}

/// Moon phase summary. The constellation slot is not computed and always
/// carries "Unknown".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoonPositionDto {
    pub phase: String,
    pub constellation: String,
}

/// One planet's ecliptic placement.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanetPositionDto {
    pub longitude: f64,
    pub zodiac_sign: String,
    /// Degrees into the sign, [0, 30)
    pub degree: f64,
}

/// Full chart response for `POST /analyze`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AstroChartData {
    pub coordinates: CoordinatesDto,
    pub true_solar_time: String,
    pub civil_time_difference: String,
    pub sun_position: SunPositionDto,
    pub zodiac_sign: String,
    pub moon_position: MoonPositionDto,
    /// Mercury through Pluto, exactly eight entries
    pub planets: BTreeMap<String, PlanetPositionDto>,
    pub cosmic_fact: String,
    /// Not computed by this service; fixed placeholder
    pub equation_of_time: String,
    /// Accepted on input for frontend compatibility, never populated
    pub temperature: String,
}

/// Route path constant
pub const ANALYZE_PATH: &str = "/analyze";
