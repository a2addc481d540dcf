//! Request bodies for the HTTP API.
//!
//! Response types live with their routes (see [`crate::routes`]) and are
//! re-exported from [`crate::api`]. Field names mirror the existing wire
//! contract exactly, including its mixed naming conventions: `/analyze`
//! uses camelCase extras, the other endpoints snake_case.

use serde::{Deserialize, Serialize};

/// Request body for `POST /analyze`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub city: String,
    pub state: String,
    pub country: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM` or `HH:MM:SS`
    pub time: String,
    /// Accepted for frontend compatibility; not used in computation
    #[serde(default)]
    pub temperature: Option<String>,
    /// Accepted for frontend compatibility; not used in computation
    #[serde(rename = "useHistoricalTemperature", default)]
    pub use_historical_temperature: bool,
}

/// Request body for `POST /solar-return`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolarReturnRequest {
    pub birth_date: String,
    pub birth_time: String,
    pub target_year: i32,
    pub city: String,
    pub country: String,
    #[serde(default)]
    pub state: Option<String>,
}

/// Request body for `POST /perfect-alignment`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerfectAlignmentRequest {
    pub birth_date: String,
    pub birth_time: String,
    pub birth_city: String,
    pub birth_country: String,
    #[serde(default)]
    pub birth_state: Option<String>,
    /// ISO-8601 target instant, typically a `/solar-return` output
    pub solar_return: String,
}

/// Request body for `POST /arroyo-analysis`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArroyoRequest {
    pub birth_date: String,
    pub birth_time: String,
    pub city: String,
    pub country: String,
    #[serde(default)]
    pub state: Option<String>,
}

/// Liveness response for `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootResponse {
    pub message: String,
}

/// Health check response for `GET /api/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Ephemeris engine state
    pub ephemeris: String,
}
