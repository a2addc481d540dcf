//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to one endpoint: it resolves the event
//! location through the geocoding capability, parses the civil instant,
//! and delegates the computation to the service layer. CPU-bound chart
//! work runs under `spawn_blocking` so the worker pool stays responsive.

use std::sync::Arc;

use axum::{extract::State, Json};

use super::dto::{
    AnalyzeRequest, ArroyoRequest, HealthResponse, PerfectAlignmentRequest, RootResponse,
    SolarReturnRequest,
};
use super::error::AppError;
use super::state::AppState;
use crate::ephemeris::Ephemeris;
use crate::geocode;
use crate::models::{self, GeoCoordinate, Observer, Place};
use crate::routes::alignment::AlignmentData;
use crate::routes::arroyo::ArroyoData;
use crate::routes::chart::AstroChartData;
use crate::routes::solar_return::SolarReturnData;
use crate::services;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// Run a CPU-bound computation off the async workers.
async fn run_blocking<T, F>(f: F) -> Result<T, AppError>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))
}

/// Resolve a place through the tiered geocoding policy. Empty state
/// strings count as no state.
async fn resolve(
    state: &AppState,
    city: &str,
    country: &str,
    region: Option<&str>,
) -> Result<GeoCoordinate, AppError> {
    let place = Place::new(
        city,
        country,
        region
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
    );
    Ok(geocode::resolve_location(state.geocoder.as_ref(), &place).await?)
}

// =============================================================================
// Liveness
// =============================================================================

/// GET /
///
/// Liveness message for the root path.
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "GeoAstro Compute API is running".to_string(),
    })
}

/// GET /api/health
///
/// Health check endpoint: the service is up and the ephemeris singleton
/// is loaded (its presence in state proves the startup check passed).
pub async fn health(State(_state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        ephemeris: "loaded".to_string(),
    })
}

// =============================================================================
// Computation endpoints
// =============================================================================

/// POST /analyze
///
/// Full chart for an event: solar geometry, zodiac sign, moon phase,
/// planetary longitudes, and derived clock strings.
pub async fn analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> HandlerResult<AstroChartData> {
    let coordinate = resolve(
        &state,
        &request.city,
        &request.country,
        Some(request.state.as_str()),
    )
    .await?;
    let instant = models::parse_civil_utc(&request.date, &request.time)?;

    let ephemeris: Arc<Ephemeris> = state.ephemeris.clone();
    let chart = run_blocking(move || services::compute_chart(&ephemeris, coordinate, instant))
        .await?;

    Ok(Json(chart))
}

/// POST /solar-return
///
/// Instant in the target year when the Sun returns to the birth ecliptic
/// longitude.
pub async fn solar_return(
    State(state): State<AppState>,
    Json(request): Json<SolarReturnRequest>,
) -> HandlerResult<SolarReturnData> {
    let coordinate = resolve(
        &state,
        &request.city,
        &request.country,
        request.state.as_deref(),
    )
    .await?;
    let instant = models::parse_civil_utc(&request.birth_date, &request.birth_time)?;
    let birth = Observer::new(coordinate, instant);
    let target_year = request.target_year;

    let ephemeris: Arc<Ephemeris> = state.ephemeris.clone();
    let found =
        run_blocking(move || services::find_solar_return(&ephemeris, &birth, target_year))
            .await??;

    Ok(Json(SolarReturnData {
        solar_return: Some(models::format_iso_z(found)),
    }))
}

/// POST /perfect-alignment
///
/// Longitude at which the birth solar hour angle recurs at the target
/// instant, with a best-effort reverse-geocoded name.
pub async fn perfect_alignment(
    State(state): State<AppState>,
    Json(request): Json<PerfectAlignmentRequest>,
) -> HandlerResult<AlignmentData> {
    let coordinate = resolve(
        &state,
        &request.birth_city,
        &request.birth_country,
        request.birth_state.as_deref(),
    )
    .await?;
    let birth_instant = models::parse_civil_utc(&request.birth_date, &request.birth_time)?;
    let target_instant = models::parse_iso_utc(&request.solar_return)?;
    let birth = Observer::new(coordinate, birth_instant);

    let data = services::compute_alignment(
        state.ephemeris.as_ref(),
        state.geocoder.as_ref(),
        &birth,
        target_instant,
    )
    .await;

    Ok(Json(data))
}

/// POST /arroyo-analysis
///
/// Weighted element/modality temperament scores over eleven bodies.
pub async fn arroyo_analysis(
    State(state): State<AppState>,
    Json(request): Json<ArroyoRequest>,
) -> HandlerResult<ArroyoData> {
    let coordinate = resolve(
        &state,
        &request.city,
        &request.country,
        request.state.as_deref(),
    )
    .await?;
    let instant = models::parse_civil_utc(&request.birth_date, &request.birth_time)?;

    let ephemeris: Arc<Ephemeris> = state.ephemeris.clone();
    let data = run_blocking(move || services::compute_arroyo(&ephemeris, coordinate, instant))
        .await?;

    Ok(Json(data))
}
