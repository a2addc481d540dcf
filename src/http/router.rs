//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression,
//! tracing), and creates the axum router ready for serving.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;
use crate::routes::{alignment, arroyo, chart, solar_return};

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::root))
        .route("/api/health", get(handlers::health))
        .route(chart::ANALYZE_PATH, post(handlers::analyze))
        .route(solar_return::SOLAR_RETURN_PATH, post(handlers::solar_return))
        .route(
            alignment::PERFECT_ALIGNMENT_PATH,
            post(handlers::perfect_alignment),
        )
        .route(arroyo::ARROYO_ANALYSIS_PATH, post(handlers::arroyo_analysis))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
