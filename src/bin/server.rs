//! GeoAstro HTTP Server Binary
//!
//! This is the main entry point for the GeoAstro REST API server.
//! It loads the ephemeris engine, builds the geocoding client, sets up
//! the HTTP router, and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin geoastro-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8000)
//! - `GEOCODER_BASE_URL`: Nominatim-compatible endpoint
//!   (default: https://nominatim.openstreetmap.org)
//! - `GEOCODER_USER_AGENT`: User agent sent to the geocoder
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use geoastro_rust::ephemeris::Ephemeris;
use geoastro_rust::geocode::{self, NominatimGeocoder};
use geoastro_rust::http::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .init();

    info!("Starting GeoAstro HTTP Server");

    // Load the ephemeris once; a failed self-check aborts startup.
    let ephemeris = Arc::new(Ephemeris::load().map_err(|e| anyhow::anyhow!(e))?);
    info!("Ephemeris engine loaded");

    // Geocoding client for the external resolution collaborator
    let base_url =
        env::var("GEOCODER_BASE_URL").unwrap_or_else(|_| geocode::DEFAULT_BASE_URL.to_string());
    let user_agent =
        env::var("GEOCODER_USER_AGENT").unwrap_or_else(|_| geocode::DEFAULT_USER_AGENT.to_string());
    let geocoder = Arc::new(
        NominatimGeocoder::new(base_url.as_str(), &user_agent).map_err(|e| anyhow::anyhow!(e))?,
    );
    info!("Geocoder configured for {}", base_url);

    // Create application state
    let state = AppState::new(ephemeris, geocoder);

    // Create router with all endpoints
    let app = create_router(state);

    // Determine bind address
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8000);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Server listening on http://{}", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
