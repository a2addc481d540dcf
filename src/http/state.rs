//! Application state for the HTTP server.

use std::sync::Arc;

use crate::ephemeris::Ephemeris;
use crate::geocode::Geocoder;

/// Shared application state passed to all handlers.
///
/// The ephemeris is the process-wide read-only singleton loaded at
/// startup; the geocoder is the injected resolution capability (swapped
/// for a scripted double in tests).
#[derive(Clone)]
pub struct AppState {
    pub ephemeris: Arc<Ephemeris>,
    pub geocoder: Arc<dyn Geocoder>,
}

impl AppState {
    /// Create a new application state from the loaded ephemeris and a
    /// geocoding backend.
    pub fn new(ephemeris: Arc<Ephemeris>, geocoder: Arc<dyn Geocoder>) -> Self {
        Self {
            ephemeris,
            geocoder,
        }
    }
}
