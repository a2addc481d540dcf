use std::sync::Arc;

use async_trait::async_trait;

use geoastro_rust::ephemeris::Ephemeris;
use geoastro_rust::geocode::{GeocodeError, Geocoder, ReverseAddress, ReverseGeocodeResult};
use geoastro_rust::http::AppState;
use geoastro_rust::models::GeoCoordinate;

/// Deterministic geocoder double: one fixed forward hit and one fixed
/// reverse result, independent of the query.
pub struct MockGeocoder {
    pub forward: Option<GeoCoordinate>,
    pub reverse: Option<ReverseGeocodeResult>,
}

impl MockGeocoder {
    /// Resolves everything to New York City, reverse lookups included.
    pub fn new_york() -> Self {
        Self {
            forward: Some(GeoCoordinate::new(40.7128, -74.0060)),
            reverse: Some(ReverseGeocodeResult {
                address: ReverseAddress {
                    city: Some("New York".to_string()),
                    country: Some("United States".to_string()),
                    country_code: Some("us".to_string()),
                    ..Default::default()
                },
                display_name: Some("New York, United States".to_string()),
            }),
        }
    }

    /// Never resolves anything.
    pub fn empty() -> Self {
        Self {
            forward: None,
            reverse: None,
        }
    }
}

#[async_trait]
impl Geocoder for MockGeocoder {
    async fn geocode(&self, _query: &str) -> Result<Option<GeoCoordinate>, GeocodeError> {
        Ok(self.forward)
    }

    async fn reverse(
        &self,
        _coordinate: GeoCoordinate,
    ) -> Result<Option<ReverseGeocodeResult>, GeocodeError> {
        Ok(self.reverse.clone())
    }
}

/// Application state over the real ephemeris and a given geocoder double.
pub fn test_state(geocoder: MockGeocoder) -> AppState {
    let ephemeris = Arc::new(Ephemeris::load().expect("ephemeris self-check"));
    AppState::new(ephemeris, Arc::new(geocoder))
}
