//! Location Resolution Adapter.
//!
//! Wraps the external geocoding collaborator behind the [`Geocoder`]
//! capability so request services stay decoupled from any particular
//! provider (and so tests can inject a scripted double). The production
//! implementation talks to a Nominatim-compatible HTTP endpoint.
//!
//! Policy lives here, not in the provider: forward resolution tries
//! `"{city}, {country}"` twice, then `"{state}, {country}"` twice, then
//! fails with `LocationNotFound`. Reverse resolution tries twice and
//! swallows provider errors: a missing name degrades, it never aborts a
//! request.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::error::{AstroError, AstroResult};
use crate::models::{GeoCoordinate, Place};

/// Attempts per query tier, forward and reverse.
const ATTEMPTS_PER_TIER: usize = 2;

/// Provider request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Default Nominatim endpoint and the user agent it requires.
pub const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";
pub const DEFAULT_USER_AGENT: &str = "geoastro_compute_v1_backend";

/// Errors from the geocoding provider.
#[derive(Error, Debug)]
pub enum GeocodeError {
    /// Transport-level failure (timeout, connection, HTTP status)
    #[error("geocoding request failed: {0}")]
    Request(String),

    /// Provider answered with something we cannot interpret
    #[error("geocoding response malformed: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for GeocodeError {
    fn from(err: reqwest::Error) -> Self {
        GeocodeError::Request(err.to_string())
    }
}

/// Address fields of a reverse-geocoding hit. All optional; Nominatim
/// populates whichever apply to the hit.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReverseAddress {
    pub city: Option<String>,
    pub town: Option<String>,
    pub village: Option<String>,
    pub hamlet: Option<String>,
    pub municipality: Option<String>,
    pub county: Option<String>,
    pub country: Option<String>,
    pub country_code: Option<String>,
}

impl ReverseAddress {
    /// Most specific locality name, in fixed priority order.
    pub fn locality(&self) -> Option<String> {
        [
            &self.city,
            &self.town,
            &self.village,
            &self.hamlet,
            &self.municipality,
            &self.county,
        ]
        .into_iter()
        .flatten()
        .find(|name| !name.trim().is_empty())
        .cloned()
    }
}

/// One reverse-geocoding result.
#[derive(Debug, Clone, Default)]
pub struct ReverseGeocodeResult {
    pub address: ReverseAddress,
    pub display_name: Option<String>,
}

/// Geocoding capability: free-text forward lookups and coordinate
/// reverse lookups. `Ok(None)` means the provider answered but had no
/// hit; `Err` means the provider could not be asked.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, query: &str) -> Result<Option<GeoCoordinate>, GeocodeError>;

    async fn reverse(
        &self,
        coordinate: GeoCoordinate,
    ) -> Result<Option<ReverseGeocodeResult>, GeocodeError>;
}

/// Resolve a place to coordinates with the tiered retry policy.
///
/// Both `Ok(None)` and `Err` count as failed attempts within a tier; the
/// state tier only runs when a non-empty state was supplied. Exhausting
/// every tier is a [`AstroError::LocationNotFound`].
pub async fn resolve_location(
    geocoder: &dyn Geocoder,
    place: &Place,
) -> AstroResult<GeoCoordinate> {
    let mut tally = AttemptTally::default();

    let city_query = format!("{}, {}", place.city, place.country);
    if let Some(coordinate) = query_tier(geocoder, &city_query, &mut tally).await {
        return Ok(coordinate);
    }

    let state = place.state.as_deref().filter(|s| !s.trim().is_empty());
    if let Some(state) = state {
        let state_query = format!("{}, {}", state, place.country);
        log::warn!("falling back to state query {:?}", state_query);
        if let Some(coordinate) = query_tier(geocoder, &state_query, &mut tally).await {
            return Ok(coordinate);
        }
    }

    // A provider that never answered anything is a provider problem, not
    // a missing place.
    if tally.errors == tally.attempts {
        if let Some(detail) = tally.last_error {
            return Err(AstroError::Geocode(detail));
        }
    }

    Err(AstroError::LocationNotFound {
        query: match state {
            Some(state) => format!("{}, {} (state fallback: {})", place.city, place.country, state),
            None => city_query,
        },
    })
}

/// Running record of how a resolution's attempts went.
#[derive(Default)]
struct AttemptTally {
    attempts: usize,
    errors: usize,
    last_error: Option<String>,
}

/// One query tier: up to [`ATTEMPTS_PER_TIER`] tries of a single query.
async fn query_tier(
    geocoder: &dyn Geocoder,
    query: &str,
    tally: &mut AttemptTally,
) -> Option<GeoCoordinate> {
    for attempt in 1..=ATTEMPTS_PER_TIER {
        tally.attempts += 1;
        match geocoder.geocode(query).await {
            Ok(Some(coordinate)) => return Some(coordinate),
            Ok(None) => {
                log::warn!("geocode miss for {:?} (attempt {})", query, attempt);
            }
            Err(e) => {
                log::warn!("geocode error for {:?} (attempt {}): {}", query, attempt, e);
                tally.errors += 1;
                tally.last_error = Some(e.to_string());
            }
        }
    }
    None
}

/// Reverse-geocode with retries, absorbing every failure into `None`.
pub async fn reverse_best_effort(
    geocoder: &dyn Geocoder,
    coordinate: GeoCoordinate,
) -> Option<ReverseGeocodeResult> {
    for attempt in 1..=ATTEMPTS_PER_TIER {
        match geocoder.reverse(coordinate).await {
            Ok(Some(result)) => return Some(result),
            Ok(None) => return None,
            Err(e) => {
                log::warn!(
                    "reverse geocode error at ({:.4}, {:.4}) attempt {}: {}",
                    coordinate.latitude,
                    coordinate.longitude,
                    attempt,
                    e
                );
            }
        }
    }
    None
}

/// Nominatim-backed implementation of [`Geocoder`].
pub struct NominatimGeocoder {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    lat: String,
    lon: String,
}

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    address: Option<ReverseAddress>,
}

impl NominatimGeocoder {
    /// Build a client against the given endpoint. The user agent is
    /// mandatory Nominatim etiquette.
    pub fn new(base_url: impl Into<String>, user_agent: &str) -> Result<Self, GeocodeError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Client for the public Nominatim endpoint.
    pub fn public() -> Result<Self, GeocodeError> {
        Self::new(DEFAULT_BASE_URL, DEFAULT_USER_AGENT)
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn geocode(&self, query: &str) -> Result<Option<GeoCoordinate>, GeocodeError> {
        let url = format!("{}/search", self.base_url);
        let hits: Vec<SearchHit> = self
            .client
            .get(&url)
            .query(&[("q", query), ("format", "json"), ("limit", "1")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let Some(hit) = hits.into_iter().next() else {
            return Ok(None);
        };
        let latitude: f64 = hit
            .lat
            .parse()
            .map_err(|_| GeocodeError::Malformed(format!("latitude {:?}", hit.lat)))?;
        let longitude: f64 = hit
            .lon
            .parse()
            .map_err(|_| GeocodeError::Malformed(format!("longitude {:?}", hit.lon)))?;
        Ok(Some(GeoCoordinate::new(latitude, longitude)))
    }

    async fn reverse(
        &self,
        coordinate: GeoCoordinate,
    ) -> Result<Option<ReverseGeocodeResult>, GeocodeError> {
        let url = format!("{}/reverse", self.base_url);
        let response: ReverseResponse = self
            .client
            .get(&url)
            .query(&[
                ("lat", coordinate.latitude.to_string()),
                ("lon", coordinate.longitude.to_string()),
                ("format", "json".to_string()),
                ("accept-language", "en".to_string()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        // Nominatim reports "Unable to geocode" for open ocean: a clean miss
        if response.error.is_some() {
            return Ok(None);
        }
        Ok(Some(ReverseGeocodeResult {
            address: response.address.unwrap_or_default(),
            display_name: response.display_name,
        }))
    }
}
