//! Crate-wide error type.
//!
//! A single `AstroError` enum covers every fallible library operation:
//! location resolution, date/time parsing, ephemeris loading, and the
//! solar-return root search. The axum layer wraps these in its own
//! `AppError` (see [`crate::http::error`]) for the wire contract.

use thiserror::Error;

/// Result alias for fallible library operations.
pub type AstroResult<T> = std::result::Result<T, AstroError>;

/// Errors produced by the geoastro library.
#[derive(Debug, Error)]
pub enum AstroError {
    /// No geocoding tier could resolve the requested place.
    #[error("could not resolve location for {query}")]
    LocationNotFound {
        /// The query that failed to resolve.
        query: String,
    },

    /// A civil or ISO date/time string could not be parsed.
    #[error("invalid date/time '{input}': {reason}")]
    DateTimeParse {
        /// The raw input that failed to parse.
        input: String,
        /// Why parsing failed.
        reason: String,
    },

    /// The analytic ephemeris could not be loaded or validated.
    #[error("ephemeris unavailable: {0}")]
    EphemerisUnavailable(String),

    /// The solar-return bisection found no root in its search window.
    #[error("no root in search window: {0}")]
    NoRootInSearchWindow(String),

    /// The geocoding collaborator returned an error rather than a miss.
    #[error("geocoding error: {0}")]
    Geocode(String),
}
