//! # GeoAstro Rust Backend
//!
//! Astronomical and astrological derived quantities computed from a birth
//! or event date/time and a geocoded location, exposed over a small REST
//! API via Axum.
//!
//! ## Features
//!
//! - **Chart analysis**: apparent solar geometry, zodiac placement, moon
//!   phase, planetary ecliptic longitudes, true solar time
//! - **Solar return**: bisection search for the instant the Sun returns
//!   to its birth longitude in a target year
//! - **Perfect alignment**: inverse solve for the longitude where the
//!   birth solar hour angle recurs, with reverse-geocoded naming
//! - **Arroyo analysis**: weighted element/modality temperament scoring
//! - **HTTP API**: RESTful endpoints for the React frontend
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: Data Transfer Objects (DTOs) for API responses
//! - [`models`]: time-scale and geographic value types
//! - [`ephemeris`]: analytic ephemeris engine behind a single `observe`
//!   capability, loaded once at startup and shared read-only
//! - [`astrology`]: pure derivation functions over raw geometry
//! - [`geocode`]: location resolution capability with tiered fallback
//! - [`services`]: request-level computation behind each endpoint
//! - [`http`]: Axum-based HTTP server and request handlers
//!
//! Every request is computed independently and statelessly: value types
//! are built per request and discarded with the response. The only shared
//! state is the immutable ephemeris.

pub mod api;

pub mod astrology;
pub mod ephemeris;
pub mod error;
pub mod geocode;
pub mod models;

pub mod routes;

pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
