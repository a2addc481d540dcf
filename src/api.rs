//! Public API surface for the Rust backend.
//!
//! This file consolidates the DTO types for the HTTP API.
//! All types derive Serialize/Deserialize for JSON serialization.

pub use crate::routes::alignment::AlignmentData;
pub use crate::routes::arroyo::ArroyoData;
pub use crate::routes::arroyo::ArroyoPositionDto;
pub use crate::routes::arroyo::ArroyoScores;
pub use crate::routes::chart::AstroChartData;
pub use crate::routes::chart::CoordinatesDto;
pub use crate::routes::chart::MoonPositionDto;
pub use crate::routes::chart::PlanetPositionDto;
pub use crate::routes::chart::SunPositionDto;
pub use crate::routes::solar_return::SolarReturnData;

pub use crate::error::{AstroError, AstroResult};
pub use crate::models::{GeoCoordinate, JulianDate, Observer, Place};
