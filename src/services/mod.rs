//! Service layer for request-level computation.
//!
//! Each module backs one endpoint and stays free of HTTP concerns: the
//! handlers resolve locations and parse inputs, then hand plain values to
//! these functions. Chart, solar-return, and arroyo computations are pure
//! and synchronous; the alignment service is async only because it names
//! its result through the geocoding capability.

pub mod alignment;
pub mod arroyo;
pub mod chart;
pub mod solar_return;

pub use alignment::compute_alignment;
pub use arroyo::compute_arroyo;
pub use chart::compute_chart;
pub use solar_return::find_solar_return;
