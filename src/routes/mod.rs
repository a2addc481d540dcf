pub mod alignment;
pub mod arroyo;
pub mod chart;
pub mod solar_return;
