use chrono::{DateTime, NaiveDateTime, SecondsFormat, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AstroError, AstroResult};

/// Julian Date representation.
/// JD 2451545.0 = 2000-01-01 12:00:00 UTC (J2000.0)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct JulianDate(f64);

/// JD of the Unix epoch (1970-01-01 00:00:00 UTC).
const UNIX_EPOCH_JD: f64 = 2_440_587.5;

impl JulianDate {
    /// The J2000.0 reference epoch.
    pub const J2000: JulianDate = JulianDate(2_451_545.0);

    /// Create a new Julian Date value.
    pub fn new(v: f64) -> Self {
        Self(v)
    }

    /// Raw JD value as f64.
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Julian centuries elapsed since J2000.0.
    pub fn centuries_since_j2000(&self) -> f64 {
        (self.0 - Self::J2000.0) / 36525.0
    }

    /// Days elapsed since J2000.0.
    pub fn days_since_j2000(&self) -> f64 {
        self.0 - Self::J2000.0
    }

    /// Convert to Unix timestamp (seconds since 1970-01-01 00:00:00 UTC).
    pub fn to_unix_timestamp(&self) -> f64 {
        (self.0 - UNIX_EPOCH_JD) * 86400.0
    }

    /// Create from Unix timestamp (seconds since 1970-01-01 00:00:00 UTC).
    pub fn from_unix_timestamp(timestamp: f64) -> Self {
        Self(timestamp / 86400.0 + UNIX_EPOCH_JD)
    }

    /// Convert to chrono DateTime<Utc>.
    pub fn to_datetime(&self) -> DateTime<Utc> {
        let secs = self.to_unix_timestamp();
        let secs_i64 = secs.floor() as i64;
        let nanos = ((secs - secs.floor()) * 1e9) as u32;
        DateTime::from_timestamp(secs_i64, nanos).unwrap_or(DateTime::UNIX_EPOCH)
    }

    /// Create from chrono DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self::from_unix_timestamp(dt.timestamp() as f64 + dt.timestamp_subsec_nanos() as f64 / 1e9)
    }
}

impl From<f64> for JulianDate {
    fn from(v: f64) -> Self {
        JulianDate::new(v)
    }
}

/// Parse a civil date + clock string pair as a UTC instant.
///
/// Accepts `YYYY-MM-DD HH:MM:SS` first, then falls back to
/// `YYYY-MM-DD HH:MM`. The instant is always interpreted as UTC; no
/// timezone lookup is performed from the event's coordinates.
pub fn parse_civil_utc(date: &str, time: &str) -> AstroResult<DateTime<Utc>> {
    let combined = format!("{} {}", date, time);
    let naive = NaiveDateTime::parse_from_str(&combined, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(&combined, "%Y-%m-%d %H:%M"))
        .map_err(|e| AstroError::DateTimeParse {
            input: combined.clone(),
            reason: e.to_string(),
        })?;
    Ok(naive.and_utc())
}

/// Parse an ISO-8601 timestamp into a UTC instant.
///
/// Accepts both `Z` and explicit-offset suffixes.
pub fn parse_iso_utc(input: &str) -> AstroResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(input)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| AstroError::DateTimeParse {
            input: input.to_string(),
            reason: e.to_string(),
        })
}

/// Format a UTC instant as ISO-8601 with `Z` suffix and whole seconds,
/// e.g. `2025-05-15T06:42:40Z`.
pub fn format_iso_z(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Decimal clock hours of a UTC instant (0.0 ..< 24.0).
pub fn decimal_hours(dt: DateTime<Utc>) -> f64 {
    dt.hour() as f64 + dt.minute() as f64 / 60.0 + dt.second() as f64 / 3600.0
}
