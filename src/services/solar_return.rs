//! Solar-return root finder backing `POST /solar-return`.
//!
//! Locates the instant in a target year at which the Sun's ecliptic
//! longitude returns to its value at a birth instant. The residual is
//! monotonic over the ±2-day anniversary window (the Sun advances ~1°/day)
//! so a fixed-step bisection brackets and converges deterministically.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};

use crate::ephemeris::Ephemeris;
use crate::error::{AstroError, AstroResult};
use crate::models::{normalize_signed_degrees, JulianDate, Observer};

/// Half-width of the search window around the anniversary, days.
const SEARCH_WINDOW_DAYS: i64 = 2;

/// Fixed bisection step count. 4 days / 2^20 ≈ 0.33 s of time resolution,
/// ≈ 4e-6° of solar longitude.
const BISECTION_STEPS: usize = 20;

/// Find the solar-return instant for a birth observer in a target year.
///
/// Fails with [`AstroError::NoRootInSearchWindow`] when the residual does
/// not change sign across the window, and with
/// [`AstroError::DateTimeParse`] when the anniversary date does not exist
/// in the target year (Feb 29 births in non-leap years).
pub fn find_solar_return(
    ephemeris: &Ephemeris,
    birth: &Observer,
    target_year: i32,
) -> AstroResult<DateTime<Utc>> {
    let birth_jd = JulianDate::from_datetime(birth.instant);
    let target_longitude = ephemeris.sun_ecliptic_longitude(birth_jd);

    let anniversary = NaiveDate::from_ymd_opt(target_year, birth.instant.month(), birth.instant.day())
        .ok_or_else(|| AstroError::DateTimeParse {
            input: format!(
                "{}-{:02}-{:02}",
                target_year,
                birth.instant.month(),
                birth.instant.day()
            ),
            reason: "anniversary date does not exist in target year".to_string(),
        })?
        .and_time(NaiveTime::MIN)
        .and_utc();

    let window_start = anniversary - Duration::days(SEARCH_WINDOW_DAYS);
    let window_end = anniversary + Duration::days(SEARCH_WINDOW_DAYS);

    let residual = |jd: f64| {
        normalize_signed_degrees(
            ephemeris.sun_ecliptic_longitude(JulianDate::new(jd)) - target_longitude,
        )
    };

    let best = bisect_root(
        residual,
        JulianDate::from_datetime(window_start).value(),
        JulianDate::from_datetime(window_end).value(),
    )
    .map_err(|detail| {
        AstroError::NoRootInSearchWindow(format!(
            "{} around {}",
            detail,
            anniversary.format("%Y-%m-%d")
        ))
    })?;

    Ok(JulianDate::new(best).to_datetime())
}

/// Fixed-step bisection over a bracketing interval.
///
/// Requires the residual to change sign between the endpoints; returns
/// the final midpoint after 20 halvings, or earlier on an exact zero.
/// A same-sign bracket is an error, never a guess.
pub fn bisect_root<F>(residual: F, mut low: f64, mut high: f64) -> Result<f64, String>
where
    F: Fn(f64) -> f64,
{
    let mut y_low = residual(low);
    let y_high = residual(high);

    if y_low * y_high > 0.0 {
        return Err(format!(
            "residuals {:.4} and {:.4} do not bracket a sign change",
            y_low, y_high
        ));
    }

    let mut best = low;
    for _ in 0..BISECTION_STEPS {
        let mid = (low + high) / 2.0;
        let y_mid = residual(mid);
        best = mid;
        if y_mid == 0.0 {
            break;
        }
        if y_low * y_mid < 0.0 {
            high = mid;
        } else {
            low = mid;
            y_low = y_mid;
        }
    }

    Ok(best)
}
