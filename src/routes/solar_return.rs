use serde::{Deserialize, Serialize};

/// Response for `POST /solar-return`.
///
/// The instant at which the Sun's ecliptic longitude returns to its birth
/// value in the target year, ISO-8601 UTC. Nullable on the wire for
/// compatibility with older clients, though a missing root is reported as
/// a request failure rather than a null.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolarReturnData {
    pub solar_return: Option<String>,
}

/// Route path constant
pub const SOLAR_RETURN_PATH: &str = "/solar-return";
