use serde::{Deserialize, Serialize};

use super::chart::CoordinatesDto;

/// Response for `POST /perfect-alignment`: the point on Earth where the
/// birth solar hour angle recurs at the target instant, with a
/// best-effort place name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlignmentData {
    pub city: String,
    pub country: String,
    pub country_code: Option<String>,
    pub coordinates: CoordinatesDto,
    pub reasoning: String,
    pub local_date_at_return: String,
    pub local_time_at_return: String,
}

/// Route path constant
pub const PERFECT_ALIGNMENT_PATH: &str = "/perfect-alignment";
