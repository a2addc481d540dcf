use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Accumulated element and modality scores, keyed the way the frontend
/// reads them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ArroyoScores {
    pub fire: u32,
    pub earth: u32,
    pub air: u32,
    pub water: u32,
    pub cardinal: u32,
    pub fixed: u32,
    pub mutable: u32,
}

/// One body's zodiac placement in the temperament analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArroyoPositionDto {
    pub sign: String,
    pub longitude: f64,
}

/// Response for `POST /arroyo-analysis`: weighted element/modality
/// temperament scoring over eleven bodies (Sun, Moon, eight planets, and
/// the Ascendant).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArroyoData {
    pub scores: ArroyoScores,
    pub positions: BTreeMap<String, ArroyoPositionDto>,
    pub dominant_element: String,
    pub dominant_modality: String,
    pub interpretation: String,
}

/// Route path constant
pub const ARROYO_ANALYSIS_PATH: &str = "/arroyo-analysis";
