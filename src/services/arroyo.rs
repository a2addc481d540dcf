//! Elemental/modality temperament analysis backing `POST /arroyo-analysis`.
//!
//! Scores eleven weighted bodies (Sun, Moon, the eight planets, and the
//! Ascendant) into the four elements and three modalities, then selects
//! a fixed interpretation paragraph for the dominant element.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::astrology::{
    ascendant_longitude, interpretation, Element, ElementScoreSet, Modality, WeightedPlacement,
    ZodiacSign,
};
use crate::ephemeris::{Body, Ephemeris};
use crate::models::{GeoCoordinate, JulianDate, Observer};
use crate::routes::arroyo::{ArroyoData, ArroyoPositionDto, ArroyoScores};

/// Luminaries and the Ascendant count double; everything else once.
const LUMINARY_WEIGHT: u32 = 2;
const PLANET_WEIGHT: u32 = 1;

/// Obliquity used by the ascendant closed form, degrees.
const ASCENDANT_OBLIQUITY_DEG: f64 = 23.44;

/// Compute the full temperament analysis for an event.
pub fn compute_arroyo(
    ephemeris: &Ephemeris,
    coordinate: GeoCoordinate,
    instant: DateTime<Utc>,
) -> ArroyoData {
    let observer = Observer::new(coordinate, instant);
    let jd = JulianDate::from_datetime(instant);

    let mut placements: Vec<WeightedPlacement> = Vec::with_capacity(11);

    for (body, weight) in [(Body::Sun, LUMINARY_WEIGHT), (Body::Moon, LUMINARY_WEIGHT)] {
        let longitude = ephemeris.observe(body, &observer).ecliptic_longitude_deg;
        placements.push(WeightedPlacement {
            body: body.name().to_string(),
            sign: ZodiacSign::from_longitude(longitude),
            longitude_deg: longitude,
            weight,
        });
    }

    for body in Body::PLANETS {
        let longitude = ephemeris.observe(body, &observer).ecliptic_longitude_deg;
        placements.push(WeightedPlacement {
            body: body.name().to_string(),
            sign: ZodiacSign::from_longitude(longitude),
            longitude_deg: longitude,
            weight: PLANET_WEIGHT,
        });
    }

    let lst_hours = ephemeris.local_sidereal_hours(jd, coordinate.longitude);
    let ascendant = ascendant_longitude(lst_hours, coordinate.latitude, ASCENDANT_OBLIQUITY_DEG);
    placements.push(WeightedPlacement {
        body: "Ascendant".to_string(),
        sign: ZodiacSign::from_longitude(ascendant),
        longitude_deg: ascendant,
        weight: LUMINARY_WEIGHT,
    });

    let scores = ElementScoreSet::from_placements(&placements);
    let dominant_element = scores.dominant_element();
    let weakest_element = scores.weakest_element();
    let dominant_modality = scores.dominant_modality();

    let positions: BTreeMap<String, ArroyoPositionDto> = placements
        .iter()
        .map(|p| {
            (
                p.body.clone(),
                ArroyoPositionDto {
                    sign: p.sign.name().to_string(),
                    longitude: p.longitude_deg,
                },
            )
        })
        .collect();

    ArroyoData {
        scores: ArroyoScores {
            fire: scores.element_score(Element::Fire),
            earth: scores.element_score(Element::Earth),
            air: scores.element_score(Element::Air),
            water: scores.element_score(Element::Water),
            cardinal: scores.modality_score(Modality::Cardinal),
            fixed: scores.modality_score(Modality::Fixed),
            mutable: scores.modality_score(Modality::Mutable),
        },
        positions,
        dominant_element: dominant_element.name().to_string(),
        dominant_modality: dominant_modality.name().to_string(),
        interpretation: interpretation(
            dominant_element,
            weakest_element,
            scores.element_score(weakest_element),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::parse_civil_utc;

    fn analysis() -> ArroyoData {
        let eph = Ephemeris::load().unwrap();
        let instant = parse_civil_utc("1990-05-15", "14:30:00").unwrap();
        compute_arroyo(&eph, GeoCoordinate::new(40.7128, -74.0060), instant)
    }

    #[test]
    fn test_eleven_positions_including_ascendant() {
        let data = analysis();
        assert_eq!(data.positions.len(), 11);
        assert!(data.positions.contains_key("Sun"));
        assert!(data.positions.contains_key("Moon"));
        assert!(data.positions.contains_key("Ascendant"));
        for name in [
            "Mercury", "Venus", "Mars", "Jupiter", "Saturn", "Uranus", "Neptune", "Pluto",
        ] {
            assert!(data.positions.contains_key(name), "missing {}", name);
        }
    }

    #[test]
    fn test_total_weight_is_fourteen() {
        // 3 bodies at weight 2 + 8 at weight 1 = 14, counted once per axis
        let data = analysis();
        let element_total =
            data.scores.fire + data.scores.earth + data.scores.air + data.scores.water;
        let modality_total = data.scores.cardinal + data.scores.fixed + data.scores.mutable;
        assert_eq!(element_total, 14);
        assert_eq!(modality_total, 14);
    }

    #[test]
    fn test_dominant_matches_scores() {
        let data = analysis();
        let max = data
            .scores
            .fire
            .max(data.scores.earth)
            .max(data.scores.air)
            .max(data.scores.water);
        let dominant_score = match data.dominant_element.as_str() {
            "Fire" => data.scores.fire,
            "Earth" => data.scores.earth,
            "Air" => data.scores.air,
            "Water" => data.scores.water,
            other => panic!("unexpected element {}", other),
        };
        assert_eq!(dominant_score, max);
    }

    #[test]
    fn test_positions_consistent_with_signs() {
        let data = analysis();
        for (name, pos) in &data.positions {
            assert_eq!(
                pos.sign,
                ZodiacSign::from_longitude(pos.longitude).name(),
                "sign mismatch for {}",
                name
            );
        }
    }

    #[test]
    fn test_interpretation_non_empty() {
        let data = analysis();
        assert!(!data.interpretation.is_empty());
        assert!(data
            .interpretation
            .contains(&data.dominant_element));
    }

    #[test]
    fn test_deterministic() {
        let a = analysis();
        let b = analysis();
        assert_eq!(a.scores.fire, b.scores.fire);
        assert_eq!(a.dominant_element, b.dominant_element);
        assert_eq!(
            a.positions["Ascendant"].longitude,
            b.positions["Ascendant"].longitude
        );
    }
}
