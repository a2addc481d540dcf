//! Pure astrological derivation functions.
//!
//! Everything here is a total function of its arguments: zodiac and
//! moon-phase bucketing, clock-string formatting, the ascendant closed
//! form, elemental/modality scoring, and the canned interpretation text.

use serde::{Deserialize, Serialize};

use crate::ephemeris::frames::DEG;
use crate::models::normalize_degrees;

/// The twelve tropical zodiac signs, 30° of ecliptic longitude each,
/// Aries first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl ZodiacSign {
    pub const ALL: [ZodiacSign; 12] = [
        ZodiacSign::Aries,
        ZodiacSign::Taurus,
        ZodiacSign::Gemini,
        ZodiacSign::Cancer,
        ZodiacSign::Leo,
        ZodiacSign::Virgo,
        ZodiacSign::Libra,
        ZodiacSign::Scorpio,
        ZodiacSign::Sagittarius,
        ZodiacSign::Capricorn,
        ZodiacSign::Aquarius,
        ZodiacSign::Pisces,
    ];

    /// Sign containing an ecliptic longitude: `floor(λ/30) mod 12` on λ
    /// reduced into [0, 360). Boundaries belong to the sign they open
    /// (30.0° is Taurus, not Aries).
    pub fn from_longitude(longitude_deg: f64) -> Self {
        let lon = normalize_degrees(longitude_deg);
        let index = (lon / 30.0).floor() as usize % 12;
        Self::ALL[index]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ZodiacSign::Aries => "Aries",
            ZodiacSign::Taurus => "Taurus",
            ZodiacSign::Gemini => "Gemini",
            ZodiacSign::Cancer => "Cancer",
            ZodiacSign::Leo => "Leo",
            ZodiacSign::Virgo => "Virgo",
            ZodiacSign::Libra => "Libra",
            ZodiacSign::Scorpio => "Scorpio",
            ZodiacSign::Sagittarius => "Sagittarius",
            ZodiacSign::Capricorn => "Capricorn",
            ZodiacSign::Aquarius => "Aquarius",
            ZodiacSign::Pisces => "Pisces",
        }
    }

    fn index(&self) -> usize {
        Self::ALL.iter().position(|s| s == self).unwrap_or(0)
    }

    /// Element of the sign (repeating Fire, Earth, Air, Water from Aries).
    pub fn element(&self) -> Element {
        Element::ALL[self.index() % 4]
    }

    /// Modality of the sign (repeating Cardinal, Fixed, Mutable from Aries).
    pub fn modality(&self) -> Modality {
        Modality::ALL[self.index() % 3]
    }
}

/// The four classical elements, in fixed enumeration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Element {
    Fire,
    Earth,
    Air,
    Water,
}

impl Element {
    pub const ALL: [Element; 4] = [Element::Fire, Element::Earth, Element::Air, Element::Water];

    pub fn name(&self) -> &'static str {
        match self {
            Element::Fire => "Fire",
            Element::Earth => "Earth",
            Element::Air => "Air",
            Element::Water => "Water",
        }
    }
}

/// The three modalities, in fixed enumeration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Modality {
    Cardinal,
    Fixed,
    Mutable,
}

impl Modality {
    pub const ALL: [Modality; 3] = [Modality::Cardinal, Modality::Fixed, Modality::Mutable];

    pub fn name(&self) -> &'static str {
        match self {
            Modality::Cardinal => "Cardinal",
            Modality::Fixed => "Fixed",
            Modality::Mutable => "Mutable",
        }
    }
}

/// The eight moon phases, 45° of Sun-Moon elongation each, New Moon first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoonPhase {
    NewMoon,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    FullMoon,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

impl MoonPhase {
    pub const ALL: [MoonPhase; 8] = [
        MoonPhase::NewMoon,
        MoonPhase::WaxingCrescent,
        MoonPhase::FirstQuarter,
        MoonPhase::WaxingGibbous,
        MoonPhase::FullMoon,
        MoonPhase::WaningGibbous,
        MoonPhase::LastQuarter,
        MoonPhase::WaningCrescent,
    ];

    /// Phase bucket for an elongation in [0, 360]. Buckets are half-open
    /// on the upper edge except the last, which closes at 360.
    pub fn from_elongation(elongation_deg: f64) -> Self {
        let index = ((elongation_deg / 45.0).floor() as usize).min(7);
        Self::ALL[index]
    }

    pub fn name(&self) -> &'static str {
        match self {
            MoonPhase::NewMoon => "New Moon",
            MoonPhase::WaxingCrescent => "Waxing Crescent",
            MoonPhase::FirstQuarter => "First Quarter",
            MoonPhase::WaxingGibbous => "Waxing Gibbous",
            MoonPhase::FullMoon => "Full Moon",
            MoonPhase::WaningGibbous => "Waning Gibbous",
            MoonPhase::LastQuarter => "Last Quarter",
            MoonPhase::WaningCrescent => "Waning Crescent",
        }
    }
}

/// True solar time as an `HH:MM:SS` string from the Sun's hour angle.
///
/// `(hour_angle + 12) mod 24`, converted to sexagesimal with truncation
/// (not rounding) of minutes and seconds.
pub fn true_solar_time(hour_angle_hours: f64) -> String {
    let solar_hours = (hour_angle_hours + 12.0).rem_euclid(24.0);
    let h = solar_hours as u32;
    let m = ((solar_hours - h as f64) * 60.0) as u32;
    let s = (((solar_hours - h as f64) * 60.0 - m as f64) * 60.0) as u32;
    format!("{:02}:{:02}:{:02}", h, m, s)
}

/// Signed offset between true solar time and civil clock time,
/// formatted in minutes with one decimal, e.g. `+30.0 mins`.
///
/// The hour difference is folded into (-12, 12) before scaling.
pub fn civil_offset(true_solar_hours: f64, civil_hours: f64) -> String {
    let mut diff_hours = true_solar_hours - civil_hours;
    if diff_hours > 12.0 {
        diff_hours -= 24.0;
    }
    if diff_hours < -12.0 {
        diff_hours += 24.0;
    }
    format!("{:+.1} mins", diff_hours * 60.0)
}

/// Ecliptic longitude of the ascendant, degrees in [0, 360).
///
/// Closed-form intersection of the eastern horizon with the ecliptic:
/// `atan2(-cos LST, sin LST·cos ε + tan φ·sin ε)` with LST the local
/// apparent sidereal time.
pub fn ascendant_longitude(lst_hours: f64, latitude_deg: f64, obliquity_deg: f64) -> f64 {
    let lst = lst_hours * 15.0 * DEG;
    let lat = latitude_deg * DEG;
    let obl = obliquity_deg * DEG;

    let asc = (-lst.cos()).atan2(lst.sin() * obl.cos() + lat.tan() * obl.sin());
    normalize_degrees(asc / DEG)
}

/// A body's weighted zodiac placement for temperament scoring.
#[derive(Debug, Clone)]
pub struct WeightedPlacement {
    pub body: String,
    pub sign: ZodiacSign,
    pub longitude_deg: f64,
    pub weight: u32,
}

/// Accumulated element and modality scores across weighted placements.
#[derive(Debug, Clone, Default)]
pub struct ElementScoreSet {
    element_scores: [u32; 4],
    modality_scores: [u32; 3],
}

impl ElementScoreSet {
    /// Score a set of placements: each body adds its weight to the score
    /// of its sign's element and of its sign's modality.
    pub fn from_placements(placements: &[WeightedPlacement]) -> Self {
        let mut scores = Self::default();
        for placement in placements {
            let e = Element::ALL
                .iter()
                .position(|e| *e == placement.sign.element())
                .unwrap_or(0);
            let m = Modality::ALL
                .iter()
                .position(|m| *m == placement.sign.modality())
                .unwrap_or(0);
            scores.element_scores[e] += placement.weight;
            scores.modality_scores[m] += placement.weight;
        }
        scores
    }

    pub fn element_score(&self, element: Element) -> u32 {
        let i = Element::ALL.iter().position(|e| *e == element).unwrap_or(0);
        self.element_scores[i]
    }

    pub fn modality_score(&self, modality: Modality) -> u32 {
        let i = Modality::ALL
            .iter()
            .position(|m| *m == modality)
            .unwrap_or(0);
        self.modality_scores[i]
    }

    /// Highest-scoring element; ties break to the earlier element in the
    /// fixed Fire, Earth, Air, Water order.
    pub fn dominant_element(&self) -> Element {
        let mut best = Element::Fire;
        for &e in &Element::ALL {
            if self.element_score(e) > self.element_score(best) {
                best = e;
            }
        }
        best
    }

    /// Lowest-scoring element; ties break to the earlier element.
    pub fn weakest_element(&self) -> Element {
        let mut worst = Element::Fire;
        for &e in &Element::ALL {
            if self.element_score(e) < self.element_score(worst) {
                worst = e;
            }
        }
        worst
    }

    /// Highest-scoring modality; ties break to the earlier modality in
    /// the fixed Cardinal, Fixed, Mutable order.
    pub fn dominant_modality(&self) -> Modality {
        let mut best = Modality::Cardinal;
        for &m in &Modality::ALL {
            if self.modality_score(m) > self.modality_score(best) {
                best = m;
            }
        }
        best
    }
}

/// Deterministic summary sentence for a chart, with the first matching
/// special case appended: Leo, Cancer, Scorpio, then Full or New Moon.
pub fn cosmic_fact(sign: ZodiacSign, phase: MoonPhase) -> String {
    let mut fact = format!(
        "The Sun is in {} and the Moon is in its {} phase.",
        sign.name(),
        phase.name()
    );
    let suffix = match (sign, phase) {
        (ZodiacSign::Leo, _) => Some(" A time for bold expression."),
        (ZodiacSign::Cancer, _) => Some(" Emotions may run deep."),
        (ZodiacSign::Scorpio, _) => Some(" Intensity is in the air."),
        (_, MoonPhase::FullMoon) => Some(" Illumination and culmination."),
        (_, MoonPhase::NewMoon) => Some(" A time for new beginnings."),
        _ => None,
    };
    if let Some(suffix) = suffix {
        fact.push_str(suffix);
    }
    fact
}

/// Temperament paragraph keyed by the dominant element, with an advisory
/// sentence appended when the weakest element scores 2 or less.
pub fn interpretation(dominant: Element, weakest: Element, weakest_score: u32) -> String {
    let mut text = match dominant {
        Element::Fire => {
            "Fire dominates this chart: identity runs on enthusiasm, initiative, and a \
             need to act on inspiration before it cools. Energy arrives in bursts and \
             burns brightest when there is a goal worth chasing."
        }
        Element::Earth => {
            "Earth dominates this chart: experience is filtered through the practical \
             and the tangible. Security comes from steady effort, material competence, \
             and results that can be touched and measured."
        }
        Element::Air => {
            "Air dominates this chart: life is approached through ideas, language, and \
             connection. Perspective matters more than possession, and understanding a \
             thing is half of living it."
        }
        Element::Water => {
            "Water dominates this chart: feeling precedes thinking, and the emotional \
             undercurrent of a situation registers before its facts do. Depth of \
             attachment is both compass and anchor."
        }
    }
    .to_string();

    if weakest_score <= 2 {
        text.push_str(&format!(
            " {} is underrepresented here; its qualities may need conscious cultivation \
             rather than arriving on their own.",
            weakest.name()
        ));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_boundaries_inclusive_at_multiples_of_30() {
        assert_eq!(ZodiacSign::from_longitude(0.0), ZodiacSign::Aries);
        assert_eq!(ZodiacSign::from_longitude(29.999), ZodiacSign::Aries);
        assert_eq!(ZodiacSign::from_longitude(30.0), ZodiacSign::Taurus);
        assert_eq!(ZodiacSign::from_longitude(330.0), ZodiacSign::Pisces);
        assert_eq!(ZodiacSign::from_longitude(359.999), ZodiacSign::Pisces);
    }

    #[test]
    fn test_sign_periodicity() {
        for k in [-3.0, -1.0, 1.0, 2.0, 7.0] {
            assert_eq!(
                ZodiacSign::from_longitude(54.3),
                ZodiacSign::from_longitude(54.3 + 360.0 * k)
            );
        }
    }

    #[test]
    fn test_element_and_modality_wheel() {
        assert_eq!(ZodiacSign::Aries.element(), Element::Fire);
        assert_eq!(ZodiacSign::Taurus.element(), Element::Earth);
        assert_eq!(ZodiacSign::Gemini.element(), Element::Air);
        assert_eq!(ZodiacSign::Cancer.element(), Element::Water);
        assert_eq!(ZodiacSign::Leo.element(), Element::Fire);
        assert_eq!(ZodiacSign::Pisces.element(), Element::Water);

        assert_eq!(ZodiacSign::Aries.modality(), Modality::Cardinal);
        assert_eq!(ZodiacSign::Taurus.modality(), Modality::Fixed);
        assert_eq!(ZodiacSign::Gemini.modality(), Modality::Mutable);
        assert_eq!(ZodiacSign::Capricorn.modality(), Modality::Cardinal);
    }

    #[test]
    fn test_moon_phase_buckets() {
        assert_eq!(MoonPhase::from_elongation(0.0), MoonPhase::NewMoon);
        assert_eq!(MoonPhase::from_elongation(44.999), MoonPhase::NewMoon);
        assert_eq!(MoonPhase::from_elongation(45.0), MoonPhase::WaxingCrescent);
        assert_eq!(MoonPhase::from_elongation(180.0), MoonPhase::FullMoon);
        assert_eq!(MoonPhase::from_elongation(315.0), MoonPhase::WaningCrescent);
        // Final bucket wraps inclusively to 360
        assert_eq!(MoonPhase::from_elongation(360.0), MoonPhase::WaningCrescent);
    }

    #[test]
    fn test_true_solar_time_truncates() {
        // HA = -12 → 0h; HA = 0 → 12h
        assert_eq!(true_solar_time(0.0), "12:00:00");
        assert_eq!(true_solar_time(-12.0), "00:00:00");
        // 12.9999h keeps 59:59, never rounds up to 13:00:00
        assert_eq!(true_solar_time(0.99999), "12:59:59");
    }

    #[test]
    fn test_civil_offset_scenario() {
        assert_eq!(civil_offset(12.5, 12.0), "+30.0 mins");
        assert_eq!(civil_offset(12.0, 12.5), "-30.0 mins");
    }

    #[test]
    fn test_civil_offset_wraps_across_midnight() {
        // 23.5h solar vs 0.5h civil is -60 minutes, not +1380
        assert_eq!(civil_offset(23.5, 0.5), "-60.0 mins");
        assert_eq!(civil_offset(0.5, 23.5), "+60.0 mins");
    }

    #[test]
    fn test_ascendant_deterministic() {
        let a = ascendant_longitude(6.5, 41.5, 23.44);
        let b = ascendant_longitude(6.5, 41.5, 23.44);
        assert_eq!(a, b);
        assert!((0.0..360.0).contains(&a));
    }

    #[test]
    fn test_ascendant_at_equator_zero_lst() {
        // LST 0h, φ 0: atan2(-1, 0) = -90° → 270°
        let asc = ascendant_longitude(0.0, 0.0, 23.44);
        assert!((asc - 270.0).abs() < 1e-9);
    }

    #[test]
    fn test_scoring_weights_and_argmax() {
        let placements = vec![
            WeightedPlacement {
                body: "Sun".into(),
                sign: ZodiacSign::Leo,
                longitude_deg: 125.0,
                weight: 2,
            },
            WeightedPlacement {
                body: "Moon".into(),
                sign: ZodiacSign::Cancer,
                longitude_deg: 100.0,
                weight: 2,
            },
            WeightedPlacement {
                body: "Mercury".into(),
                sign: ZodiacSign::Virgo,
                longitude_deg: 155.0,
                weight: 1,
            },
        ];
        let scores = ElementScoreSet::from_placements(&placements);
        assert_eq!(scores.element_score(Element::Fire), 2);
        assert_eq!(scores.element_score(Element::Water), 2);
        assert_eq!(scores.element_score(Element::Earth), 1);
        assert_eq!(scores.element_score(Element::Air), 0);
        // Fire and Water tie at 2; Fire comes first in enumeration order
        assert_eq!(scores.dominant_element(), Element::Fire);
        assert_eq!(scores.weakest_element(), Element::Air);
        assert_eq!(scores.dominant_modality(), Modality::Fixed);
    }

    #[test]
    fn test_cosmic_fact_rule_order() {
        // Leo wins over Full Moon
        let fact = cosmic_fact(ZodiacSign::Leo, MoonPhase::FullMoon);
        assert!(fact.ends_with("A time for bold expression."));
        // Full Moon applies when the sign has no special case
        let fact = cosmic_fact(ZodiacSign::Aries, MoonPhase::FullMoon);
        assert!(fact.ends_with("Illumination and culmination."));
        // No rule matches: bare summary
        let fact = cosmic_fact(ZodiacSign::Aries, MoonPhase::FirstQuarter);
        assert_eq!(
            fact,
            "The Sun is in Aries and the Moon is in its First Quarter phase."
        );
    }

    #[test]
    fn test_interpretation_advisory_threshold() {
        let with = interpretation(Element::Fire, Element::Water, 2);
        assert!(with.contains("Water is underrepresented"));
        let without = interpretation(Element::Fire, Element::Water, 3);
        assert!(!without.contains("underrepresented"));
    }
}
