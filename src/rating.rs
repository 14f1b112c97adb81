//! Classification of energy values into Building Energy Rating (BER) categories.
//!
//! The BER scale maps a continuous energy intensity (kWh/m²/yr) to one of fifteen
//! labels, A1 (best) through G (worst), via fixed bin edges. Bin edges are
//! upper-inclusive: an energy value of exactly 25 is an A1, not an A2. Every real
//! value, including NaN, maps to exactly one label.
use crate::units::{EnergyIntensity, HeatLossParameter};
use serde::{Deserialize, Serialize};

/// A building whose heat-loss parameter is at or below this value is considered
/// viable for a heat pump (W/K/m²)
pub const HEAT_PUMP_VIABILITY_CUTOFF: HeatLossParameter = HeatLossParameter(2.3);

/// A BER category, from A1 (best) to G (worst)
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[allow(missing_docs)]
pub enum EnergyRating {
    A1,
    A2,
    A3,
    B1,
    B2,
    B3,
    C1,
    C2,
    C3,
    D1,
    D2,
    E1,
    E2,
    F,
    G,
}

/// Upper (inclusive) bin edge for each rating except G, which is unbounded
const RATING_EDGES: [(EnergyIntensity, EnergyRating); 14] = [
    (EnergyIntensity(25.0), EnergyRating::A1),
    (EnergyIntensity(50.0), EnergyRating::A2),
    (EnergyIntensity(75.0), EnergyRating::A3),
    (EnergyIntensity(100.0), EnergyRating::B1),
    (EnergyIntensity(125.0), EnergyRating::B2),
    (EnergyIntensity(150.0), EnergyRating::B3),
    (EnergyIntensity(175.0), EnergyRating::C1),
    (EnergyIntensity(200.0), EnergyRating::C2),
    (EnergyIntensity(225.0), EnergyRating::C3),
    (EnergyIntensity(260.0), EnergyRating::D1),
    (EnergyIntensity(300.0), EnergyRating::D2),
    (EnergyIntensity(340.0), EnergyRating::E1),
    (EnergyIntensity(380.0), EnergyRating::E2),
    (EnergyIntensity(450.0), EnergyRating::F),
];

impl EnergyRating {
    /// The rating for the given energy value.
    ///
    /// This is a total function: a NaN energy value compares false against every bin
    /// edge and so falls through to G.
    pub fn of(energy_value: EnergyIntensity) -> Self {
        for (edge, rating) in RATING_EDGES {
            if energy_value <= edge {
                return rating;
            }
        }

        Self::G
    }

    /// The rating's letter, e.g. 'B' for B3
    pub fn letter(&self) -> char {
        self.to_string()
            .chars()
            .next()
            .expect("Rating label cannot be empty")
    }

    /// The coarse band containing this rating
    pub fn band(&self) -> RatingBand {
        match self {
            Self::A1 | Self::A2 | Self::A3 | Self::B1 | Self::B2 | Self::B3 => RatingBand::AToB,
            Self::C1 | Self::C2 | Self::C3 | Self::D1 | Self::D2 => RatingBand::CToD,
            Self::E1 | Self::E2 | Self::F | Self::G => RatingBand::EToG,
        }
    }
}

/// Classify an energy value for every building, in row order
pub fn classify(energy_values: &[EnergyIntensity]) -> Vec<EnergyRating> {
    energy_values.iter().copied().map(EnergyRating::of).collect()
}

/// A coarse three-band version of the BER scale, used for simplified summaries
#[derive(
    Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize, strum::Display,
)]
pub enum RatingBand {
    /// Energy value at most 150 kWh/m²/yr
    #[serde(rename = "A-B")]
    #[strum(serialize = "A-B")]
    AToB,
    /// Energy value above 150 and at most 300 kWh/m²/yr
    #[serde(rename = "C-D")]
    #[strum(serialize = "C-D")]
    CToD,
    /// Energy value above 300 kWh/m²/yr
    #[serde(rename = "E-G")]
    #[strum(serialize = "E-G")]
    EToG,
}

impl RatingBand {
    /// The band for the given energy value (same boundary semantics as the full scale)
    pub fn of(energy_value: EnergyIntensity) -> Self {
        if energy_value <= EnergyIntensity(150.0) {
            Self::AToB
        } else if energy_value <= EnergyIntensity(300.0) {
            Self::CToD
        } else {
            Self::EToG
        }
    }
}

/// Whether a building is a suitable candidate for a heat pump
#[derive(
    Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, strum::Display,
)]
pub enum HeatPumpViability {
    /// Heat-loss parameter at or below the viability cutoff
    Viable,
    /// Heat-loss parameter above the viability cutoff (or undefined)
    NotViable,
}

impl HeatPumpViability {
    /// Classify a heat-loss parameter.
    ///
    /// An infinite or NaN parameter (e.g. from a zero floor area) is not viable.
    pub fn of(heat_loss_parameter: HeatLossParameter) -> Self {
        if heat_loss_parameter <= HEAT_PUMP_VIABILITY_CUTOFF {
            Self::Viable
        } else {
            Self::NotViable
        }
    }
}
