//! Filtering of the building stock by rating and region before simulation.
use crate::id::SmallAreaID;
use crate::rating::{EnergyRating, RatingBand};
use crate::stock::Stock;
use indexmap::IndexSet;
use itertools::Itertools;
use serde::Deserialize;
use std::fmt;
use thiserror::Error;

/// Every BER rating letter
pub const ALL_RATING_LETTERS: [char; 7] = ['A', 'B', 'C', 'D', 'E', 'F', 'G'];

/// Criteria restricting which buildings take part in a simulation.
///
/// Rating letters and bands are derived from each building's energy value, so the
/// filter never depends on a stored rating column.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct StockFilter {
    /// Keep buildings whose rating letter is in this set
    pub energy_ratings: Vec<char>,
    /// Keep buildings in these small areas. `None` means all small areas.
    pub small_areas: Option<IndexSet<SmallAreaID>>,
    /// Keep buildings in this coarse rating band only
    pub band: Option<RatingBand>,
}

impl Default for StockFilter {
    fn default() -> Self {
        Self {
            energy_ratings: ALL_RATING_LETTERS.to_vec(),
            small_areas: None,
            band: None,
        }
    }
}

impl fmt::Display for StockFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "energy_ratings: {}",
            self.energy_ratings.iter().join(", ")
        )?;
        if let Some(band) = &self.band {
            write!(f, "; band: {band}")?;
        }
        match &self.small_areas {
            Some(small_areas) => write!(f, "; small_areas: {}", small_areas.iter().join(", ")),
            None => write!(f, "; small_areas: all"),
        }
    }
}

/// Error returned when the filter criteria match no buildings
#[derive(Debug, Error)]
#[error("There are no buildings meeting your criteria: {filter}")]
pub struct EmptySelectionError {
    /// The criteria which produced zero results
    pub filter: StockFilter,
}

/// Restrict `stock` to the buildings matching `filter`.
///
/// Returns a fresh stock preserving row order. A filter covering all rating letters
/// and all small areas passes every building through. An empty result is an
/// [`EmptySelectionError`] naming the offending criteria; simulation must not
/// proceed from it.
pub fn get_selected_buildings(
    stock: &Stock,
    filter: &StockFilter,
) -> Result<Stock, EmptySelectionError> {
    let check_letters = filter.energy_ratings.len() < ALL_RATING_LETTERS.len();

    let selected: Stock = stock
        .iter()
        .filter(|building| {
            let rating = EnergyRating::of(building.energy_value);
            if check_letters && !filter.energy_ratings.contains(&rating.letter()) {
                return false;
            }
            if let Some(band) = filter.band {
                if rating.band() != band {
                    return false;
                }
            }
            if let Some(small_areas) = &filter.small_areas {
                if !small_areas.contains(building.small_area.as_str()) {
                    return false;
                }
            }

            true
        })
        .cloned()
        .collect();

    if selected.is_empty() {
        return Err(EmptySelectionError {
            filter: filter.clone(),
        });
    }

    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::stock;
    use crate::units::EnergyIntensity;
    use itertools::assert_equal;
    use rstest::rstest;

    #[rstest]
    fn all_ratings_and_areas_passes_everything_through(stock: Stock) {
        let selected = get_selected_buildings(&stock, &StockFilter::default()).unwrap();
        assert_eq!(selected, stock);
    }

    #[rstest]
    fn filter_by_rating_letter(stock: Stock) {
        // Fixture energy values are 50, 200 and 600: an A2, a C2 and a G
        let filter = StockFilter {
            energy_ratings: vec!['C'],
            ..StockFilter::default()
        };
        let selected = get_selected_buildings(&stock, &filter).unwrap();
        assert_equal(
            selected.iter().map(|b| b.energy_value),
            [EnergyIntensity(200.0)],
        );
    }

    #[rstest]
    #[case(RatingBand::AToB, EnergyIntensity(50.0))]
    #[case(RatingBand::CToD, EnergyIntensity(200.0))]
    #[case(RatingBand::EToG, EnergyIntensity(600.0))]
    fn filter_by_band(stock: Stock, #[case] band: RatingBand, #[case] expected: EnergyIntensity) {
        let filter = StockFilter {
            band: Some(band),
            ..StockFilter::default()
        };
        let selected = get_selected_buildings(&stock, &filter).unwrap();
        assert_equal(selected.iter().map(|b| b.energy_value), [expected]);
    }

    #[rstest]
    fn filter_by_small_area(stock: Stock) {
        let filter = StockFilter {
            small_areas: Some(["267112001".into()].into_iter().collect()),
            ..StockFilter::default()
        };
        let selected = get_selected_buildings(&stock, &filter).unwrap();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected.as_slice()[0].small_area.as_str(), "267112001");
    }

    #[rstest]
    fn empty_selection_is_an_error(stock: Stock) {
        // No fixture building is rated F
        let filter = StockFilter {
            energy_ratings: vec!['F'],
            ..StockFilter::default()
        };
        let err = get_selected_buildings(&stock, &filter).unwrap_err();
        assert!(err.to_string().contains("energy_ratings: F"));
    }
}
