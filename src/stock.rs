//! The building stock: one record per dwelling, with fabric and floor-area state.
use crate::id::SmallAreaID;
use crate::units::{Area, EnergyIntensity, Money, UValue};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A building envelope element with its own area and U-value
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    PartialEq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FabricComponent {
    /// The building's roof
    Roof,
    /// External walls
    Wall,
    /// The ground floor slab
    Floor,
    /// Glazing
    Window,
    /// External doors
    Door,
}

/// The area and thermal transmittance of one fabric component of a building
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct FabricElement {
    /// Component area (m²)
    pub area: Area,
    /// Component U-value (W/m²K)
    pub uvalue: UValue,
}

/// Fabric state for a building, keyed by component.
///
/// A component may be absent if the source table did not provide its area/U-value
/// columns; referencing an absent component is a configuration error (see
/// [`MissingComponentError`]).
pub type FabricMap = IndexMap<FabricComponent, FabricElement>;

/// Lower/upper bound estimate of the money spent retrofitting one component
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CostRange {
    /// Lowest likely cost (€)
    pub lower: Money,
    /// Highest likely cost (€)
    pub upper: Money,
}

impl CostRange {
    /// A zero cost range, for buildings not selected for retrofit
    pub fn zero() -> Self {
        Self {
            lower: Money(0.0),
            upper: Money(0.0),
        }
    }
}

/// Per-storey floor areas for a building
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct FloorAreas {
    /// Ground floor area (m²)
    pub ground: Area,
    /// First floor area (m²)
    pub first: Area,
    /// Second floor area (m²)
    pub second: Area,
    /// Third floor area (m²)
    pub third: Area,
}

impl FloorAreas {
    /// Total floor area, summed over storeys (m²)
    pub fn total(&self) -> Area {
        self.ground + self.first + self.second + self.third
    }
}

/// One dwelling in the building stock
#[derive(Clone, Debug, PartialEq)]
pub struct Building {
    /// ID of the small area containing this building
    pub small_area: SmallAreaID,
    /// Dwelling type (e.g. "Semi-detached house"), if known
    pub dwelling_type: Option<String>,
    /// Period-built category (e.g. "1961 - 1970"), if known
    pub period_built: Option<String>,
    /// The most significant wall type, if known or estimated
    pub wall_type: Option<String>,
    /// Whether `wall_type` was filled in from an archetype
    pub wall_type_is_estimated: bool,
    /// Whether the wall U-value was filled in from an archetype
    pub wall_uvalue_is_estimated: bool,
    /// Energy intensity value (kWh/m²/yr) underlying the BER rating
    pub energy_value: EnergyIntensity,
    /// Area and U-value per fabric component
    pub fabric: FabricMap,
    /// Floor areas per storey
    pub floor_areas: FloorAreas,
    /// Estimated retrofit cost per component. Empty for a pre-retrofit stock.
    pub retrofit_costs: IndexMap<FabricComponent, CostRange>,
}

/// Error returned when a fabric component's data is absent from the stock table
#[derive(Debug, Error)]
#[error(
    "No {component} area/U-value data for building in small area {small_area}. \
    You should update the stock table or remove the {component} entry from the scenario."
)]
pub struct MissingComponentError {
    /// The component whose data is missing
    pub component: FabricComponent,
    /// The small area of the first building missing it
    pub small_area: SmallAreaID,
}

impl Building {
    /// Get the fabric element for `component`, or a [`MissingComponentError`]
    pub fn fabric_element(
        &self,
        component: FabricComponent,
    ) -> Result<&FabricElement, MissingComponentError> {
        self.fabric.get(&component).ok_or(MissingComponentError {
            component,
            small_area: self.small_area.clone(),
        })
    }
}

/// An ordered collection of buildings.
///
/// Row position is the stable index: transformations which derive a new stock (e.g.
/// retrofitting) preserve the number and order of buildings.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Stock {
    buildings: Vec<Building>,
}

impl Stock {
    /// Create a stock from a list of buildings
    pub fn new(buildings: Vec<Building>) -> Self {
        Self { buildings }
    }

    /// The number of buildings in the stock
    pub fn len(&self) -> usize {
        self.buildings.len()
    }

    /// Whether the stock contains no buildings
    pub fn is_empty(&self) -> bool {
        self.buildings.is_empty()
    }

    /// Iterate over the buildings in row order
    pub fn iter(&self) -> std::slice::Iter<'_, Building> {
        self.buildings.iter()
    }

    /// Iterate mutably over the buildings in row order
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Building> {
        self.buildings.iter_mut()
    }

    /// The buildings as a slice
    pub fn as_slice(&self) -> &[Building] {
        &self.buildings
    }

    /// The baseline U-value of `component` for every building, in row order
    pub fn uvalues(&self, component: FabricComponent) -> Result<Vec<UValue>, MissingComponentError> {
        self.buildings
            .iter()
            .map(|building| Ok(building.fabric_element(component)?.uvalue))
            .collect()
    }

    /// The area of `component` for every building, in row order
    pub fn areas(&self, component: FabricComponent) -> Result<Vec<Area>, MissingComponentError> {
        self.buildings
            .iter()
            .map(|building| Ok(building.fabric_element(component)?.area))
            .collect()
    }

    /// The total floor area of every building, in row order
    pub fn total_floor_areas(&self) -> Vec<Area> {
        self.buildings
            .iter()
            .map(|building| building.floor_areas.total())
            .collect()
    }
}

impl IntoIterator for Stock {
    type Item = Building;
    type IntoIter = std::vec::IntoIter<Building>;

    fn into_iter(self) -> Self::IntoIter {
        self.buildings.into_iter()
    }
}

impl FromIterator<Building> for Stock {
    fn from_iter<I: IntoIterator<Item = Building>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{building, stock};
    use float_cmp::assert_approx_eq;
    use rstest::rstest;

    #[rstest]
    fn floor_areas_total(building: Building) {
        assert_approx_eq!(Area, building.floor_areas.total(), Area(100.0));
    }

    #[rstest]
    fn fabric_element_present(building: Building) {
        let element = building.fabric_element(FabricComponent::Wall).unwrap();
        assert_approx_eq!(UValue, element.uvalue, UValue(2.0));
    }

    #[rstest]
    fn fabric_element_missing(mut building: Building) {
        building.fabric.shift_remove(&FabricComponent::Door);
        let err = building.fabric_element(FabricComponent::Door).unwrap_err();
        assert_eq!(err.component, FabricComponent::Door);
    }

    #[rstest]
    fn stock_uvalues_in_row_order(stock: Stock) {
        let uvalues = stock.uvalues(FabricComponent::Wall).unwrap();
        assert_eq!(uvalues, vec![UValue(0.1), UValue(2.0), UValue(2.0)]);
    }

    #[rstest]
    fn stock_areas_in_row_order(stock: Stock) {
        let areas = stock.areas(FabricComponent::Wall).unwrap();
        assert_eq!(areas, vec![Area(50.0), Area(150.0), Area(100.0)]);
    }
}
