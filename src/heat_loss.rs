//! Adapter between the building stock and the fabric heat-loss model.
//!
//! Derives per-building heat-loss figures from a stock's fabric state by delegating
//! to [`crate::physics`]. These are pure functions of their inputs: pre- and
//! post-retrofit stocks are passed through independently and symmetrically.
use crate::physics;
use crate::stock::{Building, FabricComponent, MissingComponentError, Stock};
use crate::units::{EnergyPerYear, HeatLossCoefficient, HeatLossParameter, UValue};
use itertools::Itertools;
use strum::IntoEnumIterator;

/// The DEAP thermal-bridging factor applied to the total envelope area (W/m²K)
pub const THERMAL_BRIDGING_FACTOR: UValue = UValue(0.05);

/// A building's fabric heat-loss coefficient (W/K).
///
/// Requires area/U-value data for all five fabric components; a missing component
/// is a configuration error.
pub fn fabric_heat_loss(building: &Building) -> Result<HeatLossCoefficient, MissingComponentError> {
    let elements: Vec<_> = FabricComponent::iter()
        .map(|component| {
            let element = building.fabric_element(component)?;
            Ok((element.area, element.uvalue))
        })
        .try_collect()?;

    Ok(physics::calculate_fabric_heat_loss(
        &elements,
        THERMAL_BRIDGING_FACTOR,
    ))
}

/// Annualised fabric heat loss (kWh/yr) for every building, in row order
pub fn annual_fabric_heat_loss(stock: &Stock) -> Result<Vec<EnergyPerYear>, MissingComponentError> {
    stock
        .iter()
        .map(|building| Ok(physics::calculate_heat_loss_per_year(fabric_heat_loss(building)?)))
        .collect()
}

/// A building's heat-loss parameter (W/K/m²).
///
/// This is the heat-loss coefficient normalised by total floor area. For a building
/// with zero floor area the parameter is infinite, which downstream classification
/// treats as not heat-pump viable.
pub fn heat_loss_parameter(building: &Building) -> Result<HeatLossParameter, MissingComponentError> {
    Ok(fabric_heat_loss(building)? / building.floor_areas.total())
}
