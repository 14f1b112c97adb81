//! The building-physics model behind the heat-loss adapter.
//!
//! A DEAP-style fabric model: plane heat loss is the sum of `area × U-value` over
//! the envelope elements, plus a thermal-bridging allowance proportional to the
//! total envelope area. Annualisation uses monthly degree-hours over the heating
//! season. The rest of the crate only ever calls this through [`crate::heat_loss`],
//! supplying correctly shaped inputs and consuming the scalar outputs.
use crate::units::{Area, EnergyPerYear, HeatLossCoefficient, UValue};

/// Internal setpoint temperature during the heating season (°C)
const INTERNAL_TEMPERATURE: f64 = 21.0;

/// Mean external temperature (°C) and length (hours) of each heating-season month,
/// October through May, for Dublin Airport climate data
const HEATING_SEASON_MONTHS: [(f64, f64); 8] = [
    (10.2, 744.0), // October
    (7.2, 720.0),  // November
    (5.5, 744.0),  // December
    (5.3, 744.0),  // January
    (5.5, 672.0),  // February
    (7.0, 744.0),  // March
    (8.3, 720.0),  // April
    (10.4, 744.0), // May
];

/// Calculate a building's fabric heat-loss coefficient (W/K).
///
/// `elements` holds the (area, U-value) pair for each envelope element. The
/// thermal-bridging allowance is `thermal_bridging_factor` applied to the total
/// envelope area, per DEAP.
pub fn calculate_fabric_heat_loss(
    elements: &[(Area, UValue)],
    thermal_bridging_factor: UValue,
) -> HeatLossCoefficient {
    let plane_losses: HeatLossCoefficient =
        elements.iter().map(|(area, uvalue)| *area * *uvalue).sum();
    let total_area: Area = elements.iter().map(|(area, _)| *area).sum();

    plane_losses + total_area * thermal_bridging_factor
}

/// Convert a heat-loss coefficient (W/K) to annualised heat loss (kWh/yr).
///
/// Sums coefficient × ΔT over the heating-season months, where ΔT is the gap
/// between the internal setpoint and the monthly mean external temperature.
pub fn calculate_heat_loss_per_year(coefficient: HeatLossCoefficient) -> EnergyPerYear {
    let degree_hours: f64 = HEATING_SEASON_MONTHS
        .iter()
        .map(|(external, hours)| (INTERNAL_TEMPERATURE - external) * hours)
        .sum();

    EnergyPerYear(coefficient.value() * degree_hours / 1000.0)
}
