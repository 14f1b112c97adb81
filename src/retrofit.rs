//! The retrofit engine: applies a retrofit plan to a building stock.
//!
//! For each fabric component in the plan the engine samples the eligible buildings,
//! replaces the U-values of the selected ones with the plan's target and attaches
//! lower/upper cost estimates. Components not named in the plan pass through
//! unchanged. The input stock is never mutated; a fresh post-retrofit stock is
//! produced on every run.
use crate::stock::{CostRange, FabricComponent, MissingComponentError, Stock};
use crate::units::{Dimensionless, MoneyPerArea, UValue};
use indexmap::IndexMap;
use itertools::izip;
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Deserialize;

pub mod cost;
pub mod sampling;

/// The default random seed for eligibility sampling.
///
/// Used when a scenario does not set one. Not guaranteed to be stable across
/// versions; set an explicit seed wherever reproducibility matters.
pub const DEFAULT_SEED: u64 = 42;

/// Threshold and target U-value for one component's retrofit
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct UValueSpec {
    /// Buildings with a U-value above this are eligible for retrofit (W/m²K)
    pub threshold: UValue,
    /// The U-value selected buildings are upgraded to (W/m²K)
    pub target: UValue,
}

/// Lower/upper bound unit cost of retrofitting one component (€/m²)
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CostBounds {
    /// Lowest likely unit cost (€/m²)
    pub lower: MoneyPerArea,
    /// Highest likely unit cost (€/m²)
    pub upper: MoneyPerArea,
}

/// Operator-chosen retrofit parameters for one fabric component.
///
/// `cost.lower ≤ cost.upper` is assumed but not enforced.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RetrofitSelection {
    /// Eligibility threshold and upgrade target
    pub uvalue: UValueSpec,
    /// The fraction of eligible buildings to retrofit, in [0, 1]
    #[serde(deserialize_with = "crate::input::deserialise_proportion")]
    pub percentage_selected: Dimensionless,
    /// Unit cost bounds
    pub cost: CostBounds,
}

/// A retrofit plan: one [`RetrofitSelection`] per fabric component.
///
/// Any subset of components is supported, including an empty plan (a no-op).
pub type RetrofitPlan = IndexMap<FabricComponent, RetrofitSelection>;

/// Apply `plan` to `stock`, returning the post-retrofit stock.
///
/// The result has the same number of buildings in the same order as the input.
/// Sampling for every component reuses `seed`, so a run is bit-for-bit reproducible
/// given the same stock, plan and seed.
///
/// Fails with a [`MissingComponentError`] if the plan references a component for
/// which any building has no area/U-value data.
pub fn retrofit_stock(
    stock: &Stock,
    plan: &RetrofitPlan,
    seed: u64,
) -> Result<Stock, MissingComponentError> {
    let mut buildings = stock.as_slice().to_vec();

    for (&component, selection) in plan {
        let uvalues = stock.uvalues(component)?;
        let areas = stock.areas(component)?;

        // Each component draws from a generator freshly seeded with the run's seed
        let mut rng = StdRng::seed_from_u64(seed);
        let is_selected = sampling::select_for_retrofit(
            &uvalues,
            selection.uvalue.threshold,
            selection.percentage_selected,
            &mut rng,
        );
        let cost_lower = cost::fabric_retrofit_cost(&is_selected, selection.cost.lower, &areas);
        let cost_upper = cost::fabric_retrofit_cost(&is_selected, selection.cost.upper, &areas);

        info!(
            "Retrofitting {} of {} buildings ({component})",
            is_selected.iter().filter(|selected| **selected).count(),
            buildings.len()
        );

        for (building, selected, lower, upper) in
            izip!(buildings.iter_mut(), is_selected, cost_lower, cost_upper)
        {
            if selected {
                // Presence was checked when reading the U-value column above
                building
                    .fabric
                    .get_mut(&component)
                    .expect("Fabric component must be present")
                    .uvalue = selection.uvalue.target;
            }
            building
                .retrofit_costs
                .insert(component, CostRange { lower, upper });
        }
    }

    Ok(Stock::new(buildings))
}
