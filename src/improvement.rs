//! Aggregation of pre- vs post-retrofit energy performance.
//!
//! Computes each building's post-retrofit energy value from the fabric heat-loss
//! reduction, reclassifies ratings and produces flat pre/post distribution tables
//! for the presentation layer, along with the portfolio cost summary.
use crate::heat_loss;
use crate::rating::{EnergyRating, HeatPumpViability, RatingBand};
use crate::stock::{MissingComponentError, Stock};
use crate::units::{EnergyIntensity, Money};
use itertools::{Itertools, chain};
use serde::Serialize;
use std::fmt::Display;
use std::hash::Hash;

/// Which snapshot a comparison row counts buildings from
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, strum::Display)]
pub enum Category {
    /// The stock before retrofitting
    Pre,
    /// The stock after retrofitting
    Post,
}

/// One row of a pre/post comparison table: the number of buildings with a given
/// classification in a given snapshot
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ComparisonRow<L> {
    /// The classification label
    pub label: L,
    /// Which snapshot this row counts
    pub category: Category,
    /// Number of buildings
    pub total: usize,
}

/// Group pre and post classifications into a flat, deterministically ordered table.
///
/// One row per observed (label, category) pair with nonzero count, sorted by label
/// and then by category name. Every building appears in exactly one Pre row and one
/// Post row, so the Pre totals sum to the pre-stock size and likewise for Post.
pub fn combine_pre_and_post<L>(pre: &[L], post: &[L]) -> Vec<ComparisonRow<L>>
where
    L: Copy + Ord + Hash + Display,
{
    let counts = chain(
        pre.iter().map(|label| (*label, Category::Pre)),
        post.iter().map(|label| (*label, Category::Post)),
    )
    .counts();

    counts
        .into_iter()
        .map(|((label, category), total)| ComparisonRow {
            label,
            category,
            total,
        })
        .sorted_by(|a, b| {
            a.label
                .cmp(&b.label)
                .then_with(|| a.category.to_string().cmp(&b.category.to_string()))
        })
        .collect()
}

/// Per-building post-retrofit energy values (kWh/m²/yr).
///
/// The energy value improves by the annualised fabric heat-loss reduction
/// normalised by total floor area. Where the floor area is zero or the reduction is
/// otherwise undefined, the improvement is taken as zero so that an undefined
/// energy value never propagates into classification.
pub fn post_retrofit_energy_values(
    pre: &Stock,
    post: &Stock,
) -> Result<Vec<EnergyIntensity>, MissingComponentError> {
    let pre_heat_loss = heat_loss::annual_fabric_heat_loss(pre)?;
    let post_heat_loss = heat_loss::annual_fabric_heat_loss(post)?;
    let total_floor_areas = pre.total_floor_areas();

    let energy_values = itertools::izip!(pre.iter(), pre_heat_loss, post_heat_loss, total_floor_areas)
        .map(|(building, pre_loss, post_loss, floor_area)| {
            let mut improvement = (pre_loss - post_loss) / floor_area;
            if !improvement.is_finite() {
                improvement = EnergyIntensity(0.0);
            }
            building.energy_value - improvement
        })
        .collect();

    Ok(energy_values)
}

/// The pre- vs post-retrofit BER distribution table
pub fn calculate_ber_improvement(
    pre: &Stock,
    post: &Stock,
) -> Result<Vec<ComparisonRow<EnergyRating>>, MissingComponentError> {
    let pre_ratings: Vec<_> = pre
        .iter()
        .map(|building| EnergyRating::of(building.energy_value))
        .collect();
    let post_ratings: Vec<_> = post_retrofit_energy_values(pre, post)?
        .into_iter()
        .map(EnergyRating::of)
        .collect();

    Ok(combine_pre_and_post(&pre_ratings, &post_ratings))
}

/// The pre- vs post-retrofit coarse-band distribution table
pub fn calculate_band_improvement(
    pre: &Stock,
    post: &Stock,
) -> Result<Vec<ComparisonRow<RatingBand>>, MissingComponentError> {
    let pre_bands: Vec<_> = pre
        .iter()
        .map(|building| RatingBand::of(building.energy_value))
        .collect();
    let post_bands: Vec<_> = post_retrofit_energy_values(pre, post)?
        .into_iter()
        .map(RatingBand::of)
        .collect();

    Ok(combine_pre_and_post(&pre_bands, &post_bands))
}

/// The pre- vs post-retrofit heat-pump-viability table.
///
/// Viability is classified from each snapshot's heat-loss parameter, so the post
/// column reflects the retrofitted fabric.
pub fn calculate_heat_pump_viability(
    pre: &Stock,
    post: &Stock,
) -> Result<Vec<ComparisonRow<HeatPumpViability>>, MissingComponentError> {
    let classify = |stock: &Stock| -> Result<Vec<_>, MissingComponentError> {
        stock
            .iter()
            .map(|building| Ok(HeatPumpViability::of(heat_loss::heat_loss_parameter(building)?)))
            .collect()
    };

    Ok(combine_pre_and_post(&classify(pre)?, &classify(post)?))
}

/// One row of the portfolio cost summary
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CostSummaryRow {
    /// The cost column, e.g. "wall_cost_lower"
    pub column: String,
    /// Total over all buildings, in millions of euro rounded to 2 decimals
    pub millions: f64,
}

/// Sum each retrofit cost column over the stock, in millions of euro.
///
/// One lower and one upper row per retrofitted component, in plan order.
pub fn retrofit_cost_summary(post: &Stock) -> Vec<CostSummaryRow> {
    let components: Vec<_> = post
        .iter()
        .flat_map(|building| building.retrofit_costs.keys().copied())
        .unique()
        .collect();

    let to_millions = |total: Money| (total.value() / 1e6 * 100.0).round() / 100.0;

    components
        .into_iter()
        .flat_map(|component| {
            let costs = |building: &crate::stock::Building| {
                building.retrofit_costs.get(&component).copied()
            };
            let lower: Money = post.iter().filter_map(&costs).map(|range| range.lower).sum();
            let upper: Money = post.iter().filter_map(&costs).map(|range| range.upper).sum();
            [
                CostSummaryRow {
                    column: format!("{component}_cost_lower"),
                    millions: to_millions(lower),
                },
                CostSummaryRow {
                    column: format!("{component}_cost_upper"),
                    millions: to_millions(upper),
                },
            ]
        })
        .collect()
}
