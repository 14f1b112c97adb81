//! Cost estimation for fabric retrofits.
use crate::units::{Area, Money, MoneyPerArea};
use itertools::Itertools;

/// Estimate the cost of retrofitting one fabric component for every building.
///
/// The cost is `unit_cost × area` for selected buildings and zero otherwise, so the
/// sum over all buildings gives a portfolio-level cost estimate for the component.
/// Called once with the lower unit cost and once with the upper.
///
/// # Panics
///
/// If `is_selected` and `areas` have different lengths.
pub fn fabric_retrofit_cost(
    is_selected: &[bool],
    unit_cost: MoneyPerArea,
    areas: &[Area],
) -> Vec<Money> {
    is_selected
        .iter()
        .zip_eq(areas)
        .map(|(selected, area)| {
            if *selected {
                unit_cost * *area
            } else {
                Money(0.0)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn cost_is_unit_cost_times_area_where_selected() {
        let costs = fabric_retrofit_cost(
            &[true, false, true],
            MoneyPerArea(50.0),
            &[Area(50.0), Area(150.0), Area(100.0)],
        );
        assert_approx_eq!(Money, costs[0], Money(2500.0));
        assert_approx_eq!(Money, costs[1], Money(0.0));
        assert_approx_eq!(Money, costs[2], Money(5000.0));
    }

    #[test]
    fn cost_is_never_negative() {
        let costs = fabric_retrofit_cost(
            &[true, true],
            MoneyPerArea(300.0),
            &[Area(0.0), Area(120.0)],
        );
        assert!(costs.iter().all(|cost| *cost >= Money(0.0)));
    }

    #[test]
    #[should_panic]
    fn mismatched_lengths_panic() {
        fabric_retrofit_cost(&[true], MoneyPerArea(50.0), &[Area(1.0), Area(2.0)]);
    }
}
