//! Random selection of buildings eligible for a fabric retrofit.
use crate::units::{Dimensionless, UValue};
use itertools::Itertools;
use rand::Rng;

/// Select buildings for retrofit, returning a boolean mask in row order.
///
/// Buildings are eligible when their baseline U-value is strictly above
/// `threshold`. From the eligible subset, a simple random sample without
/// replacement of `round(percentage_selected × |eligible|)` buildings is drawn
/// using `rng`. The mask is true exactly for the drawn buildings.
///
/// The draw depends only on the eligible subset's stable ordering and the state of
/// `rng`, so reseeding `rng` identically reproduces the selection bit-for-bit.
pub fn select_for_retrofit(
    uvalues: &[UValue],
    threshold: UValue,
    percentage_selected: Dimensionless,
    rng: &mut impl Rng,
) -> Vec<bool> {
    let eligible: Vec<usize> = uvalues
        .iter()
        .positions(|uvalue| *uvalue > threshold)
        .collect();
    let amount = (percentage_selected.value() * eligible.len() as f64).round() as usize;

    let mut is_selected = vec![false; uvalues.len()];
    for position in rand::seq::index::sample(rng, eligible.len(), amount) {
        is_selected[eligible[position]] = true;
    }

    is_selected
}
