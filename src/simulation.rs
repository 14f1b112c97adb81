//! Functionality for running a retrofit simulation.
//!
//! One run is a synchronous pipeline: filter the stock, retrofit the filtered
//! buildings, aggregate pre- vs post-retrofit performance and write the results.
//! Every run produces a fresh post-retrofit stock; the input stock is never
//! mutated.
use crate::filter::get_selected_buildings;
use crate::improvement::{
    calculate_band_improvement, calculate_ber_improvement, calculate_heat_pump_viability,
    retrofit_cost_summary,
};
use crate::output::DataWriter;
use crate::retrofit::retrofit_stock;
use crate::scenario::Scenario;
use crate::stock::Stock;
use anyhow::{Context, Result};
use log::info;
use std::path::Path;

/// Run the simulation.
///
/// # Arguments:
///
/// * `scenario` - The scenario to run
/// * `stock` - The full building stock
/// * `output_path` - The folder to which output files will be written
/// * `save_stock` - Whether to also write the full post-retrofit stock
pub fn run(scenario: &Scenario, stock: &Stock, output_path: &Path, save_stock: bool) -> Result<()> {
    let writer = DataWriter::create(output_path, &scenario.scenario_path)?;

    // Select the buildings taking part in this simulation
    info!("Getting selected buildings...");
    let pre_retrofit = get_selected_buildings(stock, &scenario.filter)?;
    info!(
        "Selected {} of {} buildings",
        pre_retrofit.len(),
        stock.len()
    );

    // Apply the retrofit plan
    info!("Retrofitting buildings...");
    let post_retrofit = retrofit_stock(&pre_retrofit, &scenario.retrofit, scenario.seed)
        .context("Retrofit simulation failed")?;

    // Aggregate pre- vs post-retrofit performance
    info!("Calculating BER improvement...");
    let ber_improvement = calculate_ber_improvement(&pre_retrofit, &post_retrofit)?;
    let band_improvement = calculate_band_improvement(&pre_retrofit, &post_retrofit)?;
    let heat_pump_viability = calculate_heat_pump_viability(&pre_retrofit, &post_retrofit)?;
    let cost_summary = retrofit_cost_summary(&post_retrofit);

    // Write results
    writer.write_ber_improvement(&ber_improvement)?;
    writer.write_band_improvement(&band_improvement)?;
    writer.write_heat_pump_viability(&heat_pump_viability)?;
    writer.write_cost_summary(&cost_summary)?;
    if save_stock {
        writer.write_stock(&post_retrofit)?;
    }

    Ok(())
}
