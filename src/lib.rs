//! A tool for simulating fabric retrofits of a residential building stock.
//!
//! Given a building stock table and a retrofit scenario (per-component U-value
//! thresholds and targets, the share of eligible buildings to upgrade and unit cost
//! bounds), the simulation selects buildings for retrofit, recomputes fabric heat
//! loss, reclassifies Building Energy Ratings (BER) and estimates portfolio-level
//! cost ranges.
#![warn(missing_docs)]
use std::env;
use std::path::PathBuf;

pub mod archetypes;
pub mod cli;
pub mod filter;
#[cfg(test)]
mod fixture;
pub mod heat_loss;
pub mod id;
pub mod improvement;
pub mod input;
pub mod log;
pub mod output;
pub mod physics;
pub mod rating;
pub mod retrofit;
pub mod scenario;
pub mod settings;
pub mod simulation;
pub mod stock;
pub mod units;

/// The URL for filing bug reports
pub const ISSUES_URL: &str = "https://github.com/codema-dev/retrofit-sim/issues";

/// The name of the environment variable which overrides the config folder path
pub const CONFIG_DIR_ENV_VAR: &str = "RETROFIT_SIM_CONFIG_DIR";

/// Get the path to the program's config folder.
///
/// Can be overridden with the environment variable named by [`CONFIG_DIR_ENV_VAR`].
pub fn get_config_dir() -> PathBuf {
    if let Ok(dir) = env::var(CONFIG_DIR_ENV_VAR) {
        return dir.into();
    }

    dirs::config_dir().unwrap_or_default().join("retrofit-sim")
}
