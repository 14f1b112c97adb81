//! Read and validate a retrofit scenario from `scenario.toml`.
//!
//! A scenario bundles everything one simulation run needs apart from the stock
//! itself: the stock filter, the per-component retrofit plan and the random seed.
use crate::filter::StockFilter;
use crate::input::{input_err_msg, read_toml};
use crate::retrofit::{DEFAULT_SEED, RetrofitPlan};
use crate::units::UValue;
use anyhow::{Context, Result, ensure};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// The name of the scenario file within a scenario directory
pub const SCENARIO_FILE_NAME: &str = "scenario.toml";

fn default_seed() -> u64 {
    DEFAULT_SEED
}

/// A retrofit scenario as defined in the `scenario.toml` file
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    /// Path to the scenario directory
    #[serde(skip)]
    pub scenario_path: PathBuf,
    /// Random seed for eligibility sampling.
    ///
    /// The default is fixed for reproducibility but not guaranteed to be stable
    /// across versions; set it explicitly wherever that matters.
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Criteria restricting which buildings are simulated
    #[serde(default)]
    pub filter: StockFilter,
    /// Retrofit parameters per fabric component
    #[serde(default)]
    pub retrofit: RetrofitPlan,
}

impl Scenario {
    /// Read a scenario from the `scenario.toml` file in `scenario_dir`
    pub fn from_path(scenario_dir: &Path) -> Result<Self> {
        let file_path = scenario_dir.join(SCENARIO_FILE_NAME);
        let mut scenario: Scenario =
            read_toml(&file_path).with_context(|| input_err_msg(&file_path))?;
        scenario.scenario_path = scenario_dir.to_path_buf();
        scenario
            .validate()
            .with_context(|| input_err_msg(&file_path))?;

        Ok(scenario)
    }

    /// Check the scenario's numeric parameters are sensible.
    ///
    /// Note that `cost.lower ≤ cost.upper` is assumed, not enforced: a scenario may
    /// legitimately explore a degenerate cost range.
    fn validate(&self) -> Result<()> {
        for (component, selection) in &self.retrofit {
            ensure!(
                selection.uvalue.threshold >= UValue(0.0),
                "U-value threshold for {component} must be non-negative"
            );
            ensure!(
                selection.uvalue.target >= UValue(0.0),
                "Target U-value for {component} must be non-negative"
            );
            ensure!(
                selection.cost.lower.value() >= 0.0 && selection.cost.upper.value() >= 0.0,
                "Unit costs for {component} must be non-negative"
            );
        }

        Ok(())
    }
}
