//! Code for reading input files: the stock table, archetypes and scenario.
use crate::archetypes::WallArchetypes;
use crate::scenario::Scenario;
use crate::stock::Stock;
use crate::units::Dimensionless;
use anyhow::{Context, Result, ensure};
use serde::Deserialize;
use serde::de::{Deserializer, Error};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

pub mod archetype;
pub mod stock;

/// A standard error message for a problem with an input file
pub fn input_err_msg<P: AsRef<Path>>(file_path: P) -> String {
    format!("Error reading {}", file_path.as_ref().display())
}

/// Parse a TOML file at the specified path
pub fn read_toml<T: for<'de> Deserialize<'de>>(file_path: &Path) -> Result<T> {
    let toml_str = fs::read_to_string(file_path)
        .with_context(|| format!("Could not read file {}", file_path.display()))?;
    toml::from_str(&toml_str)
        .with_context(|| format!("Could not parse TOML file {}", file_path.display()))
}

/// Read a CSV file into a `Vec` of deserialized records, preserving row order
pub fn read_csv<T: for<'de> Deserialize<'de>>(file_path: &Path) -> Result<Vec<T>> {
    let mut reader = csv::Reader::from_path(file_path)
        .with_context(|| format!("Could not open file {}", file_path.display()))?;
    let records: Vec<T> = reader
        .deserialize()
        .collect::<csv::Result<_>>()
        .with_context(|| input_err_msg(file_path))?;

    Ok(records)
}

/// Read a CSV file, returning an empty `Vec` if the file does not exist
pub fn read_csv_optional<T: for<'de> Deserialize<'de>>(file_path: &Path) -> Result<Vec<T>> {
    if !file_path.is_file() {
        return Ok(Vec::new());
    }

    read_csv(file_path)
}

/// Deserialise a proportion, checking it lies in [0, 1]
pub fn deserialise_proportion<'de, D>(deserialiser: D) -> Result<Dimensionless, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Dimensionless::deserialize(deserialiser)?;
    if !(0.0..=1.0).contains(&value.value()) {
        return Err(D::Error::custom(format!(
            "Value must be in the range [0, 1], got {value}"
        )));
    }

    Ok(value)
}

/// Load a complete scenario: the scenario file plus the stock it operates on.
///
/// Archetype tables, if present in the scenario directory, are applied to the stock
/// before it is returned.
pub fn load_scenario(scenario_dir: &Path) -> Result<(Scenario, Stock)> {
    ensure!(
        scenario_dir.is_dir(),
        "Scenario directory does not exist: {}",
        scenario_dir.display()
    );
    let scenario = Scenario::from_path(scenario_dir)?;
    let archetypes = archetype::read_wall_archetypes(scenario_dir)?;
    let stock = stock::read_stock(scenario_dir, &archetypes)?;

    Ok((scenario, stock))
}

/// An explicit memoization cache for loaded stocks, keyed by source path.
///
/// The first caller for a given path loads and stores the stock; subsequent callers
/// get the cached value. Source data is static per deployment, so there is no
/// invalidation within a session.
#[derive(Default)]
pub struct StockCache {
    cache: HashMap<PathBuf, Rc<Stock>>,
}

impl StockCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the stock for `scenario_dir`, loading and caching it on first request
    pub fn get_or_load(
        &mut self,
        scenario_dir: &Path,
        archetypes: &WallArchetypes,
    ) -> Result<Rc<Stock>> {
        if let Some(stock) = self.cache.get(scenario_dir) {
            return Ok(Rc::clone(stock));
        }

        let stock = Rc::new(stock::read_stock(scenario_dir, archetypes)?);
        self.cache
            .insert(scenario_dir.to_path_buf(), Rc::clone(&stock));

        Ok(stock)
    }
}
