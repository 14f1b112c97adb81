//! Code for reading wall archetype tables from CSV files.
use super::{input_err_msg, read_csv_optional};
use crate::archetypes::WallArchetypes;
use crate::units::UValue;
use anyhow::{Context, Result, ensure};
use serde::Deserialize;
use std::path::Path;

/// Most common wall type per (dwelling type, period built)
pub const WALL_TYPE_ARCHETYPES_FILE_NAME: &str = "wall_type_archetypes.csv";
/// Default wall U-value per (dwelling type, period built)
pub const WALL_UVALUE_DEFAULTS_FILE_NAME: &str = "wall_uvalue_defaults.csv";

#[derive(Debug, Deserialize, PartialEq)]
struct WallTypeArchetypeRaw {
    dwelling_type: String,
    period_built: String,
    most_significant_wall_type: String,
}

#[derive(Debug, Deserialize, PartialEq)]
struct WallUValueDefaultRaw {
    dwelling_type: String,
    period_built: String,
    wall_uvalue: f64,
}

/// Read the wall archetype tables from a scenario directory.
///
/// Both files are optional; a missing file yields an empty table, in which case the
/// corresponding wall property is never estimated.
pub fn read_wall_archetypes(scenario_dir: &Path) -> Result<WallArchetypes> {
    let types_path = scenario_dir.join(WALL_TYPE_ARCHETYPES_FILE_NAME);
    let type_rows: Vec<WallTypeArchetypeRaw> =
        read_csv_optional(&types_path).with_context(|| input_err_msg(&types_path))?;

    let uvalues_path = scenario_dir.join(WALL_UVALUE_DEFAULTS_FILE_NAME);
    let uvalue_rows: Vec<WallUValueDefaultRaw> =
        read_csv_optional(&uvalues_path).with_context(|| input_err_msg(&uvalues_path))?;

    let mut archetypes = WallArchetypes::default();
    for row in type_rows {
        let key = (row.dwelling_type, row.period_built);
        ensure!(
            archetypes
                .types
                .insert(key.clone(), row.most_significant_wall_type)
                .is_none(),
            "Duplicate wall type archetype for ({}, {})",
            key.0,
            key.1
        );
    }
    for row in uvalue_rows {
        ensure!(
            row.wall_uvalue >= 0.0,
            "Negative default wall U-value for ({}, {})",
            row.dwelling_type,
            row.period_built
        );
        let key = (row.dwelling_type, row.period_built);
        ensure!(
            archetypes
                .uvalues
                .insert(key.clone(), UValue(row.wall_uvalue))
                .is_none(),
            "Duplicate wall U-value default for ({}, {})",
            key.0,
            key.1
        );
    }

    Ok(archetypes)
}
