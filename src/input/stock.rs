//! Code for reading the building stock from a CSV file.
use super::{input_err_msg, read_csv};
use crate::archetypes::{self, WallArchetypes};
use crate::stock::{Building, FabricComponent, FabricElement, FloorAreas, Stock};
use crate::units::{Area, EnergyIntensity, UValue};
use anyhow::{Context, Result, ensure};
use indexmap::IndexMap;
use itertools::Itertools;
use serde::Deserialize;
use std::path::Path;

/// The name of the stock file within a scenario directory
pub const STOCK_FILE_NAME: &str = "stock.csv";

/// One row of the stock CSV file.
///
/// Component area/U-value pairs are optional: a pair may be absent entirely
/// (no data for that component) and a wall U-value may additionally be filled in
/// from archetypes.
#[derive(Debug, Deserialize, PartialEq)]
struct BuildingRaw {
    small_area: String,
    #[serde(default)]
    dwelling_type: Option<String>,
    #[serde(default)]
    period_built: Option<String>,
    #[serde(default)]
    wall_type: Option<String>,
    energy_value: f64,
    #[serde(default)]
    roof_area: Option<f64>,
    #[serde(default)]
    roof_uvalue: Option<f64>,
    #[serde(default)]
    wall_area: Option<f64>,
    #[serde(default)]
    wall_uvalue: Option<f64>,
    #[serde(default)]
    floor_area: Option<f64>,
    #[serde(default)]
    floor_uvalue: Option<f64>,
    #[serde(default)]
    window_area: Option<f64>,
    #[serde(default)]
    window_uvalue: Option<f64>,
    #[serde(default)]
    door_area: Option<f64>,
    #[serde(default)]
    door_uvalue: Option<f64>,
    #[serde(default)]
    ground_floor_area: f64,
    #[serde(default)]
    first_floor_area: f64,
    #[serde(default)]
    second_floor_area: f64,
    #[serde(default)]
    third_floor_area: f64,
}

/// Read the building stock CSV file from a scenario directory.
///
/// Wall types and U-values missing from the file are filled in from `archetypes`
/// where possible.
pub fn read_stock(scenario_dir: &Path, archetypes: &WallArchetypes) -> Result<Stock> {
    let file_path = scenario_dir.join(STOCK_FILE_NAME);
    let rows: Vec<BuildingRaw> = read_csv(&file_path)?;
    read_stock_from_iter(rows.into_iter(), archetypes).with_context(|| input_err_msg(&file_path))
}

/// Process stock rows from an iterator
fn read_stock_from_iter<I>(iter: I, archetypes: &WallArchetypes) -> Result<Stock>
where
    I: Iterator<Item = BuildingRaw>,
{
    let mut estimated_types = 0;
    let mut estimated_uvalues = 0;

    let buildings: Vec<Building> = iter
        .map(|row| -> Result<_> {
            let building = build_record(row, archetypes)?;
            estimated_types += building.wall_type_is_estimated as usize;
            estimated_uvalues += building.wall_uvalue_is_estimated as usize;
            Ok(building)
        })
        .try_collect()?;
    ensure!(!buildings.is_empty(), "Stock file contains no buildings");

    archetypes::log_estimation_counts(estimated_types, estimated_uvalues);

    Ok(Stock::new(buildings))
}

/// Validate and convert one raw row into a [`Building`]
fn build_record(row: BuildingRaw, archetypes: &WallArchetypes) -> Result<Building> {
    let wall_properties = archetypes.estimate_wall_properties(
        row.wall_type.as_deref(),
        row.wall_uvalue.map(UValue),
        row.dwelling_type.as_deref(),
        row.period_built.as_deref(),
    );

    let mut fabric = IndexMap::new();
    let pairs = [
        (FabricComponent::Roof, row.roof_area, row.roof_uvalue),
        (
            FabricComponent::Wall,
            row.wall_area,
            wall_properties.uvalue.map(|uvalue| uvalue.value()),
        ),
        (FabricComponent::Floor, row.floor_area, row.floor_uvalue),
        (FabricComponent::Window, row.window_area, row.window_uvalue),
        (FabricComponent::Door, row.door_area, row.door_uvalue),
    ];
    for (component, area, uvalue) in pairs {
        let (Some(area), Some(uvalue)) = (area, uvalue) else {
            continue;
        };
        ensure!(
            area >= 0.0,
            "Negative {component} area for building in small area {}",
            row.small_area
        );
        ensure!(
            uvalue >= 0.0,
            "Negative {component} U-value for building in small area {}",
            row.small_area
        );
        fabric.insert(
            component,
            FabricElement {
                area: Area(area),
                uvalue: UValue(uvalue),
            },
        );
    }

    let floor_areas = FloorAreas {
        ground: Area(row.ground_floor_area),
        first: Area(row.first_floor_area),
        second: Area(row.second_floor_area),
        third: Area(row.third_floor_area),
    };
    ensure!(
        floor_areas.total() >= Area(0.0),
        "Negative floor area for building in small area {}",
        row.small_area
    );

    Ok(Building {
        small_area: row.small_area.as_str().into(),
        dwelling_type: row.dwelling_type,
        period_built: row.period_built,
        wall_type: wall_properties.wall_type,
        wall_type_is_estimated: wall_properties.wall_type_is_estimated,
        wall_uvalue_is_estimated: wall_properties.uvalue_is_estimated,
        energy_value: EnergyIntensity(row.energy_value),
        fabric,
        floor_areas,
        retrofit_costs: IndexMap::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::write_stock_csv;
    use crate::units::UValue;
    use rstest::{fixture, rstest};
    use tempfile::tempdir;

    #[fixture]
    fn raw_row() -> BuildingRaw {
        BuildingRaw {
            small_area: "267112001".into(),
            dwelling_type: Some("Semi-detached house".into()),
            period_built: Some("1961 - 1970".into()),
            wall_type: None,
            energy_value: 200.0,
            roof_area: Some(40.0),
            roof_uvalue: Some(0.5),
            wall_area: Some(100.0),
            wall_uvalue: Some(2.0),
            floor_area: Some(40.0),
            floor_uvalue: Some(0.6),
            window_area: Some(10.0),
            window_uvalue: Some(2.8),
            door_area: Some(2.0),
            door_uvalue: Some(3.0),
            ground_floor_area: 50.0,
            first_floor_area: 50.0,
            second_floor_area: 0.0,
            third_floor_area: 0.0,
        }
    }

    #[rstest]
    fn build_record_valid(raw_row: BuildingRaw) {
        let building = build_record(raw_row, &WallArchetypes::default()).unwrap();
        assert_eq!(building.fabric.len(), 5);
        assert_eq!(
            building.fabric[&FabricComponent::Wall],
            FabricElement {
                area: Area(100.0),
                uvalue: UValue(2.0)
            }
        );
        assert_eq!(building.floor_areas.total(), Area(100.0));
        assert!(!building.wall_uvalue_is_estimated);
    }

    #[rstest]
    fn missing_pair_omits_component(mut raw_row: BuildingRaw) {
        raw_row.door_uvalue = None;
        let building = build_record(raw_row, &WallArchetypes::default()).unwrap();
        assert!(!building.fabric.contains_key(&FabricComponent::Door));
        assert_eq!(building.fabric.len(), 4);
    }

    #[rstest]
    fn negative_area_is_rejected(mut raw_row: BuildingRaw) {
        raw_row.roof_area = Some(-1.0);
        build_record(raw_row, &WallArchetypes::default()).unwrap_err();
    }

    #[rstest]
    fn negative_uvalue_is_rejected(mut raw_row: BuildingRaw) {
        raw_row.window_uvalue = Some(-0.1);
        build_record(raw_row, &WallArchetypes::default()).unwrap_err();
    }

    #[rstest]
    fn wall_uvalue_estimated_from_archetype(mut raw_row: BuildingRaw) {
        raw_row.wall_uvalue = None;
        let key = ("Semi-detached house".to_string(), "1961 - 1970".to_string());
        let archetypes = WallArchetypes {
            types: [(key.clone(), "Concrete Hollow Block".to_string())]
                .into_iter()
                .collect(),
            uvalues: [(key, UValue(2.4))].into_iter().collect(),
        };

        let building = build_record(raw_row, &archetypes).unwrap();
        assert_eq!(
            building.fabric[&FabricComponent::Wall].uvalue,
            UValue(2.4)
        );
        assert!(building.wall_uvalue_is_estimated);
        assert_eq!(
            building.wall_type.as_deref(),
            Some("Concrete Hollow Block")
        );
        assert!(building.wall_type_is_estimated);
    }

    #[test]
    fn read_stock_from_dir() {
        let dir = tempdir().unwrap();
        write_stock_csv(dir.path());
        let stock = read_stock(dir.path(), &WallArchetypes::default()).unwrap();
        assert_eq!(stock.len(), 3);
    }

    #[test]
    fn empty_stock_is_an_error() {
        read_stock_from_iter(std::iter::empty(), &WallArchetypes::default()).unwrap_err();
    }
}
