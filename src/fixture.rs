//! Fixtures for tests

use crate::input::stock::STOCK_FILE_NAME;
use crate::retrofit::{CostBounds, RetrofitPlan, RetrofitSelection, UValueSpec};
use crate::stock::{Building, FabricComponent, FabricElement, FloorAreas, Stock};
use crate::units::{Area, Dimensionless, EnergyIntensity, MoneyPerArea, UValue};
use indexmap::{IndexMap, indexmap};
use rstest::fixture;
use std::fs;
use std::path::Path;

/// Assert that an error with the given message occurs
macro_rules! assert_error {
    ($result:expr, $msg:expr) => {
        assert_eq!($result.unwrap_err().to_string(), $msg);
    };
}
pub(crate) use assert_error;

/// Build one dwelling with the given identity, energy value and wall properties
fn building_with_wall(
    small_area: &str,
    energy_value: f64,
    wall_area: f64,
    wall_uvalue: f64,
) -> Building {
    Building {
        small_area: small_area.into(),
        dwelling_type: Some("Semi-detached house".into()),
        period_built: Some("1961 - 1970".into()),
        wall_type: Some("Concrete Hollow Block".into()),
        wall_type_is_estimated: false,
        wall_uvalue_is_estimated: false,
        energy_value: EnergyIntensity(energy_value),
        fabric: indexmap! {
            FabricComponent::Roof => FabricElement {
                area: Area(40.0),
                uvalue: UValue(0.5),
            },
            FabricComponent::Wall => FabricElement {
                area: Area(wall_area),
                uvalue: UValue(wall_uvalue),
            },
            FabricComponent::Floor => FabricElement {
                area: Area(40.0),
                uvalue: UValue(0.6),
            },
            FabricComponent::Window => FabricElement {
                area: Area(10.0),
                uvalue: UValue(2.8),
            },
            FabricComponent::Door => FabricElement {
                area: Area(2.0),
                uvalue: UValue(3.0),
            },
        },
        floor_areas: FloorAreas {
            ground: Area(50.0),
            first: Area(50.0),
            ..FloorAreas::default()
        },
        retrofit_costs: IndexMap::new(),
    }
}

#[fixture]
pub fn building() -> Building {
    building_with_wall("267112001", 200.0, 100.0, 2.0)
}

/// A three-building stock: an A2, a C2 and a G.
///
/// Wall U-values are [0.1, 2.0, 2.0] over areas [50, 150, 100], so exactly two
/// buildings are eligible under the wall plan from [`plan`].
#[fixture]
pub fn stock() -> Stock {
    Stock::new(vec![
        building_with_wall("267112001", 50.0, 50.0, 0.1),
        building_with_wall("267112002", 200.0, 150.0, 2.0),
        building_with_wall("267112003", 600.0, 100.0, 2.0),
    ])
}

#[fixture]
pub fn plan() -> RetrofitPlan {
    indexmap! {
        FabricComponent::Wall => RetrofitSelection {
            uvalue: UValueSpec {
                threshold: UValue(0.2),
                target: UValue(0.5),
            },
            percentage_selected: Dimensionless(0.5),
            cost: CostBounds {
                lower: MoneyPerArea(50.0),
                upper: MoneyPerArea(300.0),
            },
        },
    }
}

/// Write a stock CSV file matching the [`stock`] fixture to `dir`
pub fn write_stock_csv(dir: &Path) {
    let contents = "\
small_area,dwelling_type,period_built,wall_type,energy_value,\
roof_area,roof_uvalue,wall_area,wall_uvalue,floor_area,floor_uvalue,\
window_area,window_uvalue,door_area,door_uvalue,\
ground_floor_area,first_floor_area,second_floor_area,third_floor_area
267112001,Semi-detached house,1961 - 1970,Concrete Hollow Block,50,40,0.5,50,0.1,40,0.6,10,2.8,2,3,50,50,0,0
267112002,Semi-detached house,1961 - 1970,Concrete Hollow Block,200,40,0.5,150,2,40,0.6,10,2.8,2,3,50,50,0,0
267112003,Semi-detached house,1961 - 1970,Concrete Hollow Block,600,40,0.5,100,2,40,0.6,10,2.8,2,3,50,50,0,0
";
    fs::write(dir.join(STOCK_FILE_NAME), contents).unwrap();
}
