use assert_cmd::cargo_bin_cmd;
use std::fs;
use std::path::Path;

#[allow(dead_code)]
pub fn assert_retrofit_sim_runs(args: &[&str]) {
    cargo_bin_cmd!("retrofit-sim")
        .env("RETROFIT_SIM_USE_DEFAULT_SETTINGS", "1")
        .args(args)
        .assert()
        .success();
}

#[allow(dead_code)]
pub fn get_retrofit_sim_stdout(args: &[&str]) -> String {
    let output = cargo_bin_cmd!("retrofit-sim")
        .env("RETROFIT_SIM_USE_DEFAULT_SETTINGS", "1")
        .args(args)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    String::from_utf8(output).unwrap()
}

const SCENARIO_TOML: &str = r#"
seed = 42

[filter]
energy_ratings = ["C", "D", "E", "F", "G"]

[retrofit.wall]
percentage_selected = 0.5
uvalue = { threshold = 0.2, target = 0.5 }
cost = { lower = 50.0, upper = 300.0 }
"#;

const STOCK_CSV: &str = "\
small_area,dwelling_type,period_built,wall_type,energy_value,\
roof_area,roof_uvalue,wall_area,wall_uvalue,floor_area,floor_uvalue,\
window_area,window_uvalue,door_area,door_uvalue,\
ground_floor_area,first_floor_area,second_floor_area,third_floor_area
267112001,Semi-detached house,1961 - 1970,Concrete Hollow Block,50,40,0.5,50,0.1,40,0.6,10,2.8,2,3,50,50,0,0
267112002,Semi-detached house,1961 - 1970,Concrete Hollow Block,200,40,0.5,150,2,40,0.6,10,2.8,2,3,50,50,0,0
267112003,Semi-detached house,1961 - 1970,Concrete Hollow Block,600,40,0.5,100,2,40,0.6,10,2.8,2,3,50,50,0,0
267112004,Terraced house,1971 - 1980,Cavity,350,35,0.4,90,1.8,35,0.5,8,2.6,2,3,45,45,0,0
";

/// Write a small but complete scenario directory for integration tests
pub fn write_scenario_dir(dir: &Path) {
    fs::write(dir.join("scenario.toml"), SCENARIO_TOML).unwrap();
    fs::write(dir.join("stock.csv"), STOCK_CSV).unwrap();
}
