//! Code for writing simulation results to CSV files.
use crate::improvement::{ComparisonRow, CostSummaryRow};
use crate::stock::{FabricComponent, Stock};
use anyhow::{Context, Result, ensure};
use itertools::Itertools;
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};
use strum::IntoEnumIterator;

pub mod metadata;
use metadata::write_metadata;

/// The output file name for the BER comparison table
const BER_IMPROVEMENT_FILE_NAME: &str = "ber_improvement.csv";
/// The output file name for the coarse-band comparison table
const BAND_IMPROVEMENT_FILE_NAME: &str = "band_improvement.csv";
/// The output file name for the heat-pump-viability comparison table
const HEAT_PUMP_VIABILITY_FILE_NAME: &str = "heat_pump_viability.csv";
/// The output file name for the portfolio cost summary
const RETROFIT_COSTS_FILE_NAME: &str = "retrofit_costs.csv";
/// The output file name for the post-retrofit stock
const POST_RETROFIT_STOCK_FILE_NAME: &str = "post_retrofit_stock.csv";

/// Get the output directory for a scenario, under `results_root`
pub fn get_output_dir(scenario_path: &Path, results_root: PathBuf) -> Result<PathBuf> {
    let scenario_name = scenario_path
        .file_name()
        .context("Could not resolve scenario directory name")?;

    Ok(results_root.join(scenario_name))
}

/// Create a directory for output files.
///
/// If the directory already exists it is only removed and recreated when
/// `overwrite` is true; otherwise this is an error.
///
/// # Returns
///
/// Whether an existing directory was overwritten.
pub fn create_output_directory(output_path: &Path, overwrite: bool) -> Result<bool> {
    let existed = output_path.exists();
    if existed {
        ensure!(
            overwrite,
            "Output directory {} already exists. Use --overwrite to replace it.",
            output_path.display()
        );
        fs::remove_dir_all(output_path)?;
    }
    fs::create_dir_all(output_path)?;

    Ok(existed)
}

/// Writes simulation result files to an output directory
pub struct DataWriter {
    output_path: PathBuf,
}

impl DataWriter {
    /// Create a writer for `output_path`, recording run metadata up front
    pub fn create(output_path: &Path, scenario_path: &Path) -> Result<Self> {
        write_metadata(output_path, scenario_path).context("Failed to save run metadata.")?;

        Ok(Self {
            output_path: output_path.to_path_buf(),
        })
    }

    /// Write a pre/post comparison table with the given label column name
    pub fn write_comparison<L: Display>(
        &self,
        file_name: &str,
        label_column: &str,
        rows: &[ComparisonRow<L>],
    ) -> Result<()> {
        let file_path = self.output_path.join(file_name);
        let mut writer = csv::Writer::from_path(&file_path)
            .with_context(|| format!("Could not create {}", file_path.display()))?;
        writer.write_record([label_column, "category", "total"])?;
        for row in rows {
            writer.write_record([
                row.label.to_string(),
                row.category.to_string(),
                row.total.to_string(),
            ])?;
        }
        writer.flush()?;

        Ok(())
    }

    /// Write the BER comparison table
    pub fn write_ber_improvement<L: Display>(&self, rows: &[ComparisonRow<L>]) -> Result<()> {
        self.write_comparison(BER_IMPROVEMENT_FILE_NAME, "energy_rating", rows)
    }

    /// Write the coarse-band comparison table
    pub fn write_band_improvement<L: Display>(&self, rows: &[ComparisonRow<L>]) -> Result<()> {
        self.write_comparison(BAND_IMPROVEMENT_FILE_NAME, "band", rows)
    }

    /// Write the heat-pump-viability comparison table
    pub fn write_heat_pump_viability<L: Display>(&self, rows: &[ComparisonRow<L>]) -> Result<()> {
        self.write_comparison(HEAT_PUMP_VIABILITY_FILE_NAME, "viability", rows)
    }

    /// Write the portfolio cost summary
    pub fn write_cost_summary(&self, rows: &[CostSummaryRow]) -> Result<()> {
        let file_path = self.output_path.join(RETROFIT_COSTS_FILE_NAME);
        let mut writer = csv::Writer::from_path(&file_path)
            .with_context(|| format!("Could not create {}", file_path.display()))?;
        writer.write_record(["column", "M€"])?;
        for row in rows {
            writer.write_record([row.column.clone(), format!("{:.2}", row.millions)])?;
        }
        writer.flush()?;

        Ok(())
    }

    /// Write the full post-retrofit stock, one row per building
    pub fn write_stock(&self, stock: &Stock) -> Result<()> {
        let file_path = self.output_path.join(POST_RETROFIT_STOCK_FILE_NAME);
        let mut writer = csv::Writer::from_path(&file_path)
            .with_context(|| format!("Could not create {}", file_path.display()))?;

        // Cost columns cover every component retrofitted anywhere in the stock
        let cost_components: Vec<FabricComponent> = stock
            .iter()
            .flat_map(|building| building.retrofit_costs.keys().copied())
            .unique()
            .collect();

        let mut header = vec![
            "small_area".to_string(),
            "dwelling_type".to_string(),
            "period_built".to_string(),
            "wall_type".to_string(),
            "energy_value".to_string(),
            "total_floor_area".to_string(),
        ];
        for component in FabricComponent::iter() {
            header.push(format!("{component}_area"));
            header.push(format!("{component}_uvalue"));
        }
        for component in &cost_components {
            header.push(format!("{component}_cost_lower"));
            header.push(format!("{component}_cost_upper"));
        }
        writer.write_record(&header)?;

        for building in stock.iter() {
            let mut record = vec![
                building.small_area.to_string(),
                building.dwelling_type.clone().unwrap_or_default(),
                building.period_built.clone().unwrap_or_default(),
                building.wall_type.clone().unwrap_or_default(),
                building.energy_value.to_string(),
                building.floor_areas.total().to_string(),
            ];
            for component in FabricComponent::iter() {
                match building.fabric.get(&component) {
                    Some(element) => {
                        record.push(element.area.to_string());
                        record.push(element.uvalue.to_string());
                    }
                    None => {
                        record.push(String::new());
                        record.push(String::new());
                    }
                }
            }
            for component in &cost_components {
                match building.retrofit_costs.get(component) {
                    Some(range) => {
                        record.push(range.lower.to_string());
                        record.push(range.upper.to_string());
                    }
                    None => {
                        record.push("0".to_string());
                        record.push("0".to_string());
                    }
                }
            }
            writer.write_record(&record)?;
        }
        writer.flush()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::stock;
    use crate::improvement::Category;
    use crate::rating::EnergyRating;
    use rstest::rstest;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn create_output_directory_fresh() {
        let dir = tempdir().unwrap();
        let output_path = dir.path().join("results");
        assert!(!create_output_directory(&output_path, false).unwrap());
        assert!(output_path.is_dir());
    }

    #[test]
    fn create_output_directory_existing_no_overwrite() {
        let dir = tempdir().unwrap();
        create_output_directory(dir.path(), false).unwrap_err();
    }

    #[test]
    fn create_output_directory_existing_overwrite() {
        let dir = tempdir().unwrap();
        let stale = dir.path().join("stale.csv");
        fs::write(&stale, "x").unwrap();
        assert!(create_output_directory(dir.path(), true).unwrap());
        assert!(!stale.exists());
    }

    #[test]
    fn write_comparison_table() {
        let dir = tempdir().unwrap();
        let writer = DataWriter::create(dir.path(), Path::new("scenario")).unwrap();
        writer
            .write_ber_improvement(&[
                ComparisonRow {
                    label: EnergyRating::A2,
                    category: Category::Post,
                    total: 2,
                },
                ComparisonRow {
                    label: EnergyRating::C2,
                    category: Category::Pre,
                    total: 1,
                },
            ])
            .unwrap();

        let contents = fs::read_to_string(dir.path().join(BER_IMPROVEMENT_FILE_NAME)).unwrap();
        assert_eq!(contents, "energy_rating,category,total\nA2,Post,2\nC2,Pre,1\n");
    }

    #[test]
    fn write_cost_summary_rounds_display() {
        let dir = tempdir().unwrap();
        let writer = DataWriter::create(dir.path(), Path::new("scenario")).unwrap();
        writer
            .write_cost_summary(&[CostSummaryRow {
                column: "wall_cost_lower".into(),
                millions: 1.5,
            }])
            .unwrap();

        let contents = fs::read_to_string(dir.path().join(RETROFIT_COSTS_FILE_NAME)).unwrap();
        assert_eq!(contents, "column,M€\nwall_cost_lower,1.50\n");
    }

    #[rstest]
    fn write_stock_has_one_row_per_building(stock: Stock) {
        let dir = tempdir().unwrap();
        let writer = DataWriter::create(dir.path(), Path::new("scenario")).unwrap();
        writer.write_stock(&stock).unwrap();

        let contents =
            fs::read_to_string(dir.path().join(POST_RETROFIT_STOCK_FILE_NAME)).unwrap();
        assert_eq!(contents.lines().count(), 1 + stock.len());
    }

    #[test]
    fn metadata_is_written_on_create() {
        let dir = tempdir().unwrap();
        DataWriter::create(dir.path(), Path::new("scenario")).unwrap();
        assert!(dir.path().join(metadata::METADATA_FILE_NAME).is_file());
    }
}
