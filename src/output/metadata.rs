//! Write run and program metadata to a TOML file in the output directory.
use anyhow::Result;
use chrono::prelude::*;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// The output filename used for metadata
pub const METADATA_FILE_NAME: &str = "metadata.toml";

/// Top-level metadata structure serialized to TOML
#[derive(Serialize)]
struct Metadata<'a> {
    run: RunMetadata<'a>,
    program: ProgramMetadata<'a>,
}

/// Information about the simulation run
#[derive(Serialize)]
struct RunMetadata<'a> {
    /// Path to the scenario which was run
    scenario_path: &'a Path,
    /// The date and time on which the run started
    datetime: String,
}

impl<'a> RunMetadata<'a> {
    fn new(scenario_path: &'a Path) -> Self {
        Self {
            scenario_path,
            datetime: Local::now().to_rfc2822(),
        }
    }
}

/// Information about the program build
#[derive(Serialize)]
struct ProgramMetadata<'a> {
    /// The program name
    name: &'a str,
    /// The program version as specified in Cargo.toml
    version: &'a str,
}

impl ProgramMetadata<'_> {
    fn new() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

/// Write metadata for the current run as a TOML file in `output_path`
pub fn write_metadata(output_path: &Path, scenario_path: &Path) -> Result<()> {
    let metadata = Metadata {
        run: RunMetadata::new(scenario_path),
        program: ProgramMetadata::new(),
    };
    let file_path = output_path.join(METADATA_FILE_NAME);
    fs::write(file_path, toml::to_string(&metadata)?)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn metadata_contains_program_version() {
        let dir = tempdir().unwrap();
        write_metadata(dir.path(), Path::new("my_scenario")).unwrap();

        let contents = fs::read_to_string(dir.path().join(METADATA_FILE_NAME)).unwrap();
        assert!(contents.contains(env!("CARGO_PKG_VERSION")));
        assert!(contents.contains("my_scenario"));
    }
}
