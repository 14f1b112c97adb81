//! CLI commands for managing the program settings file.
use crate::settings::{Settings, get_settings_file_path};
use anyhow::{Context, Result, ensure};
use clap::Subcommand;
use std::fs;

/// The available subcommands for managing the settings file.
#[derive(Subcommand)]
pub enum SettingsSubcommands {
    /// Print the default contents of the settings file.
    ShowDefault,
    /// Print the path to the settings file.
    Path,
    /// Write a settings file with default contents to the config directory.
    Init,
}

impl SettingsSubcommands {
    /// Execute the supplied settings subcommand
    pub fn execute(self) -> Result<()> {
        match self {
            Self::ShowDefault => {
                print!("{}", Settings::default_file_contents());
                Ok(())
            }
            Self::Path => {
                println!("{}", get_settings_file_path().display());
                Ok(())
            }
            Self::Init => handle_settings_init_command(),
        }
    }
}

/// Handle the `settings init` command.
fn handle_settings_init_command() -> Result<()> {
    let path = get_settings_file_path();
    ensure!(
        !path.is_file(),
        "Settings file already exists at {}",
        path.display()
    );

    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).context("Could not create config directory")?;
    }
    fs::write(&path, Settings::default_file_contents()).context("Could not write settings file")?;
    println!("Settings file written to {}", path.display());

    Ok(())
}
