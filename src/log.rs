//! Logging initialisation.
//!
//! Log messages are written to stderr and, when an output directory is supplied, to
//! a log file inside it. The level comes from the program settings and can be
//! overridden with an environment variable.
use anyhow::{Context, Result};
use chrono::Local;
use log::LevelFilter;
use std::env;
use std::path::Path;
use std::str::FromStr;
use std::sync::OnceLock;

/// The default program log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// The name of the environment variable which overrides the configured log level
pub const LOG_LEVEL_ENV_VAR: &str = "RETROFIT_SIM_LOG_LEVEL";

/// The name of the log file written to the output directory
const LOG_FILE_NAME: &str = "retrofit_sim.log";

/// Whether the logger has been initialised
static LOGGER_INITIALISED: OnceLock<()> = OnceLock::new();

/// Whether the program logger has been initialised yet
pub fn is_logger_initialised() -> bool {
    LOGGER_INITIALISED.get().is_some()
}

/// Initialise the program logger.
///
/// # Arguments
///
/// * `log_level` - The log level from program settings
/// * `output_path` - Directory to write the log file to, if any
pub fn init(log_level: &str, output_path: Option<&Path>) -> Result<()> {
    // An environment variable takes precedence over settings
    let log_level = env::var(LOG_LEVEL_ENV_VAR).unwrap_or_else(|_| log_level.to_string());
    let log_level = LevelFilter::from_str(&log_level)
        .with_context(|| format!("Invalid log level: {log_level}"))?;

    let mut dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                Local::now().format("%Y-%m-%dT%H:%M:%S"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(log_level)
        .chain(std::io::stderr());

    if let Some(output_path) = output_path {
        dispatch = dispatch.chain(fern::log_file(output_path.join(LOG_FILE_NAME))?);
    }

    dispatch.apply().context("Logger already initialised")?;
    LOGGER_INITIALISED.set(()).unwrap();

    Ok(())
}
