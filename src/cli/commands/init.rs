use std::fs;
use std::path::PathBuf;

use crate::cli::InitArgs;
use crate::config::{CONFIG_FILE, CONFIG_TEMPLATE, CliOverrides, DEFAULT_DATA_DIR};
use crate::error::{CliError, Result};

/// Execute the init command.
///
/// # Errors
///
/// Returns an error if the directory or config file cannot be created, or
/// if a config file already exists and `--force` was not given.
pub fn execute(args: &InitArgs, overrides: &CliOverrides) -> Result<()> {
    let data_dir = overrides
        .data_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

    let config_path = data_dir.join(CONFIG_FILE);
    if config_path.exists() && !args.force {
        return Err(CliError::AlreadyInitialized { path: config_path });
    }

    fs::create_dir_all(&data_dir)?;
    fs::write(&config_path, CONFIG_TEMPLATE)?;

    let shown = dunce::canonicalize(&data_dir).unwrap_or(data_dir);
    tracing::info!(path = %shown.display(), "initialized board");
    println!("Initialized civic board in {}", shown.display());
    Ok(())
}
