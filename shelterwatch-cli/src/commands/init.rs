//! Init command - write the default configuration file.

use std::path::Path;

use shelterwatch::config::{config_file_path, ConfigFile};

use crate::error::CliError;

/// Run the init command.
///
/// An existing file is left alone unless `force` is set.
pub fn run(path: Option<&Path>, force: bool) -> Result<(), CliError> {
    let target = path.map(Path::to_path_buf).unwrap_or_else(config_file_path);

    if !write_default(&target, force)? {
        println!("Configuration file already exists: {}", target.display());
        println!("Use --force to overwrite it with defaults.");
        return Ok(());
    }

    println!("Configuration file: {}", target.display());
    println!();
    println!("Edit this file to customize ShelterWatch settings.");
    println!("CLI arguments override config file values when specified.");
    Ok(())
}

/// Write defaults to `target`. Returns `false` if the file was kept.
fn write_default(target: &Path, force: bool) -> Result<bool, CliError> {
    if target.exists() && !force {
        return Ok(false);
    }
    ConfigFile::default().save_to(target)?;
    Ok(true)
}
