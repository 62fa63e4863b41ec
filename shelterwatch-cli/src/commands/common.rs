//! Helpers shared across CLI commands.

use std::path::Path;

use shelterwatch::config::ConfigFile;
use shelterwatch::geo::GeoFix;

use crate::error::CliError;

/// Load the config file from `path`, or from the default location.
pub fn load_config(path: Option<&Path>) -> Result<ConfigFile, CliError> {
    let config = match path {
        Some(path) => ConfigFile::load_from(path)?,
        None => ConfigFile::load()?,
    };
    Ok(config)
}

/// Prefer the CLI value when given.
pub fn resolve<T>(cli: Option<T>, config: T) -> T {
    cli.unwrap_or(config)
}

/// Validate a latitude/longitude pair from the command line.
pub fn parse_origin(lat: f64, lon: f64) -> Result<GeoFix, CliError> {
    GeoFix::new(lat, lon).map_err(|e| CliError::InvalidArgument(e.to_string()))
}

/// Whether stdout is an interactive terminal.
pub fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_prefers_cli() {
        assert_eq!(resolve(Some(3), 8), 3);
        assert_eq!(resolve(None, 8), 8);
    }

    #[test]
    fn test_parse_origin_rejects_out_of_range() {
        assert!(parse_origin(35.2, 128.9).is_ok());
        assert!(matches!(
            parse_origin(95.0, 128.9),
            Err(CliError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config = load_config(Some(&temp_dir.path().join("config.ini"))).unwrap();
        assert_eq!(config.shelters.limit, 8);
    }
}
