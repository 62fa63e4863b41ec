//! INI parsing: the single place where key names map to struct fields.

use std::path::PathBuf;

use ini::Ini;

use super::file::ConfigFileError;
use super::settings::ConfigFile;

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [tracking] section
    if let Some(section) = ini.section(Some("tracking")) {
        if let Some(v) = section.get("interval_ms") {
            config.tracking.interval_ms = match v.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => ms,
                _ => {
                    return Err(invalid(
                        "tracking",
                        "interval_ms",
                        v,
                        "must be a positive integer (milliseconds)",
                    ))
                }
            };
        }
        if let Some(v) = section.get("distance_m") {
            config.tracking.distance_m = match v.trim().parse::<f64>() {
                Ok(m) if m.is_finite() && m >= 0.0 => m,
                _ => {
                    return Err(invalid(
                        "tracking",
                        "distance_m",
                        v,
                        "must be a non-negative number (metres)",
                    ))
                }
            };
        }
    }

    // [map] section
    if let Some(section) = ini.section(Some("map")) {
        if let Some(v) = section.get("settle_delay_ms") {
            config.map.settle_delay_ms = v.trim().parse().map_err(|_| {
                invalid("map", "settle_delay_ms", v, "must be an integer (milliseconds)")
            })?;
        }
        if let Some(v) = section.get("client_id") {
            let v = v.trim();
            if !v.is_empty() {
                config.map.client_id = Some(v.to_string());
            }
        }
    }

    // [shelters] section
    if let Some(section) = ini.section(Some("shelters")) {
        if let Some(v) = section.get("limit") {
            config.shelters.limit = match v.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => return Err(invalid("shelters", "limit", v, "must be a positive integer")),
            };
        }
        if let Some(v) = section.get("dataset") {
            let v = v.trim();
            if !v.is_empty() {
                config.shelters.dataset = Some(expand_tilde(v));
            }
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("directory") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.directory = expand_tilde(v);
            }
        }
        if let Some(v) = section.get("file") {
            let v = v.trim();
            if v.is_empty() || v.contains('/') || v.contains('\\') {
                return Err(invalid(
                    "logging",
                    "file",
                    v,
                    "must be a plain file name",
                ));
            }
            config.logging.file = v.to_string();
        }
    }

    Ok(config)
}

fn invalid(section: &str, key: &str, value: &str, reason: &str) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Expand a leading `~/` to the home directory.
fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Result<ConfigFile, ConfigFileError> {
        let ini = Ini::load_from_str(content).unwrap();
        parse_ini(&ini)
    }

    fn invalid_key(result: Result<ConfigFile, ConfigFileError>) -> (String, String) {
        match result {
            Err(ConfigFileError::InvalidValue { section, key, .. }) => (section, key),
            other => panic!("expected InvalidValue, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_is_default() {
        assert_eq!(parse("").unwrap(), ConfigFile::default());
    }

    #[test]
    fn test_full_file() {
        let config = parse(
            "[tracking]\ninterval_ms = 1000\ndistance_m = 2.5\n\
             [map]\nsettle_delay_ms = 0\nclient_id = abc\n\
             [shelters]\nlimit = 4\ndataset = /data/shelters.json\n\
             [logging]\ndirectory = /var/log/shelterwatch\nfile = sw.log\n",
        )
        .unwrap();

        assert_eq!(config.tracking.interval_ms, 1000);
        assert_eq!(config.tracking.distance_m, 2.5);
        assert_eq!(config.map.settle_delay_ms, 0);
        assert_eq!(config.map.client_id.as_deref(), Some("abc"));
        assert_eq!(config.shelters.limit, 4);
        assert_eq!(
            config.shelters.dataset,
            Some(PathBuf::from("/data/shelters.json"))
        );
        assert_eq!(
            config.logging.directory,
            PathBuf::from("/var/log/shelterwatch")
        );
        assert_eq!(config.logging.file, "sw.log");
    }

    #[test]
    fn test_blank_values_keep_defaults() {
        let config = parse("[map]\nclient_id =\n[shelters]\ndataset =\n").unwrap();
        assert!(config.map.client_id.is_none());
        assert!(config.shelters.dataset.is_none());
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let config = parse("[tracking]\naccuracy = high\n[extra]\nkey = 1\n").unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(
            invalid_key(parse("[tracking]\ninterval_ms = 0\n")),
            ("tracking".to_string(), "interval_ms".to_string())
        );
        assert_eq!(
            invalid_key(parse("[tracking]\ndistance_m = -1\n")),
            ("tracking".to_string(), "distance_m".to_string())
        );
        assert_eq!(
            invalid_key(parse("[map]\nsettle_delay_ms = half\n")),
            ("map".to_string(), "settle_delay_ms".to_string())
        );
        assert_eq!(
            invalid_key(parse("[shelters]\nlimit = 0\n")),
            ("shelters".to_string(), "limit".to_string())
        );
        assert_eq!(
            invalid_key(parse("[logging]\nfile = logs/x.log\n")),
            ("logging".to_string(), "file".to_string())
        );
    }

    #[test]
    fn test_expand_tilde() {
        assert_eq!(expand_tilde("/abs/path"), PathBuf::from("/abs/path"));
        assert_eq!(expand_tilde("relative"), PathBuf::from("relative"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde("~/data.json"), home.join("data.json"));
        }
    }
}
