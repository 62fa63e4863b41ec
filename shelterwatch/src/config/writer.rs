//! INI serialization: `ConfigFile` → commented config.ini text.

use std::path::Path;

use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    let client_id = config.map.client_id.as_deref().unwrap_or("");
    let dataset = config
        .shelters
        .dataset
        .as_deref()
        .map(path_to_string)
        .unwrap_or_default();

    format!(
        r#"[tracking]
; Minimum time between location fixes while tracking (milliseconds)
interval_ms = {}
; Minimum movement between location fixes while tracking (metres)
; A fix is delivered when either threshold is crossed
distance_m = {}

[map]
; Wait after the map reports ready before sending the buffered location (milliseconds)
settle_delay_ms = {}
; Map provider client id. Leave empty to run the map in fallback mode.
; The SHELTERWATCH_MAP_CLIENT_ID environment variable overrides this value.
client_id = {}

[shelters]
; Maximum number of shelters in the nearby list
limit = {}
; JSON file with the shelter dataset. Leave empty for the built-in Gimhae list.
dataset = {}

[logging]
; Directory for log files (relative paths are relative to the working directory)
directory = {}
; Log file name, cleared at the start of each session
file = {}
"#,
        config.tracking.interval_ms,
        config.tracking.distance_m,
        config.map.settle_delay_ms,
        client_id,
        config.shelters.limit,
        dataset,
        path_to_string(&config.logging.directory),
        config.logging.file,
    )
}

fn path_to_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
