//! Rank command - list the nearest shelters to a fixed position.

use std::path::PathBuf;

use clap::Args;
use shelterwatch::actions::{RecordingLauncher, ShelterActions};
use shelterwatch::app::AppConfig;
use shelterwatch::geo::GeoFix;
use shelterwatch::shelter::{rank, RankedShelter};
use tracing::info;

use super::common::{is_terminal, parse_origin, resolve};
use crate::error::CliError;
use crate::runner::CliRunner;

/// Schemes the command-line launcher accepts when printing actions.
const ACTION_SCHEMES: [&str; 3] = ["tel", "http", "maps"];

/// Arguments for the rank command.
#[derive(Debug, Args)]
pub struct RankArgs {
    /// Latitude in decimal degrees
    #[arg(long, allow_hyphen_values = true)]
    pub lat: f64,

    /// Longitude in decimal degrees
    #[arg(long, allow_hyphen_values = true)]
    pub lon: f64,

    /// Maximum number of shelters (default from config)
    #[arg(long)]
    pub limit: Option<usize>,

    /// Shelter dataset JSON file (default from config, else built-in)
    #[arg(long)]
    pub dataset: Option<PathBuf>,

    /// Also print the call and route URIs for each shelter
    #[arg(long)]
    pub actions: bool,
}

/// Run the rank command.
pub fn run(runner: &CliRunner, args: RankArgs) -> Result<(), CliError> {
    runner.log_startup("rank");

    let origin = parse_origin(args.lat, args.lon)?;

    let file = runner.config();
    let mut config = AppConfig::from_config_file(file);
    config.shelter_limit = resolve(args.limit, config.shelter_limit);
    if args.dataset.is_some() {
        config.dataset = args.dataset;
    }

    let candidates = config.directory().shelters()?;
    let ranked = rank(&origin, &candidates, config.shelter_limit);
    info!(
        candidates = candidates.len(),
        returned = ranked.len(),
        "Ranked shelters from {}",
        origin
    );

    if ranked.is_empty() {
        println!("No shelters found.");
        return Ok(());
    }

    let decorate = is_terminal();
    let actions = args
        .actions
        .then(|| ShelterActions::new(RecordingLauncher::new(ACTION_SCHEMES)));

    println!("Nearest shelters to {}", origin);
    println!();
    for (index, entry) in ranked.iter().enumerate() {
        println!("{}", format_row(index, entry, decorate));
        if let Some(actions) = &actions {
            print_actions(actions, &origin, entry)?;
        }
    }

    Ok(())
}

fn print_actions(
    actions: &ShelterActions<RecordingLauncher>,
    origin: &GeoFix,
    entry: &RankedShelter,
) -> Result<(), CliError> {
    let call = actions.call(&entry.shelter)?;
    let route = actions.navigate(Some(origin), &entry.shelter)?;
    println!("     call:  {}", call);
    println!("     route: {}", route);
    Ok(())
}

/// One list row: position, name, kind, distance, capacity and contact.
fn format_row(index: usize, entry: &RankedShelter, decorate: bool) -> String {
    let shelter = &entry.shelter;
    let icon = if decorate {
        format!("{} ", shelter.kind.icon())
    } else {
        String::new()
    };

    format!(
        "{:>2}. {}{} [{}] {} | capacity {} | {}",
        index + 1,
        icon,
        shelter.name,
        shelter.kind.label(),
        entry.formatted_distance(),
        shelter.capacity,
        shelter.contact_number,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelterwatch::geo::DEFAULT_ORIGIN;
    use shelterwatch::shelter::StaticDirectory;

    fn ranked() -> Vec<RankedShelter> {
        rank(&DEFAULT_ORIGIN, &StaticDirectory::gimhae().into_shelters(), 8)
    }

    #[test]
    fn test_plain_row() {
        let rows = ranked();
        assert_eq!(
            format_row(0, &rows[0], false),
            " 1. 김해시 체육관 [실내체육시설] 0m | capacity 2000 | 055-330-3000"
        );
    }

    #[test]
    fn test_decorated_row_has_icon() {
        let rows = ranked();
        let row = format_row(0, &rows[0], true);
        assert!(row.starts_with(" 1. 🏟️ 김해시 체육관"));
    }
}
