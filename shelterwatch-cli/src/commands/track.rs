//! Track command - replay a route through the tracking pipeline.
//!
//! The route is fed to a scripted location source, the full application
//! runs against the simulated map surface, and every command the surface
//! applied is printed once the replay goes quiet.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use clap::Args;
use shelterwatch::app::{AppConfig, AppError, ShelterWatchApp};
use shelterwatch::geo::GeoFix;
use shelterwatch::location::ScriptedLocationSource;
use shelterwatch::tracking::{TrackingEvent, UserCommand};
use tracing::{debug, info};

use crate::error::CliError;
use crate::runner::CliRunner;

/// A short walk through central Gimhae.
const DEMO_ROUTE: [(f64, f64); 5] = [
    (35.233596, 128.889544),
    (35.232810, 128.889320),
    (35.231540, 128.889010),
    (35.230120, 128.888640),
    (35.228557, 128.889036),
];

/// Arguments for the track command.
#[derive(Debug, Args)]
pub struct TrackArgs {
    /// JSON array of {"latitude", "longitude"} points (default: built-in demo walk)
    #[arg(long)]
    pub route: Option<PathBuf>,

    /// Toggle tracking off after this many location updates
    #[arg(long)]
    pub toggle_after: Option<usize>,

    /// Time between route points in milliseconds
    #[arg(long, default_value = "1000")]
    pub step_ms: u64,

    /// Stop after this long without any tracking event, in milliseconds
    #[arg(long, default_value = "3000")]
    pub idle_ms: u64,
}

/// Run the track command.
pub fn run(runner: &CliRunner, args: TrackArgs) -> Result<(), CliError> {
    runner.log_startup("track");

    let route = match &args.route {
        Some(path) => load_route(path)?,
        None => demo_route(),
    };
    info!(points = route.len(), step_ms = args.step_ms, "Replaying route");

    let source = ScriptedLocationSource::from_route(route, Duration::from_millis(args.step_ms));
    let config = AppConfig::from_config_file(runner.config());

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)?;

    runtime.block_on(replay(config, source, &args))
}

async fn replay(
    config: AppConfig,
    source: ScriptedLocationSource,
    args: &TrackArgs,
) -> Result<(), CliError> {
    let mut app = ShelterWatchApp::start(config, Arc::new(source));
    let mut events = app.take_events().ok_or(AppError::ServiceStopped)?;
    let idle = Duration::from_millis(args.idle_ms);
    let mut updates = 0usize;

    loop {
        let event = match tokio::time::timeout(idle, events.recv()).await {
            Ok(Some(event)) => event,
            Ok(None) => break,
            Err(_) => {
                debug!(idle_ms = args.idle_ms, "No tracking events, stopping replay");
                break;
            }
        };

        println!("{}", describe(&event));

        if let TrackingEvent::LocationChanged(_) = event {
            updates += 1;
            if args.toggle_after == Some(updates) {
                println!("-> toggling tracking");
                app.send(UserCommand::ToggleTracking).await?;
            }
        }
    }

    let report = app.shutdown().await?;

    println!();
    println!(
        "Surface applied {} command(s), rejected {}:",
        report.surface.applied().len(),
        report.surface.rejected()
    );
    for command in report.surface.applied() {
        let json = serde_json::to_string(command)
            .map_err(|e| CliError::App(AppError::TaskFailed(e.to_string())))?;
        println!("  {}", json);
    }
    println!();
    println!("Final location: {}", report.tracking.final_location);
    println!("Map zoom: {}", report.surface.zoom());

    Ok(())
}

/// One-line description of a tracking event.
fn describe(event: &TrackingEvent) -> String {
    match event {
        TrackingEvent::TrackingChanged { active: true } => "Tracking on".to_string(),
        TrackingEvent::TrackingChanged { active: false } => "Tracking off".to_string(),
        TrackingEvent::LocationChanged(fix) => format!("Location {}", fix),
        TrackingEvent::MapReady => "Map ready".to_string(),
        TrackingEvent::Notice(notice) => format!("Notice: {}", notice),
    }
}

fn demo_route() -> Vec<GeoFix> {
    DEMO_ROUTE
        .iter()
        .map(|&(latitude, longitude)| GeoFix {
            latitude,
            longitude,
        })
        .collect()
}

/// Read and validate a route file.
fn load_route(path: &Path) -> Result<Vec<GeoFix>, CliError> {
    let route_error = |reason: String| CliError::RouteFile {
        path: path.to_path_buf(),
        reason,
    };

    let content = std::fs::read_to_string(path).map_err(|e| route_error(e.to_string()))?;
    let points: Vec<GeoFix> =
        serde_json::from_str(&content).map_err(|e| route_error(e.to_string()))?;

    if points.is_empty() {
        return Err(route_error("route has no points".to_string()));
    }

    points
        .iter()
        .map(|p| p.validate().map_err(|e| route_error(e.to_string())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_demo_route_is_valid() {
        let route = demo_route();
        assert_eq!(route.len(), 5);
        assert!(route.iter().all(|p| p.validate().is_ok()));
    }

    #[test]
    fn test_load_route() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("route.json");
        fs::write(
            &path,
            r#"[{"latitude": 35.2, "longitude": 128.9}, {"latitude": 35.21, "longitude": 128.91}]"#,
        )
        .unwrap();

        let route = load_route(&path).unwrap();
        assert_eq!(route, vec![
            GeoFix::new(35.2, 128.9).unwrap(),
            GeoFix::new(35.21, 128.91).unwrap(),
        ]);
    }

    #[test]
    fn test_load_route_rejects_bad_points() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("route.json");

        fs::write(&path, r#"[{"latitude": 135.0, "longitude": 128.9}]"#).unwrap();
        assert!(matches!(load_route(&path), Err(CliError::RouteFile { .. })));

        fs::write(&path, "[]").unwrap();
        assert!(matches!(load_route(&path), Err(CliError::RouteFile { .. })));

        assert!(matches!(
            load_route(&temp_dir.path().join("missing.json")),
            Err(CliError::RouteFile { .. })
        ));
    }

    #[test]
    fn test_describe() {
        assert_eq!(describe(&TrackingEvent::MapReady), "Map ready");
        assert_eq!(
            describe(&TrackingEvent::TrackingChanged { active: false }),
            "Tracking off"
        );
        assert_eq!(
            describe(&TrackingEvent::LocationChanged(GeoFix::new(35.2, 128.9).unwrap())),
            "Location 35.200000, 128.900000"
        );
    }
}
