//! Matchlog command-line driver
//!
//! Replays one or more WPILOG files and prints the derived match statistics.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use serde::Serialize;

use matchlog_core::replay::LogReplay;
use matchlog_core::stats::drive_distance::{sum_by_log, sum_of_averages_by_log, ModuleDistances};
use matchlog_core::stats::{
    ChargeStation, ChargeStationReport, DriveDistance, LogResult, Statistic, WattHours,
};

#[derive(Parser)]
#[command(name = "matchlog")]
#[command(about = "Post-match telemetry analytics for FRC WPILOG files")]
#[command(version)]
struct Args {
    /// WPILOG files to analyze
    #[arg(required = true)]
    logs: Vec<PathBuf>,

    /// Emit results as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Override the wheel circumference in meters
    #[arg(long)]
    wheel_circumference: Option<f64>,
}

/// Per-log results, `null` where the log failed mid-replay.
#[derive(Serialize)]
struct LogReport {
    path: String,
    module_distances_m: Option<ModuleDistances>,
    watt_hours: Option<f64>,
    charge_station: Option<ChargeStationReport>,
}

/// Cross-log distance summary over the logs that replayed cleanly.
#[derive(Serialize)]
struct Summary {
    total_distance_sum_of_averages_m: f64,
    total_distance_by_module_m: ModuleDistances,
    total_distance_all_modules_m: f64,
}

#[derive(Serialize)]
struct Report {
    logs: Vec<LogReport>,
    summary: Summary,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    // A file that fails to open is skipped; the rest of the batch still runs.
    let mut paths = Vec::new();
    let mut logs = Vec::new();
    for path in &args.logs {
        match LogReplay::from_wpilog(path) {
            Ok(replay) => {
                paths.push(path.clone());
                logs.push(replay);
            }
            Err(err) => tracing::warn!("skipping {}: {err}", path.display()),
        }
    }
    if logs.is_empty() {
        anyhow::bail!("no readable logs");
    }

    let mut drive = DriveDistance::default();
    if let Some(circumference_m) = args.wheel_circumference {
        drive.wheel_circumference_m = circumference_m;
    }

    let distances = drive.compute(&mut logs);
    let watt_hours = WattHours.compute(&mut logs);
    let charge = ChargeStation::default().compute(&mut logs);

    warn_failures(&paths, &distances);

    // Failed logs are skipped explicitly before the combinators run.
    let distance_maps: Vec<ModuleDistances> = distances
        .iter()
        .filter_map(|result| result.as_ref().ok().cloned())
        .collect();

    let summary = Summary {
        total_distance_sum_of_averages_m: sum_of_averages_by_log(&distance_maps),
        total_distance_by_module_m: sum_by_log(&distance_maps),
        total_distance_all_modules_m: sum_by_log(&distance_maps).values().sum(),
    };

    if args.json {
        let report = Report {
            logs: paths
                .iter()
                .zip(&distances)
                .zip(&watt_hours)
                .zip(&charge)
                .map(|(((path, distance), energy), station)| LogReport {
                    path: path.display().to_string(),
                    module_distances_m: distance.as_ref().ok().cloned(),
                    watt_hours: energy.as_ref().ok().copied(),
                    charge_station: station.as_ref().ok().copied(),
                })
                .collect(),
            summary,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "Total distance driven (averaged over modules): {:.2}m",
        summary.total_distance_sum_of_averages_m
    );
    println!("Distances driven (by module, in meters):");
    for (module, meters) in &summary.total_distance_by_module_m {
        println!("  {module}: {meters:.2}m");
    }
    println!(
        "Total distance driven (of all modules): {:.2}m",
        summary.total_distance_all_modules_m
    );

    for (path, energy) in paths.iter().zip(&watt_hours) {
        match energy {
            Ok(wh) => println!("Energy consumed by {}: {:.1}Wh", path.display(), wh),
            Err(_) => println!("Energy consumed by {}: n/a", path.display()),
        }
    }

    for (path, station) in paths.iter().zip(&charge) {
        match station {
            Ok(report) => println!(
                "Charge station attempt in {}: {}",
                path.display(),
                report.attempted_charge
            ),
            Err(_) => println!("Charge station attempt in {}: n/a", path.display()),
        }
    }

    Ok(())
}

fn warn_failures<T>(paths: &[PathBuf], results: &[LogResult<T>]) {
    for (path, result) in paths.iter().zip(results) {
        if let Err(err) = result {
            tracing::warn!("{}: {err}", path.display());
        }
    }
}
