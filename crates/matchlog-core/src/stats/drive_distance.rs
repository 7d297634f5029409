//! Driven-distance statistic
//!
//! Integrates each swerve module's drive encoder into the total linear
//! distance driven over a log, plus cross-log combinators for reporting.

use std::collections::{BTreeMap, HashMap};

use super::Statistic;
use crate::snapshot::Snapshot;
use crate::units::{rotations_to_meters, WHEEL_CIRCUMFERENCE_METERS};

const SWERVE_TABLE: &str = "Swerve";
const MODULE_TABLES: [&str; 4] = [
    "Module_FrontLeft",
    "Module_FrontRight",
    "Module_BackLeft",
    "Module_BackRight",
];
const DRIVE_POSITION_ROTS: &str = "DrivePositionRots";

/// Total driven distance per module, in meters.
pub type ModuleDistances = BTreeMap<String, f64>;

/// Per-module driven-distance integrator.
///
/// Accumulates the absolute tick-to-tick change of each module's drive
/// position, so direction reversals add distance instead of canceling.
/// A module whose channel is absent on a tick carries its total forward
/// unchanged; the first reading of a module only establishes its baseline
/// and adds no distance.
#[derive(Debug, Clone)]
pub struct DriveDistance {
    /// Linear distance covered by one wheel rotation, in meters.
    pub wheel_circumference_m: f64,
}

impl Default for DriveDistance {
    fn default() -> Self {
        Self {
            wheel_circumference_m: WHEEL_CIRCUMFERENCE_METERS,
        }
    }
}

/// Accumulator: last known and total driven distance per module.
#[derive(Debug, Default)]
pub struct DriveDistanceState {
    last_m: HashMap<String, f64>,
    driven_m: ModuleDistances,
}

impl Statistic for DriveDistance {
    type Output = ModuleDistances;
    type State = DriveDistanceState;

    fn begin(&self) -> DriveDistanceState {
        DriveDistanceState::default()
    }

    fn observe(&self, state: &mut DriveDistanceState, snapshot: &Snapshot) {
        let swerve = snapshot.table(SWERVE_TABLE);
        for module in MODULE_TABLES {
            let Some(rotations) = swerve.table(module).get_double_opt(DRIVE_POSITION_ROTS) else {
                continue;
            };
            let next_m = rotations_to_meters(rotations, self.wheel_circumference_m);
            match state.last_m.insert(module.to_string(), next_m) {
                Some(last_m) => {
                    *state.driven_m.entry(module.to_string()).or_insert(0.0) +=
                        (next_m - last_m).abs();
                }
                // First reading: baseline only, no distance added.
                None => {
                    state.driven_m.entry(module.to_string()).or_insert(0.0);
                }
            }
        }
    }

    fn finish(&self, state: DriveDistanceState, _snapshot: &Snapshot) -> ModuleDistances {
        state.driven_m
    }
}

/// Sum each module's distance across all logs.
pub fn sum_by_log(by_log: &[ModuleDistances]) -> ModuleDistances {
    let mut totals = ModuleDistances::new();
    for distances in by_log {
        for (module, meters) in distances {
            *totals.entry(module.clone()).or_insert(0.0) += meters;
        }
    }
    totals
}

/// Average the module distances within each log.
///
/// A log with no module data averages to 0.0.
pub fn average_by_log(by_log: &[ModuleDistances]) -> Vec<f64> {
    by_log
        .iter()
        .map(|distances| {
            if distances.is_empty() {
                0.0
            } else {
                distances.values().sum::<f64>() / distances.len() as f64
            }
        })
        .collect()
}

/// Sum of the per-log module-distance averages.
pub fn sum_of_averages_by_log(by_log: &[ModuleDistances]) -> f64 {
    average_by_log(by_log).iter().sum()
}
