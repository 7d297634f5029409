//! Energy-consumption statistic
//!
//! Estimates the watt-hours drawn from the battery over a log.

use super::Statistic;
use crate::snapshot::Snapshot;
use crate::units::microseconds_to_hours;

const PDH_TABLE: &str = "PowerDistribution";
const SYSTEM_STATS_TABLE: &str = "SystemStats";
const BATTERY_VOLTAGE: &str = "BatteryVoltage";
const TOTAL_CURRENT: &str = "TotalCurrent";

/// Battery energy estimator.
///
/// Sums the instantaneous power sample (battery voltage × total current) on
/// every tick and scales the sum by the log's total duration. The sum is not
/// weighted by inter-tick time, so the result scales with sample count as
/// well as duration; the formula is kept as-is for comparability with
/// previously computed results.
#[derive(Debug, Clone, Copy, Default)]
pub struct WattHours;

/// Accumulator: the first tick's timestamp and the running power sum.
#[derive(Debug, Default)]
pub struct WattHoursState {
    first_timestamp_us: Option<u64>,
    total_watts: f64,
}

impl Statistic for WattHours {
    type Output = f64;
    type State = WattHoursState;

    fn begin(&self) -> WattHoursState {
        WattHoursState::default()
    }

    fn observe(&self, state: &mut WattHoursState, snapshot: &Snapshot) {
        state
            .first_timestamp_us
            .get_or_insert(snapshot.timestamp_us());

        let volts = snapshot
            .table(SYSTEM_STATS_TABLE)
            .get_double(BATTERY_VOLTAGE, 0.0);
        let amps = snapshot.table(PDH_TABLE).get_double(TOTAL_CURRENT, 0.0);
        state.total_watts += volts * amps;
    }

    fn finish(&self, state: WattHoursState, snapshot: &Snapshot) -> f64 {
        // A zero-tick log has no baseline and consumed no energy.
        let Some(first_us) = state.first_timestamp_us else {
            return 0.0;
        };
        let elapsed_us = snapshot.timestamp_us().saturating_sub(first_us);
        state.total_watts * microseconds_to_hours(elapsed_us as f64)
    }
}
