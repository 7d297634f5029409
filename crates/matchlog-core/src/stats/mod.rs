//! Derived match statistics
//!
//! Each statistic replays every supplied log to exhaustion and reduces it to
//! one summary value per log.

pub mod charge_station;
pub mod drive_distance;
pub mod watt_hours;

pub use charge_station::{ChargeStation, ChargeStationReport, FieldGeometry};
pub use drive_distance::DriveDistance;
pub use watt_hours::WattHours;

use crate::replay::{LogReplay, ReplayError};
use crate::snapshot::Snapshot;

/// Per-log result of a statistic: the computed value, or the decode error
/// that stopped that log. A failed log never aborts the rest of the batch.
pub type LogResult<T> = Result<T, ReplayError>;

/// A pluggable computation over replayed logs.
///
/// [`compute`](Statistic::compute) maps N logs to N results in the same
/// order; result `i` depends only on log `i`, and replaying the same log
/// twice yields identical output. Concrete statistics supply the per-log
/// accumulator through [`begin`](Statistic::begin),
/// [`observe`](Statistic::observe) and [`finish`](Statistic::finish); the
/// replay loop itself is shared.
pub trait Statistic {
    /// Summary value produced per log.
    type Output;

    /// Accumulator state carried across one log's ticks.
    type State;

    /// Fresh accumulator for the start of one log.
    fn begin(&self) -> Self::State;

    /// Fold one tick into the accumulator.
    fn observe(&self, state: &mut Self::State, snapshot: &Snapshot);

    /// Finalize the accumulator once the log is exhausted.
    ///
    /// `snapshot` is the final state of the rolling cursor — the last tick
    /// seen, or empty for a zero-tick log — for results that depend on the
    /// final timestamp.
    fn finish(&self, state: Self::State, snapshot: &Snapshot) -> Self::Output;

    /// Replay every log to exhaustion, producing one result per log.
    fn compute(&self, logs: &mut [LogReplay]) -> Vec<LogResult<Self::Output>> {
        logs.iter_mut().map(|log| self.compute_one(log)).collect()
    }

    /// Replay a single log to exhaustion.
    fn compute_one(&self, log: &mut LogReplay) -> LogResult<Self::Output> {
        log.start();
        let mut state = self.begin();
        loop {
            match log.step() {
                Ok(true) => self.observe(&mut state, log.snapshot()),
                Ok(false) => break,
                Err(err) => {
                    tracing::warn!("abandoning log mid-replay: {err}");
                    return Err(err);
                }
            }
        }
        Ok(self.finish(state, log.snapshot()))
    }
}
