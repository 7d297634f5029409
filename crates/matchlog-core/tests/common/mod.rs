//! Shared helpers for building synthetic log replays.

#![allow(dead_code)]

use matchlog_core::replay::{LogReplay, ReplayError, TickSource};
use matchlog_core::snapshot::{LogValue, Snapshot};

/// One scripted tick: a timestamp plus the channels published on it.
#[derive(Debug, Clone)]
pub struct Tick {
    pub timestamp_us: u64,
    pub updates: Vec<(String, LogValue)>,
}

/// Build a tick from borrowed channel pairs.
pub fn tick(timestamp_us: u64, updates: &[(&str, LogValue)]) -> Tick {
    Tick {
        timestamp_us,
        updates: updates
            .iter()
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect(),
    }
}

/// Replays a fixed script of ticks.
pub struct ScriptedSource {
    ticks: Vec<Tick>,
    cursor: usize,
}

impl TickSource for ScriptedSource {
    fn start(&mut self) {
        self.cursor = 0;
    }

    fn step(&mut self, snapshot: &mut Snapshot) -> Result<bool, ReplayError> {
        let Some(tick) = self.ticks.get(self.cursor) else {
            return Ok(false);
        };
        snapshot.set_timestamp_us(tick.timestamp_us);
        for (key, value) in &tick.updates {
            snapshot.insert(key.clone(), value.clone());
        }
        self.cursor += 1;
        Ok(true)
    }
}

/// Wrap a script of ticks as a replayable log.
pub fn replay_of(ticks: Vec<Tick>) -> LogReplay {
    LogReplay::new(Box::new(ScriptedSource { ticks, cursor: 0 }))
}

/// A source that yields one good tick and then fails, standing in for a log
/// that is corrupt partway through.
pub struct FailingSource {
    stepped: bool,
}

impl FailingSource {
    pub fn new() -> Self {
        Self { stepped: false }
    }
}

impl TickSource for FailingSource {
    fn start(&mut self) {
        self.stepped = false;
    }

    fn step(&mut self, snapshot: &mut Snapshot) -> Result<bool, ReplayError> {
        if self.stepped {
            return Err(ReplayError::Source("synthetic corruption".into()));
        }
        self.stepped = true;
        snapshot.set_timestamp_us(1_000);
        Ok(true)
    }
}

/// Wrap a failing source as a replayable log.
pub fn failing_replay() -> LogReplay {
    LogReplay::new(Box::new(FailingSource::new()))
}
