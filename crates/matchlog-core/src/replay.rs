//! Log replay
//!
//! Drives a decoded log tick by tick over a single rolling [`Snapshot`].

use std::path::Path;

use thiserror::Error;

use crate::snapshot::Snapshot;
use crate::wpilog::{WpilogError, WpilogReader};

/// Errors that can occur while replaying a log
#[derive(Error, Debug)]
pub enum ReplayError {
    #[error("log decode error: {0}")]
    Decode(#[from] WpilogError),

    #[error("log source error: {0}")]
    Source(String),
}

/// A source of timestamped telemetry ticks — the decoder boundary.
///
/// Implementations rewind with [`start`](TickSource::start) and advance the
/// supplied snapshot one recorded tick at a time with
/// [`step`](TickSource::step). An error is fatal to this source only; other
/// logs in a batch keep processing.
pub trait TickSource {
    /// Rewind to the first tick.
    fn start(&mut self);

    /// Advance `snapshot` to the next tick: publish every channel recorded
    /// on it and set the tick's timestamp.
    ///
    /// Returns `Ok(false)` once the log is exhausted.
    fn step(&mut self, snapshot: &mut Snapshot) -> Result<bool, ReplayError>;
}

/// One recorded session, replayed tick by tick.
///
/// Owns the source and exactly one live [`Snapshot`]; stepping mutates the
/// snapshot in place rather than allocating a new one per tick.
pub struct LogReplay {
    source: Box<dyn TickSource>,
    snapshot: Snapshot,
}

impl LogReplay {
    /// Wrap a tick source for replay.
    pub fn new(source: Box<dyn TickSource>) -> Self {
        Self {
            source,
            snapshot: Snapshot::new(),
        }
    }

    /// Open a `.wpilog` file for replay.
    pub fn from_wpilog<P: AsRef<Path>>(path: P) -> Result<Self, WpilogError> {
        Ok(Self::new(Box::new(WpilogReader::open(path)?)))
    }

    /// Rewind to the beginning of the log and clear the snapshot.
    pub fn start(&mut self) {
        self.snapshot.clear();
        self.source.start();
    }

    /// Advance the snapshot to the next tick.
    ///
    /// Returns `Ok(false)` once the log is exhausted.
    pub fn step(&mut self) -> Result<bool, ReplayError> {
        self.source.step(&mut self.snapshot)
    }

    /// The rolling snapshot cursor.
    ///
    /// After the final `step` this still holds the last tick's state, which
    /// is what timestamp-dependent statistics finalize against.
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }
}
