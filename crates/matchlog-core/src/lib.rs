//! # Matchlog Core Library
//!
//! Core functionality for Matchlog, a post-match telemetry analytics tool
//! for FRC robot logs.

#![warn(missing_docs)]

//!
//! This library provides:
//! - WPILOG container decoding (the on-disk log format)
//! - Tick-by-tick log replay over a rolling telemetry snapshot
//! - Derived match statistics (driven distance, energy, charge station)
//! - Cross-log combinators for reporting
//!
//! ## Example
//!
//! ```rust,ignore
//! use matchlog_core::prelude::*;
//!
//! // Open the recorded logs to analyze
//! let mut logs = vec![
//!     LogReplay::from_wpilog("match_q42.wpilog")?,
//!     LogReplay::from_wpilog("match_q57.wpilog")?,
//! ];
//!
//! // One result per log, in input order
//! let by_log = DriveDistance::default().compute(&mut logs);
//! ```

pub mod geometry;
pub mod replay;
pub mod snapshot;
pub mod stats;
pub mod units;
pub mod wpilog;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::geometry::{Pose2d, Rotation2d, Translation2d};
    pub use crate::replay::{LogReplay, ReplayError, TickSource};
    pub use crate::snapshot::{LogValue, Snapshot};
    pub use crate::stats::{
        ChargeStation, ChargeStationReport, DriveDistance, FieldGeometry, LogResult, Statistic,
        WattHours,
    };
    pub use crate::wpilog::{WpilogError, WpilogReader};
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
