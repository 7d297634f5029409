//! WPILOG container decoding
//!
//! Reads the WPILib data log container format (`WPILOG`, version 1.0) and
//! exposes each recorded session as a tick source for replay.

mod error;
mod reader;

pub use error::WpilogError;
pub use reader::WpilogReader;
