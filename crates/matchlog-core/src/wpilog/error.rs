//! Error types for WPILOG decoding

use thiserror::Error;

/// Errors that can occur while decoding a WPILOG file
#[derive(Error, Debug)]
pub enum WpilogError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("not a WPILOG file (bad magic)")]
    BadMagic,

    #[error("unsupported WPILOG version: {major}.{minor}")]
    UnsupportedVersion { major: u8, minor: u8 },

    #[error("truncated file: {0}")]
    Truncated(&'static str),

    #[error("malformed record at byte {offset}: {message}")]
    MalformedRecord { offset: usize, message: &'static str },
}
