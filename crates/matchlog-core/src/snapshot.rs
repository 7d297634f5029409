//! Rolling telemetry snapshot
//!
//! The current state of every telemetry channel at one tick of a replayed
//! log. Channels are published sparsely, so a value stays visible until the
//! stream overwrites it.

use std::collections::HashMap;

use crate::geometry::{Pose2d, Rotation2d};

/// A typed telemetry channel value.
#[derive(Debug, Clone, PartialEq)]
pub enum LogValue {
    /// Boolean flag
    Boolean(bool),
    /// 64-bit signed integer
    Integer(i64),
    /// 32-bit floating point
    Float(f32),
    /// 64-bit floating point
    Double(f64),
    /// UTF-8 string
    String(String),
    /// Array of booleans
    BooleanArray(Vec<bool>),
    /// Array of 64-bit signed integers
    IntegerArray(Vec<i64>),
    /// Array of 32-bit floats
    FloatArray(Vec<f32>),
    /// Array of 64-bit floats
    DoubleArray(Vec<f64>),
    /// Array of UTF-8 strings
    StringArray(Vec<String>),
    /// Uninterpreted bytes
    Raw(Vec<u8>),
}

/// Rolling snapshot of all telemetry channels at one tick.
///
/// Keys are fully qualified channel names with `/` separating hierarchy
/// levels (`"DriverStation/MatchTime"`); [`Snapshot::table`] gives a view
/// of one level. Typed getters return a caller-supplied default when the
/// key is absent or holds a different type, so sparse logs never abort a
/// replay.
///
/// One instance is mutated in place for the whole replay of a log. Callers
/// must copy values out rather than hold the snapshot across ticks
/// expecting historical state.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    timestamp_us: u64,
    values: HashMap<String, LogValue>,
}

impl Snapshot {
    /// Create an empty snapshot at timestamp zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Timestamp of the current tick, in microseconds.
    pub fn timestamp_us(&self) -> u64 {
        self.timestamp_us
    }

    /// Set the timestamp of the current tick.
    pub fn set_timestamp_us(&mut self, timestamp_us: u64) {
        self.timestamp_us = timestamp_us;
    }

    /// Publish a channel value, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: LogValue) {
        self.values.insert(key.into(), value);
    }

    /// Drop every channel and reset the timestamp.
    pub fn clear(&mut self) {
        self.timestamp_us = 0;
        self.values.clear();
    }

    /// Number of channels currently visible.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether any channel is visible.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// View of one level of the channel hierarchy.
    pub fn table<'a>(&'a self, name: &str) -> TableRef<'a> {
        TableRef {
            snapshot: self,
            prefix: name.to_string(),
        }
    }

    fn raw(&self, key: &str) -> Option<&LogValue> {
        self.values.get(key)
    }

    /// Boolean channel, or `default` when absent or mismatched.
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.raw(key) {
            Some(LogValue::Boolean(value)) => *value,
            _ => default,
        }
    }

    /// Integer channel, or `default` when absent or mismatched.
    pub fn get_int(&self, key: &str, default: i64) -> i64 {
        match self.raw(key) {
            Some(LogValue::Integer(value)) => *value,
            _ => default,
        }
    }

    /// Floating-point channel, or `default` when absent or mismatched.
    ///
    /// Single-precision channels widen to `f64`.
    pub fn get_double(&self, key: &str, default: f64) -> f64 {
        self.get_double_opt(key).unwrap_or(default)
    }

    /// Floating-point channel, or `None` when absent or mismatched.
    pub fn get_double_opt(&self, key: &str) -> Option<f64> {
        match self.raw(key) {
            Some(LogValue::Double(value)) => Some(*value),
            Some(LogValue::Float(value)) => Some(f64::from(*value)),
            _ => None,
        }
    }

    /// String channel, or `default` when absent or mismatched.
    pub fn get_string(&self, key: &str, default: &str) -> String {
        match self.raw(key) {
            Some(LogValue::String(value)) => value.clone(),
            _ => default.to_string(),
        }
    }

    /// 2D pose channel, or `default` when absent or mismatched.
    ///
    /// Poses are recorded as a `double[3]` of `[x_meters, y_meters,
    /// heading_radians]`.
    pub fn get_pose(&self, key: &str, default: Pose2d) -> Pose2d {
        match self.raw(key) {
            Some(LogValue::DoubleArray(values)) if values.len() >= 3 => {
                Pose2d::new(values[0], values[1], Rotation2d::new(values[2]))
            }
            _ => default,
        }
    }
}

/// Borrowed view of one level of a [`Snapshot`]'s channel hierarchy.
///
/// Mirrors the nested-table access pattern of the recording framework:
/// `snapshot.table("RealOutputs").table("Odometry").get_pose("Robot2d", ..)`.
#[derive(Debug, Clone)]
pub struct TableRef<'a> {
    snapshot: &'a Snapshot,
    prefix: String,
}

impl<'a> TableRef<'a> {
    /// View of a nested level under this one.
    pub fn table(&self, name: &str) -> TableRef<'a> {
        TableRef {
            snapshot: self.snapshot,
            prefix: format!("{}/{}", self.prefix, name),
        }
    }

    fn qualify(&self, key: &str) -> String {
        format!("{}/{}", self.prefix, key)
    }

    /// Boolean channel under this level, or `default`.
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.snapshot.get_bool(&self.qualify(key), default)
    }

    /// Integer channel under this level, or `default`.
    pub fn get_int(&self, key: &str, default: i64) -> i64 {
        self.snapshot.get_int(&self.qualify(key), default)
    }

    /// Floating-point channel under this level, or `default`.
    pub fn get_double(&self, key: &str, default: f64) -> f64 {
        self.snapshot.get_double(&self.qualify(key), default)
    }

    /// Floating-point channel under this level, or `None` when absent.
    pub fn get_double_opt(&self, key: &str) -> Option<f64> {
        self.snapshot.get_double_opt(&self.qualify(key))
    }

    /// String channel under this level, or `default`.
    pub fn get_string(&self, key: &str, default: &str) -> String {
        self.snapshot.get_string(&self.qualify(key), default)
    }

    /// 2D pose channel under this level, or `default`.
    pub fn get_pose(&self, key: &str, default: Pose2d) -> Pose2d {
        self.snapshot.get_pose(&self.qualify(key), default)
    }
}
