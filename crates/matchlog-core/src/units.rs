//! Unit Conversion Functions
//!
//! Conversion helpers shared by the statistics:
//! - Length: inches ↔ meters, wheel rotations → linear meters
//! - Time: microseconds → hours

use std::f64::consts::PI;

/// Drive wheel diameter in meters (4 inch swerve wheel).
pub const WHEEL_DIAMETER_METERS: f64 = 0.1016;

/// Linear distance covered by one full wheel rotation, in meters.
pub const WHEEL_CIRCUMFERENCE_METERS: f64 = WHEEL_DIAMETER_METERS * PI;

/// Convert inches to meters
pub fn inches_to_meters(inches: f64) -> f64 {
    inches * 0.0254
}

/// Convert meters to inches
pub fn meters_to_inches(meters: f64) -> f64 {
    meters / 0.0254
}

/// Convert wheel rotations to linear distance in meters
pub fn rotations_to_meters(rotations: f64, wheel_circumference_m: f64) -> f64 {
    rotations * wheel_circumference_m
}

/// Convert microseconds to hours
pub fn microseconds_to_hours(microseconds: f64) -> f64 {
    (microseconds / 1e6) / 3600.0
}
