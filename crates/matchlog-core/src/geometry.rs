//! 2D field geometry primitives
//!
//! Minimal translation/rotation/pose algebra for the pose-based statistics.
//! Distances are meters, angles radians, counter-clockwise positive, with
//! the blue-alliance origin in the field's lower-left corner.

use serde::{Deserialize, Serialize};

/// A 2D translation in meters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Translation2d {
    /// X component in meters (along the field's long axis).
    pub x: f64,
    /// Y component in meters (along the field's short axis).
    pub y: f64,
}

impl Translation2d {
    /// Create a new translation.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise difference.
    pub fn minus(self, other: Translation2d) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }

    /// Rotate this translation around the origin.
    pub fn rotate_by(self, rotation: Rotation2d) -> Self {
        let (sin, cos) = rotation.radians().sin_cos();
        Self::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }
}

/// A 2D rotation (heading).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rotation2d {
    radians: f64,
}

impl Rotation2d {
    /// Create a rotation from an angle in radians.
    pub fn new(radians: f64) -> Self {
        Self { radians }
    }

    /// Create a rotation from an angle in degrees.
    pub fn from_degrees(degrees: f64) -> Self {
        Self::new(degrees.to_radians())
    }

    /// The angle in radians.
    pub fn radians(self) -> f64 {
        self.radians
    }

    /// The angle in degrees.
    pub fn degrees(self) -> f64 {
        self.radians.to_degrees()
    }

    /// Difference of two rotations.
    pub fn minus(self, other: Rotation2d) -> Self {
        Self::new(self.radians - other.radians)
    }

    /// The inverse rotation.
    pub fn unary_minus(self) -> Self {
        Self::new(-self.radians)
    }
}

/// A 2D pose: translation plus heading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose2d {
    /// Position on the field.
    pub translation: Translation2d,
    /// Heading.
    pub rotation: Rotation2d,
}

impl Pose2d {
    /// Create a pose from coordinates and a heading.
    pub fn new(x: f64, y: f64, rotation: Rotation2d) -> Self {
        Self {
            translation: Translation2d::new(x, y),
            rotation,
        }
    }

    /// Create a pose from its parts.
    pub fn from_parts(translation: Translation2d, rotation: Rotation2d) -> Self {
        Self {
            translation,
            rotation,
        }
    }

    /// X coordinate in meters.
    pub fn x(&self) -> f64 {
        self.translation.x
    }

    /// Y coordinate in meters.
    pub fn y(&self) -> f64 {
        self.translation.y
    }

    /// Express this pose in the coordinate frame of `origin`.
    ///
    /// The returned pose is where this pose sits as seen from `origin`,
    /// with `origin` itself mapping to the identity pose.
    pub fn relative_to(self, origin: Pose2d) -> Pose2d {
        let translation = self
            .translation
            .minus(origin.translation)
            .rotate_by(origin.rotation.unary_minus());
        Self::from_parts(translation, self.rotation.minus(origin.rotation))
    }
}
