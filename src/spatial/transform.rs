//! World placement of a single instance

use glam::{Quat, Vec3};

/// Position plus rotation about the vertical axis
///
/// Every placed object in a level only ever turns around `y`, so rotation is
/// stored as a yaw angle and expanded to a quaternion on demand.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    /// World-space position
    pub position: Vec3,
    /// Rotation about the vertical axis in degrees
    pub yaw_degrees: f32,
}

impl Transform {
    /// Create a transform from a position and a yaw angle in degrees
    pub const fn new(position: Vec3, yaw_degrees: f32) -> Self {
        Self {
            position,
            yaw_degrees,
        }
    }

    /// Unrotated transform at the given position
    pub const fn at(position: Vec3) -> Self {
        Self::new(position, 0.0)
    }

    /// Rotation as a quaternion about the `y` axis
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw_degrees.to_radians())
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::at(Vec3::ZERO)
    }
}
