//! Planar pose of a body. Gameplay lives in the XY plane; Z is screen depth.

use glam::{Vec2, Vec3};

/// Position and rotation of a body in the gameplay plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose2 {
    pub position: Vec2,
    /// Rotation around Z in radians, counter-clockwise.
    pub angle: f32,
}

impl Default for Pose2 {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            angle: 0.0,
        }
    }
}

impl Pose2 {
    /// Create a pose at the given position with no rotation.
    pub fn from_position(position: Vec2) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn new(position: Vec2, angle: f32) -> Self {
        Self { position, angle }
    }

    /// Lift into 3D on the gameplay plane (z = 0).
    pub fn position3(&self) -> Vec3 {
        self.position.extend(0.0)
    }
}
