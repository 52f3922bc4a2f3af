//! Common components shared by the physics host and the gameplay systems.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Planar velocity of a rigid item.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Velocity2 {
    pub linear: Vec2,
    /// Angular velocity around Z in radians per second.
    pub angular: f32,
}

impl Velocity2 {
    pub fn new(linear: Vec2) -> Self {
        Self {
            linear,
            angular: 0.0,
        }
    }

    pub fn with_angular(linear: Vec2, angular: f32) -> Self {
        Self { linear, angular }
    }

    /// Linear speed in world units per second.
    pub fn speed(&self) -> f32 {
        self.linear.length()
    }
}

/// Colour class of a draggable item. Hazard rules are keyed on it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ItemKind {
    #[default]
    Normal,
    Blue,
    Red,
}

impl ItemKind {
    pub const ALL: [ItemKind; 3] = [ItemKind::Normal, ItemKind::Blue, ItemKind::Red];
}
