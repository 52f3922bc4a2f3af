//! Collision layers and filtering.

use rapier3d::prelude::*;
use serde::{Deserialize, Serialize};

/// Collision layers of the puzzle scene. Each maps to one rapier group bit.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layer {
    /// Draggable items at rest or in flight
    Item = 1 << 0,
    /// Item currently held by the pointer
    Dragging = 1 << 1,
    /// Solid walls the pointer cannot drag through
    Wall = 1 << 2,
    /// Sticky zones (sensors)
    Sticky = 1 << 3,
    /// Shelves and furniture items rest on
    Shelf = 1 << 4,
    /// The floor; items left on it do not count as placed
    Floor = 1 << 5,
}

impl Layer {
    pub fn group(self) -> Group {
        Group::from_bits_retain(self as u32)
    }

    /// Layers this layer's colliders make contact with.
    pub fn filter(self) -> LayerMask {
        match self {
            Layer::Item => LayerMask::from_layers(&[
                Layer::Item,
                Layer::Wall,
                Layer::Shelf,
                Layer::Floor,
                Layer::Sticky,
            ]),
            // Held items only stop against walls; they pass over the other items.
            Layer::Dragging => LayerMask::from_layers(&[Layer::Wall, Layer::Sticky]),
            Layer::Wall | Layer::Sticky | Layer::Shelf | Layer::Floor => LayerMask::ALL,
        }
    }

    /// Membership/filter pair for a collider on this layer.
    pub fn interaction_groups(self) -> InteractionGroups {
        InteractionGroups::new(self.group(), self.filter().group())
    }
}

/// A set of layers, used to select what a query may hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<Layer>", into = "Vec<Layer>")]
pub struct LayerMask(u32);

impl LayerMask {
    pub const ALL: LayerMask = LayerMask(u32::MAX);

    pub fn from_layers(layers: &[Layer]) -> Self {
        Self(layers.iter().fold(0, |bits, layer| bits | *layer as u32))
    }

    pub fn contains(self, layer: Layer) -> bool {
        self.0 & layer as u32 != 0
    }

    pub fn group(self) -> Group {
        Group::from_bits_retain(self.0)
    }

    /// Query groups that hit any collider on a layer in this mask.
    pub fn query_groups(self) -> InteractionGroups {
        InteractionGroups::new(Group::ALL, self.group())
    }
}

impl From<Layer> for LayerMask {
    fn from(layer: Layer) -> Self {
        Self(layer as u32)
    }
}

impl From<Vec<Layer>> for LayerMask {
    fn from(layers: Vec<Layer>) -> Self {
        Self::from_layers(&layers)
    }
}

impl From<LayerMask> for Vec<Layer> {
    fn from(mask: LayerMask) -> Self {
        ALL_LAYERS.iter().copied().filter(|l| mask.contains(*l)).collect()
    }
}

const ALL_LAYERS: [Layer; 6] = [
    Layer::Item,
    Layer::Dragging,
    Layer::Wall,
    Layer::Sticky,
    Layer::Shelf,
    Layer::Floor,
];

/// Component linking an item entity to its physics handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhysicsBody {
    pub rigid_body: RigidBodyHandle,
    pub collider: ColliderHandle,
}

impl PhysicsBody {
    pub fn new(rigid_body: RigidBodyHandle, collider: ColliderHandle) -> Self {
        Self {
            rigid_body,
            collider,
        }
    }
}
