//! Draggable items: the component data and the body → entity index.

use engine_core::ItemKind;
use hecs::{Entity, World};
use physics::{PhysicsBody, RigidBodyHandle};
use std::collections::HashMap;

use crate::drag::Draggable;

/// Gameplay data of a draggable item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Item {
    pub kind: ItemKind,
    /// Only stickable items adhere to sticky zones.
    pub stickable: bool,
    /// Number of armed countdowns this item takes part in.
    pending_countdowns: u32,
}

impl Item {
    pub fn new(kind: ItemKind) -> Self {
        Self {
            kind,
            stickable: false,
            pending_countdowns: 0,
        }
    }

    pub fn stickable(mut self) -> Self {
        self.stickable = true;
        self
    }

    pub fn is_pending_explosion(&self) -> bool {
        self.pending_countdowns > 0
    }

    pub(crate) fn arm(&mut self) {
        self.pending_countdowns += 1;
    }

    pub(crate) fn disarm(&mut self) {
        self.pending_countdowns = self.pending_countdowns.saturating_sub(1);
    }
}

/// Components every item entity is spawned with.
pub type ItemBundle = (Item, Draggable, PhysicsBody);

pub fn item_bundle(item: Item, body: PhysicsBody) -> ItemBundle {
    (item, Draggable::default(), body)
}

/// Lookup from rigid body to the item entity that owns it.
#[derive(Debug, Default, Clone)]
pub struct BodyIndex {
    entities: HashMap<RigidBodyHandle, Entity>,
}

impl BodyIndex {
    /// Index every entity carrying a [`PhysicsBody`].
    pub fn build(world: &World) -> Self {
        let entities = world
            .query::<&PhysicsBody>()
            .iter()
            .map(|(entity, body)| (body.rigid_body, entity))
            .collect();
        Self { entities }
    }

    pub fn entity(&self, body: RigidBodyHandle) -> Option<Entity> {
        self.entities.get(&body).copied()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
