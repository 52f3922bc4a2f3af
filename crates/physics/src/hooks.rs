//! Contact filtering used to switch off collisions between single bodies and whole layers.

use rapier3d::prelude::*;
use std::collections::HashMap;

/// Per-body set of layers the body must not make contact with.
///
/// Only consulted for colliders built with `ActiveHooks::FILTER_CONTACT_PAIRS`.
#[derive(Debug, Default)]
pub struct ContactSuppression {
    suppressed: HashMap<RigidBodyHandle, Group>,
}

impl ContactSuppression {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable contacts between `body` and every collider whose membership
    /// intersects `layers`. Enabling an already enabled pair does nothing.
    pub fn set(&mut self, body: RigidBodyHandle, layers: Group, enabled: bool) {
        if enabled {
            if let Some(mask) = self.suppressed.get_mut(&body) {
                mask.remove(layers);
                if mask.is_empty() {
                    self.suppressed.remove(&body);
                }
            }
        } else {
            *self.suppressed.entry(body).or_insert(Group::NONE) |= layers;
        }
    }

    pub fn is_suppressed(&self, body: RigidBodyHandle, layers: Group) -> bool {
        self.suppressed
            .get(&body)
            .is_some_and(|mask| mask.intersects(layers))
    }

    fn blocks(&self, body: Option<RigidBodyHandle>, other: Option<&Collider>) -> bool {
        match (body, other) {
            (Some(body), Some(other)) => {
                self.is_suppressed(body, other.collision_groups().memberships)
            }
            _ => false,
        }
    }
}

impl PhysicsHooks for ContactSuppression {
    fn filter_contact_pair(&self, context: &PairFilterContext) -> Option<SolverFlags> {
        let collider1 = context.colliders.get(context.collider1);
        let collider2 = context.colliders.get(context.collider2);
        if self.blocks(context.rigid_body1, collider2) || self.blocks(context.rigid_body2, collider1)
        {
            None
        } else {
            Some(SolverFlags::COMPUTE_IMPULSES)
        }
    }
}
