//! Scripted physics host for exercising the gameplay systems without rapier.

use std::cell::Cell;
use std::collections::HashSet;

use engine_core::{ItemKind, Pose2, Vec2, Velocity2};
use hecs::{Entity, World};
use physics::{BodyMode, ColliderHandle, Layer, LayerMask, PhysicsBody, PhysicsHost, RigidBodyHandle};

use crate::item::{item_bundle, Item};

#[derive(Debug, Clone)]
pub struct ScriptedBody {
    pub pose: Pose2,
    pub velocity: Velocity2,
    pub mode: BodyMode,
    pub gravity_scale: f32,
    pub layer: Layer,
    /// Half size of the square footprint.
    pub half_extent: f32,
    pub pending_move: Option<Vec2>,
    pub pending_rotation: Option<f32>,
}

/// Bodies are points with square footprints, drifting at their velocity without
/// gravity or contacts.
#[derive(Debug, Default)]
pub struct ScriptedHost {
    bodies: Vec<ScriptedBody>,
    /// Vertical wall plane at this X, blocking movement toward +X.
    pub wall_x: Option<f32>,
    /// Points below this Y are inside the floor collider.
    pub floor_y: Option<f32>,
    /// Axis-aligned sticky zones as (min, max).
    pub sticky_zones: Vec<(Vec2, Vec2)>,
    pub suppressed: HashSet<(RigidBodyHandle, Layer)>,
    pub impulses: Vec<(RigidBodyHandle, Vec2)>,
    pub sweeps: Cell<u32>,
}

pub fn handle(index: usize) -> RigidBodyHandle {
    RigidBodyHandle::from_raw_parts(index as u32, 0)
}

impl ScriptedHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_body(&mut self, position: Vec2) -> RigidBodyHandle {
        self.bodies.push(ScriptedBody {
            pose: Pose2::from_position(position),
            velocity: Velocity2::default(),
            mode: BodyMode::Dynamic,
            gravity_scale: 1.0,
            layer: Layer::Item,
            half_extent: 0.5,
            pending_move: None,
            pending_rotation: None,
        });
        handle(self.bodies.len() - 1)
    }

    pub fn body(&self, body: RigidBodyHandle) -> &ScriptedBody {
        self.get(body).expect("scripted body exists")
    }

    pub fn body_mut(&mut self, body: RigidBodyHandle) -> &mut ScriptedBody {
        self.get_mut(body).expect("scripted body exists")
    }

    pub fn teleport(&mut self, body: RigidBodyHandle, position: Vec2) {
        self.body_mut(body).pose.position = position;
    }

    fn get(&self, body: RigidBodyHandle) -> Option<&ScriptedBody> {
        self.bodies.get(body.into_raw_parts().0 as usize)
    }

    fn get_mut(&mut self, body: RigidBodyHandle) -> Option<&mut ScriptedBody> {
        self.bodies.get_mut(body.into_raw_parts().0 as usize)
    }

    fn handles(&self) -> impl Iterator<Item = (RigidBodyHandle, &ScriptedBody)> {
        self.bodies
            .iter()
            .enumerate()
            .map(|(i, b)| (handle(i), b))
    }
}

impl PhysicsHost for ScriptedHost {
    fn step(&mut self, dt: f32) {
        for body in &mut self.bodies {
            match body.mode {
                BodyMode::Kinematic => {
                    if let Some(target) = body.pending_move.take() {
                        body.velocity.linear = (target - body.pose.position) / dt;
                        body.pose.position = target;
                    }
                    if let Some(angle) = body.pending_rotation.take() {
                        body.pose.angle = angle;
                    }
                }
                BodyMode::Dynamic => {
                    body.pose.position += body.velocity.linear * dt;
                }
            }
        }
    }

    fn pose(&self, body: RigidBodyHandle) -> Option<Pose2> {
        self.get(body).map(|b| b.pose)
    }

    fn velocity(&self, body: RigidBodyHandle) -> Option<Velocity2> {
        self.get(body).map(|b| b.velocity)
    }

    fn set_mode(&mut self, body: RigidBodyHandle, mode: BodyMode) {
        if let Some(b) = self.get_mut(body) {
            b.mode = mode;
        }
    }

    fn set_gravity_scale(&mut self, body: RigidBodyHandle, scale: f32) {
        if let Some(b) = self.get_mut(body) {
            b.gravity_scale = scale;
        }
    }

    fn set_velocity(&mut self, body: RigidBodyHandle, velocity: Velocity2) {
        if let Some(b) = self.get_mut(body) {
            b.velocity = velocity;
        }
    }

    fn move_to(&mut self, body: RigidBodyHandle, position: Vec2) {
        if let Some(b) = self.get_mut(body) {
            b.pending_move = Some(position);
        }
    }

    fn rotate_to(&mut self, body: RigidBodyHandle, angle: f32) {
        if let Some(b) = self.get_mut(body) {
            b.pending_rotation = Some(angle);
        }
    }

    fn apply_impulse(&mut self, body: RigidBodyHandle, impulse: Vec2) {
        self.impulses.push((body, impulse));
        if let Some(b) = self.get_mut(body) {
            if b.mode == BodyMode::Dynamic {
                b.velocity.linear += impulse;
            }
        }
    }

    fn set_layer(&mut self, body: RigidBodyHandle, layer: Layer) {
        if let Some(b) = self.get_mut(body) {
            b.layer = layer;
        }
    }

    fn set_layer_collisions(&mut self, body: RigidBodyHandle, layer: Layer, enabled: bool) {
        if enabled {
            self.suppressed.remove(&(body, layer));
        } else {
            self.suppressed.insert((body, layer));
        }
    }

    fn sweep(&self, body: RigidBodyHandle, direction: Vec2, max_distance: f32, mask: LayerMask) -> Option<f32> {
        self.sweeps.set(self.sweeps.get() + 1);
        let b = self.get(body)?;
        let wall = self.wall_x.filter(|_| mask.contains(Layer::Wall))?;
        if direction.x <= 0.0 {
            return None;
        }
        let gap = wall - b.half_extent - b.pose.position.x;
        if gap < 0.0 {
            return None;
        }
        let distance = gap / direction.x;
        (distance <= max_distance).then_some(distance)
    }

    fn overlap_bodies(&self, center: Vec2, radius: f32, mask: LayerMask) -> Vec<RigidBodyHandle> {
        self.handles()
            .filter(|(_, b)| mask.contains(b.layer))
            .filter(|(_, b)| b.pose.position.distance(center) <= radius + b.half_extent)
            .map(|(h, _)| h)
            .collect()
    }

    fn point_overlaps(&self, point: Vec2, mask: LayerMask) -> bool {
        mask.contains(Layer::Floor) && self.floor_y.is_some_and(|floor| point.y < floor)
    }

    fn body_overlaps(&self, body: RigidBodyHandle, mask: LayerMask) -> bool {
        let Some(b) = self.get(body) else {
            return false;
        };
        mask.contains(Layer::Sticky)
            && self.sticky_zones.iter().any(|(min, max)| {
                let p = b.pose.position;
                p.x >= min.x && p.x <= max.x && p.y >= min.y && p.y <= max.y
            })
    }

    fn pick(&self, point: Vec2, mask: LayerMask) -> Option<RigidBodyHandle> {
        self.handles()
            .find(|(_, b)| {
                let d = (point - b.pose.position).abs();
                mask.contains(b.layer) && d.x <= b.half_extent && d.y <= b.half_extent
            })
            .map(|(h, _)| h)
    }
}

/// Spawn an item entity backed by a new scripted body.
pub fn spawn_item(world: &mut World, host: &mut ScriptedHost, kind: ItemKind, position: Vec2) -> Entity {
    let body = host.add_body(position);
    let collider = ColliderHandle::from_raw_parts(body.into_raw_parts().0, 0);
    world.spawn(item_bundle(Item::new(kind), PhysicsBody::new(body, collider)))
}

pub fn body_of(world: &World, entity: Entity) -> RigidBodyHandle {
    world
        .get::<&PhysicsBody>(entity)
        .expect("item has a body")
        .rigid_body
}
