//! The narrow physics surface the gameplay systems run against.
//!
//! [`PhysicsWorld`] implements it on top of rapier; tests drive the gameplay
//! systems with scripted hosts instead.

use crate::collision::{Layer, LayerMask};
use crate::PhysicsWorld;
use engine_core::{Pose2, Vec2, Velocity2};
use rapier3d::prelude::RigidBodyHandle;

/// Simulation mode of a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyMode {
    /// Driven by gravity, contacts and impulses.
    Dynamic,
    /// Moved explicitly; ignores gravity and impulses.
    Kinematic,
}

/// Rigid-body dynamics plus swept and overlap queries supplied by the host engine.
pub trait PhysicsHost {
    /// Advance dynamics by one fixed tick.
    fn step(&mut self, dt: f32);

    fn pose(&self, body: RigidBodyHandle) -> Option<Pose2>;
    fn velocity(&self, body: RigidBodyHandle) -> Option<Velocity2>;

    fn set_mode(&mut self, body: RigidBodyHandle, mode: BodyMode);
    fn set_gravity_scale(&mut self, body: RigidBodyHandle, scale: f32);
    fn set_velocity(&mut self, body: RigidBodyHandle, velocity: Velocity2);
    /// Kinematic translation target for the next step.
    fn move_to(&mut self, body: RigidBodyHandle, position: Vec2);
    /// Kinematic rotation target (radians around Z) for the next step.
    fn rotate_to(&mut self, body: RigidBodyHandle, angle: f32);
    fn apply_impulse(&mut self, body: RigidBodyHandle, impulse: Vec2);
    fn set_layer(&mut self, body: RigidBodyHandle, layer: Layer);
    /// Enable or disable contacts between `body` and everything on `layer`.
    fn set_layer_collisions(&mut self, body: RigidBodyHandle, layer: Layer, enabled: bool);

    /// Distance along `direction` (unit) to the first collider on `mask`, within `max_distance`.
    fn sweep(&self, body: RigidBodyHandle, direction: Vec2, max_distance: f32, mask: LayerMask) -> Option<f32>;
    /// Non-static bodies touching the disc.
    fn overlap_bodies(&self, center: Vec2, radius: f32, mask: LayerMask) -> Vec<RigidBodyHandle>;
    fn point_overlaps(&self, point: Vec2, mask: LayerMask) -> bool;
    fn body_overlaps(&self, body: RigidBodyHandle, mask: LayerMask) -> bool;
    /// Non-static body under the point.
    fn pick(&self, point: Vec2, mask: LayerMask) -> Option<RigidBodyHandle>;
}

impl PhysicsHost for PhysicsWorld {
    fn step(&mut self, dt: f32) {
        self.step_world(dt);
    }

    fn pose(&self, body: RigidBodyHandle) -> Option<Pose2> {
        self.body_pose(body)
    }

    fn velocity(&self, body: RigidBodyHandle) -> Option<Velocity2> {
        self.body_velocity(body)
    }

    fn set_mode(&mut self, body: RigidBodyHandle, mode: BodyMode) {
        self.set_body_kinematic(body, mode == BodyMode::Kinematic);
    }

    fn set_gravity_scale(&mut self, body: RigidBodyHandle, scale: f32) {
        PhysicsWorld::set_gravity_scale(self, body, scale);
    }

    fn set_velocity(&mut self, body: RigidBodyHandle, velocity: Velocity2) {
        self.set_body_velocity(body, velocity);
    }

    fn move_to(&mut self, body: RigidBodyHandle, position: Vec2) {
        self.set_kinematic_position(body, position);
    }

    fn rotate_to(&mut self, body: RigidBodyHandle, angle: f32) {
        self.set_kinematic_rotation(body, angle);
    }

    fn apply_impulse(&mut self, body: RigidBodyHandle, impulse: Vec2) {
        PhysicsWorld::apply_impulse(self, body, impulse);
    }

    fn set_layer(&mut self, body: RigidBodyHandle, layer: Layer) {
        self.set_body_layer(body, layer);
    }

    fn set_layer_collisions(&mut self, body: RigidBodyHandle, layer: Layer, enabled: bool) {
        self.suppression.set(body, layer.group(), enabled);
    }

    fn sweep(&self, body: RigidBodyHandle, direction: Vec2, max_distance: f32, mask: LayerMask) -> Option<f32> {
        self.sweep_body(body, direction, max_distance, mask)
    }

    fn overlap_bodies(&self, center: Vec2, radius: f32, mask: LayerMask) -> Vec<RigidBodyHandle> {
        PhysicsWorld::overlap_bodies(self, center, radius, mask)
    }

    fn point_overlaps(&self, point: Vec2, mask: LayerMask) -> bool {
        PhysicsWorld::point_overlaps(self, point, mask)
    }

    fn body_overlaps(&self, body: RigidBodyHandle, mask: LayerMask) -> bool {
        PhysicsWorld::body_overlaps(self, body, mask)
    }

    fn pick(&self, point: Vec2, mask: LayerMask) -> Option<RigidBodyHandle> {
        self.pick_body(point, mask)
    }
}
