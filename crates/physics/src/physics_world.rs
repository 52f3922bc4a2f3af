//! Physics world management with Rapier3D.
//!
//! The puzzle plays out on the XY plane: dynamic items have Z translation and X/Y
//! rotation locked, and static geometry is extruded along Z by [`SCENE_HALF_DEPTH`].

use crate::collision::{Layer, PhysicsBody};
use crate::hooks::ContactSuppression;
use engine_core::{Pose2, Vec2, Velocity2};
use rapier3d::prelude::*;

/// Half thickness of every collider along Z.
pub const SCENE_HALF_DEPTH: f32 = 0.5;

/// Collider shape of a draggable item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ItemShape {
    Box { half_extents: Vec2 },
    Ball { radius: f32 },
}

/// Main physics world containing all simulation state.
pub struct PhysicsWorld {
    pub rigid_body_set: RigidBodySet,
    pub collider_set: ColliderSet,
    pub gravity: Vector<Real>,
    pub integration_parameters: IntegrationParameters,
    pub physics_pipeline: PhysicsPipeline,
    pub island_manager: IslandManager,
    pub broad_phase: DefaultBroadPhase,
    pub narrow_phase: NarrowPhase,
    pub impulse_joint_set: ImpulseJointSet,
    pub multibody_joint_set: MultibodyJointSet,
    pub ccd_solver: CCDSolver,
    pub query_pipeline: QueryPipeline,
    pub suppression: ContactSuppression,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsWorld {
    /// Create a new physics world with default gravity.
    pub fn new() -> Self {
        Self {
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            gravity: vector![0.0, -9.81, 0.0],
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            suppression: ContactSuppression::new(),
        }
    }

    /// Step the physics simulation by `dt` seconds.
    pub fn step_world(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &self.suppression,
            &(),
        );
    }

    /// Update query pipeline after adding or moving colliders outside a step.
    pub fn update_query_pipeline(&mut self) {
        self.query_pipeline.update(&self.collider_set);
    }

    /// Add a dynamic item body on the gameplay plane with its collider on [`Layer::Item`].
    pub fn add_item(&mut self, pose: Pose2, shape: ItemShape) -> PhysicsBody {
        let rigid_body = RigidBodyBuilder::dynamic()
            .translation(vector![pose.position.x, pose.position.y, 0.0])
            .rotation(vector![0.0, 0.0, pose.angle])
            .locked_axes(
                LockedAxes::TRANSLATION_LOCKED_Z
                    | LockedAxes::ROTATION_LOCKED_X
                    | LockedAxes::ROTATION_LOCKED_Y,
            )
            .ccd_enabled(true)
            .build();
        let body_handle = self.rigid_body_set.insert(rigid_body);

        let builder = match shape {
            ItemShape::Box { half_extents } => {
                ColliderBuilder::cuboid(half_extents.x, half_extents.y, SCENE_HALF_DEPTH)
            }
            ItemShape::Ball { radius } => ColliderBuilder::ball(radius),
        };
        let collider = builder
            .collision_groups(Layer::Item.interaction_groups())
            .active_hooks(ActiveHooks::FILTER_CONTACT_PAIRS)
            .build();
        let collider_handle =
            self.collider_set
                .insert_with_parent(collider, body_handle, &mut self.rigid_body_set);
        PhysicsBody::new(body_handle, collider_handle)
    }

    /// Add a static box (wall, shelf, floor). No parent body; collider is fixed in world.
    /// `angle`: rotation around Z in radians.
    pub fn add_static_box(
        &mut self,
        center: Vec2,
        half_extents: Vec2,
        angle: f32,
        layer: Layer,
    ) -> ColliderHandle {
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y, SCENE_HALF_DEPTH)
            .position(Isometry::new(
                vector![center.x, center.y, 0.0],
                vector![0.0, 0.0, angle],
            ))
            .collision_groups(layer.interaction_groups())
            .build();
        self.collider_set.insert(collider)
    }

    /// Add a sensor box. Sensors report overlap but never push bodies.
    pub fn add_sensor_box(&mut self, center: Vec2, half_extents: Vec2, layer: Layer) -> ColliderHandle {
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y, SCENE_HALF_DEPTH)
            .translation(vector![center.x, center.y, 0.0])
            .sensor(true)
            .collision_groups(layer.interaction_groups())
            .build();
        self.collider_set.insert(collider)
    }

    /// Get the planar pose of a rigid body.
    pub fn body_pose(&self, handle: RigidBodyHandle) -> Option<Pose2> {
        self.rigid_body_set.get(handle).map(|body| {
            let pos = body.translation();
            Pose2::new(Vec2::new(pos.x, pos.y), body.rotation().scaled_axis().z)
        })
    }

    /// Get the planar velocity of a rigid body.
    pub fn body_velocity(&self, handle: RigidBodyHandle) -> Option<Velocity2> {
        self.rigid_body_set.get(handle).map(|body| {
            let lin = body.linvel();
            Velocity2::with_angular(Vec2::new(lin.x, lin.y), body.angvel().z)
        })
    }

    /// Switch a body between dynamic and position-based kinematic.
    pub fn set_body_kinematic(&mut self, handle: RigidBodyHandle, kinematic: bool) {
        if let Some(body) = self.rigid_body_set.get_mut(handle) {
            let body_type = if kinematic {
                RigidBodyType::KinematicPositionBased
            } else {
                RigidBodyType::Dynamic
            };
            body.set_body_type(body_type, true);
        }
    }

    pub fn set_gravity_scale(&mut self, handle: RigidBodyHandle, scale: f32) {
        if let Some(body) = self.rigid_body_set.get_mut(handle) {
            body.set_gravity_scale(scale, true);
        }
    }

    pub fn set_body_velocity(&mut self, handle: RigidBodyHandle, velocity: Velocity2) {
        if let Some(body) = self.rigid_body_set.get_mut(handle) {
            body.set_linvel(vector![velocity.linear.x, velocity.linear.y, 0.0], true);
            body.set_angvel(vector![0.0, 0.0, velocity.angular], true);
        }
    }

    /// Set the target position of a kinematic body, reached on the next step.
    pub fn set_kinematic_position(&mut self, handle: RigidBodyHandle, position: Vec2) {
        if let Some(body) = self.rigid_body_set.get_mut(handle) {
            body.set_next_kinematic_translation(vector![position.x, position.y, 0.0]);
        }
    }

    /// Set the target rotation of a kinematic body, reached on the next step.
    pub fn set_kinematic_rotation(&mut self, handle: RigidBodyHandle, angle: f32) {
        if let Some(body) = self.rigid_body_set.get_mut(handle) {
            body.set_next_kinematic_rotation(Rotation::from_axis_angle(&Vector::z_axis(), angle));
        }
    }

    /// Apply an impulse to a dynamic body.
    pub fn apply_impulse(&mut self, handle: RigidBodyHandle, impulse: Vec2) {
        if let Some(body) = self.rigid_body_set.get_mut(handle) {
            body.apply_impulse(vector![impulse.x, impulse.y, 0.0], true);
        }
    }

    /// Move every collider of a body to `layer`.
    pub fn set_body_layer(&mut self, handle: RigidBodyHandle, layer: Layer) {
        let Some(body) = self.rigid_body_set.get(handle) else {
            return;
        };
        for collider_handle in body.colliders() {
            if let Some(collider) = self.collider_set.get_mut(*collider_handle) {
                collider.set_collision_groups(layer.interaction_groups());
            }
        }
    }

    /// First collider attached to a body.
    pub(crate) fn primary_collider(&self, handle: RigidBodyHandle) -> Option<&Collider> {
        let body = self.rigid_body_set.get(handle)?;
        body.colliders()
            .first()
            .and_then(|collider| self.collider_set.get(*collider))
    }
}
