//! Sweep and overlap queries against the current collider layout.

use crate::collision::LayerMask;
use crate::PhysicsWorld;
use engine_core::Vec2;
use rapier3d::parry::query::ShapeCastOptions;
use rapier3d::prelude::*;

impl PhysicsWorld {
    /// Sweep a body's collider along `direction` (unit length) for up to `max_distance`
    /// and return the distance to the first hit on `mask`. Colliders the body already
    /// penetrates are ignored so a body touching a wall can still move away from it.
    pub fn sweep_body(
        &self,
        handle: RigidBodyHandle,
        direction: Vec2,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<f32> {
        let collider = self.primary_collider(handle)?;
        let options = ShapeCastOptions {
            max_time_of_impact: max_distance,
            target_distance: 0.0,
            stop_at_penetration: false,
            compute_impact_geometry_on_penetration: false,
        };
        let filter = QueryFilter::default()
            .exclude_rigid_body(handle)
            .exclude_sensors()
            .groups(mask.query_groups());

        self.query_pipeline
            .cast_shape(
                &self.rigid_body_set,
                &self.collider_set,
                collider.position(),
                &vector![direction.x, direction.y, 0.0],
                collider.shape(),
                options,
                filter,
            )
            .map(|(_, hit)| hit.time_of_impact)
    }

    /// Find all non-static bodies whose colliders touch a disc on the gameplay plane.
    /// Each body is reported once, in query order.
    pub fn overlap_bodies(&self, center: Vec2, radius: f32, mask: LayerMask) -> Vec<RigidBodyHandle> {
        let shape = Ball::new(radius);
        let shape_pos = Isometry::translation(center.x, center.y, 0.0);
        let filter = QueryFilter::exclude_fixed().groups(mask.query_groups());

        let mut results: Vec<RigidBodyHandle> = Vec::new();
        self.query_pipeline.intersections_with_shape(
            &self.rigid_body_set,
            &self.collider_set,
            &shape_pos,
            &shape,
            filter,
            |collider| {
                if let Some(parent) = self.collider_set.get(collider).and_then(|c| c.parent()) {
                    if !results.contains(&parent) {
                        results.push(parent);
                    }
                }
                true // Continue searching
            },
        );
        results
    }

    /// Check whether a point on the gameplay plane lies inside any collider on `mask`.
    pub fn point_overlaps(&self, point: Vec2, mask: LayerMask) -> bool {
        let mut hit = false;
        self.query_pipeline.intersections_with_point(
            &self.rigid_body_set,
            &self.collider_set,
            &point![point.x, point.y, 0.0],
            QueryFilter::default().groups(mask.query_groups()),
            |_| {
                hit = true;
                false
            },
        );
        hit
    }

    /// Check whether a body's collider overlaps any other collider on `mask`.
    pub fn body_overlaps(&self, handle: RigidBodyHandle, mask: LayerMask) -> bool {
        let Some(collider) = self.primary_collider(handle) else {
            return false;
        };
        let mut hit = false;
        self.query_pipeline.intersections_with_shape(
            &self.rigid_body_set,
            &self.collider_set,
            collider.position(),
            collider.shape(),
            QueryFilter::default()
                .exclude_rigid_body(handle)
                .groups(mask.query_groups()),
            |_| {
                hit = true;
                false
            },
        );
        hit
    }

    /// Non-static body under a point, if any.
    pub fn pick_body(&self, point: Vec2, mask: LayerMask) -> Option<RigidBodyHandle> {
        let mut picked = None;
        self.query_pipeline.intersections_with_point(
            &self.rigid_body_set,
            &self.collider_set,
            &point![point.x, point.y, 0.0],
            QueryFilter::exclude_fixed()
                .exclude_sensors()
                .groups(mask.query_groups()),
            |collider| {
                picked = self.collider_set.get(collider).and_then(|c| c.parent());
                picked.is_none()
            },
        );
        picked
    }
}
