//! Pointer drag and throw of items.
//!
//! A grabbed item turns kinematic and follows the pointer on the plane it was
//! grabbed at, swept against walls so it can never be pushed through one.
//! Releasing it hands it back to the dynamics with the pointer's velocity.

use engine_core::{Vec2, Velocity2};
use hecs::World;
use input::{InputState, ScreenProjection};
use physics::{BodyMode, Layer, PhysicsBody, PhysicsHost, RigidBodyHandle};

use crate::config::DragConfig;
use crate::item::BodyIndex;

/// Per-gesture pointer state, alive from grab to release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerCapture {
    /// Depth of the item from the eye when it was grabbed.
    pub screen_depth: f32,
    /// Item position minus pointer position at grab time.
    pub grab_offset: Vec2,
    pub last_world: Vec2,
    /// Pointer velocity over the last tick, world units per second.
    pub velocity: Vec2,
}

/// One tick's pointer reading, in window pixels.
#[derive(Debug, Clone, Copy)]
pub struct PointerSample<'a> {
    pub projection: &'a ScreenProjection,
    pub pixel: Vec2,
    /// +1 for counter-clockwise, -1 for clockwise, 0 when idle.
    pub rotation_axis: f32,
}

impl<'a> PointerSample<'a> {
    pub fn new(projection: &'a ScreenProjection, pixel: Vec2, rotation_axis: f32) -> Self {
        Self {
            projection,
            pixel,
            rotation_axis,
        }
    }
}

/// Drag state of an item.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Draggable {
    capture: Option<PointerCapture>,
    sticky: bool,
    in_sticky_zone: bool,
}

impl Draggable {
    pub fn is_dragging(&self) -> bool {
        self.capture.is_some()
    }

    pub fn is_sticky(&self) -> bool {
        self.sticky
    }

    pub fn in_sticky_zone(&self) -> bool {
        self.in_sticky_zone
    }

    pub fn capture(&self) -> Option<&PointerCapture> {
        self.capture.as_ref()
    }

    /// Grab the item under `pixel`. Returns false if it was already held.
    pub fn begin_drag(
        &mut self,
        body: RigidBodyHandle,
        host: &mut dyn PhysicsHost,
        projection: &ScreenProjection,
        pixel: Vec2,
    ) -> bool {
        if self.is_dragging() {
            return false;
        }
        let Some(pose) = host.pose(body) else {
            return false;
        };

        if self.sticky {
            self.sticky = false;
            host.set_gravity_scale(body, 1.0);
        }
        host.set_mode(body, BodyMode::Kinematic);
        host.set_velocity(body, Velocity2::default());
        host.set_layer(body, Layer::Dragging);

        let screen_depth = projection.world_to_screen(pose.position3()).z;
        let pointer = projection.screen_to_world(pixel, screen_depth).truncate();
        self.capture = Some(PointerCapture {
            screen_depth,
            grab_offset: pose.position - pointer,
            last_world: pointer,
            velocity: Vec2::ZERO,
        });
        true
    }

    /// Follow the pointer for one tick.
    pub fn tick(
        &mut self,
        body: RigidBodyHandle,
        host: &mut dyn PhysicsHost,
        pointer: PointerSample<'_>,
        dt: f32,
        config: &DragConfig,
    ) {
        let Some(capture) = self.capture.as_mut() else {
            return;
        };
        let Some(pose) = host.pose(body) else {
            return;
        };

        let world_pointer = pointer
            .projection
            .screen_to_world(pointer.pixel, capture.screen_depth)
            .truncate();
        let target = world_pointer + capture.grab_offset;
        let displacement = target - pose.position;
        let distance = displacement.length();
        if distance > f32::EPSILON {
            let direction = displacement / distance;
            match host.sweep(body, direction, distance, config.wall_layers) {
                None => host.move_to(body, target),
                Some(hit) => {
                    let allowed = (hit - config.skin_margin).max(0.0);
                    host.move_to(body, pose.position + direction * allowed);
                }
            }
        }

        if dt > 0.0 {
            capture.velocity = (world_pointer - capture.last_world) / dt;
        }
        capture.last_world = world_pointer;

        if pointer.rotation_axis != 0.0 {
            let delta = pointer.rotation_axis * config.rotation_speed.to_radians() * dt;
            host.rotate_to(body, pose.angle + delta);
        }
    }

    /// Let go of the item. Returns false if it was not held.
    pub fn end_drag(&mut self, body: RigidBodyHandle, host: &mut dyn PhysicsHost, config: &DragConfig) -> bool {
        let Some(capture) = self.capture.take() else {
            return false;
        };

        host.set_mode(body, BodyMode::Dynamic);
        if self.sticky {
            host.set_gravity_scale(body, 0.0);
            host.set_velocity(body, Velocity2::default());
        } else {
            host.set_gravity_scale(body, 1.0);
            host.set_velocity(body, Velocity2::new(capture.velocity * config.throw_force_scale));
        }
        host.set_layer(body, Layer::Item);
        true
    }

    pub fn enter_sticky_zone(&mut self, body: RigidBodyHandle, host: &mut dyn PhysicsHost) {
        self.in_sticky_zone = true;
        self.sticky = true;
        if !self.is_dragging() {
            host.set_gravity_scale(body, 0.0);
            host.set_velocity(body, Velocity2::default());
        }
    }

    pub fn exit_sticky_zone(&mut self, body: RigidBodyHandle, host: &mut dyn PhysicsHost) {
        self.in_sticky_zone = false;
        self.sticky = false;
        if !self.is_dragging() {
            host.set_gravity_scale(body, 1.0);
        }
    }
}

/// Grab the item under the pointer on press; release every held item on release.
pub fn handle_pointer(
    world: &mut World,
    host: &mut dyn PhysicsHost,
    bodies: &BodyIndex,
    projection: &ScreenProjection,
    input: &InputState,
    config: &DragConfig,
) {
    let pixel = input.pointer_position();

    if input.is_grab_pressed() {
        // Items rest on the z = 0 plane, which sits `eye.z` in front of the camera.
        let point = projection.screen_to_world(pixel, projection.eye.z).truncate();
        let picked = host
            .pick(point, config.pickable_layers)
            .and_then(|handle| bodies.entity(handle));
        if let Some(entity) = picked {
            if let Ok((draggable, body)) = world.query_one_mut::<(&mut Draggable, &PhysicsBody)>(entity) {
                if draggable.begin_drag(body.rigid_body, host, projection, pixel) {
                    log::debug!("Grabbed {:?}", entity);
                }
            }
        }
    }

    if input.is_grab_released() {
        for (entity, (draggable, body)) in world.query_mut::<(&mut Draggable, &PhysicsBody)>() {
            if draggable.end_drag(body.rigid_body, host, config) {
                log::debug!("Released {:?}", entity);
            }
        }
    }
}

/// Move every held item toward the pointer.
pub fn update_dragging(
    world: &mut World,
    host: &mut dyn PhysicsHost,
    projection: &ScreenProjection,
    input: &InputState,
    dt: f32,
    config: &DragConfig,
) {
    let pointer = PointerSample::new(projection, input.pointer_position(), input.rotation_axis());
    for (_, (draggable, body)) in world.query_mut::<(&mut Draggable, &PhysicsBody)>() {
        draggable.tick(body.rigid_body, host, pointer, dt, config);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedHost;
    use engine_core::FIXED_DT;
    use input::{ElementState, GRAB_BUTTON};

    fn pixel_at(projection: &ScreenProjection, world: Vec2) -> Vec2 {
        projection.world_to_screen(world.extend(0.0)).truncate()
    }

    fn grabbed(host: &mut ScriptedHost, at: Vec2) -> (RigidBodyHandle, Draggable, ScreenProjection) {
        let body = host.add_body(at);
        let projection = ScreenProjection::default();
        let mut draggable = Draggable::default();
        assert!(draggable.begin_drag(body, host, &projection, pixel_at(&projection, at)));
        (body, draggable, projection)
    }

    #[test]
    fn grab_makes_body_kinematic_on_dragging_layer() {
        let mut host = ScriptedHost::new();
        let body = host.add_body(Vec2::new(1.0, 1.0));
        host.body_mut(body).velocity = Velocity2::with_angular(Vec2::new(3.0, -2.0), 1.0);
        let projection = ScreenProjection::default();
        let mut draggable = Draggable::default();

        let pixel = pixel_at(&projection, Vec2::new(1.2, 0.9));
        assert!(draggable.begin_drag(body, &mut host, &projection, pixel));

        let state = host.body(body);
        assert_eq!(state.mode, BodyMode::Kinematic);
        assert_eq!(state.layer, Layer::Dragging);
        assert_eq!(state.velocity, Velocity2::default());
        let capture = *draggable.capture().unwrap();
        assert!((capture.screen_depth - 10.0).abs() < 1e-5);
        assert!((capture.grab_offset - Vec2::new(-0.2, 0.1)).length() < 1e-4);

        // A second grab mid-gesture is ignored.
        assert!(!draggable.begin_drag(body, &mut host, &projection, Vec2::ZERO));
        assert_eq!(draggable.capture().unwrap().grab_offset, capture.grab_offset);
    }

    #[test]
    fn follows_pointer_when_unobstructed() {
        let mut host = ScriptedHost::new();
        let (body, mut draggable, projection) = grabbed(&mut host, Vec2::ZERO);
        let config = DragConfig::default();

        let pixel = pixel_at(&projection, Vec2::new(-2.0, 1.5));
        draggable.tick(body, &mut host, PointerSample::new(&projection, pixel, 0.0), FIXED_DT, &config);
        host.step(FIXED_DT);

        let position = host.body(body).pose.position;
        assert!((position - Vec2::new(-2.0, 1.5)).length() < 1e-3);
    }

    #[test]
    fn stops_short_of_wall_by_skin() {
        let mut host = ScriptedHost::new();
        host.wall_x = Some(3.0);
        let (body, mut draggable, projection) = grabbed(&mut host, Vec2::ZERO);
        let config = DragConfig::default();
        let pixel = pixel_at(&projection, Vec2::new(5.0, 0.0));

        for _ in 0..3 {
            draggable.tick(body, &mut host, PointerSample::new(&projection, pixel, 0.0), FIXED_DT, &config);
            host.step(FIXED_DT);
            let x = host.body(body).pose.position.x;
            assert!(x + 0.5 <= 3.0 - config.skin_margin + 1e-4, "passed the wall: {x}");
        }
        assert!((host.body(body).pose.position.x - 2.49).abs() < 1e-3);
    }

    #[test]
    fn still_pointer_does_not_sweep() {
        let mut host = ScriptedHost::new();
        let (body, mut draggable, projection) = grabbed(&mut host, Vec2::ZERO);
        let pixel = pixel_at(&projection, Vec2::ZERO);

        draggable.tick(body, &mut host, PointerSample::new(&projection, pixel, 0.0), FIXED_DT, &DragConfig::default());
        assert_eq!(host.sweeps.get(), 0);
    }

    #[test]
    fn release_throws_with_pointer_velocity() {
        let mut host = ScriptedHost::new();
        let (body, mut draggable, projection) = grabbed(&mut host, Vec2::ZERO);
        let config = DragConfig::default();

        let pixel = pixel_at(&projection, Vec2::new(0.1, 0.0));
        draggable.tick(body, &mut host, PointerSample::new(&projection, pixel, 0.0), FIXED_DT, &config);
        host.step(FIXED_DT);
        assert!(draggable.end_drag(body, &mut host, &config));

        let state = host.body(body);
        assert_eq!(state.mode, BodyMode::Dynamic);
        assert_eq!(state.layer, Layer::Item);
        assert_eq!(state.gravity_scale, 1.0);
        // 0.1 units in one 60 Hz tick is 6 u/s, scaled by 15.
        assert!((state.velocity.linear - Vec2::new(90.0, 0.0)).length() < 0.1);

        assert!(!draggable.end_drag(body, &mut host, &config));
    }

    #[test]
    fn release_in_sticky_zone_holds_still() {
        let mut host = ScriptedHost::new();
        let (body, mut draggable, projection) = grabbed(&mut host, Vec2::ZERO);
        let config = DragConfig::default();

        draggable.enter_sticky_zone(body, &mut host);
        // Entering while held leaves the kinematic drag alone.
        assert_eq!(host.body(body).gravity_scale, 1.0);

        let pixel = pixel_at(&projection, Vec2::new(0.3, 0.0));
        draggable.tick(body, &mut host, PointerSample::new(&projection, pixel, 0.0), FIXED_DT, &config);
        host.step(FIXED_DT);
        draggable.end_drag(body, &mut host, &config);

        let state = host.body(body);
        assert_eq!(state.gravity_scale, 0.0);
        assert_eq!(state.velocity, Velocity2::default());
        assert!(draggable.is_sticky());
    }

    #[test]
    fn regrabbing_a_stuck_item_restores_gravity() {
        let mut host = ScriptedHost::new();
        let body = host.add_body(Vec2::ZERO);
        let projection = ScreenProjection::default();
        let mut draggable = Draggable::default();
        draggable.enter_sticky_zone(body, &mut host);
        assert_eq!(host.body(body).gravity_scale, 0.0);

        draggable.begin_drag(body, &mut host, &projection, pixel_at(&projection, Vec2::ZERO));
        assert!(!draggable.is_sticky());
        assert_eq!(host.body(body).gravity_scale, 1.0);
    }

    #[test]
    fn exit_restores_gravity_only_when_free() {
        let mut host = ScriptedHost::new();
        let (body, mut draggable, _) = grabbed(&mut host, Vec2::ZERO);
        host.body_mut(body).gravity_scale = 0.0;
        draggable.exit_sticky_zone(body, &mut host);
        assert_eq!(host.body(body).gravity_scale, 0.0);

        let free = host.add_body(Vec2::new(4.0, 0.0));
        let mut idle = Draggable::default();
        idle.enter_sticky_zone(free, &mut host);
        idle.exit_sticky_zone(free, &mut host);
        assert_eq!(host.body(free).gravity_scale, 1.0);
        assert!(!idle.in_sticky_zone());
    }

    #[test]
    fn rotation_keys_spin_held_item() {
        let mut host = ScriptedHost::new();
        let (body, mut draggable, projection) = grabbed(&mut host, Vec2::ZERO);
        let config = DragConfig::default();
        let pixel = pixel_at(&projection, Vec2::ZERO);

        for _ in 0..30 {
            draggable.tick(body, &mut host, PointerSample::new(&projection, pixel, -1.0), FIXED_DT, &config);
            host.step(FIXED_DT);
        }
        // Half a second at 120 deg/s, clockwise.
        assert!((host.body(body).pose.angle + 60f32.to_radians()).abs() < 1e-4);
    }

    #[test]
    fn pointer_system_grabs_and_releases() {
        let mut world = World::new();
        let mut host = ScriptedHost::new();
        let item = crate::testing::spawn_item(&mut world, &mut host, engine_core::ItemKind::Blue, Vec2::new(2.0, 0.0));
        let bodies = BodyIndex::build(&world);
        let projection = ScreenProjection::default();
        let config = DragConfig::default();
        let mut input = InputState::new();

        let pixel = pixel_at(&projection, Vec2::new(2.1, 0.1));
        input.process_cursor_position((pixel.x as f64, pixel.y as f64));
        input.process_mouse_button(GRAB_BUTTON, ElementState::Pressed);
        handle_pointer(&mut world, &mut host, &bodies, &projection, &input, &config);
        assert!(world.get::<&Draggable>(item).unwrap().is_dragging());

        // Releasing over a UI panel keeps holding.
        input.begin_frame();
        input.set_pointer_over_ui(true);
        input.process_mouse_button(GRAB_BUTTON, ElementState::Released);
        handle_pointer(&mut world, &mut host, &bodies, &projection, &input, &config);
        assert!(world.get::<&Draggable>(item).unwrap().is_dragging());

        input.begin_frame();
        input.set_pointer_over_ui(false);
        input.process_mouse_button(GRAB_BUTTON, ElementState::Released);
        handle_pointer(&mut world, &mut host, &bodies, &projection, &input, &config);
        assert!(!world.get::<&Draggable>(item).unwrap().is_dragging());
    }

    #[test]
    fn press_on_empty_space_grabs_nothing() {
        let mut world = World::new();
        let mut host = ScriptedHost::new();
        let item = crate::testing::spawn_item(&mut world, &mut host, engine_core::ItemKind::Red, Vec2::ZERO);
        let bodies = BodyIndex::build(&world);
        let projection = ScreenProjection::default();
        let mut input = InputState::new();

        let pixel = pixel_at(&projection, Vec2::new(3.0, 3.0));
        input.process_cursor_position((pixel.x as f64, pixel.y as f64));
        input.process_mouse_button(GRAB_BUTTON, ElementState::Pressed);
        handle_pointer(&mut world, &mut host, &bodies, &projection, &input, &DragConfig::default());
        assert!(!world.get::<&Draggable>(item).unwrap().is_dragging());
    }
}
