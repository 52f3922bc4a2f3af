//! Mapping between window pixels and world space for the pointer.

use glam::{Vec2, Vec3};

/// Perspective camera looking down -Z at the gameplay plane.
///
/// Pixel coordinates follow winit: origin at the top-left corner, Y growing downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenProjection {
    /// Camera position in world space.
    pub eye: Vec3,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Viewport size in pixels.
    pub viewport: Vec2,
}

impl Default for ScreenProjection {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 10.0),
            fov_y: 60f32.to_radians(),
            viewport: Vec2::new(1280.0, 720.0),
        }
    }
}

impl ScreenProjection {
    pub fn new(eye: Vec3, fov_y: f32, viewport: Vec2) -> Self {
        Self { eye, fov_y, viewport }
    }

    /// Focal length in pixels.
    fn focal(&self) -> f32 {
        (self.viewport.y * 0.5) / (self.fov_y * 0.5).tan()
    }

    /// Project a world point to `(pixel_x, pixel_y, depth)`, depth measured from the eye.
    pub fn world_to_screen(&self, world: Vec3) -> Vec3 {
        let depth = self.eye.z - world.z;
        if depth.abs() < f32::EPSILON {
            return Vec3::new(self.viewport.x * 0.5, self.viewport.y * 0.5, depth);
        }
        let scale = self.focal() / depth;
        Vec3::new(
            self.viewport.x * 0.5 + (world.x - self.eye.x) * scale,
            self.viewport.y * 0.5 - (world.y - self.eye.y) * scale,
            depth,
        )
    }

    /// Unproject a pixel at the given depth back into world space.
    pub fn screen_to_world(&self, pixel: Vec2, depth: f32) -> Vec3 {
        let scale = depth / self.focal();
        Vec3::new(
            self.eye.x + (pixel.x - self.viewport.x * 0.5) * scale,
            self.eye.y - (pixel.y - self.viewport.y * 0.5) * scale,
            self.eye.z - depth,
        )
    }
}
