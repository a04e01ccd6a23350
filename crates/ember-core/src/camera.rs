//! 2D camera: world space to screen space mapping

use glam::{Mat3, Vec2};

const MIN_ZOOM: f32 = 0.1;
const MAX_ZOOM: f32 = 10.0;

/// Anything that can map world coordinates onto the screen.
///
/// Renderers only need the combined view-projection-viewport matrix and the
/// zoom factor, so scenes can plug in their own camera implementation.
pub trait CameraView {
    /// Combined view * projection * viewport transform (world -> screen pixels)
    fn world_to_screen(&self) -> Mat3;

    /// Current zoom factor (1.0 = no zoom)
    fn zoom(&self) -> f32;
}

/// An orthographic 2D camera centered on `position`.
///
/// With `world_y_up` the world uses a Y-up convention and the screen a
/// Y-down one, so the projection flips the vertical axis.
#[derive(Clone, Debug)]
pub struct Camera2D {
    pub position: Vec2,
    pub rotation: f32,
    pub size: Vec2,
    pub world_y_up: bool,
    zoom: f32,
}

impl Camera2D {
    pub fn new(size: Vec2) -> Self {
        Self {
            position: Vec2::ZERO,
            rotation: 0.0,
            size,
            world_y_up: true,
            zoom: 1.0,
        }
    }

    /// Set the zoom factor, clamped to [0.1, 10]
    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    pub fn view_matrix(&self) -> Mat3 {
        let camera_affine = Mat3::from_scale_angle_translation(
            Vec2::splat(1.0 / self.zoom),
            self.rotation,
            self.position,
        );
        camera_affine.inverse()
    }

    pub fn projection_matrix(&self) -> Mat3 {
        let half = self.size * 0.5;
        let y_scale = if self.world_y_up { -1.0 } else { 1.0 };
        Mat3::from_scale(Vec2::new(1.0 / half.x, y_scale / half.y))
    }

    pub fn viewport_matrix(&self) -> Mat3 {
        let half = self.size * 0.5;
        Mat3::from_translation(half) * Mat3::from_scale(half)
    }

    /// Map a world-space point to screen pixels
    pub fn world_to_screen_point(&self, world: Vec2) -> Vec2 {
        self.world_to_screen().transform_point2(world)
    }

    /// Map a screen-space pixel back into the world
    pub fn screen_to_world_point(&self, screen: Vec2) -> Vec2 {
        self.world_to_screen().inverse().transform_point2(screen)
    }
}

impl Default for Camera2D {
    fn default() -> Self {
        Self::new(Vec2::new(1280.0, 720.0))
    }
}

impl CameraView for Camera2D {
    fn world_to_screen(&self) -> Mat3 {
        self.viewport_matrix() * self.projection_matrix() * self.view_matrix()
    }

    fn zoom(&self) -> f32 {
        self.zoom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-3
    }

    #[test]
    fn origin_maps_to_screen_center() {
        let camera = Camera2D::default();
        let screen = camera.world_to_screen_point(Vec2::ZERO);
        assert!(approx(screen, Vec2::new(640.0, 360.0)));
    }

    #[test]
    fn world_y_up_flips_to_screen_y_down() {
        let camera = Camera2D::default();
        let top = camera.world_to_screen_point(Vec2::new(0.0, 360.0));
        assert!(approx(top, Vec2::new(640.0, 0.0)));

        let mut y_down = Camera2D::default();
        y_down.world_y_up = false;
        let bottom = y_down.world_to_screen_point(Vec2::new(0.0, 360.0));
        assert!(approx(bottom, Vec2::new(640.0, 720.0)));
    }

    #[test]
    fn zoom_scales_around_camera_position() {
        let mut camera = Camera2D::default();
        camera.position = Vec2::new(100.0, 0.0);
        camera.set_zoom(2.0);
        let screen = camera.world_to_screen_point(Vec2::new(110.0, 0.0));
        assert!(approx(screen, Vec2::new(660.0, 360.0)));
    }

    #[test]
    fn zoom_is_clamped() {
        let mut camera = Camera2D::default();
        camera.set_zoom(100.0);
        assert_eq!(camera.zoom(), 10.0);
        camera.set_zoom(0.0);
        assert_eq!(camera.zoom(), 0.1);
    }

    #[test]
    fn screen_to_world_inverts_mapping() {
        let mut camera = Camera2D::default();
        camera.position = Vec2::new(-50.0, 25.0);
        camera.rotation = 0.3;
        camera.set_zoom(1.5);
        let world = Vec2::new(12.0, -7.0);
        let back = camera.screen_to_world_point(camera.world_to_screen_point(world));
        assert!(approx(back, world));
    }
}
