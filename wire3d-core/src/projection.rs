//! Visibility test, perspective projection and canvas mapping
use crate::math::{Vec2, Vec3};

/// Default near clipping plane, just in front of the camera.
pub const DEFAULT_NEAR_Z: f64 = -0.001;

/// Canvas size and lens configuration.
///
/// The aspect ratio is always derived from `width` and `height`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplaySettings {
    pub width: u32,
    pub height: u32,
    /// Field of view in degrees.
    pub fov: f64,
    /// Camera-space Z of the near clipping plane (negative).
    pub near_z: f64,
}

impl DisplaySettings {
    pub fn new(width: u32, height: u32, fov: f64) -> Self {
        Self {
            width,
            height,
            fov,
            near_z: DEFAULT_NEAR_Z,
        }
    }

    pub fn with_near_z(mut self, near_z: f64) -> Self {
        self.near_z = near_z;
        self
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    /// Applies a canvas resize; zero dimensions are clamped to one pixel.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width.max(1);
        self.height = height.max(1);
    }
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self::new(800, 600, 90.0)
    }
}

/// True iff the camera-space point lies in front of the camera (`z < 0`).
pub fn is_in_front(point: &Vec3) -> bool {
    point.z < 0.0
}

/// True iff the camera-space point lies beyond the plane `z = near_z`.
pub fn is_in_front_of(point: &Vec3, near_z: f64) -> bool {
    point.z < near_z
}

/// Pinhole projection looking down -Z.
///
/// Visible points have negative `z`; the signed divide is part of the
/// convention and must not be replaced by `|z|`.
pub fn apply_perspective_projection(point: &Vec3, fov: f64, aspect_ratio: f64) -> Vec2 {
    let f = 1.0 / (fov * std::f64::consts::PI / 360.0).tan();
    Vec2::new(point.x / point.z * f / aspect_ratio, point.y / point.z * f)
}

/// Maps normalized device coordinates to pixels: X grows rightwards, Y is
/// flipped because screen rows grow downwards.
///
/// After [`apply_perspective_projection`] has divided by a negative `z`, the
/// two flips combine into a half turn: camera-space +X ends up left of the
/// canvas centre and +Y below it.
pub fn map_to_canvas_coordinates(point: &Vec2, width: f64, height: f64) -> Vec2 {
    Vec2::new((point.x + 1.0) * width / 2.0, (1.0 - point.y) * height / 2.0)
}

/// Projects a camera-space point straight to canvas pixels.
pub fn point_on_canvas(point: &Vec3, display: &DisplaySettings) -> Vec2 {
    let projected = apply_perspective_projection(point, display.fov, display.aspect_ratio());
    map_to_canvas_coordinates(&projected, display.width as f64, display.height as f64)
}
