//! Camera pose and the world-to-camera transform
use crate::math::{
    multiply_mat_vec, multiply_matrices, pitch_rotation_matrix, transpose, vector_subtract,
    yaw_rotation_matrix, Mat3, Vec3,
};

/// Discrete translation commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    Left,
    Right,
    Forward,
    Backward,
    Up,
    Down,
}

/// Discrete rotation commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    YawLeft,
    YawRight,
    PitchUp,
    PitchDown,
}

/// Camera pose in world space.
///
/// The columns of `orientation` are the camera's right, up and backward axes
/// expressed in world coordinates; the camera looks down its local -Z axis.
/// Only build the orientation from the identity and the rotation builders in
/// [`crate::math`], as [`point_to_camera`] relies on it being orthonormal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub orientation: Mat3,
}

impl Camera {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            orientation: Mat3::identity(),
        }
    }

    pub fn with_orientation(position: Vec3, orientation: Mat3) -> Self {
        Self {
            position,
            orientation,
        }
    }

    /// Expresses a world-space point in this camera's frame.
    pub fn point_to_camera(&self, point: &Vec3) -> Vec3 {
        point_to_camera(point, self)
    }

    /// Inverse of [`Camera::point_to_camera`].
    pub fn point_to_world(&self, point: &Vec3) -> Vec3 {
        multiply_mat_vec(&self.orientation, point) + self.position
    }

    pub fn right(&self) -> Vec3 {
        self.orientation.column(0).into_owned()
    }

    pub fn up(&self) -> Vec3 {
        self.orientation.column(1).into_owned()
    }

    /// Viewing direction, the negated third basis column.
    pub fn forward(&self) -> Vec3 {
        -self.orientation.column(2).into_owned()
    }

    /// Moves the camera by `step` world units.
    ///
    /// Sideways moves follow the right axis flattened onto the X/Z plane,
    /// forward/backward follow the viewing axis, up/down follow world Y.
    pub fn translate(&mut self, movement: Movement, step: f64) {
        let o = &self.orientation;
        match movement {
            Movement::Left => {
                self.position.x -= step * o[(0, 0)];
                self.position.z -= step * o[(2, 0)];
            }
            Movement::Right => {
                self.position.x += step * o[(0, 0)];
                self.position.z += step * o[(2, 0)];
            }
            Movement::Forward => self.position -= o.column(2) * step,
            Movement::Backward => self.position += o.column(2) * step,
            Movement::Up => self.position.y += step,
            Movement::Down => self.position.y -= step,
        }
    }

    /// Rotates the camera by `degrees`.
    ///
    /// Yaw composes in the world frame (`yaw * orientation`), pitch in the
    /// camera's own frame (`orientation * pitch`).
    pub fn rotate(&mut self, rotation: Rotation, degrees: f64) {
        self.orientation = match rotation {
            Rotation::YawLeft => multiply_matrices(&yaw_rotation_matrix(-degrees), &self.orientation),
            Rotation::YawRight => multiply_matrices(&yaw_rotation_matrix(degrees), &self.orientation),
            Rotation::PitchUp => multiply_matrices(&self.orientation, &pitch_rotation_matrix(degrees)),
            Rotation::PitchDown => {
                multiply_matrices(&self.orientation, &pitch_rotation_matrix(-degrees))
            }
        };
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::new(50.0, 50.0, 200.0))
    }
}

/// Subtracts the camera position, then applies the transposed (inverse)
/// orientation. The result is meaningless if the orientation is not
/// orthonormal.
pub fn point_to_camera(point: &Vec3, camera: &Camera) -> Vec3 {
    let translated = vector_subtract(point, &camera.position);
    multiply_mat_vec(&transpose(&camera.orientation), &translated)
}
