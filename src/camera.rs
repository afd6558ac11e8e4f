//! Look-at camera.
//!
//! Right-handed: the camera looks down its local -Z axis, +Y is up.

use crate::math::{Mat4, Vec3};
use crate::projection::Projection;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub projection: Projection,
}

impl Camera {
    pub fn new(eye: Vec3, target: Vec3, projection: Projection) -> Self {
        Self {
            eye,
            target,
            up: Vec3::UP,
            projection,
        }
    }

    pub fn with_up(self, up: Vec3) -> Self {
        Self { up, ..self }
    }

    /// Unit vector from the eye toward the target.
    pub fn forward(&self) -> Vec3 {
        (self.target - self.eye).normalize()
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at(self.eye, self.target, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection.matrix()
    }

    /// `projection * view`.
    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}
