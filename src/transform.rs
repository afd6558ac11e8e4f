//! Placement of a mesh in the world.

use serde::Deserialize;

use crate::math::{Mat4, Vec3};

/// Translation, Euler rotation (radians) and scale.
///
/// ```ignore
/// let model = Transform::at(Vec3::new(0.0, 1.0, 0.0))
///     .rotated_y(0.3)
///     .scaled(2.0)
///     .matrix();
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn rotated_y(mut self, angle: f32) -> Self {
        self.rotation.y += angle;
        self
    }

    pub fn rotated_x(mut self, angle: f32) -> Self {
        self.rotation.x += angle;
        self
    }

    pub fn scaled(mut self, factor: f32) -> Self {
        self.scale = self.scale * factor;
        self
    }

    /// Model matrix: scale first, then rotate X, Y, Z, then translate.
    pub fn matrix(&self) -> Mat4 {
        Mat4::translation(self.position.x, self.position.y, self.position.z)
            * Mat4::rotation_x(self.rotation.x)
            * Mat4::rotation_y(self.rotation.y)
            * Mat4::rotation_z(self.rotation.z)
            * Mat4::scaling(self.scale.x, self.scale.y, self.scale.z)
    }
}
