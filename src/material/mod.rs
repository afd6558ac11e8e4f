//! Ready-made shaders.
//!
//! Every material owns its uniforms. Matrices are grouped in [`Transforms`];
//! textures and shadow maps are borrowed for the duration of a draw.

mod depth;
mod gouraud;
mod phong;
mod textured;
mod unlit;

pub use depth::DepthShader;
pub use gouraud::GouraudShader;
pub use phong::{PhongShader, ShadowQuery, Surface};
pub use textured::TexturedShader;
pub use unlit::UnlitShader;

use crate::math::{Mat4, Vec3, Vec4};

/// Model and view-projection matrices, plus the derived normal matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transforms {
    model: Mat4,
    view_projection: Mat4,
    normal: Mat4,
}

impl Transforms {
    pub fn new(model: Mat4, view_projection: Mat4) -> Self {
        Self {
            model,
            view_projection,
            normal: model.normal_matrix(),
        }
    }

    pub fn model(&self) -> &Mat4 {
        &self.model
    }

    pub fn view_projection(&self) -> &Mat4 {
        &self.view_projection
    }

    /// Object space to world space.
    #[inline]
    pub fn world_position(&self, p: Vec3) -> Vec3 {
        (self.model * Vec4::from(p)).to_vec3()
    }

    /// Object-space normal to a unit world-space normal.
    #[inline]
    pub fn world_normal(&self, n: Vec3) -> Vec3 {
        self.normal.transform_direction(n).normalize()
    }

    /// World space to clip space.
    #[inline]
    pub fn clip(&self, world: Vec3) -> Vec4 {
        self.view_projection * Vec4::from(world)
    }
}
