use super::Transforms;
use crate::color::Color;
use crate::light::Light;
use crate::math::{Vec3, Vec4};
use crate::mesh::Mesh;
use crate::render::{interpolate, Shader};

/// Lambert lighting evaluated per vertex and interpolated across the face.
#[derive(Debug, Clone, Copy)]
pub struct GouraudShader {
    pub transforms: Transforms,
    pub light: Light,
    pub color: Color,
    pub ambient: f32,
}

impl GouraudShader {
    pub fn new(transforms: Transforms, light: Light, color: Color) -> Self {
        Self {
            transforms,
            light,
            color,
            ambient: 0.1,
        }
    }

    pub fn with_ambient(self, ambient: f32) -> Self {
        Self { ambient, ..self }
    }
}

impl Shader for GouraudShader {
    /// Light intensity at the corner.
    type Varying = f32;

    fn vertex(&self, mesh: &dyn Mesh, face: usize, corner: usize) -> (Vec4, f32) {
        let world = self.transforms.world_position(mesh.position(face, corner));
        let normal = self.transforms.world_normal(mesh.normal(face, corner));
        let intensity = self.ambient + self.light.diffuse(world, normal);
        (self.transforms.clip(world), intensity)
    }

    fn fragment(&self, varyings: &[f32; 3], bar: Vec3) -> Option<Color> {
        let intensity = interpolate(varyings, bar, |&i| i);
        Some(self.color.shaded(intensity))
    }
}
