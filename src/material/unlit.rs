use super::Transforms;
use crate::color::Color;
use crate::math::{Vec3, Vec4};
use crate::mesh::Mesh;
use crate::render::Shader;

/// A single constant color, unaffected by lights.
#[derive(Debug, Clone, Copy)]
pub struct UnlitShader {
    pub transforms: Transforms,
    pub color: Color,
}

impl UnlitShader {
    pub fn new(transforms: Transforms, color: Color) -> Self {
        Self { transforms, color }
    }
}

impl Shader for UnlitShader {
    type Varying = ();

    fn vertex(&self, mesh: &dyn Mesh, face: usize, corner: usize) -> (Vec4, ()) {
        let world = self.transforms.world_position(mesh.position(face, corner));
        (self.transforms.clip(world), ())
    }

    fn fragment(&self, _varyings: &[(); 3], _bar: Vec3) -> Option<Color> {
        Some(self.color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Mat4;
    use crate::mesh::TriangleMesh;
    use crate::render::Renderer;
    use crate::render::AntiAliasing;

    #[test]
    fn fills_covered_pixels_with_its_color() {
        let mut mesh = TriangleMesh::new("tri");
        mesh.add_quad([
            Vec3::new(-0.5, -0.5, 0.0),
            Vec3::new(0.5, -0.5, 0.0),
            Vec3::new(0.5, 0.5, 0.0),
            Vec3::new(-0.5, 0.5, 0.0),
        ]);
        let shader = UnlitShader::new(Transforms::new(Mat4::identity(), Mat4::identity()), Color::GREEN);
        let mut renderer = Renderer::new(16, 16, AntiAliasing::Ssaa4, Color::BLACK);
        renderer.draw(&mesh, &shader, false);

        assert_eq!(renderer.color_buffer().resolve(8, 8), Color::GREEN);
        assert_eq!(renderer.color_buffer().resolve(1, 1), Color::BLACK);
    }
}
