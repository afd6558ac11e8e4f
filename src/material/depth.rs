use super::Transforms;
use crate::color::Color;
use crate::math::{Vec3, Vec4};
use crate::mesh::Mesh;
use crate::render::Shader;

/// Positions only; every fragment is opaque black.
///
/// Meant for depth-only passes such as rendering a shadow map from a light.
#[derive(Debug, Clone, Copy)]
pub struct DepthShader {
    pub transforms: Transforms,
}

impl DepthShader {
    pub fn new(transforms: Transforms) -> Self {
        Self { transforms }
    }
}

impl Shader for DepthShader {
    type Varying = ();

    fn vertex(&self, mesh: &dyn Mesh, face: usize, corner: usize) -> (Vec4, ()) {
        let world = self.transforms.world_position(mesh.position(face, corner));
        (self.transforms.clip(world), ())
    }

    fn fragment(&self, _varyings: &[(); 3], _bar: Vec3) -> Option<Color> {
        Some(Color::BLACK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Camera;
    use crate::math::Mat4;
    use crate::mesh::TriangleMesh;
    use crate::projection::Projection;
    use crate::render::buffer::{DepthBuffer, CLEAR_DEPTH};
    use crate::render::{draw_mesh, AntiAliasing, DrawContext};
    use crate::shadow::{PcfSettings, ShadowMap};

    #[test]
    fn box_casts_a_shadow_on_the_floor() {
        let size = 128;
        let light = Camera::new(
            Vec3::new(2.0, 10.0, 1.0),
            Vec3::ZERO,
            Projection::orthographic(6.0, 6.0, 1.0, 30.0),
        );
        let light_view_proj = light.view_projection();
        let shader = DepthShader::new(Transforms::new(Mat4::identity(), light_view_proj));
        let ctx = DrawContext::new(size, size, AntiAliasing::Noaa);
        let mut depth = DepthBuffer::new(size, size, 1, CLEAR_DEPTH);

        let floor = TriangleMesh::quad("floor", 5.0, 0.0);
        let cube = TriangleMesh::cuboid("box", Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 2.0, 1.0));
        draw_mesh(&floor, &shader, &ctx, &mut depth, None);
        draw_mesh(&cube, &shader, &ctx, &mut depth, None);

        let map = ShadowMap::from_depth_buffer(&depth);
        let settings = PcfSettings::default();

        let behind_box = map.visibility_at(Vec3::new(-1.2, 0.0, -0.6), &light_view_proj, &settings);
        let open_floor = map.visibility_at(Vec3::new(4.0, 0.0, 4.0), &light_view_proj, &settings);
        assert!(behind_box < 1.0, "visibility behind the box was {behind_box}");
        assert_eq!(open_floor, 1.0);
    }
}
