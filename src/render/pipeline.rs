//! Drawing whole meshes.

use log::debug;

use super::buffer::{ColorBuffer, DepthBuffer};
use super::rasterizer::{AntiAliasing, DrawStats, Triangle};
use super::shader::Shader;
use crate::math::Mat4;
use crate::mesh::Mesh;

/// Fixed-function state shared by every triangle of a draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawContext {
    /// NDC to pixel transform.
    pub viewport: Mat4,
    pub anti_aliasing: AntiAliasing,
    /// Blend fragments over the color buffer using their alpha.
    pub blend: bool,
}

impl DrawContext {
    /// A context covering a full `width x height` target with blending off.
    pub fn new(width: u32, height: u32, anti_aliasing: AntiAliasing) -> Self {
        Self {
            viewport: Mat4::viewport(0.0, 0.0, width as f32, height as f32),
            anti_aliasing,
            blend: false,
        }
    }

    pub fn with_blend(self, blend: bool) -> Self {
        Self { blend, ..self }
    }
}

/// Run `shader` over every face of `mesh`, in storage order.
///
/// Pass `None` for `color` to render depth only.
pub fn draw_mesh<S>(
    mesh: &dyn Mesh,
    shader: &S,
    ctx: &DrawContext,
    depth: &mut DepthBuffer,
    mut color: Option<&mut ColorBuffer>,
) -> DrawStats
where
    S: Shader + ?Sized,
{
    let mut stats = DrawStats::default();
    for face in 0..mesh.face_count() {
        let (c0, v0) = shader.vertex(mesh, face, 0);
        let (c1, v1) = shader.vertex(mesh, face, 1);
        let (c2, v2) = shader.vertex(mesh, face, 2);

        stats += Triangle::new([c0, c1, c2], [v0, v1, v2])
            .with_blend(ctx.blend)
            .draw(
                shader,
                &ctx.viewport,
                depth,
                color.as_deref_mut(),
                ctx.anti_aliasing,
            );
    }

    debug!(
        "{} draw: {} triangles, {} fragments ({} discarded), {} samples written",
        ctx.anti_aliasing, stats.triangles, stats.fragments, stats.discarded, stats.samples_written
    );
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::math::{Vec3, Vec4};
    use crate::mesh::TriangleMesh;
    use crate::render::buffer::CLEAR_DEPTH;

    /// Positions are used directly as NDC.
    struct Flat(Color);

    impl Shader for Flat {
        type Varying = ();

        fn vertex(&self, mesh: &dyn Mesh, face: usize, corner: usize) -> (Vec4, ()) {
            (Vec4::from(mesh.position(face, corner)), ())
        }

        fn fragment(&self, _varyings: &[(); 3], _bar: Vec3) -> Option<Color> {
            Some(self.0)
        }
    }

    fn full_screen(z: f32) -> TriangleMesh {
        let mut mesh = TriangleMesh::new("screen");
        mesh.add_quad([
            Vec3::new(-1.0, -1.0, z),
            Vec3::new(1.0, -1.0, z),
            Vec3::new(1.0, 1.0, z),
            Vec3::new(-1.0, 1.0, z),
        ]);
        mesh
    }

    #[test]
    fn draws_every_face() {
        let ctx = DrawContext::new(8, 8, AntiAliasing::Noaa);
        let mut depth = DepthBuffer::new(8, 8, 1, CLEAR_DEPTH);
        let mut color = ColorBuffer::new(8, 8, 1, Color::BLACK);

        let stats = draw_mesh(&full_screen(0.0), &Flat(Color::GREEN), &ctx, &mut depth, Some(&mut color));

        assert_eq!(stats.triangles, 2);
        assert_eq!(stats.samples_written, 64);
        for y in 0..8 {
            for x in 0..8 {
                assert_eq!(color.resolve(x, y), Color::GREEN);
            }
        }
    }

    #[test]
    fn nearer_mesh_wins_regardless_of_order() {
        let ctx = DrawContext::new(4, 4, AntiAliasing::Msaa4);
        let mut depth = DepthBuffer::for_format(4, 4, ctx.anti_aliasing, CLEAR_DEPTH);
        let mut color = ColorBuffer::for_format(4, 4, ctx.anti_aliasing, Color::BLACK);

        draw_mesh(&full_screen(0.5), &Flat(Color::RED), &ctx, &mut depth, Some(&mut color));
        draw_mesh(&full_screen(0.1), &Flat(Color::BLUE), &ctx, &mut depth, Some(&mut color));

        assert_eq!(color.resolve(2, 2), Color::RED);
    }

    #[test]
    fn depth_only_draw_leaves_color_alone() {
        let ctx = DrawContext::new(4, 4, AntiAliasing::Noaa);
        let mut depth = DepthBuffer::new(4, 4, 1, CLEAR_DEPTH);
        let stats = draw_mesh(&full_screen(-0.5), &Flat(Color::RED), &ctx, &mut depth, None);
        assert_eq!(stats.samples_written, 16);
        assert_eq!(depth.get(0, 3, 0), -0.5);
    }
}
