//! Frame-level rendering.
//!
//! A [`Renderer`] owns the color and depth sample buffers of one render
//! target and turns them into images once drawing is done.

use std::path::Path;

use log::info;

use super::buffer::{ColorBuffer, DepthBuffer, CLEAR_DEPTH};
use super::pipeline::{draw_mesh, DrawContext};
use super::rasterizer::{AntiAliasing, DrawStats};
use super::shader::Shader;
use crate::color::Color;
use crate::error::Result;
use crate::mesh::Mesh;

pub struct Renderer {
    color: ColorBuffer,
    depth: DepthBuffer,
    anti_aliasing: AntiAliasing,
    background: Color,
    stats: DrawStats,
}

impl Renderer {
    /// Buffers are sized for `anti_aliasing` and start cleared.
    pub fn new(width: u32, height: u32, anti_aliasing: AntiAliasing, background: Color) -> Self {
        Self {
            color: ColorBuffer::for_format(width, height, anti_aliasing, background),
            depth: DepthBuffer::for_format(width, height, anti_aliasing, CLEAR_DEPTH),
            anti_aliasing,
            background,
            stats: DrawStats::default(),
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        *self = Self::new(width, height, self.anti_aliasing, self.background);
    }

    pub fn width(&self) -> u32 {
        self.color.width()
    }

    pub fn height(&self) -> u32 {
        self.color.height()
    }

    pub fn anti_aliasing(&self) -> AntiAliasing {
        self.anti_aliasing
    }

    /// Reset color to the background, depth to empty, and the counters.
    pub fn clear(&mut self) {
        self.color.clear(self.background);
        self.depth.clear(CLEAR_DEPTH);
        self.stats = DrawStats::default();
    }

    /// Draw state covering the whole target.
    pub fn context(&self, blend: bool) -> DrawContext {
        DrawContext::new(self.width(), self.height(), self.anti_aliasing).with_blend(blend)
    }

    /// Draw into color and depth.
    pub fn draw<S: Shader + ?Sized>(&mut self, mesh: &dyn Mesh, shader: &S, blend: bool) -> DrawStats {
        let ctx = self.context(blend);
        let stats = draw_mesh(mesh, shader, &ctx, &mut self.depth, Some(&mut self.color));
        self.stats += stats;
        stats
    }

    /// Draw into depth only; color is left untouched.
    pub fn draw_depth_only<S: Shader + ?Sized>(&mut self, mesh: &dyn Mesh, shader: &S) -> DrawStats {
        let ctx = self.context(false);
        let stats = draw_mesh(mesh, shader, &ctx, &mut self.depth, None);
        self.stats += stats;
        stats
    }

    /// Totals since the last [`clear`](Self::clear).
    pub fn stats(&self) -> DrawStats {
        self.stats
    }

    pub fn color_buffer(&self) -> &ColorBuffer {
        &self.color
    }

    pub fn depth_buffer(&self) -> &DepthBuffer {
        &self.depth
    }

    pub fn resolve_color(&self) -> image::RgbaImage {
        self.color.to_image()
    }

    pub fn resolve_depth(&self) -> image::GrayImage {
        self.depth.to_image()
    }

    /// Save the resolved color buffer; the format follows the extension.
    pub fn save_color(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.resolve_color().save(path)?;
        info!("wrote {} ({}x{}, {})", path.display(), self.width(), self.height(), self.anti_aliasing);
        Ok(())
    }

    /// Save the resolved depth buffer as a grayscale image.
    pub fn save_depth(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.resolve_depth().save(path)?;
        info!("wrote {} ({}x{} depth)", path.display(), self.width(), self.height());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{Vec3, Vec4};
    use crate::mesh::TriangleMesh;

    struct Ndc(Color);

    impl Shader for Ndc {
        type Varying = ();

        fn vertex(&self, mesh: &dyn Mesh, face: usize, corner: usize) -> (Vec4, ()) {
            (Vec4::from(mesh.position(face, corner)), ())
        }

        fn fragment(&self, _varyings: &[(); 3], _bar: Vec3) -> Option<Color> {
            Some(self.0)
        }
    }

    fn triangle() -> TriangleMesh {
        let mut mesh = TriangleMesh::new("tri");
        mesh.add_triangle(
            [Vec3::new(-1.0, -1.0, 0.0), Vec3::new(1.0, -1.0, 0.0), Vec3::new(-1.0, 1.0, 0.0)],
            [Vec3::UP; 3],
            [Default::default(); 3],
        );
        mesh
    }

    #[test]
    fn buffers_follow_anti_aliasing_format() {
        let renderer = Renderer::new(8, 4, AntiAliasing::Msaa8, Color::BLACK);
        assert_eq!(renderer.color_buffer().sample_count(), 8);
        assert_eq!(renderer.depth_buffer().sample_count(), 8);
        assert_eq!((renderer.width(), renderer.height()), (8, 4));
    }

    #[test]
    fn clear_restores_background_and_depth() {
        let mut renderer = Renderer::new(8, 8, AntiAliasing::Noaa, Color::BLUE);
        renderer.draw(&triangle(), &Ndc(Color::RED), false);
        assert_eq!(renderer.color_buffer().resolve(1, 1), Color::RED);
        assert!(renderer.stats().samples_written > 0);

        renderer.clear();
        assert_eq!(renderer.color_buffer().resolve(1, 1), Color::BLUE);
        assert_eq!(renderer.depth_buffer().get(1, 1, 0), CLEAR_DEPTH);
        assert_eq!(renderer.stats(), DrawStats::default());
    }

    #[test]
    fn depth_only_draw_keeps_color() {
        let mut renderer = Renderer::new(8, 8, AntiAliasing::Msaa4, Color::BLUE);
        renderer.draw_depth_only(&triangle(), &Ndc(Color::RED));
        assert_eq!(renderer.color_buffer().resolve(1, 1), Color::BLUE);
        assert_eq!(renderer.depth_buffer().get(1, 1, 0), 0.0);
    }

    #[test]
    fn resolved_image_is_top_down() {
        let mut renderer = Renderer::new(8, 8, AntiAliasing::Noaa, Color::BLACK);
        renderer.draw(&triangle(), &Ndc(Color::WHITE), false);
        let image = renderer.resolve_color();
        // The triangle fills the lower-left half: bottom-left lit, top-right dark.
        assert_eq!(image.get_pixel(0, 7).0, [255, 255, 255, 255]);
        assert_eq!(image.get_pixel(7, 0).0, [0, 0, 0, 255]);
    }
}
