use super::Transforms;
use crate::color::Color;
use crate::math::{Vec2, Vec3, Vec4};
use crate::mesh::Mesh;
use crate::render::{interpolate, Shader};
use crate::texture::Texture;

/// Diffuse texture without lighting; the texel's alpha is passed through.
///
/// Drawn with blending enabled this gives windows and cutouts: transparent
/// texels are dropped and translucent ones blend over what is behind.
#[derive(Debug, Clone, Copy)]
pub struct TexturedShader<'a> {
    pub transforms: Transforms,
    pub texture: &'a Texture,
    /// Multiplied with every texel.
    pub tint: Color,
}

impl<'a> TexturedShader<'a> {
    pub fn new(transforms: Transforms, texture: &'a Texture) -> Self {
        Self {
            transforms,
            texture,
            tint: Color::WHITE,
        }
    }

    pub fn with_tint(self, tint: Color) -> Self {
        Self { tint, ..self }
    }
}

impl Shader for TexturedShader<'_> {
    type Varying = Vec2;

    fn vertex(&self, mesh: &dyn Mesh, face: usize, corner: usize) -> (Vec4, Vec2) {
        let world = self.transforms.world_position(mesh.position(face, corner));
        (self.transforms.clip(world), mesh.uv(face, corner))
    }

    fn fragment(&self, varyings: &[Vec2; 3], bar: Vec3) -> Option<Color> {
        let uv = interpolate(varyings, bar, |&uv| uv);
        Some(self.texture.sample(uv) * self.tint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Mat4;
    use crate::mesh::TriangleMesh;
    use crate::render::{AntiAliasing, Renderer};

    fn screen_quad() -> TriangleMesh {
        let mut mesh = TriangleMesh::new("window");
        mesh.add_quad([
            Vec3::new(-1.0, -1.0, 0.5),
            Vec3::new(1.0, -1.0, 0.5),
            Vec3::new(1.0, 1.0, 0.5),
            Vec3::new(-1.0, 1.0, 0.5),
        ]);
        mesh
    }

    #[test]
    fn samples_texture_at_interpolated_uv() {
        let texels = [Color::RED, Color::GREEN, Color::BLUE, Color::WHITE];
        let texture = Texture::from_fn(2, 2, |x, y| texels[(y * 2 + x) as usize]);
        let shader = TexturedShader::new(Transforms::new(Mat4::identity(), Mat4::identity()), &texture);

        let mut renderer = Renderer::new(4, 4, AntiAliasing::Noaa, Color::BLACK);
        renderer.draw(&screen_quad(), &shader, false);

        let color = renderer.color_buffer();
        assert_eq!(color.resolve(0, 0), Color::RED);
        assert_eq!(color.resolve(3, 0), Color::GREEN);
        assert_eq!(color.resolve(0, 3), Color::BLUE);
        assert_eq!(color.resolve(3, 3), Color::WHITE);
    }

    #[test]
    fn transparent_texels_show_the_background() {
        let texture = Texture::checkerboard(2, 2, Color::RED, Color::TRANSPARENT);
        let shader = TexturedShader::new(Transforms::new(Mat4::identity(), Mat4::identity()), &texture);

        let mut renderer = Renderer::new(4, 4, AntiAliasing::Noaa, Color::BLUE);
        renderer.draw(&screen_quad(), &shader, true);

        let color = renderer.color_buffer();
        assert_eq!(color.resolve(0, 0), Color::RED);
        assert_eq!(color.resolve(3, 0), Color::BLUE);
    }
}
