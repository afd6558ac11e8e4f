use super::Transforms;
use crate::color::Color;
use crate::light::Light;
use crate::math::{Mat3, Mat4, Vec2, Vec3, Vec4};
use crate::mesh::Mesh;
use crate::render::{interpolate, Shader};
use crate::shadow::{PcfSettings, ShadowMap};
use crate::texture::Texture;

/// Exponent used where the specular map is black.
const SPECULAR_BASE_EXPONENT: f32 = 5.0;

/// Per-corner data of [`PhongShader`], all in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub world: Vec3,
    pub normal: Vec3,
    pub uv: Vec2,
}

/// A shadow map together with the transform it was rendered with.
#[derive(Debug, Clone, Copy)]
pub struct ShadowQuery<'a> {
    pub map: &'a ShadowMap,
    pub light_view_proj: Mat4,
    pub settings: PcfSettings,
}

impl ShadowQuery<'_> {
    pub fn visibility(&self, world: Vec3) -> f32 {
        self.map
            .visibility_at(world, &self.light_view_proj, &self.settings)
    }
}

/// Blinn-Phong lighting with optional normal, specular and shadow maps.
///
/// Final color is `diffuse * (ambient + shadow * attenuation * (lambert + k * specular))`
/// where `shadow = 0.3 + 0.7 * visibility` when a shadow map is attached.
#[derive(Debug, Clone, Copy)]
pub struct PhongShader<'a> {
    pub transforms: Transforms,
    /// Camera position, for the half vector.
    pub eye: Vec3,
    pub light: Light,
    pub diffuse: &'a Texture,
    /// Tangent-space normals, encoded as `rgb * 2 - 1`.
    pub normal_map: Option<&'a Texture>,
    /// Red channel scales the specular exponent.
    pub specular_map: Option<&'a Texture>,
    pub shadow: Option<ShadowQuery<'a>>,
    pub ambient: f32,
    /// Exponent when there is no specular map.
    pub shininess: f32,
    pub specular_strength: f32,
}

impl<'a> PhongShader<'a> {
    pub fn new(transforms: Transforms, eye: Vec3, light: Light, diffuse: &'a Texture) -> Self {
        Self {
            transforms,
            eye,
            light,
            diffuse,
            normal_map: None,
            specular_map: None,
            shadow: None,
            ambient: 0.1,
            shininess: 32.0,
            specular_strength: 0.6,
        }
    }

    pub fn with_normal_map(self, normal_map: &'a Texture) -> Self {
        Self {
            normal_map: Some(normal_map),
            ..self
        }
    }

    pub fn with_specular_map(self, specular_map: &'a Texture) -> Self {
        Self {
            specular_map: Some(specular_map),
            ..self
        }
    }

    pub fn with_shadow(self, shadow: ShadowQuery<'a>) -> Self {
        Self {
            shadow: Some(shadow),
            ..self
        }
    }

    pub fn with_ambient(self, ambient: f32) -> Self {
        Self { ambient, ..self }
    }

    fn specular_exponent(&self, uv: Vec2) -> f32 {
        match self.specular_map {
            Some(map) => SPECULAR_BASE_EXPONENT + map.sample(uv).r * 255.0,
            None => self.shininess,
        }
    }

    fn shading_normal(&self, varyings: &[Surface; 3], bar: Vec3, uv: Vec2) -> Vec3 {
        let n = interpolate(varyings, bar, |v| v.normal).normalize();
        let Some(map) = self.normal_map else {
            return n;
        };
        let Some(basis) = tangent_basis(varyings, n) else {
            return n;
        };
        let texel = map.sample(uv);
        let tangent_normal = Vec3::new(texel.r * 2.0 - 1.0, texel.g * 2.0 - 1.0, texel.b * 2.0 - 1.0);
        (basis * tangent_normal).normalize()
    }
}

/// Columns are the directions of increasing u and v on the triangle's plane,
/// and `n`.
fn tangent_basis(varyings: &[Surface; 3], n: Vec3) -> Option<Mat3> {
    let [v0, v1, v2] = varyings;
    let e1 = v1.world - v0.world;
    let e2 = v2.world - v0.world;
    let duv1 = v1.uv - v0.uv;
    let duv2 = v2.uv - v0.uv;

    let inverse = Mat3::from_rows(e1, e2, n).inverse()?;
    let tangent = inverse * Vec3::new(duv1.x, duv2.x, 0.0);
    let bitangent = inverse * Vec3::new(duv1.y, duv2.y, 0.0);
    if tangent.magnitude_squared() == 0.0 || bitangent.magnitude_squared() == 0.0 {
        return None;
    }
    Some(Mat3::from_cols(tangent.normalize(), bitangent.normalize(), n))
}

impl Shader for PhongShader<'_> {
    type Varying = Surface;

    fn vertex(&self, mesh: &dyn Mesh, face: usize, corner: usize) -> (Vec4, Surface) {
        let world = self.transforms.world_position(mesh.position(face, corner));
        let surface = Surface {
            world,
            normal: self.transforms.world_normal(mesh.normal(face, corner)),
            uv: mesh.uv(face, corner),
        };
        (self.transforms.clip(world), surface)
    }

    fn fragment(&self, varyings: &[Surface; 3], bar: Vec3) -> Option<Color> {
        let uv = interpolate(varyings, bar, |v| v.uv);
        let world = interpolate(varyings, bar, |v| v.world);
        let n = self.shading_normal(varyings, bar, uv);

        let (l, attenuation) = self.light.incidence(world);
        let lambert = n.dot(l).max(0.0);
        let specular = if lambert > 0.0 {
            let view = (self.eye - world).normalize();
            let half = (l + view).normalize();
            n.dot(half).max(0.0).powf(self.specular_exponent(uv))
        } else {
            0.0
        };

        let shadow = self
            .shadow
            .map_or(1.0, |query| 0.3 + 0.7 * query.visibility(world));
        let intensity =
            self.ambient + shadow * attenuation * (lambert + self.specular_strength * specular);

        Some(self.diffuse.sample(uv).shaded(intensity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::buffer::DepthBuffer;
    use approx::assert_relative_eq;

    /// One floor triangle with u along +X and v along -Z.
    fn floor_triangle() -> [Surface; 3] {
        [
            Surface {
                world: Vec3::new(-1.0, 0.0, 1.0),
                normal: Vec3::UP,
                uv: Vec2::new(0.0, 0.0),
            },
            Surface {
                world: Vec3::new(1.0, 0.0, 1.0),
                normal: Vec3::UP,
                uv: Vec2::new(1.0, 0.0),
            },
            Surface {
                world: Vec3::new(1.0, 0.0, -1.0),
                normal: Vec3::UP,
                uv: Vec2::new(1.0, 1.0),
            },
        ]
    }

    fn matte(light: Light, diffuse: &Texture) -> PhongShader<'_> {
        let mut shader = PhongShader::new(
            Transforms::new(Mat4::identity(), Mat4::identity()),
            Vec3::new(0.0, 5.0, 0.0),
            light,
            diffuse,
        )
        .with_ambient(0.0);
        shader.specular_strength = 0.0;
        shader
    }

    const CENTER: Vec3 = Vec3::new(0.4, 0.3, 0.3);

    #[test]
    fn lambert_term_from_overhead_light() {
        let white = Texture::solid(Color::WHITE);
        let shader = matte(Light::directional(Vec3::new(0.0, -1.0, 0.0)), &white);
        let c = shader.fragment(&floor_triangle(), CENTER).expect("opaque");
        assert_relative_eq!(c.r, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn flat_normal_map_keeps_the_geometric_normal() {
        let white = Texture::solid(Color::WHITE);
        let flat = Texture::solid(Color::rgb(0.5, 0.5, 1.0));
        let shader = matte(Light::directional(Vec3::new(0.0, -1.0, 0.0)), &white).with_normal_map(&flat);
        let c = shader.fragment(&floor_triangle(), CENTER).expect("opaque");
        assert_relative_eq!(c.r, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn normal_map_tilts_towards_the_tangent() {
        let white = Texture::solid(Color::WHITE);
        // Tangent-space +X, i.e. the direction of increasing u.
        let along_u = Texture::solid(Color::rgb(1.0, 0.5, 0.5));
        let from_plus_x = Light::directional(Vec3::new(-1.0, 0.0, 0.0));

        let plain = matte(from_plus_x, &white);
        let mapped = plain.with_normal_map(&along_u);
        let floor = floor_triangle();

        assert_relative_eq!(plain.fragment(&floor, CENTER).expect("opaque").r, 0.0);
        assert_relative_eq!(mapped.fragment(&floor, CENTER).expect("opaque").r, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn specular_highlight_adds_to_diffuse() {
        let gray = Texture::solid(Color::gray(0.5));
        let overhead = Light::directional(Vec3::new(0.0, -1.0, 0.0));
        let matte_shader = matte(overhead, &gray);
        let shiny = PhongShader {
            specular_strength: 0.6,
            ..matte_shader
        };
        let floor = floor_triangle();
        let dull = matte_shader.fragment(&floor, CENTER).expect("opaque");
        let lit = shiny.fragment(&floor, CENTER).expect("opaque");
        assert!(lit.r > dull.r);
    }

    #[test]
    fn point_light_dims_with_distance() {
        let white = Texture::solid(Color::WHITE);
        let near = matte(Light::point(Vec3::new(0.0, 3.0, 0.0)), &white);
        let far = matte(Light::point(Vec3::new(0.0, 5.0, 0.0)), &white);
        let floor = floor_triangle();
        let near_c = near.fragment(&floor, CENTER).expect("opaque");
        let far_c = far.fragment(&floor, CENTER).expect("opaque");
        assert!(near_c.r > far_c.r);
        assert!(far_c.r > 0.0);
    }

    #[test]
    fn fully_shadowed_fragment_keeps_thirty_percent() {
        let white = Texture::solid(Color::WHITE);
        // Every texel holds an occluder right at the near plane.
        let map = ShadowMap::from_depth_buffer(&DepthBuffer::new(4, 4, 1, 1.0));
        let query = ShadowQuery {
            map: &map,
            light_view_proj: Mat4::identity(),
            settings: PcfSettings::default(),
        };
        let shader = matte(Light::directional(Vec3::new(0.0, -1.0, 0.0)), &white).with_shadow(query);
        let c = shader.fragment(&floor_triangle(), CENTER).expect("opaque");
        assert_relative_eq!(c.r, 0.3, epsilon = 1e-5);
    }
}
