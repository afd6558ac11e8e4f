//! Shadow mapping with percentage-closer filtering.
//!
//! A shadow pass renders the scene's depth from the light into a
//! [`DepthBuffer`]. [`ShadowMap::from_depth_buffer`] resolves that into one
//! depth per texel, and [`ShadowMap::visibility`] answers how much of a point
//! the light can see.

use serde::Deserialize;

use crate::math::{Mat4, Vec3, Vec4};
use crate::render::buffer::{DepthBuffer, CLEAR_DEPTH};

/// PCF kernel parameters.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct PcfSettings {
    /// Kernel half-width; the kernel is `(2r + 1)^2` taps.
    pub radius: u32,
    /// Added to the receiver depth before comparing, against shadow acne.
    pub bias: f32,
}

impl Default for PcfSettings {
    fn default() -> Self {
        Self {
            radius: 3,
            bias: 0.05,
        }
    }
}

/// Resolved light-space depth, one NDC value per texel (larger is closer).
#[derive(Debug, Clone)]
pub struct ShadowMap {
    depth: Vec<f32>,
    width: u32,
    height: u32,
}

impl ShadowMap {
    pub fn from_depth_buffer(buffer: &DepthBuffer) -> Self {
        let (width, height) = (buffer.width(), buffer.height());
        let mut depth = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                depth.push(buffer.resolve(x, y));
            }
        }
        Self {
            depth,
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Stored depth at a texel, clamped to the border. An empty map reads
    /// as cleared everywhere.
    #[inline]
    pub fn depth_at(&self, x: i64, y: i64) -> f32 {
        if self.depth.is_empty() {
            return CLEAR_DEPTH;
        }
        let x = x.clamp(0, self.width as i64 - 1) as usize;
        let y = y.clamp(0, self.height as i64 - 1) as usize;
        self.depth[y * self.width as usize + x]
    }

    /// Fraction of PCF taps around `ndc` that are lit, in `[0, 1]`.
    ///
    /// `ndc` is the receiver's position in the light's NDC. A tap is in
    /// shadow when `ndc.z + bias` is farther than what the map stored.
    /// Points with a non-finite position, as produced by a zero light-space
    /// `w`, are fully lit.
    pub fn visibility(&self, ndc: Vec3, settings: &PcfSettings) -> f32 {
        if !(ndc.x.is_finite() && ndc.y.is_finite() && ndc.z.is_finite()) {
            return 1.0;
        }
        let tx = ((ndc.x * 0.5 + 0.5) * self.width as f32).floor() as i64;
        let ty = ((ndc.y * 0.5 + 0.5) * self.height as f32).floor() as i64;
        let receiver = ndc.z + settings.bias;
        let r = settings.radius as i64;

        let mut lit = 0u32;
        let mut total = 0u32;
        for dy in -r..=r {
            for dx in -r..=r {
                if receiver >= self.depth_at(tx.saturating_add(dx), ty.saturating_add(dy)) {
                    lit += 1;
                }
                total += 1;
            }
        }
        lit as f32 / total as f32
    }

    /// [`visibility`](Self::visibility) of a world-space point, given the
    /// light's view-projection matrix used for the shadow pass.
    pub fn visibility_at(&self, world: Vec3, light_view_proj: &Mat4, settings: &PcfSettings) -> f32 {
        let clip = *light_view_proj * Vec4::from(world);
        self.visibility(clip.homogenize().to_vec3(), settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn map_with_occluder() -> ShadowMap {
        // 8x8 map, left half holds an occluder at depth 0.5.
        let mut buffer = DepthBuffer::new(8, 8, 1, CLEAR_DEPTH);
        for y in 0..8 {
            for x in 0..4 {
                buffer.set(x, y, 0, 0.5);
            }
        }
        ShadowMap::from_depth_buffer(&buffer)
    }

    #[test]
    fn receiver_behind_occluder_is_shadowed() {
        let map = map_with_occluder();
        let settings = PcfSettings { radius: 0, bias: 0.05 };
        assert_eq!(map.visibility(Vec3::new(-0.6, 0.0, 0.0), &settings), 0.0);
        assert_eq!(map.visibility(Vec3::new(0.6, 0.0, 0.0), &settings), 1.0);
    }

    #[test]
    fn bias_keeps_surfaces_from_shadowing_themselves() {
        let map = map_with_occluder();
        let settings = PcfSettings { radius: 0, bias: 0.05 };
        assert_eq!(map.visibility(Vec3::new(-0.6, 0.0, 0.49), &settings), 1.0);
    }

    #[test]
    fn pcf_softens_the_edge() {
        let map = map_with_occluder();
        let settings = PcfSettings { radius: 1, bias: 0.05 };
        // Texel x = 4 sees columns 3, 4 and 5; only column 3 occludes.
        let v = map.visibility(Vec3::new(0.0625 + 0.0625, 0.0, 0.0), &settings);
        assert_relative_eq!(v, 2.0 / 3.0, epsilon = 1e-6);
    }

    #[test]
    fn taps_outside_the_map_clamp_to_the_border() {
        let map = map_with_occluder();
        let settings = PcfSettings::default();
        assert_eq!(map.visibility(Vec3::new(-5.0, 3.0, 0.0), &settings), 0.0);
        assert_eq!(map.visibility(Vec3::new(5.0, -3.0, 0.0), &settings), 1.0);
    }

    #[test]
    fn empty_map_lights_everything() {
        let map = ShadowMap::from_depth_buffer(&DepthBuffer::new(0, 0, 1, CLEAR_DEPTH));
        assert_eq!(map.visibility(Vec3::ZERO, &PcfSettings::default()), 1.0);
        assert_eq!(map.depth_at(3, -2), CLEAR_DEPTH);
    }

    #[test]
    fn non_finite_positions_are_lit() {
        let map = map_with_occluder();
        let settings = PcfSettings::default();
        assert_eq!(map.visibility(Vec3::new(f32::INFINITY, 0.0, 0.0), &settings), 1.0);
        assert_eq!(map.visibility(Vec3::new(0.0, f32::NEG_INFINITY, 0.0), &settings), 1.0);
        assert_eq!(map.visibility(Vec3::new(-0.6, 0.0, f32::NAN), &settings), 1.0);
    }

    #[test]
    fn huge_coordinates_clamp_without_overflow() {
        let map = map_with_occluder();
        let settings = PcfSettings::default();
        assert_eq!(map.visibility(Vec3::new(1.0e30, 0.0, 0.0), &settings), 1.0);
        assert_eq!(map.visibility(Vec3::new(-1.0e30, 0.0, 0.0), &settings), 0.0);
    }

    #[test]
    fn default_kernel_is_seven_by_seven() {
        let settings = PcfSettings::default();
        assert_eq!((2 * settings.radius + 1).pow(2), 49);
        assert_relative_eq!(settings.bias, 0.05);
    }
}
