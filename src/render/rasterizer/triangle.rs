//! Depth-tested sample writes for one triangle.

use super::sampling::{self, SampleFragment};
use super::setup::ScreenTriangle;
use super::{AntiAliasing, DrawStats, Strategy};
use crate::color::Color;
use crate::math::{Mat4, Vec3, Vec4};
use crate::render::buffer::{ColorBuffer, DepthBuffer};
use crate::render::shader::Shader;

/// One face ready to be rasterized: three clip-space vertices and the
/// varyings the vertex stage produced for them.
///
/// A triangle lives for a single draw; build a new one for every face.
#[derive(Debug, Clone, Copy)]
pub struct Triangle<V> {
    clip: [Vec4; 3],
    varyings: [V; 3],
    blend: bool,
}

impl<V: Copy> Triangle<V> {
    pub fn new(clip: [Vec4; 3], varyings: [V; 3]) -> Self {
        Self {
            clip,
            varyings,
            blend: false,
        }
    }

    /// Enable `src * α + dst * (1 - α)` blending against the color buffer.
    pub fn with_blend(mut self, blend: bool) -> Self {
        self.blend = blend;
        self
    }

    pub fn clip_vertices(&self) -> &[Vec4; 3] {
        &self.clip
    }

    /// Rasterize into `depth` and, if given, `color`.
    ///
    /// Without a color buffer only depth is written, which is how shadow maps
    /// are produced.
    ///
    /// # Panics
    /// Panics if a buffer's sample count differs from `aa.sample_count()`, or
    /// if the color and depth buffers differ in size.
    pub fn draw<S>(
        &self,
        shader: &S,
        viewport: &Mat4,
        depth: &mut DepthBuffer,
        mut color: Option<&mut ColorBuffer>,
        aa: AntiAliasing,
    ) -> DrawStats
    where
        S: Shader<Varying = V> + ?Sized,
    {
        assert_eq!(
            depth.sample_count(),
            aa.sample_count(),
            "depth buffer has {} samples per pixel but {aa} needs {}",
            depth.sample_count(),
            aa.sample_count()
        );
        if let Some(color) = color.as_deref() {
            assert_eq!(
                color.sample_count(),
                aa.sample_count(),
                "color buffer has {} samples per pixel but {aa} needs {}",
                color.sample_count(),
                aa.sample_count()
            );
            assert!(
                color.width() == depth.width() && color.height() == depth.height(),
                "color and depth buffers differ in size"
            );
        }

        let mut stats = DrawStats {
            triangles: 1,
            ..DrawStats::default()
        };

        let screen = ScreenTriangle::new(&self.clip, viewport);
        let Some(rect) = screen.bounds(depth.width(), depth.height()) else {
            return stats;
        };

        let offsets = aa.offsets();
        let strategy = aa.strategy();
        let mut fragments: Vec<SampleFragment> = Vec::with_capacity(offsets.len());
        let mut shade = |bar: Vec3| -> Option<Color> {
            stats.fragments += 1;
            let result = shader.fragment(&self.varyings, bar);
            if result.is_none() {
                stats.discarded += 1;
            }
            result
        };

        let mut written = 0;
        for y in rect.min_y..=rect.max_y {
            for x in rect.min_x..=rect.max_x {
                fragments.clear();
                match strategy {
                    Strategy::Single => {
                        sampling::single(&screen, x, y, offsets, &mut shade, &mut fragments)
                    }
                    Strategy::Multi => {
                        sampling::multi(&screen, x, y, offsets, &mut shade, &mut fragments)
                    }
                    Strategy::Super => {
                        sampling::supersample(&screen, x, y, offsets, &mut shade, &mut fragments)
                    }
                }

                for fragment in &fragments {
                    if self.write_sample(x, y, fragment, depth, color.as_deref_mut()) {
                        written += 1;
                    }
                }
            }
        }
        drop(shade);

        stats.samples_written = written;
        stats
    }

    /// Depth test and write-back for one sample slot.
    ///
    /// Depth and color are committed together or not at all. A fully
    /// transparent fragment is dropped when a color buffer is present, so
    /// cutout materials leave what is behind them visible.
    fn write_sample(
        &self,
        x: u32,
        y: u32,
        fragment: &SampleFragment,
        depth: &mut DepthBuffer,
        color: Option<&mut ColorBuffer>,
    ) -> bool {
        let SampleFragment {
            sample,
            depth: z,
            color: src,
        } = *fragment;

        if !(-1.0..=1.0).contains(&z) || z <= depth.get(x, y, sample) {
            return false;
        }

        match color {
            Some(color) => {
                if src.a == 0.0 {
                    return false;
                }
                let out = if self.blend {
                    src.blend_over(color.get(x, y, sample))
                } else {
                    src
                };
                depth.set(x, y, sample, z);
                color.set(x, y, sample, out);
            }
            None => depth.set(x, y, sample, z),
        }
        true
    }
}
