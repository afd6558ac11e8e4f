//! Per-pixel sampling strategies.
//!
//! Each strategy looks at one pixel, decides which sample slots the triangle
//! covers, invokes the shading callback as often as the strategy requires,
//! and appends one [`SampleFragment`] per slot to write. Depth testing and
//! write-back happen afterwards in the triangle's draw loop.

use super::setup::{covers, ScreenTriangle};
use crate::color::Color;
use crate::math::{Vec2, Vec3};

/// A shaded value destined for one sample slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SampleFragment {
    pub sample: usize,
    pub depth: f32,
    pub color: Color,
}

/// One center sample, written to slot 0.
pub(crate) fn single<F>(
    tri: &ScreenTriangle,
    x: u32,
    y: u32,
    offsets: &[Vec2],
    shade: &mut F,
    out: &mut Vec<SampleFragment>,
) where
    F: FnMut(Vec3) -> Option<Color>,
{
    let p = pixel_point(x, y, offsets[0]);
    let bar = tri.barycentric(p);
    if !covers(bar) {
        return;
    }
    if let Some(color) = shade(tri.perspective_correct(bar)) {
        out.push(SampleFragment {
            sample: 0,
            depth: tri.depth_at(bar),
            color,
        });
    }
}

/// Coverage per offset, a single shade at the centroid of the covered
/// offsets, and the same depth/color for every covered slot.
pub(crate) fn multi<F>(
    tri: &ScreenTriangle,
    x: u32,
    y: u32,
    offsets: &[Vec2],
    shade: &mut F,
    out: &mut Vec<SampleFragment>,
) where
    F: FnMut(Vec3) -> Option<Color>,
{
    let first = out.len();
    let mut centroid = Vec2::ZERO;

    for (sample, &offset) in offsets.iter().enumerate() {
        let p = pixel_point(x, y, offset);
        if covers(tri.barycentric(p)) {
            centroid = centroid + p;
            out.push(SampleFragment {
                sample,
                depth: 0.0,
                color: Color::TRANSPARENT,
            });
        }
    }

    let covered = out.len() - first;
    if covered == 0 {
        return;
    }

    // The centroid of covered points lies inside the (convex) triangle.
    let bar = tri.barycentric(centroid / covered as f32);
    let Some(color) = shade(tri.perspective_correct(bar)) else {
        out.truncate(first);
        return;
    };
    let depth = tri.depth_at(bar);
    for fragment in &mut out[first..] {
        fragment.depth = depth;
        fragment.color = color;
    }
}

/// Independent coverage and shading for every offset.
pub(crate) fn supersample<F>(
    tri: &ScreenTriangle,
    x: u32,
    y: u32,
    offsets: &[Vec2],
    shade: &mut F,
    out: &mut Vec<SampleFragment>,
) where
    F: FnMut(Vec3) -> Option<Color>,
{
    for (sample, &offset) in offsets.iter().enumerate() {
        let bar = tri.barycentric(pixel_point(x, y, offset));
        if !covers(bar) {
            continue;
        }
        if let Some(color) = shade(tri.perspective_correct(bar)) {
            out.push(SampleFragment {
                sample,
                depth: tri.depth_at(bar),
                color,
            });
        }
    }
}

#[inline]
fn pixel_point(x: u32, y: u32, offset: Vec2) -> Vec2 {
    Vec2::new(x as f32 + offset.x, y as f32 + offset.y)
}
