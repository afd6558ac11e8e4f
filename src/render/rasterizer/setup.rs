//! Screen-space triangle setup.

use crate::math::{Mat4, Vec2, Vec3, Vec4};

/// Below this absolute (doubled) screen area a triangle has no coverage.
const DEGENERATE_AREA: f32 = 1e-3;

/// Returned for points outside the triangle and for degenerate triangles.
pub(crate) const OUTSIDE: Vec3 = Vec3::new(-1.0, 1.0, 1.0);

/// Inclusive pixel range, already clamped to the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PixelRect {
    pub min_x: u32,
    pub max_x: u32,
    pub min_y: u32,
    pub max_y: u32,
}

/// A triangle after the viewport transform and perspective divide.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ScreenTriangle {
    /// Pixel-space x/y of each vertex.
    points: [Vec2; 3],
    /// NDC z of each vertex.
    depths: Vec3,
    /// 1/w of each vertex.
    inv_w: Vec3,
}

impl ScreenTriangle {
    pub fn new(clip: &[Vec4; 3], viewport: &Mat4) -> Self {
        let mut points = [Vec2::ZERO; 3];
        let mut depths = [0.0; 3];
        let mut inv_w = [0.0; 3];

        for (i, &v) in clip.iter().enumerate() {
            let screen = (*viewport * v) / v.w;
            points[i] = Vec2::new(screen.x, screen.y);
            depths[i] = v.z / v.w;
            inv_w[i] = 1.0 / v.w;
        }

        Self {
            points,
            depths: Vec3::new(depths[0], depths[1], depths[2]),
            inv_w: Vec3::new(inv_w[0], inv_w[1], inv_w[2]),
        }
    }

    /// Bounding box clamped to `[0, width-1] x [0, height-1]`, or `None` when
    /// nothing of it is on screen.
    pub fn bounds(&self, width: u32, height: u32) -> Option<PixelRect> {
        if width == 0 || height == 0 {
            return None;
        }
        let [a, b, c] = self.points;
        let min_x = a.x.min(b.x).min(c.x).floor().max(0.0);
        let max_x = a.x.max(b.x).max(c.x).floor().min((width - 1) as f32);
        let min_y = a.y.min(b.y).min(c.y).floor().max(0.0);
        let max_y = a.y.max(b.y).max(c.y).floor().min((height - 1) as f32);

        // Also rejects NaN extents from vertices with w == 0.
        if !(min_x <= max_x && min_y <= max_y) {
            return None;
        }
        Some(PixelRect {
            min_x: min_x as u32,
            max_x: max_x as u32,
            min_y: min_y as u32,
            max_y: max_y as u32,
        })
    }

    /// Screen-space barycentric coordinate of `p`.
    ///
    /// Returns [`OUTSIDE`] for degenerate triangles.
    pub fn barycentric(&self, p: Vec2) -> Vec3 {
        let [a, b, c] = self.points;
        let u = Vec3::new(b.x - a.x, c.x - a.x, a.x - p.x);
        let v = Vec3::new(b.y - a.y, c.y - a.y, a.y - p.y);
        let t = u.cross(v);
        if t.z.abs() < DEGENERATE_AREA {
            return OUTSIDE;
        }
        let s = t.x / t.z;
        let r = t.y / t.z;
        Vec3::new(1.0 - s - r, s, r)
    }

    /// NDC depth at a screen-space barycentric coordinate.
    ///
    /// NDC z is affine in screen space, so no correction is applied.
    #[inline]
    pub fn depth_at(&self, bar: Vec3) -> f32 {
        self.depths.dot(bar)
    }

    /// Converts a screen-space barycentric into one that interpolates
    /// attributes linearly in 3D: `bar' = (1/w ⊙ bar) / dot(1/w, bar)`.
    #[inline]
    pub fn perspective_correct(&self, bar: Vec3) -> Vec3 {
        let weighted = self.inv_w.hadamard(bar);
        weighted / self.inv_w.dot(bar)
    }
}

/// True when every component is non-negative. NaN counts as outside.
#[inline]
pub(crate) fn covers(bar: Vec3) -> bool {
    bar.x >= 0.0 && bar.y >= 0.0 && bar.z >= 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn flat(points: [(f32, f32); 3]) -> ScreenTriangle {
        let clip = points.map(|(x, y)| Vec4::new(x, y, 0.5, 1.0));
        ScreenTriangle::new(&clip, &Mat4::identity())
    }

    #[test]
    fn barycentric_of_center_is_positive_and_sums_to_one() {
        let tri = flat([(100.0, 100.0), (200.0, 100.0), (150.0, 200.0)]);
        let bar = tri.barycentric(Vec2::new(150.5, 150.5));
        assert!(covers(bar));
        assert_relative_eq!(bar.x + bar.y + bar.z, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn barycentric_reproduces_vertices() {
        let tri = flat([(0.0, 0.0), (10.0, 0.0), (0.0, 10.0)]);
        let bar = tri.barycentric(Vec2::new(10.0, 0.0));
        assert_relative_eq!(bar.y, 1.0, epsilon = 1e-6);
        assert_relative_eq!(bar.x, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn point_outside_has_negative_component() {
        let tri = flat([(0.0, 0.0), (10.0, 0.0), (0.0, 10.0)]);
        assert!(!covers(tri.barycentric(Vec2::new(9.0, 9.0))));
    }

    #[test]
    fn degenerate_triangle_covers_nothing() {
        let tri = flat([(0.0, 0.0), (5.0, 5.0), (10.0, 10.0)]);
        assert_eq!(tri.barycentric(Vec2::new(5.0, 5.0)), OUTSIDE);
    }

    #[test]
    fn bounds_are_clamped_to_target() {
        let tri = flat([(-50.0, -20.0), (500.0, 10.0), (20.0, 300.0)]);
        let rect = tri.bounds(100, 80).expect("partly on screen");
        assert_eq!(rect, PixelRect { min_x: 0, max_x: 99, min_y: 0, max_y: 79 });
    }

    #[test]
    fn offscreen_triangle_has_no_bounds() {
        let tri = flat([(-50.0, -20.0), (-10.0, -20.0), (-30.0, -5.0)]);
        assert!(tri.bounds(100, 100).is_none());
    }

    #[test]
    fn perspective_correction_with_equal_w_is_identity() {
        let tri = flat([(0.0, 0.0), (10.0, 0.0), (0.0, 10.0)]);
        let bar = Vec3::new(0.2, 0.3, 0.5);
        let corrected = tri.perspective_correct(bar);
        assert_relative_eq!(corrected.x, 0.2, epsilon = 1e-6);
        assert_relative_eq!(corrected.y, 0.3, epsilon = 1e-6);
        assert_relative_eq!(corrected.z, 0.5, epsilon = 1e-6);
    }

    #[test]
    fn perspective_correction_favors_near_vertex() {
        // Vertex 0 is twice as close as the others.
        let clip = [
            Vec4::new(0.0, 0.0, 0.0, 1.0),
            Vec4::new(20.0, 0.0, 0.0, 2.0),
            Vec4::new(0.0, 20.0, 0.0, 2.0),
        ];
        let tri = ScreenTriangle::new(&clip, &Mat4::identity());
        let corrected = tri.perspective_correct(Vec3::new(0.5, 0.25, 0.25));
        assert!(corrected.x > 0.5);
        assert_relative_eq!(corrected.x + corrected.y + corrected.z, 1.0, epsilon = 1e-6);
    }
}
