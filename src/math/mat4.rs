//! 4x4 transformation matrix using column-vector convention.
//!
//! # Convention
//! - Vectors are **column vectors** on the right: `Mat4 * Vec`
//! - Translation is stored in the **last column**
//! - Transforms chain **right-to-left**: `A * B * v` applies B first, then A
//! - World and view space are **right-handed**; the camera looks down -Z
//!
//! # Depth range
//!
//! The projection builders map the near plane to NDC z = +1 and the far plane
//! to NDC z = -1, so a *larger* depth is *closer* to the viewer. The depth
//! buffers and shadow maps in this crate rely on that ordering.

use std::ops::Mul;

use super::vec3::Vec3;
use super::vec4::Vec4;

/// 4x4 matrix stored as `data[row][col]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    data: [[f32; 4]; 4],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mat4 {
    pub fn new(data: [[f32; 4]; 4]) -> Self {
        Mat4 { data }
    }

    pub fn identity() -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a translation matrix.
    pub fn translation(x: f32, y: f32, z: f32) -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, x],
            [0.0, 1.0, 0.0, y],
            [0.0, 0.0, 1.0, z],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a scale matrix.
    pub fn scaling(x: f32, y: f32, z: f32) -> Self {
        Mat4::new([
            [x, 0.0, 0.0, 0.0],
            [0.0, y, 0.0, 0.0],
            [0.0, 0.0, z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Counter-clockwise rotation around the X axis (right-handed).
    pub fn rotation_x(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, c, -s, 0.0],
            [0.0, s, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Counter-clockwise rotation around the Y axis (right-handed).
    pub fn rotation_y(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Mat4::new([
            [c, 0.0, s, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [-s, 0.0, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Counter-clockwise rotation around the Z axis (right-handed).
    pub fn rotation_z(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Mat4::new([
            [c, -s, 0.0, 0.0],
            [s, c, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a right-handed view matrix.
    ///
    /// The camera sits at `eye`, looks toward `target`, and the view-space
    /// -Z axis points from `eye` to `target`.
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        let z = (eye - target).normalize();
        let x = up.cross(z).normalize();
        let y = z.cross(x).normalize();

        Self::new([
            [x.x, x.y, x.z, -x.dot(eye)],
            [y.x, y.y, y.z, -y.dot(eye)],
            [z.x, z.y, z.z, -z.dot(eye)],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a perspective projection.
    ///
    /// `near` and `far` are positive distances along the viewing direction.
    /// Clip-space w equals the view-space distance, and NDC z runs from +1
    /// at the near plane to -1 at the far plane.
    pub fn perspective(fov_y: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        let f = 1.0 / (fov_y / 2.0).tan();
        Mat4::new([
            [f / aspect_ratio, 0.0, 0.0, 0.0],
            [0.0, f, 0.0, 0.0],
            [0.0, 0.0, (far + near) / (far - near), 2.0 * far * near / (far - near)],
            [0.0, 0.0, -1.0, 0.0],
        ])
    }

    /// Creates an orthographic projection of the given view-space box.
    ///
    /// Depth follows the same convention as [`Mat4::perspective`]: near is +1.
    pub fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        Mat4::new([
            [2.0 / (right - left), 0.0, 0.0, -(right + left) / (right - left)],
            [0.0, 2.0 / (top - bottom), 0.0, -(top + bottom) / (top - bottom)],
            [0.0, 0.0, 2.0 / (far - near), (far + near) / (far - near)],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Maps NDC x/y in [-1, 1] onto the pixel rectangle `(x, y, width, height)`.
    ///
    /// Z is passed through untouched so that screen-space depth stays in the
    /// NDC range the depth test expects.
    pub fn viewport(x: f32, y: f32, width: f32, height: f32) -> Self {
        Mat4::new([
            [width / 2.0, 0.0, 0.0, x + width / 2.0],
            [0.0, height / 2.0, 0.0, y + height / 2.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn transpose(&self) -> Self {
        let mut result = [[0.0f32; 4]; 4];
        for (row, out) in result.iter_mut().enumerate() {
            for (col, cell) in out.iter_mut().enumerate() {
                *cell = self.data[col][row];
            }
        }
        Mat4::new(result)
    }

    /// Computes the inverse by Gauss-Jordan elimination with partial pivoting.
    /// Returns `None` if the matrix is singular.
    pub fn inverse(&self) -> Option<Mat4> {
        let mut m = self.data;
        let mut inv = Mat4::identity().data;

        for col in 0..4 {
            let pivot = (col..4)
                .max_by(|&a, &b| m[a][col].abs().total_cmp(&m[b][col].abs()))
                .unwrap_or(col);
            if m[pivot][col].abs() < f32::EPSILON {
                return None;
            }
            m.swap(col, pivot);
            inv.swap(col, pivot);

            let scale = 1.0 / m[col][col];
            for k in 0..4 {
                m[col][k] *= scale;
                inv[col][k] *= scale;
            }

            for row in 0..4 {
                if row == col {
                    continue;
                }
                let factor = m[row][col];
                if factor == 0.0 {
                    continue;
                }
                for k in 0..4 {
                    m[row][k] -= factor * m[col][k];
                    inv[row][k] -= factor * inv[col][k];
                }
            }
        }

        Some(Mat4::new(inv))
    }

    /// The matrix that transforms normals: `(M^-1)^T`.
    ///
    /// Falls back to the identity for singular matrices.
    pub fn normal_matrix(&self) -> Mat4 {
        self.inverse().map(|m| m.transpose()).unwrap_or_default()
    }

    /// Transforms a direction (w=0), ignoring translation.
    pub fn transform_direction(&self, v: Vec3) -> Vec3 {
        (*self * Vec4::from_vec3(v, 0.0)).to_vec3()
    }

    /// Access element at [row][col].
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row][col]
    }

    /// Set element at [row][col].
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        self.data[row][col] = value;
    }
}

/// Matrix multiplication: Mat4 * Mat4.
///
/// `A * B * v` applies B first, then A.
impl Mul<Mat4> for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Self::Output {
        let mut result = [[0.0f32; 4]; 4];

        for (row, out) in result.iter_mut().enumerate() {
            for (col, cell) in out.iter_mut().enumerate() {
                *cell = self.data[row][0] * rhs.data[0][col]
                    + self.data[row][1] * rhs.data[1][col]
                    + self.data[row][2] * rhs.data[2][col]
                    + self.data[row][3] * rhs.data[3][col];
            }
        }

        Mat4::new(result)
    }
}

/// Transform a Vec4 by a matrix: Mat4 * Vec4 (column vector).
impl Mul<Vec4> for Mat4 {
    type Output = Vec4;

    fn mul(self, v: Vec4) -> Self::Output {
        let row = |r: usize| Vec4::new(self.data[r][0], self.data[r][1], self.data[r][2], self.data[r][3]);
        Vec4::new(row(0).dot(v), row(1).dot(v), row(2).dot(v), row(3).dot(v))
    }
}

/// Transform a point: Mat4 * Vec3 (treats Vec3 as column vector with w=1).
///
/// Applies perspective division if w is neither 0 nor 1.
impl Mul<Vec3> for Mat4 {
    type Output = Vec3;

    fn mul(self, v: Vec3) -> Self::Output {
        let p = self * Vec4::from(v);
        if p.w != 0.0 && p.w != 1.0 {
            p.homogenize().to_vec3()
        } else {
            p.to_vec3()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn perspective_maps_near_to_plus_one_and_far_to_minus_one() {
        let proj = Mat4::perspective(FRAC_PI_2, 1.0, 0.5, 50.0);
        let near = (proj * Vec4::point(0.0, 0.0, -0.5)).homogenize();
        let far = (proj * Vec4::point(0.0, 0.0, -50.0)).homogenize();
        assert_relative_eq!(near.z, 1.0, epsilon = 1e-5);
        assert_relative_eq!(far.z, -1.0, epsilon = 1e-4);
    }

    #[test]
    fn perspective_w_is_view_distance() {
        let proj = Mat4::perspective(FRAC_PI_2, 1.0, 0.1, 100.0);
        let clip = proj * Vec4::point(1.0, 2.0, -7.0);
        assert_relative_eq!(clip.w, 7.0);
    }

    #[test]
    fn orthographic_depth_matches_perspective_convention() {
        let ortho = Mat4::orthographic(-4.0, 4.0, -4.0, 4.0, 0.1, 10.0);
        let near = ortho * Vec4::point(0.0, 0.0, -0.1);
        let far = ortho * Vec4::point(0.0, 0.0, -10.0);
        assert_relative_eq!(near.z, 1.0, epsilon = 1e-5);
        assert_relative_eq!(far.z, -1.0, epsilon = 1e-5);
    }

    #[test]
    fn look_at_moves_target_onto_negative_z() {
        let view = Mat4::look_at(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::UP);
        let target = view * Vec3::ZERO;
        assert_relative_eq!(target.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(target.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(target.z, -5.0, epsilon = 1e-6);
    }

    #[test]
    fn viewport_maps_ndc_corners_to_pixels() {
        let vp = Mat4::viewport(0.0, 0.0, 800.0, 600.0);
        let lo = vp * Vec4::point(-1.0, -1.0, 0.25);
        let hi = vp * Vec4::point(1.0, 1.0, 0.25);
        assert_eq!((lo.x, lo.y, lo.z), (0.0, 0.0, 0.25));
        assert_eq!((hi.x, hi.y), (800.0, 600.0));
    }

    #[test]
    fn inverse_round_trips() {
        let m = Mat4::translation(1.0, -2.0, 3.0) * Mat4::rotation_y(0.7) * Mat4::scaling(2.0, 2.0, 0.5);
        let product = m * m.inverse().expect("transform is invertible");
        for row in 0..4 {
            for col in 0..4 {
                let expected = if row == col { 1.0 } else { 0.0 };
                assert_relative_eq!(product.get(row, col), expected, epsilon = 1e-5);
            }
        }
    }

    #[test]
    fn normal_matrix_keeps_normals_perpendicular_under_nonuniform_scale() {
        let model = Mat4::scaling(4.0, 1.0, 1.0);
        // Plane x = y has normal (1, -1, 0) and tangent (1, 1, 0).
        let tangent = model.transform_direction(Vec3::new(1.0, 1.0, 0.0));
        let normal = model.normal_matrix().transform_direction(Vec3::new(1.0, -1.0, 0.0));
        assert_relative_eq!(tangent.dot(normal), 0.0, epsilon = 1e-5);
    }
}
