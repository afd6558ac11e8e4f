//! The programmable stages of the pipeline.
//!
//! The rasterizer owns coverage, depth testing and write-back. A [`Shader`]
//! owns everything else: placing vertices in clip space and computing the
//! color of each covered sample.

use std::ops::{Add, Mul};

use crate::color::Color;
use crate::math::{Vec3, Vec4};
use crate::mesh::Mesh;

/// A vertex + fragment program.
///
/// `vertex` runs once per face corner and returns the clip-space position
/// together with a `Varying`, the per-corner data the fragment stage needs.
/// The rasterizer keeps the three varyings of a face and hands them back to
/// `fragment` with the perspective-corrected barycentric coordinate of the
/// sample being shaded.
///
/// Uniforms (matrices, textures, lights) are fields of the implementing type.
pub trait Shader {
    type Varying: Copy;

    fn vertex(&self, mesh: &dyn Mesh, face: usize, corner: usize) -> (Vec4, Self::Varying);

    /// Returns `None` to discard the fragment; neither depth nor color is
    /// written for it.
    fn fragment(&self, varyings: &[Self::Varying; 3], bar: Vec3) -> Option<Color>;
}

/// Weighted sum of one attribute of the three varyings.
///
/// ```ignore
/// let uv = interpolate(varyings, bar, |v| v.uv);
/// ```
#[inline]
pub fn interpolate<V, T, F>(varyings: &[V; 3], bar: Vec3, attribute: F) -> T
where
    F: Fn(&V) -> T,
    T: Add<Output = T> + Mul<f32, Output = T>,
{
    attribute(&varyings[0]) * bar.x + attribute(&varyings[1]) * bar.y + attribute(&varyings[2]) * bar.z
}
