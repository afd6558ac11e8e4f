//! Multi-sample pixel storage.
//!
//! A [`SampleBuffer`] holds a fixed number of samples per pixel. The
//! rasterizer writes individual samples; [`SampleBuffer::resolve`] averages
//! them back down to one value per pixel, which is the anti-aliasing resolve.
//!
//! # Depth convention
//!
//! Depth buffers store NDC z in `[-1, 1]` where *larger is closer*. A freshly
//! cleared depth buffer should therefore hold a value below every depth the
//! scene can produce, such as [`CLEAR_DEPTH`].

use std::ops::{Add, Mul};

use super::rasterizer::AntiAliasing;
use crate::color::Color;

/// Depth for an empty pixel: farther than anything the depth test accepts.
pub const CLEAR_DEPTH: f32 = f32::MIN;

/// Values that can be averaged by [`SampleBuffer::resolve`].
pub trait Sample: Copy + Add<Output = Self> + Mul<f32, Output = Self> {}

impl<T> Sample for T where T: Copy + Add<Output = T> + Mul<f32, Output = T> {}

/// Per-pixel depth samples.
pub type DepthBuffer = SampleBuffer<f32>;
/// Per-pixel color samples.
pub type ColorBuffer = SampleBuffer<Color>;

/// A `width x height` grid where every pixel owns `samples` values.
///
/// Samples of one pixel are stored contiguously, so the slice for pixel
/// `(x, y)` starts at `(y * width + x) * samples`.
#[derive(Clone, Debug)]
pub struct SampleBuffer<T> {
    data: Vec<T>,
    width: u32,
    height: u32,
    samples: usize,
}

impl<T: Sample> SampleBuffer<T> {
    /// Create a buffer with every sample set to `fill`.
    ///
    /// # Panics
    /// Panics if `samples` is not one of the supported counts (1, 4, 8, 16).
    pub fn new(width: u32, height: u32, samples: usize, fill: T) -> Self {
        assert!(
            matches!(samples, 1 | 4 | 8 | 16),
            "unsupported sample count {samples}"
        );
        Self {
            data: vec![fill; width as usize * height as usize * samples],
            width,
            height,
            samples,
        }
    }

    /// Create a buffer whose sample count matches `aa`.
    pub fn for_format(width: u32, height: u32, aa: AntiAliasing, fill: T) -> Self {
        Self::new(width, height, aa.sample_count(), fill)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn sample_count(&self) -> usize {
        self.samples
    }

    /// Reset every sample to `value`.
    pub fn clear(&mut self, value: T) {
        self.data.fill(value);
    }

    #[inline]
    fn index(&self, x: u32, y: u32, sample: usize) -> usize {
        debug_assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        debug_assert!(sample < self.samples, "sample {sample} out of range");
        (y as usize * self.width as usize + x as usize) * self.samples + sample
    }

    /// Read one sample.
    #[inline]
    pub fn get(&self, x: u32, y: u32, sample: usize) -> T {
        self.data[self.index(x, y, sample)]
    }

    /// Write one sample.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, sample: usize, value: T) {
        let idx = self.index(x, y, sample);
        self.data[idx] = value;
    }

    /// All samples of one pixel.
    pub fn samples(&self, x: u32, y: u32) -> &[T] {
        let start = self.index(x, y, 0);
        &self.data[start..start + self.samples]
    }

    /// Unweighted mean of the pixel's samples.
    pub fn resolve(&self, x: u32, y: u32) -> T {
        let weight = 1.0 / self.samples as f32;
        let samples = self.samples(x, y);
        // Scale before summing so extreme depths (CLEAR_DEPTH) cannot overflow.
        samples[1..]
            .iter()
            .fold(samples[0] * weight, |acc, &s| acc + s * weight)
    }
}

impl ColorBuffer {
    /// Resolve into an RGBA image.
    ///
    /// Buffer row 0 is the bottom of the picture, so rows are flipped to
    /// match the top-down layout of `image`.
    pub fn to_image(&self) -> image::RgbaImage {
        image::RgbaImage::from_fn(self.width, self.height, |x, y| {
            self.resolve(x, self.height - 1 - y).to_bytes().into()
        })
    }
}

impl DepthBuffer {
    /// Resolve into a grayscale image for inspection, mapping depth `d` in
    /// `[-1, 1]` to `d / 2 + 0.5`. Empty pixels come out black.
    pub fn to_image(&self) -> image::GrayImage {
        image::GrayImage::from_fn(self.width, self.height, |x, y| {
            let depth = self.resolve(x, self.height - 1 - y);
            let level = (depth / 2.0 + 0.5).clamp(0.0, 1.0);
            image::Luma([(level * 255.0).round() as u8])
        })
    }
}
