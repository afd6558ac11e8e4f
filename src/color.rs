//! Color types.
//!
//! [`Color`] is the working type of the pipeline: four floats, each kept in
//! `[0, 1]` after construction and after every arithmetic operator.
//!
//! [`ByteColor`] is the interchange type used at the image boundary. It
//! carries an explicit [`Channels`] count next to its bytes so a grayscale
//! texel (a shadow map, a specular map) is never mistaken for the red
//! channel of an RGB value.

use std::ops::{Add, Mul};

use serde::Deserialize;

/// A floating-point RGBA color with components clamped to `[0, 1]`.
///
/// Deserializes from an `[r, g, b, a]` array.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(from = "[f32; 4]")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Self = Self::raw(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Self = Self::raw(1.0, 1.0, 1.0, 1.0);
    pub const RED: Self = Self::raw(1.0, 0.0, 0.0, 1.0);
    pub const GREEN: Self = Self::raw(0.0, 1.0, 0.0, 1.0);
    pub const BLUE: Self = Self::raw(0.0, 0.0, 1.0, 1.0);
    pub const TRANSPARENT: Self = Self::raw(0.0, 0.0, 0.0, 0.0);

    const fn raw(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a color, clamping every component to `[0, 1]`.
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self::raw(clamp01(r), clamp01(g), clamp01(b), clamp01(a))
    }

    /// Creates an opaque color.
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Gray level `v` replicated on r, g and b.
    pub fn gray(v: f32) -> Self {
        Self::rgb(v, v, v)
    }

    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::raw(unorm(r), unorm(g), unorm(b), unorm(a))
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Scales r, g and b by `k`, keeping alpha.
    pub fn shaded(self, k: f32) -> Self {
        Self::new(self.r * k, self.g * k, self.b * k, self.a)
    }

    /// Mean of r, g and b.
    pub fn luminance(&self) -> f32 {
        (self.r + self.g + self.b) / 3.0
    }

    /// Standard "over" blend: `self * α + dst * (1 - α)` using `self`'s alpha.
    pub fn blend_over(self, dst: Color) -> Color {
        let alpha = self.a;
        self * alpha + dst * (1.0 - alpha)
    }

    /// Quantizes to 8-bit RGBA.
    pub fn to_bytes(self) -> ByteColor {
        ByteColor::rgba(
            to_byte(self.r),
            to_byte(self.g),
            to_byte(self.b),
            to_byte(self.a),
        )
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl Add<Color> for Color {
    type Output = Color;

    fn add(self, rhs: Color) -> Self::Output {
        Color::new(
            self.r + rhs.r,
            self.g + rhs.g,
            self.b + rhs.b,
            self.a + rhs.a,
        )
    }
}

impl Mul<f32> for Color {
    type Output = Color;

    fn mul(self, rhs: f32) -> Self::Output {
        Color::new(self.r * rhs, self.g * rhs, self.b * rhs, self.a * rhs)
    }
}

/// Component-wise modulation.
impl Mul<Color> for Color {
    type Output = Color;

    fn mul(self, rhs: Color) -> Self::Output {
        Color::new(
            self.r * rhs.r,
            self.g * rhs.g,
            self.b * rhs.b,
            self.a * rhs.a,
        )
    }
}

impl From<[f32; 4]> for Color {
    fn from([r, g, b, a]: [f32; 4]) -> Self {
        Color::new(r, g, b, a)
    }
}

impl From<ByteColor> for Color {
    fn from(c: ByteColor) -> Self {
        let [r, g, b, a] = c.bytes;
        match c.channels {
            Channels::Grayscale => Color::gray(unorm(r)),
            Channels::Rgb => Color::from_rgba8(r, g, b, u8::MAX),
            Channels::Rgba => Color::from_rgba8(r, g, b, a),
        }
    }
}

/// Number of meaningful bytes in a [`ByteColor`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Channels {
    Grayscale = 1,
    Rgb = 3,
    Rgba = 4,
}

impl Channels {
    pub fn count(self) -> usize {
        self as usize
    }

    /// Number of leading bytes that hold color (alpha excluded).
    fn color_count(self) -> usize {
        match self {
            Channels::Grayscale => 1,
            Channels::Rgb | Channels::Rgba => 3,
        }
    }
}

/// An 8-bit color in RGBA byte order plus the number of meaningful bytes.
///
/// Unused trailing bytes are zero. Arithmetic keeps the widest channel count
/// of its operands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ByteColor {
    bytes: [u8; 4],
    channels: Channels,
}

impl ByteColor {
    pub fn gray(v: u8) -> Self {
        Self {
            bytes: [v, 0, 0, 0],
            channels: Channels::Grayscale,
        }
    }

    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            bytes: [r, g, b, 0],
            channels: Channels::Rgb,
        }
    }

    pub fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            bytes: [r, g, b, a],
            channels: Channels::Rgba,
        }
    }

    pub fn channels(&self) -> Channels {
        self.channels
    }

    /// The meaningful bytes only.
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.channels.count()]
    }

    /// Byte `i`, or `None` past the channel count.
    pub fn get(&self, i: usize) -> Option<u8> {
        self.as_slice().get(i).copied()
    }

    /// The same color with at least `channels` channels.
    ///
    /// Gray is replicated into r, g and b. A color gaining alpha is opaque.
    pub fn widened(self, channels: Channels) -> Self {
        if channels <= self.channels {
            return self;
        }
        let [v, g, b, _] = self.bytes;
        let bytes = match (self.channels, channels) {
            (Channels::Grayscale, Channels::Rgb) => [v, v, v, 0],
            (Channels::Grayscale, _) => [v, v, v, u8::MAX],
            _ => [v, g, b, u8::MAX],
        };
        Self { bytes, channels }
    }
}

/// Scales the color bytes by an intensity clamped to `[0, 1]`; alpha is kept.
impl Mul<f32> for ByteColor {
    type Output = ByteColor;

    fn mul(self, intensity: f32) -> Self::Output {
        let intensity = clamp01(intensity);
        let mut out = self;
        for byte in &mut out.bytes[..self.channels.color_count()] {
            *byte = (*byte as f32 * intensity) as u8;
        }
        out
    }
}

/// Saturating per-byte sum over the union of both operands' channels.
impl Add<ByteColor> for ByteColor {
    type Output = ByteColor;

    fn add(self, rhs: ByteColor) -> Self::Output {
        let channels = self.channels.max(rhs.channels);
        let (lhs, rhs) = (self.widened(channels), rhs.widened(channels));
        let mut bytes = [0u8; 4];
        for (i, byte) in bytes.iter_mut().enumerate().take(channels.count()) {
            *byte = lhs.bytes[i].saturating_add(rhs.bytes[i]);
        }
        ByteColor { bytes, channels }
    }
}

impl From<ByteColor> for image::Rgba<u8> {
    fn from(c: ByteColor) -> Self {
        let Color { r, g, b, a } = Color::from(c);
        image::Rgba([to_byte(r), to_byte(g), to_byte(b), to_byte(a)])
    }
}

#[inline]
fn clamp01(v: f32) -> f32 {
    // NaN collapses to 0 so a bad shader result cannot poison a buffer.
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}

#[inline]
fn unorm(v: u8) -> f32 {
    v as f32 / 255.0
}

#[inline]
fn to_byte(v: f32) -> u8 {
    (clamp01(v) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn components_are_clamped_on_construction() {
        let c = Color::new(1.5, -0.25, 0.5, 2.0);
        assert_eq!(c, Color::new(1.0, 0.0, 0.5, 1.0));
    }

    #[test]
    fn arithmetic_results_stay_clamped() {
        let sum = Color::rgb(0.75, 0.5, 0.25) + Color::rgb(0.5, 0.75, 0.0);
        assert_eq!((sum.r, sum.g, sum.b, sum.a), (1.0, 1.0, 0.25, 1.0));
        let scaled = Color::rgb(0.5, 0.5, 0.5) * 3.0;
        assert_eq!(scaled, Color::WHITE);
    }

    #[test]
    fn blend_over_half_alpha_is_the_mean() {
        let src = Color::new(1.0, 0.0, 0.0, 0.5);
        let dst = Color::rgb(0.0, 0.0, 1.0);
        let out = src.blend_over(dst);
        assert_relative_eq!(out.r, 0.5);
        assert_relative_eq!(out.g, 0.0);
        assert_relative_eq!(out.b, 0.5);
    }

    #[test]
    fn grayscale_bytes_expand_to_gray_color() {
        let c = Color::from(ByteColor::gray(51));
        assert_relative_eq!(c.r, 0.2);
        assert_relative_eq!(c.g, 0.2);
        assert_relative_eq!(c.b, 0.2);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn byte_arithmetic_preserves_channel_count() {
        let gray = ByteColor::gray(100) * 0.5;
        assert_eq!(gray.channels(), Channels::Grayscale);
        assert_eq!(gray.as_slice(), &[50]);

        let widened = ByteColor::gray(10) + ByteColor::rgb(1, 2, 3);
        assert_eq!(widened.channels(), Channels::Rgb);
        assert_eq!(widened.as_slice(), &[11, 12, 13]);
    }

    #[test]
    fn gray_plus_black_stays_gray() {
        let sum = ByteColor::gray(100) + ByteColor::rgb(0, 0, 0);
        assert_eq!(sum.as_slice(), &[100, 100, 100]);
        assert_eq!(Color::from(sum), Color::from(ByteColor::gray(100)));
    }

    #[test]
    fn widening_to_rgba_is_opaque() {
        assert_eq!(ByteColor::gray(7).widened(Channels::Rgba).as_slice(), &[7, 7, 7, 255]);
        assert_eq!(ByteColor::rgb(1, 2, 3).widened(Channels::Rgba).as_slice(), &[1, 2, 3, 255]);
        assert_eq!(ByteColor::rgb(1, 2, 3).widened(Channels::Grayscale), ByteColor::rgb(1, 2, 3));

        let sum = ByteColor::rgb(10, 20, 30) + ByteColor::rgba(1, 1, 1, 0);
        assert_eq!(sum.as_slice(), &[11, 21, 31, 255]);
    }

    #[test]
    fn byte_scaling_leaves_alpha_alone() {
        let c = ByteColor::rgba(200, 100, 50, 128) * 0.5;
        assert_eq!(c.as_slice(), &[100, 50, 25, 128]);
    }

    #[test]
    fn byte_round_trip_is_exact_for_bytes() {
        let bytes = ByteColor::rgba(12, 34, 56, 78);
        assert_eq!(Color::from(bytes).to_bytes(), bytes);
    }
}
