//! Triangle rasterization.
//!
//! A [`Triangle`] takes three clip-space vertices through the perspective
//! divide, walks its clamped screen-space bounding box, and writes depth and
//! color samples according to the selected [`AntiAliasing`] format.
//!
//! Available sampling strategies:
//! - **Single** (NOAA): one coverage test and one shade at the pixel center.
//! - **Multi** (MSAA): coverage per sub-sample, one shade per pixel.
//! - **Super** (SSAA): coverage and shading per sub-sample.

mod sampling;
mod setup;
mod triangle;

pub use triangle::Triangle;

use std::ops::AddAssign;

use serde::Deserialize;

use crate::math::vec2::Vec2;

/// Sub-pixel sample positions, relative to the pixel's lower-left corner.
const CENTER: [Vec2; 1] = [Vec2::new(0.5, 0.5)];

const GRID_4: [Vec2; 4] = [
    Vec2::new(0.25, 0.25),
    Vec2::new(0.75, 0.25),
    Vec2::new(0.25, 0.75),
    Vec2::new(0.75, 0.75),
];

// Rotated 8x pattern, in 1/16 pixel steps around the center.
const PATTERN_8: [Vec2; 8] = [
    Vec2::new(0.5625, 0.3125),
    Vec2::new(0.4375, 0.6875),
    Vec2::new(0.8125, 0.5625),
    Vec2::new(0.3125, 0.1875),
    Vec2::new(0.1875, 0.8125),
    Vec2::new(0.0625, 0.4375),
    Vec2::new(0.6875, 0.9375),
    Vec2::new(0.9375, 0.0625),
];

const GRID_16: [Vec2; 16] = [
    Vec2::new(0.125, 0.125),
    Vec2::new(0.375, 0.125),
    Vec2::new(0.625, 0.125),
    Vec2::new(0.875, 0.125),
    Vec2::new(0.125, 0.375),
    Vec2::new(0.375, 0.375),
    Vec2::new(0.625, 0.375),
    Vec2::new(0.875, 0.375),
    Vec2::new(0.125, 0.625),
    Vec2::new(0.375, 0.625),
    Vec2::new(0.625, 0.625),
    Vec2::new(0.875, 0.625),
    Vec2::new(0.125, 0.875),
    Vec2::new(0.375, 0.875),
    Vec2::new(0.625, 0.875),
    Vec2::new(0.875, 0.875),
];

/// How a pixel's samples are covered and shaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Single,
    Multi,
    Super,
}

/// Anti-aliasing format of a draw call.
///
/// The sample count of every buffer a draw writes to must equal
/// [`AntiAliasing::sample_count`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum AntiAliasing {
    /// One sample at the pixel center.
    #[default]
    Noaa,
    /// 4 samples on a 2x2 grid, shaded once per pixel.
    Msaa4,
    /// 8 samples on a rotated pattern, shaded once per pixel.
    Msaa8,
    /// 16 samples on a 4x4 grid, shaded once per pixel.
    Msaa16,
    /// 4 samples on a 2x2 grid, each shaded independently.
    Ssaa4,
    /// 8 samples on a rotated pattern, each shaded independently.
    Ssaa8,
    /// 16 samples on a 4x4 grid, each shaded independently.
    Ssaa16,
}

impl AntiAliasing {
    pub fn sample_count(self) -> usize {
        self.offsets().len()
    }

    /// Sample positions within a pixel, indexed by sample slot.
    pub fn offsets(self) -> &'static [Vec2] {
        match self {
            AntiAliasing::Noaa => &CENTER,
            AntiAliasing::Msaa4 | AntiAliasing::Ssaa4 => &GRID_4,
            AntiAliasing::Msaa8 | AntiAliasing::Ssaa8 => &PATTERN_8,
            AntiAliasing::Msaa16 | AntiAliasing::Ssaa16 => &GRID_16,
        }
    }

    pub fn strategy(self) -> Strategy {
        match self {
            AntiAliasing::Noaa => Strategy::Single,
            AntiAliasing::Msaa4 | AntiAliasing::Msaa8 | AntiAliasing::Msaa16 => Strategy::Multi,
            AntiAliasing::Ssaa4 | AntiAliasing::Ssaa8 | AntiAliasing::Ssaa16 => Strategy::Super,
        }
    }
}

impl std::fmt::Display for AntiAliasing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AntiAliasing::Noaa => write!(f, "NOAA"),
            AntiAliasing::Msaa4 => write!(f, "MSAA 4x"),
            AntiAliasing::Msaa8 => write!(f, "MSAA 8x"),
            AntiAliasing::Msaa16 => write!(f, "MSAA 16x"),
            AntiAliasing::Ssaa4 => write!(f, "SSAA 4x"),
            AntiAliasing::Ssaa8 => write!(f, "SSAA 8x"),
            AntiAliasing::Ssaa16 => write!(f, "SSAA 16x"),
        }
    }
}

/// Counters collected while drawing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawStats {
    /// Triangles submitted.
    pub triangles: usize,
    /// Fragment shader invocations.
    pub fragments: usize,
    /// Fragments the shader discarded.
    pub discarded: usize,
    /// Samples that passed the depth test and were written.
    pub samples_written: usize,
}

impl AddAssign for DrawStats {
    fn add_assign(&mut self, rhs: Self) {
        self.triangles += rhs.triangles;
        self.fragments += rhs.fragments;
        self.discarded += rhs.discarded;
        self.samples_written += rhs.samples_written;
    }
}
