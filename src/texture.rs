use std::path::Path;

use image::{DynamicImage, GenericImageView};
use log::info;

use crate::color::{ByteColor, Color};
use crate::error::{Error, Result};
use crate::math::Vec2;

/// A 2D grid of colors sampled with UV coordinates.
///
/// Row 0 is the bottom of the image, so `v = 0` samples the bottom edge the
/// way OBJ texture coordinates expect.
#[derive(Debug, Clone)]
pub struct Texture {
    data: Vec<Color>,
    width: u32,
    height: u32,
}

impl Texture {
    /// Load any format `image` can decode (PNG, TGA, JPEG, ...).
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        // Decoded images are top-down.
        let img = image::open(path)?.flipv();
        let (width, height) = img.dimensions();
        if width == 0 || height == 0 {
            return Err(Error::EmptyTexture {
                path: path.to_path_buf(),
            });
        }

        let data: Vec<Color> = match img {
            DynamicImage::ImageLuma8(gray) => gray
                .pixels()
                .map(|p| Color::from(ByteColor::gray(p.0[0])))
                .collect(),
            DynamicImage::ImageRgb8(rgb) => rgb
                .pixels()
                .map(|p| {
                    let [r, g, b] = p.0;
                    Color::from(ByteColor::rgb(r, g, b))
                })
                .collect(),
            other => other
                .to_rgba8()
                .pixels()
                .map(|p| {
                    let [r, g, b, a] = p.0;
                    Color::from(ByteColor::rgba(r, g, b, a))
                })
                .collect(),
        };

        info!("loaded texture {} ({width}x{height})", path.display());
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Build a texture from a function of texel coordinates, row 0 first.
    ///
    /// # Panics
    /// Panics if either dimension is zero.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> Color) -> Self {
        assert!(width > 0 && height > 0, "texture must not be empty");
        let mut data = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self {
            data,
            width,
            height,
        }
    }

    /// A single texel of `color`.
    pub fn solid(color: Color) -> Self {
        Self::from_fn(1, 1, |_, _| color)
    }

    /// `cells x cells` squares alternating between `a` and `b`, starting with
    /// `a` in the bottom-left corner.
    pub fn checkerboard(size: u32, cells: u32, a: Color, b: Color) -> Self {
        let cell = (size / cells.max(1)).max(1);
        Self::from_fn(size, size, |x, y| {
            if (x / cell + y / cell) % 2 == 0 {
                a
            } else {
                b
            }
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.data[(y * self.width + x) as usize]
    }

    /// Nearest-texel lookup. Coordinates outside `[0, 1]` clamp to the edge.
    #[inline]
    pub fn sample(&self, uv: Vec2) -> Color {
        let x = texel_index(uv.x, self.width);
        let y = texel_index(uv.y, self.height);
        self.get(x, y)
    }

    /// A copy smoothed with a 3x3 box filter; edge texels average only the
    /// neighbors that exist.
    pub fn blurred(&self) -> Self {
        Self::from_fn(self.width, self.height, |x, y| {
            let (mut r, mut g, mut b, mut a) = (0.0, 0.0, 0.0, 0.0);
            let mut count = 0.0;
            for ny in y.saturating_sub(1)..=(y + 1).min(self.height - 1) {
                for nx in x.saturating_sub(1)..=(x + 1).min(self.width - 1) {
                    let c = self.get(nx, ny);
                    r += c.r;
                    g += c.g;
                    b += c.b;
                    a += c.a;
                    count += 1.0;
                }
            }
            Color::new(r / count, g / count, b / count, a / count)
        })
    }
}

#[inline]
fn texel_index(coord: f32, size: u32) -> u32 {
    // NaN casts to 0.
    ((coord * size as f32).floor().max(0.0) as u32).min(size - 1)
}
