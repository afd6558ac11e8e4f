//! Render settings, read from RON files.
//!
//! ```ron
//! (
//!     width: 1024,
//!     height: 768,
//!     anti_aliasing: Ssaa4,
//!     shadow: (radius: 2, bias: 0.02),
//! )
//! ```
//!
//! Omitted fields keep their [`Default`] values.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

use crate::camera::Camera;
use crate::color::Color;
use crate::error::{Error, Result};
use crate::math::Vec3;
use crate::projection::Projection;
use crate::render::AntiAliasing;
use crate::shadow::PcfSettings;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    pub anti_aliasing: AntiAliasing,
    /// Directory the rendered images are written to.
    pub output_dir: PathBuf,
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees.
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
    /// Direction the sun light travels in the shadowed scene.
    pub light_direction: Vec3,
    /// Position of the point light in the point-light scene.
    pub point_light: Vec3,
    pub shadow: PcfSettings,
    /// Width and height of the shadow map in texels.
    pub shadow_map_size: u32,
    pub background: Color,
    /// Optional OBJ file placed in the point-light scene.
    pub model: Option<PathBuf>,
    /// Diffuse texture for `model`; blurred before use.
    pub model_texture: Option<PathBuf>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 800,
            anti_aliasing: AntiAliasing::Msaa4,
            output_dir: PathBuf::from("output"),
            eye: Vec3::new(4.0, 5.0, 8.0),
            target: Vec3::new(0.0, 0.5, 0.0),
            up: Vec3::UP,
            fov_y: 45.0,
            near: 0.1,
            far: 100.0,
            light_direction: Vec3::new(-1.0, -2.0, -0.5),
            point_light: Vec3::new(1.5, 2.5, 1.5),
            shadow: PcfSettings::default(),
            shadow_map_size: 1024,
            background: Color::rgb(0.1, 0.1, 0.15),
            model: None,
            model_texture: None,
        }
    }
}

impl RenderConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let config = Self::parse(&text)?;
        info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn parse(text: &str) -> Result<Self> {
        let config: Self = ron::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject image and shadow map sizes of zero.
    pub fn validate(&self) -> Result<()> {
        let sizes = [
            ("width", self.width),
            ("height", self.height),
            ("shadow_map_size", self.shadow_map_size),
        ];
        match sizes.into_iter().find(|&(_, size)| size == 0) {
            Some((field, _)) => Err(Error::ZeroSize(field)),
            None => Ok(()),
        }
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    pub fn camera(&self) -> Camera {
        Camera::new(
            self.eye,
            self.target,
            Projection::from_degrees(self.fov_y, self.aspect_ratio(), self.near, self.far),
        )
        .with_up(self.up)
    }
}
