//! A CPU software rasterizer.
//!
//! Meshes go through a programmable vertex/fragment [`Shader`], are
//! rasterized with perspective-correct interpolation into multi-sample depth
//! and color buffers (NOAA, MSAA or SSAA), and are resolved into images.
//! Shadow maps rendered in a depth-only pass can be queried from shaders with
//! percentage-closer filtering.
//!
//! # Quick Start
//!
//! ```ignore
//! use tinyrender::prelude::*;
//!
//! let mut renderer = Renderer::new(800, 800, AntiAliasing::Msaa4, Color::BLACK);
//! let floor = TriangleMesh::quad("floor", 5.0, 0.0);
//! let shader = UnlitShader::new(Transforms::new(Mat4::identity(), camera.view_projection()), Color::WHITE);
//! renderer.draw(&floor, &shader, false);
//! renderer.save_color("floor.tga")?;
//! ```

pub mod camera;
pub mod color;
pub mod config;
pub mod error;
pub mod light;
pub mod material;
pub mod math;
pub mod mesh;
pub mod model;
pub mod projection;
pub mod render;
pub mod shadow;
pub mod texture;
pub mod transform;

pub use camera::Camera;
pub use color::Color;
pub use config::RenderConfig;
pub use error::{Error, Result};
pub use mesh::{Mesh, TriangleMesh};
pub use model::Model;
pub use render::{AntiAliasing, Renderer, Shader};
pub use texture::Texture;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::camera::Camera;
    pub use crate::color::Color;
    pub use crate::config::RenderConfig;
    pub use crate::light::Light;
    pub use crate::material::{
        DepthShader, GouraudShader, PhongShader, ShadowQuery, TexturedShader, Transforms, UnlitShader,
    };
    pub use crate::math::{Mat3, Mat4, Vec2, Vec3, Vec4};
    pub use crate::mesh::{Mesh, TriangleMesh};
    pub use crate::model::Model;
    pub use crate::projection::Projection;
    pub use crate::render::{
        draw_mesh, interpolate, AntiAliasing, ColorBuffer, DepthBuffer, DrawContext, DrawStats, Renderer, Shader,
        Triangle,
    };
    pub use crate::shadow::{PcfSettings, ShadowMap};
    pub use crate::texture::Texture;
    pub use crate::transform::Transform;
}
