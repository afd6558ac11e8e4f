//! The rendering pipeline: sample buffers, the shader contract, triangle
//! rasterization and the mesh draw loop.

pub mod buffer;
mod pipeline;
pub mod rasterizer;
mod renderer;
mod shader;

pub use buffer::{ColorBuffer, DepthBuffer, SampleBuffer, CLEAR_DEPTH};
pub use pipeline::{draw_mesh, DrawContext};
pub use rasterizer::{AntiAliasing, DrawStats, Triangle};
pub use renderer::Renderer;
pub use shader::{interpolate, Shader};
