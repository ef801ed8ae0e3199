pub mod color;
pub mod gl;
pub mod mesh;
pub mod renderer;
pub mod texture;

pub use renderer::DiskRenderer;
