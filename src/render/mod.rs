//! Rendering system and GPU interfaces

pub mod context;
pub mod buffer;
pub mod pipeline;
pub mod renderer;

pub use context::GpuContext;
pub use renderer::Renderer;
