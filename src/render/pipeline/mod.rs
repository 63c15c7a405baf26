//! Render pipelines

pub mod ground;
pub mod grass;

pub use ground::GroundPipeline;
pub use grass::GrassPipeline;

/// Depth buffer format shared by all pipelines
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
