//! GPU buffer management

pub mod state_buffer;
pub mod camera_buffer;

pub use state_buffer::StateBuffer;
pub use camera_buffer::{CameraBuffer, CameraUniform};
