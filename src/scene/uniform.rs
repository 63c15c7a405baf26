//! GPU-ready scene state uniform (48 bytes, 16-byte aligned).
//!
//! This is the single block of frequently-changing simulation state shared
//! with every shader stage. Must match `SceneState` in the WGSL sources.

use bytemuck::{Pod, Zeroable};

/// Scene state uniform. Three 16-byte rows: time, sphere, culling flags.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct SceneUniform {
    /// x = delta seconds since previous frame, y = total seconds, z/w reserved
    pub time_data: [f32; 4],
    /// xyz = obstacle world position, w reserved
    pub sphere_position: [f32; 4],
    /// x = orientation, y = frustum, z = distance (1.0 on / 0.0 off), w reserved
    pub culling_flags: [f32; 4],
}

impl Default for SceneUniform {
    fn default() -> Self {
        Self {
            time_data: [0.0; 4],
            sphere_position: [0.0, 1.0, 0.0, 1.0],
            culling_flags: [1.0, 1.0, 1.0, 0.0],
        }
    }
}

/// Write target for the scene uniform.
///
/// The GPU-backed implementation is `render::buffer::StateBuffer`; tests
/// substitute an in-memory recorder to observe the write-through invariant.
pub trait UniformSink {
    /// Push the full record to the backing store.
    fn write(&self, record: &SceneUniform);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_uniform_size() {
        assert_eq!(std::mem::size_of::<SceneUniform>(), 48);
    }

    #[test]
    fn test_scene_uniform_alignment() {
        assert_eq!(std::mem::size_of::<SceneUniform>() % 16, 0);
    }

    #[test]
    fn test_bytemuck_cast() {
        let u = SceneUniform::default();
        let bytes = bytemuck::bytes_of(&u);
        assert_eq!(bytes.len(), 48);
        // Culling flags row starts at byte 32
        let flags: [f32; 4] = *bytemuck::from_bytes(&bytes[32..48]);
        assert_eq!(flags, [1.0, 1.0, 1.0, 0.0]);
    }

    #[test]
    fn test_defaults_match_initial_state() {
        let u = SceneUniform::default();
        assert_eq!(u.time_data, [0.0; 4]);
        assert_eq!(u.sphere_position, [0.0, 1.0, 0.0, 1.0]);
    }
}
