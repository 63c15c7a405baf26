//! Procedural grass blade field
//!
//! Blade placement is a jittered grid over the ground plane; per-blade shape
//! variation is sampled from Perlin noise so neighbouring blades stay
//! coherent. Generation is parallelized per grid row.

use bytemuck::{Pod, Zeroable};
use noise::{NoiseFn, Perlin};
use rayon::prelude::*;

/// Per-blade instance data (32 bytes). Must match `Blade` in grass.wgsl.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct BladeInstance {
    /// Root position on the ground plane
    pub position: [f32; 3],
    /// Facing angle around the up axis in radians
    pub facing: f32,
    /// Blade height in meters
    pub height: f32,
    /// Blade width in meters
    pub width: f32,
    /// Sway phase offset in radians
    pub sway_phase: f32,
    pub _pad: f32,
}

/// Blade field generation settings
#[derive(Clone, Debug)]
pub struct BladesConfig {
    /// Field edge length in meters (matches the ground plane)
    pub dim: f32,
    /// Blades per square meter
    pub density: f32,
    /// Noise seed
    pub seed: u32,
}

impl Default for BladesConfig {
    fn default() -> Self {
        Self {
            dim: 15.0,
            density: 40.0,
            seed: 7,
        }
    }
}

/// Generate blade instances for a field configuration.
///
/// Deterministic for a given config: jitter and shape come from seeded noise,
/// not an RNG, so repeated benchmark runs render the identical field.
pub fn generate_instances(config: &BladesConfig) -> Vec<BladeInstance> {
    let spacing = 1.0 / config.density.sqrt();
    let per_side = (config.dim / spacing) as i32;
    let half = config.dim * 0.5;
    let jitter = Perlin::new(config.seed);
    let shape = Perlin::new(config.seed.wrapping_add(1));

    (0..per_side)
        .into_par_iter()
        .flat_map_iter(|row| {
            (0..per_side).map(move |col| {
                let gx = -half + (col as f32 + 0.5) * spacing;
                let gz = -half + (row as f32 + 0.5) * spacing;

                let nx = jitter.get([gx as f64 * 1.7, gz as f64 * 1.7]) as f32;
                let nz = jitter.get([gz as f64 * 1.7 + 31.0, gx as f64 * 1.7]) as f32;
                let x = (gx + nx * spacing * 0.45).clamp(-half, half);
                let z = (gz + nz * spacing * 0.45).clamp(-half, half);

                let s = shape.get([x as f64 * 0.35, z as f64 * 0.35]) as f32;
                let facing = (jitter.get([x as f64 * 5.0, z as f64 * 5.0]) as f32)
                    * std::f32::consts::PI;

                BladeInstance {
                    position: [x, 0.0, z],
                    facing,
                    height: 0.9 + s * 0.35,
                    width: 0.02 + (s.abs()) * 0.015,
                    sway_phase: (x + z) * 0.8,
                    _pad: 0.0,
                }
            })
        })
        .collect()
}

/// GPU-resident blade field: instance buffer plus blade count
pub struct Blades {
    instance_buffer: wgpu::Buffer,
    blade_count: u32,
}

impl Blades {
    /// Generate a blade field and upload it to the GPU
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue, config: &BladesConfig) -> Self {
        let instances = generate_instances(config);
        log::info!(
            "Blade field: {} blades over {:.1}m x {:.1}m",
            instances.len(),
            config.dim,
            config.dim
        );

        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("blade_instances"),
            size: std::mem::size_of_val(instances.as_slice()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        queue.write_buffer(&instance_buffer, 0, bytemuck::cast_slice(&instances));

        Self {
            instance_buffer,
            blade_count: instances.len() as u32,
        }
    }

    pub fn instance_buffer(&self) -> &wgpu::Buffer {
        &self.instance_buffer
    }

    pub fn blade_count(&self) -> u32 {
        self.blade_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blade_instance_size() {
        assert_eq!(std::mem::size_of::<BladeInstance>(), 32);
    }

    #[test]
    fn test_instances_cover_expected_count() {
        let config = BladesConfig::default();
        let instances = generate_instances(&config);
        let per_side = (config.dim * config.density.sqrt()) as usize;
        assert_eq!(instances.len(), per_side * per_side);
    }

    #[test]
    fn test_instances_stay_in_bounds() {
        let config = BladesConfig {
            dim: 10.0,
            density: 25.0,
            seed: 3,
        };
        let half = config.dim * 0.5;
        for blade in generate_instances(&config) {
            assert!(blade.position[0].abs() <= half);
            assert_eq!(blade.position[1], 0.0);
            assert!(blade.position[2].abs() <= half);
            assert!(blade.height > 0.0);
            assert!(blade.width > 0.0);
        }
    }

    #[test]
    fn test_generation_is_deterministic() {
        let config = BladesConfig::default();
        let a = generate_instances(&config);
        let b = generate_instances(&config);
        assert_eq!(a.len(), b.len());
        assert_eq!(a[0].position, b[0].position);
        assert_eq!(a[a.len() - 1].height, b[b.len() - 1].height);
    }
}
