//! Device-resident scene state buffer

use crate::scene::{SceneUniform, UniformSink};

/// The device-visible backing store for `SceneUniform`.
///
/// Exactly `size_of::<SceneUniform>()` bytes, allocated once at scene
/// construction and bound read-only into every pipeline that consumes scene
/// state. Writes go through the queue; the single-threaded frame loop issues
/// them strictly before the frame's render submission, so the device never
/// reads a record older than the frame that drew it.
pub struct StateBuffer {
    queue: wgpu::Queue,
    buffer: wgpu::Buffer,
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
}

impl StateBuffer {
    /// Allocate the state buffer and its bind group.
    ///
    /// wgpu panics if the allocation cannot be satisfied, which is the
    /// intended outcome: a renderer without its state channel has no
    /// recovery path.
    pub fn new(device: &wgpu::Device, queue: wgpu::Queue) -> Self {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_state"),
            size: std::mem::size_of::<SceneUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_state_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_state_bind_group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });

        Self {
            queue,
            buffer,
            bind_group_layout,
            bind_group,
        }
    }

    /// Get bind group layout
    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout
    }

    /// Get bind group
    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }

    /// Get the raw buffer
    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }
}

impl UniformSink for StateBuffer {
    fn write(&self, record: &SceneUniform) {
        self.queue
            .write_buffer(&self.buffer, 0, bytemuck::bytes_of(record));
    }
}
