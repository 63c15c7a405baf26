//! Static mesh data and GPU buffers

use bytemuck::{Pod, Zeroable};

/// Mesh vertex (32 bytes). Must match the vertex layout in ground.wgsl.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub _pad0: f32,
    pub color: [f32; 3],
    pub _pad1: f32,
}

impl Vertex {
    pub fn new(position: [f32; 3], color: [f32; 3]) -> Self {
        Self {
            position,
            _pad0: 0.0,
            color,
            _pad1: 0.0,
        }
    }
}

/// A static renderable mesh with GPU-resident vertex and index buffers
pub struct Model {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

impl Model {
    /// Upload a mesh to the GPU
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        vertices: &[Vertex],
        indices: &[u32],
    ) -> Self {
        let vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("model_vertices"),
            size: std::mem::size_of_val(vertices) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        queue.write_buffer(&vertex_buffer, 0, bytemuck::cast_slice(vertices));

        let index_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("model_indices"),
            size: std::mem::size_of_val(indices) as u64,
            usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        queue.write_buffer(&index_buffer, 0, bytemuck::cast_slice(indices));

        Self {
            vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
        }
    }

    /// Build the ground plane the blade field grows on, `dim` meters square,
    /// centered on the origin at y = 0
    pub fn plane(device: &wgpu::Device, queue: &wgpu::Queue, dim: f32) -> Self {
        let (vertices, indices) = plane_mesh(dim);
        Self::new(device, queue, &vertices, &indices)
    }

    pub fn vertex_buffer(&self) -> &wgpu::Buffer {
        &self.vertex_buffer
    }

    pub fn index_buffer(&self) -> &wgpu::Buffer {
        &self.index_buffer
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }
}

/// Plane mesh data: four corner vertices, two triangles
pub fn plane_mesh(dim: f32) -> (Vec<Vertex>, Vec<u32>) {
    let half = dim * 0.5;
    let soil = [0.22, 0.18, 0.12];
    let vertices = vec![
        Vertex::new([-half, 0.0, half], soil),
        Vertex::new([half, 0.0, half], soil),
        Vertex::new([half, 0.0, -half], soil),
        Vertex::new([-half, 0.0, -half], soil),
    ];
    let indices = vec![0, 1, 2, 2, 3, 0];
    (vertices, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_size() {
        assert_eq!(std::mem::size_of::<Vertex>(), 32);
    }

    #[test]
    fn test_plane_mesh_extent() {
        let (vertices, indices) = plane_mesh(15.0);
        assert_eq!(vertices.len(), 4);
        assert_eq!(indices.len(), 6);
        for v in &vertices {
            assert!(v.position[0].abs() <= 7.5);
            assert_eq!(v.position[1], 0.0);
            assert!(v.position[2].abs() <= 7.5);
        }
    }
}
