//! Frame rendering

use crate::core::camera::Camera;
use crate::core::error::Error;
use crate::render::buffer::{CameraBuffer, StateBuffer};
use crate::render::context::GpuContext;
use crate::render::pipeline::{DEPTH_FORMAT, GrassPipeline, GroundPipeline, grass::VERTICES_PER_BLADE};
use crate::scene::Scene;

/// Renders the scene: ground plane plus instanced blade field.
///
/// Consumes the scene's device state buffer (bound read-only once per frame)
/// and borrows its model/blades collections.
pub struct Renderer {
    camera_buffer: CameraBuffer,
    ground_pipeline: GroundPipeline,
    grass_pipeline: GrassPipeline,
    depth_view: wgpu::TextureView,
}

impl Renderer {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        state_layout: &wgpu::BindGroupLayout,
        width: u32,
        height: u32,
    ) -> Self {
        let camera_buffer = CameraBuffer::new(device);
        let ground_pipeline =
            GroundPipeline::new(device, surface_format, camera_buffer.bind_group_layout());
        let grass_pipeline = GrassPipeline::new(
            device,
            surface_format,
            camera_buffer.bind_group_layout(),
            state_layout,
        );
        let depth_view = create_depth_view(device, width, height);

        Self {
            camera_buffer,
            ground_pipeline,
            grass_pipeline,
            depth_view,
        }
    }

    /// Recreate size-dependent frame resources after a resize
    pub fn recreate_frame_resources(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_view = create_depth_view(device, width, height);
    }

    /// Render one frame. May block on surface acquisition and present.
    pub fn frame(
        &mut self,
        gpu: &mut GpuContext,
        scene: &Scene<StateBuffer>,
        camera: &Camera,
    ) -> Result<(), Error> {
        self.camera_buffer.update(&gpu.queue, camera);

        let surface_texture = match gpu.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                // Reconfigure and skip this frame
                let (w, h) = gpu.size();
                gpu.resize(w, h);
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => return Ok(()),
            Err(e) => return Err(Error::Gpu(e.to_string())),
        };

        let target = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame_encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.35,
                            g: 0.55,
                            b: 0.8,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            pass.set_pipeline(self.ground_pipeline.pipeline());
            pass.set_bind_group(0, self.camera_buffer.bind_group(), &[]);
            for model in scene.models() {
                pass.set_vertex_buffer(0, model.vertex_buffer().slice(..));
                pass.set_index_buffer(model.index_buffer().slice(..), wgpu::IndexFormat::Uint32);
                pass.draw_indexed(0..model.index_count(), 0, 0..1);
            }

            pass.set_pipeline(self.grass_pipeline.pipeline());
            pass.set_bind_group(0, self.camera_buffer.bind_group(), &[]);
            pass.set_bind_group(1, scene.sink().bind_group(), &[]);
            for blades in scene.blades() {
                pass.set_vertex_buffer(0, blades.instance_buffer().slice(..));
                pass.draw(0..VERTICES_PER_BLADE, 0..blades.blade_count());
            }
        }

        gpu.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();

        Ok(())
    }
}

fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("depth_texture"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}
