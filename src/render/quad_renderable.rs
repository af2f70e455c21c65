use crate::render::DisplayState;
use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;
use wgpu::{BindGroup, Buffer};

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct QuadUniform {
    /// Lower-left corner in NDC.
    pub origin: [f32; 2],
    /// Width and height in NDC.
    pub size: [f32; 2],
    pub color: [f32; 4],
}

impl QuadUniform {
    pub fn square(origin: [f32; 2], extent: f32, color: [f32; 4]) -> Self {
        QuadUniform {
            origin,
            size: [extent, extent],
            color,
        }
    }
}

/// Clears the frame and draws at most one flat-colored rectangle.
pub struct QuadRenderable {
    render_pipeline: wgpu::RenderPipeline,
    uniform_buffer: Buffer,
    bind_group: BindGroup,
}

impl QuadRenderable {
    pub fn new(display: &DisplayState) -> Self {
        assert_eq!(
            std::mem::size_of::<QuadUniform>() % 16,
            0,
            "buffer size must be multiple of 16"
        );

        let device = &display.device;
        let surface_config = &display.surface_config;

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("QuadRenderable uniform_buffer"),
            contents: bytemuck::bytes_of(&QuadUniform::zeroed()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("QuadRenderable bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("QuadRenderable bind_group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(uniform_buffer.as_entire_buffer_binding()),
            }],
        });

        let shader = device.create_shader_module(wgpu::include_wgsl!("quad.wgsl"));

        let render_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("QuadRenderable render_pipeline_layout"),
                bind_group_layouts: &[&bind_group_layout],
                push_constant_ranges: &[],
            });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("QuadRenderable render_pipeline"),
            layout: Some(&render_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_main",
                compilation_options: Default::default(),
                buffers: &[],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_main",
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_config.format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
        });

        QuadRenderable {
            render_pipeline,
            uniform_buffer,
            bind_group,
        }
    }

    pub fn render(
        &mut self,
        state: &DisplayState,
        clear: wgpu::Color,
        quad: Option<QuadUniform>,
    ) -> Result<(), wgpu::SurfaceError> {
        let output = state.surface.get_current_texture()?;
        let output_view = output.texture.create_view(&Default::default());

        if let Some(uniform) = quad.as_ref() {
            state
                .queue
                .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(uniform));
        }

        let mut encoder = state
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("QuadRenderable command_encoder"),
            });

        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("QuadRenderable render_pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &output_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        if quad.is_some() {
            pass.set_pipeline(&self.render_pipeline);
            pass.set_bind_group(0, &self.bind_group, &[]);
            pass.draw(0..6, 0..1);
        }
        drop(pass);

        state.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_layout() {
        assert_eq!(std::mem::size_of::<QuadUniform>(), 32);

        let uniform = QuadUniform::square([0.25, -0.5], 0.5, [1.0, 0.0, 0.0, 1.0]);
        let floats: &[f32] = bytemuck::cast_slice(bytemuck::bytes_of(&uniform));
        assert_eq!(floats, &[0.25, -0.5, 0.5, 0.5, 1.0, 0.0, 0.0, 1.0]);
    }
}
