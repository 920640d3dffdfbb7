use std::ops::Range;

use crate::graph::GraphVertex;

use super::common::{premul_alpha_blend, primitive_state, TransformBinding, VertexBuffer};
use super::RenderCtx;

/// Renderer for tessellated parameter graphs (colored triangle lists).
pub struct GraphRenderer {
    pipeline: wgpu::RenderPipeline,
    transform: TransformBinding,
    vertices: VertexBuffer,
}

impl GraphRenderer {
    pub fn new(device: &wgpu::Device, module: &wgpu::ShaderModule, format: wgpu::TextureFormat) -> Self {
        let transform = TransformBinding::new(device, "tsumiki graph transform");

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("tsumiki graph pipeline layout"),
            bind_group_layouts: &[&transform.layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("tsumiki graph pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module,
                entry_point: Some("vs_graph"),
                compilation_options: Default::default(),
                buffers: &[GraphVertex::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module,
                entry_point: Some("fs_graph"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(premul_alpha_blend()),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: primitive_state(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        Self {
            pipeline,
            transform,
            vertices: VertexBuffer::new("tsumiki graph vbo"),
        }
    }

    /// Uploads the frame's graph vertices.
    pub fn prepare(&mut self, ctx: &RenderCtx<'_>, vertices: &[GraphVertex]) {
        self.vertices.upload(ctx, bytemuck::cast_slice(vertices));
    }

    pub fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, range: Range<u32>) {
        let Some(vbo) = self.vertices.buffer() else { return };
        if range.is_empty() {
            return;
        }

        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.transform.bind_group, &[]);
        rpass.set_vertex_buffer(0, vbo.slice(..));
        rpass.draw(range, 0..1);
    }
}
