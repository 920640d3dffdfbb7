use std::ops::Range;

use crate::coords::{RectF, Vertex};
use crate::resources::TabPageType;

use super::common::{
    clamp_sampler, premul_alpha_blend, primitive_state, texture_layout_entries, TransformBinding,
    VertexBuffer,
};
use super::RenderCtx;

/// Vertices per image quad (two triangles).
pub const QUAD_VERTEX_COUNT: u32 = 6;

/// Renderer for textured quads sampled from resource images.
///
/// Vertices for the whole frame are uploaded once by [`prepare`](Self::prepare);
/// each command then draws its own range with the bind group of its slot.
pub struct ImageRenderer {
    pipeline: wgpu::RenderPipeline,
    transform: TransformBinding,
    texture_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    vertices: VertexBuffer,
}

impl ImageRenderer {
    pub fn new(device: &wgpu::Device, module: &wgpu::ShaderModule, format: wgpu::TextureFormat) -> Self {
        let transform = TransformBinding::new(device, "tsumiki image transform");

        let texture_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("tsumiki image texture bgl"),
            entries: &texture_layout_entries(0),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("tsumiki image pipeline layout"),
            bind_group_layouts: &[&transform.layout, &texture_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("tsumiki image pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module,
                entry_point: Some("vs_image"),
                compilation_options: Default::default(),
                buffers: &[Vertex::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module,
                entry_point: Some("fs_image"),
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
            texture_layout,
            sampler: clamp_sampler(device, "tsumiki image sampler", wgpu::FilterMode::Linear),
            vertices: VertexBuffer::new("tsumiki image vbo"),
        }
    }

    /// Bind group (group 1) sampling `view`.
    pub fn texture_bind_group(
        &self,
        device: &wgpu::Device,
        view: &wgpu::TextureView,
        page: TabPageType,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(match page {
                TabPageType::Main => "tsumiki image bind group (main)",
                TabPageType::Modulation => "tsumiki image bind group (modulation)",
                TabPageType::Tuning => "tsumiki image bind group (tuning)",
            }),
            layout: &self.texture_layout,
            entries: &[
                wgpu::BindGroupEntry { binding: 0, resource: wgpu::BindingResource::TextureView(view) },
                wgpu::BindGroupEntry { binding: 1, resource: wgpu::BindingResource::Sampler(&self.sampler) },
            ],
        })
    }

    /// Uploads the frame's image vertices.
    pub fn prepare(&mut self, ctx: &RenderCtx<'_>, vertices: &[Vertex]) {
        self.vertices.upload(ctx, bytemuck::cast_slice(vertices));
    }

    /// Draws `range` of the prepared vertices with `texture` bound.
    pub fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, texture: &wgpu::BindGroup, range: Range<u32>) {
        let Some(vbo) = self.vertices.buffer() else { return };
        if range.is_empty() {
            return;
        }

        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.transform.bind_group, &[]);
        rpass.set_bind_group(1, texture, &[]);
        rpass.set_vertex_buffer(0, vbo.slice(..));
        rpass.draw(range, 0..1);
    }
}

/// Two triangles covering `client` (normalized canvas coordinates), textured
/// with the `image` UV rect. Corners map one to one, so an inverted `image`
/// flips the picture.
pub fn quad(client: RectF, image: RectF) -> [Vertex; QUAD_VERTEX_COUNT as usize] {
    let tl = Vertex::new(client.left, client.top, image.left, image.top);
    let tr = Vertex::new(client.right, client.top, image.right, image.top);
    let br = Vertex::new(client.right, client.bottom, image.right, image.bottom);
    let bl = Vertex::new(client.left, client.bottom, image.left, image.bottom);
    [tl, tr, br, tl, br, bl]
}
