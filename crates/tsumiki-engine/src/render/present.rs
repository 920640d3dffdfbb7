use super::common::{clamp_sampler, texture_layout_entries};
use super::{Canvas, RenderTarget};

/// Copies the canvas onto the swapchain image with a fullscreen triangle.
///
/// A draw rather than a texture copy, so the swapchain may use any format
/// (BGRA on most platforms) while the canvas stays RGBA.
pub struct PresentRenderer {
    pipeline: wgpu::RenderPipeline,
    layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,

    // rebuilt when the canvas is recreated
    bind_group: Option<wgpu::BindGroup>,
    bind_group_generation: u64,
}

impl PresentRenderer {
    pub fn new(device: &wgpu::Device, module: &wgpu::ShaderModule, format: wgpu::TextureFormat) -> Self {
        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("tsumiki present bgl"),
            entries: &texture_layout_entries(1),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("tsumiki present pipeline layout"),
            bind_group_layouts: &[&layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("tsumiki present pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module,
                entry_point: Some("vs_present"),
                compilation_options: Default::default(),
                buffers: &[],
            },
            fragment: Some(wgpu::FragmentState {
                module,
                entry_point: Some("fs_present"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        Self {
            pipeline,
            layout,
            // Canvas and swapchain have the same size; texels map one to one.
            sampler: clamp_sampler(device, "tsumiki present sampler", wgpu::FilterMode::Nearest),
            bind_group: None,
            bind_group_generation: u64::MAX,
        }
    }

    /// Records the copy of `canvas` into `target`.
    pub fn blit(&mut self, device: &wgpu::Device, canvas: &Canvas, target: &mut RenderTarget<'_>) {
        self.ensure_bind_group(device, canvas);
        let Some(bind_group) = self.bind_group.as_ref() else { return };

        let mut rpass = target.begin_pass("tsumiki present pass", None);
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.draw(0..3, 0..1);
    }

    fn ensure_bind_group(&mut self, device: &wgpu::Device, canvas: &Canvas) {
        if self.bind_group.is_some() && self.bind_group_generation == canvas.generation() {
            return;
        }

        self.bind_group = Some(device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("tsumiki present bind group"),
            layout: &self.layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(canvas.view()),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        }));
        self.bind_group_generation = canvas.generation();
    }
}
