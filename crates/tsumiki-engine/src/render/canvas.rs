use crate::coords::Viewport;
use crate::device::SurfaceSize;

use super::RenderTarget;

/// Format of the canvas; images and graphs blend in linear space and are
/// stored sRGB encoded.
pub const CANVAS_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

/// Persistent offscreen color target that frames are drawn into.
///
/// Its content survives presents, so a frame without a clear draws on top of
/// the previous one.
pub struct Canvas {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    size: SurfaceSize,
    /// Bumped whenever the texture is recreated; bind groups sampling the
    /// canvas compare against it.
    generation: u64,
}

impl Canvas {
    pub fn new(device: &wgpu::Device, size: SurfaceSize) -> Self {
        let (texture, view) = create_texture(device, size);
        Self { texture, view, size, generation: 0 }
    }

    /// Recreates the texture at `size`. The previous content is lost.
    pub fn resize(&mut self, device: &wgpu::Device, size: SurfaceSize) {
        let (texture, view) = create_texture(device, size);
        self.texture = texture;
        self.view = view;
        self.size = size;
        self.generation = self.generation.wrapping_add(1);
    }

    /// Clears the whole canvas to `color` right away.
    pub fn clear_now(&self, device: &wgpu::Device, queue: &wgpu::Queue, color: wgpu::Color) {
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("tsumiki canvas clear"),
        });
        {
            let mut target = RenderTarget::new(&mut encoder, &self.view);
            let _pass = target.begin_pass("tsumiki canvas clear pass", Some(color));
        }
        queue.submit(std::iter::once(encoder.finish()));
    }

    /// The canvas texture; `COPY_SRC`, so its pixels can be read back.
    #[inline]
    pub fn texture(&self) -> &wgpu::Texture {
        &self.texture
    }

    #[inline]
    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    #[inline]
    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        Viewport::from_size(self.size.width, self.size.height)
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

fn create_texture(device: &wgpu::Device, size: SurfaceSize) -> (wgpu::Texture, wgpu::TextureView) {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("tsumiki canvas"),
        size: wgpu::Extent3d {
            width: size.width.max(1),
            height: size.height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: CANVAS_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT
            | wgpu::TextureUsages::TEXTURE_BINDING
            | wgpu::TextureUsages::COPY_SRC,
        view_formats: &[],
    });
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    (texture, view)
}
