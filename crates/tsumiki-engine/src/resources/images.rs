use crate::render::{ImageRenderer, RenderCtx};
use crate::RendererError;

use super::{SlotState, TabPageType};

/// Format of resource images: straight-alpha RGBA8, sRGB encoded.
pub const IMAGE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

const BYTES_PER_PIXEL: u32 = 4;

struct SlotImage {
    _texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
}

/// The three resource images, one per tab page.
///
/// Empty slots hold a 1×1 transparent placeholder, so every page can be
/// selected and drawn from before anything is loaded.
pub struct ResourceImages {
    slots: [SlotImage; 3],
    state: SlotState,
}

impl ResourceImages {
    pub fn new(ctx: &RenderCtx<'_>, images: &ImageRenderer) -> Self {
        let placeholder = |page: TabPageType| {
            upload(ctx, images, &[0; BYTES_PER_PIXEL as usize], 1, 1, page)
        };
        Self {
            slots: TabPageType::ALL.map(placeholder),
            state: SlotState::default(),
        }
    }

    /// Uploads a tightly packed `width × height` RGBA8 image.
    ///
    /// Returns the page whose slot now holds the image.
    pub fn load(
        &mut self,
        ctx: &RenderCtx<'_>,
        images: &ImageRenderer,
        data: &[u8],
        width: u32,
        height: u32,
    ) -> Result<TabPageType, RendererError> {
        if width == 0 || height == 0 {
            return Err(RendererError::InvalidSize { width: width.into(), height: height.into() });
        }

        let max = ctx.device.limits().max_texture_dimension_2d;
        if width > max || height > max {
            return Err(RendererError::TextureUpload(format!(
                "{width}x{height} exceeds the device limit of {max}"
            )));
        }

        let needed = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(BYTES_PER_PIXEL as usize))
            .ok_or_else(|| RendererError::TextureUpload(format!("{width}x{height} overflows")))?;
        if data.len() < needed {
            return Err(RendererError::TextureUpload(format!(
                "expected {needed} bytes for {width}x{height}, got {}",
                data.len()
            )));
        }

        let page = self.state.load_target();
        self.slots[page.index()] = upload(ctx, images, &data[..needed], width, height, page);
        self.state.mark_filled(page);

        log::debug!("resource image {width}x{height} loaded into {page:?}");
        Ok(page)
    }

    #[inline]
    pub fn select(&mut self, page: TabPageType) {
        self.state.select(page);
    }

    #[inline]
    pub fn selected(&self) -> TabPageType {
        self.state.selected()
    }

    #[inline]
    pub fn bind_group(&self, page: TabPageType) -> &wgpu::BindGroup {
        &self.slots[page.index()].bind_group
    }
}

fn upload(
    ctx: &RenderCtx<'_>,
    images: &ImageRenderer,
    data: &[u8],
    width: u32,
    height: u32,
    page: TabPageType,
) -> SlotImage {
    let size = wgpu::Extent3d { width, height, depth_or_array_layers: 1 };
    let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
        label: Some("tsumiki resource image"),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: IMAGE_FORMAT,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });

    ctx.queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        data,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(width * BYTES_PER_PIXEL),
            rows_per_image: Some(height),
        },
        size,
    );

    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    let bind_group = images.texture_bind_group(ctx.device, &view, page);

    SlotImage { _texture: texture, bind_group }
}
