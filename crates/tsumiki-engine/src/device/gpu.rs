use crate::RendererError;

use super::surface;
use super::{GpuFrame, GpuInit, NativeSurface, SurfaceErrorAction, SurfaceSize};

/// Owns wgpu core objects and, when bound to a view, the surface configuration.
///
/// This type is the low-level rendering context:
/// - creates and stores Device/Queue
/// - creates and configures the Surface (swapchain) for a native view
/// - acquires swapchain images and presents them
pub struct Gpu {
    /// Instance the surface and adapter were created from; kept alive with them.
    _instance: wgpu::Instance,

    /// Logical device.
    device: wgpu::Device,

    /// Command queue.
    queue: wgpu::Queue,

    /// Surface bound to the host view; `None` for headless contexts.
    surface: Option<BoundSurface>,

    /// Current drawable size in physical pixels.
    size: SurfaceSize,
}

struct BoundSurface {
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
}

impl Gpu {
    /// Creates a GPU context bound to a host view.
    ///
    /// Adapter/device acquisition is asynchronous under wgpu.
    ///
    /// The caller guarantees `target` outlives the returned `Gpu`.
    pub async fn new(
        target: &NativeSurface,
        size: SurfaceSize,
        init: GpuInit,
    ) -> Result<Self, RendererError> {
        ensure_size(size)?;

        let instance = create_instance();

        // SAFETY: the view is host-owned and outlives the renderer (caller contract).
        let surface = unsafe {
            let target = wgpu::SurfaceTargetUnsafe::from_window(target)?;
            instance.create_surface_unsafe(target)?
        };

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: init.power_preference,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        let (device, queue) = request_device(&adapter, &init).await?;
        ensure_within_limits(&device, size)?;

        let caps = surface.get_capabilities(&adapter);
        let format = surface::choose_surface_format(&caps, init.prefer_srgb)
            .ok_or(RendererError::NoSurfaceFormat)?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width,
            height: size.height,
            present_mode: surface::choose_present_mode(&caps, init.present_mode),
            alpha_mode: surface::choose_alpha_mode(&caps, init.alpha_mode),
            // Frames are written through an sRGB view even when the surface is not sRGB.
            view_formats: srgb_view_formats(format),
            desired_maximum_frame_latency: init.desired_maximum_frame_latency,
        };

        surface.configure(&device, &config);
        log::debug!("surface configured: {format:?} {}x{}", size.width, size.height);

        Ok(Self {
            _instance: instance,
            device,
            queue,
            surface: Some(BoundSurface { surface, config }),
            size,
        })
    }

    /// Creates a GPU context without a surface.
    ///
    /// Frames are rendered to the canvas only; `acquire_frame` yields nothing.
    pub async fn headless(size: SurfaceSize, init: GpuInit) -> Result<Self, RendererError> {
        ensure_size(size)?;

        let instance = create_instance();
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: init.power_preference,
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await?;

        let (device, queue) = request_device(&adapter, &init).await?;
        ensure_within_limits(&device, size)?;

        Ok(Self {
            _instance: instance,
            device,
            queue,
            surface: None,
            size,
        })
    }

    /// Returns the swapchain format, or `None` when headless.
    pub fn surface_format(&self) -> Option<wgpu::TextureFormat> {
        self.surface.as_ref().map(|s| s.config.format)
    }

    /// Format of the views handed out by `acquire_frame` (the sRGB variant of
    /// the swapchain format), or `None` when headless.
    pub fn target_format(&self) -> Option<wgpu::TextureFormat> {
        self.surface_format().map(|f| f.add_srgb_suffix())
    }

    /// Returns the current drawable size (physical pixels).
    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    /// Returns a reference to the logical device.
    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    /// Returns a reference to the command queue.
    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn is_headless(&self) -> bool {
        self.surface.is_none()
    }

    /// Largest width or height a surface or canvas may have on this device.
    pub fn max_dimension(&self) -> u32 {
        self.device.limits().max_texture_dimension_2d
    }

    /// Reconfigures the surface after a resize.
    ///
    /// Returns `true` if the drawable is usable at the new size. A size over
    /// [`max_dimension`](Self::max_dimension) is refused and nothing changes.
    pub fn resize(&mut self, new_size: SurfaceSize) -> bool {
        if !new_size.fits_within(self.max_dimension()) {
            return false;
        }
        match self.surface.as_mut() {
            Some(bound) => surface::apply_resize(
                &bound.surface,
                &self.device,
                &mut bound.config,
                &mut self.size,
                new_size,
            ),
            None => {
                self.size = new_size;
                !new_size.is_empty()
            }
        }
    }

    /// Acquires the next swapchain image.
    ///
    /// Headless contexts (and zero-sized surfaces) return `Ok(None)`.
    pub fn acquire_frame(&self) -> Result<Option<GpuFrame>, wgpu::SurfaceError> {
        let Some(bound) = self.surface.as_ref() else { return Ok(None) };
        if self.size.is_empty() {
            return Ok(None);
        }

        let surface_texture = bound.surface.get_current_texture()?;
        let view = surface_texture.texture.create_view(&wgpu::TextureViewDescriptor {
            format: Some(bound.config.format.add_srgb_suffix()),
            ..Default::default()
        });

        Ok(Some(GpuFrame { surface_texture, view }))
    }

    /// Presents an acquired frame. Commands targeting it must already be submitted.
    pub fn present(&self, frame: GpuFrame) {
        let GpuFrame { surface_texture, view } = frame;
        drop(view);
        surface_texture.present();
    }

    /// Converts a `SurfaceError` into a higher-level action.
    pub fn handle_surface_error(&mut self, err: wgpu::SurfaceError) -> SurfaceErrorAction {
        match self.surface.as_ref() {
            Some(bound) => surface::map_surface_error(
                &bound.surface,
                &self.device,
                &bound.config,
                self.size,
                err,
            ),
            None => SurfaceErrorAction::SkipFrame,
        }
    }
}

fn ensure_size(size: SurfaceSize) -> Result<(), RendererError> {
    if size.is_empty() {
        return Err(RendererError::InvalidSize {
            width: size.width.into(),
            height: size.height.into(),
        });
    }
    Ok(())
}

fn ensure_within_limits(device: &wgpu::Device, size: SurfaceSize) -> Result<(), RendererError> {
    let max = device.limits().max_texture_dimension_2d;
    if !size.fits_within(max) {
        log::warn!("{}x{} exceeds the device limit of {max}", size.width, size.height);
        return Err(RendererError::InvalidSize {
            width: size.width.into(),
            height: size.height.into(),
        });
    }
    Ok(())
}

fn srgb_view_formats(format: wgpu::TextureFormat) -> Vec<wgpu::TextureFormat> {
    let srgb = format.add_srgb_suffix();
    if srgb == format { vec![] } else { vec![srgb] }
}

fn create_instance() -> wgpu::Instance {
    // Use all backends to allow wgpu to select the platform backend (Metal / DX12 / Vulkan).
    wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::all(),
        ..Default::default()
    })
}

async fn request_device(
    adapter: &wgpu::Adapter,
    init: &GpuInit,
) -> Result<(wgpu::Device, wgpu::Queue), RendererError> {
    let info = adapter.get_info();
    log::info!("using adapter {} ({:?})", info.name, info.backend);

    let limits = init.required_limits.clone().using_resolution(adapter.limits());

    let (device, queue) = adapter
        .request_device(&wgpu::DeviceDescriptor {
            label: Some("tsumiki device"),
            required_features: init.required_features,
            required_limits: limits,
            experimental_features: wgpu::ExperimentalFeatures::disabled(),
            memory_hints: wgpu::MemoryHints::MemoryUsage,
            trace: wgpu::Trace::Off,
        })
        .await?;

    Ok((device, queue))
}
