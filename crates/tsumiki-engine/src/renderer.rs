use std::ops::Range;

use crate::coords::{RectF, Vertex};
use crate::device::{Gpu, GpuInit, NativeSurface, SurfaceErrorAction, SurfaceSize};
use crate::graph::{self, Curve, FmParameters, GraphParameters, GraphStyle, GraphVertex};
use crate::paint::Color;
use crate::render::{
    self, Canvas, GraphRenderer, ImageRenderer, PresentRenderer, RenderCtx, RenderTarget,
    ShaderLibrary, CANVAS_FORMAT,
};
use crate::resources::{ResourceImages, TabPageType};
use crate::scene::{DrawCmd, FrameList, GraphCmd, ImageCmd};
use crate::RendererError;

/// Environment variable overriding the present mode.
pub const PRESENT_MODE_ENV: &str = "TSUMIKI_PRESENT_MODE";

/// Renderer configuration.
#[derive(Debug, Clone)]
pub struct RendererConfig {
    pub gpu: GpuInit,
    /// Color `clear` fills the canvas with.
    pub background: Color,
    pub graph_stroke: Color,
    pub graph_fill: Color,
    /// Graph stroke width in physical pixels.
    pub graph_line_width: f32,
}

impl Default for RendererConfig {
    fn default() -> Self {
        let style = GraphStyle::default();
        Self {
            gpu: GpuInit::default(),
            background: Color::from_argb(0xFF50_4530),
            graph_stroke: style.stroke,
            graph_fill: style.fill,
            graph_line_width: style.line_width_px,
        }
    }
}

impl RendererConfig {
    /// Defaults with environment overrides applied.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(value) = std::env::var(PRESENT_MODE_ENV) {
            match parse_present_mode(&value) {
                Some(mode) => config.gpu.present_mode = mode,
                None => log::warn!("{PRESENT_MODE_ENV}={value:?} not recognized; keeping Fifo"),
            }
        }
        config
    }

    fn graph_style(&self) -> GraphStyle {
        GraphStyle {
            stroke: self.graph_stroke,
            fill: self.graph_fill,
            line_width_px: self.graph_line_width,
        }
    }
}

fn parse_present_mode(value: &str) -> Option<wgpu::PresentMode> {
    match value.trim().to_ascii_lowercase().as_str() {
        "fifo" => Some(wgpu::PresentMode::Fifo),
        "mailbox" => Some(wgpu::PresentMode::Mailbox),
        "immediate" => Some(wgpu::PresentMode::Immediate),
        "auto-vsync" => Some(wgpu::PresentMode::AutoVsync),
        "auto-no-vsync" => Some(wgpu::PresentMode::AutoNoVsync),
        _ => None,
    }
}

/// One resolved draw of the current frame.
enum Draw {
    Image { page: TabPageType, range: Range<u32> },
    Graph { range: Range<u32> },
}

/// Native renderer bound to one host view.
///
/// Drawing calls are recorded and executed on the persistent canvas at
/// [`present`](Self::present), which then copies the canvas to the view.
/// Calls must be serialized by the host (typically on its UI thread).
pub struct Renderer {
    background: Color,
    style: GraphStyle,

    canvas: Canvas,
    images: ImageRenderer,
    graphs: GraphRenderer,
    /// `None` when headless.
    present: Option<PresentRenderer>,
    resources: ResourceImages,
    frame: FrameList,

    // per-frame scratch, reused across presents
    image_vertices: Vec<Vertex>,
    graph_vertices: Vec<GraphVertex>,
    draws: Vec<Draw>,

    // dropped last: every GPU object above belongs to this device
    gpu: Gpu,
}

impl Renderer {
    /// Creates a renderer drawing into `target`.
    ///
    /// `shaders` is a WGSL library; `None` or empty selects the built-in one.
    /// The host keeps `target` alive until the renderer is dropped.
    pub fn new(
        target: &NativeSurface,
        size: SurfaceSize,
        shaders: Option<&[u8]>,
        config: RendererConfig,
    ) -> Result<Self, RendererError> {
        let library = ShaderLibrary::from_bytes(shaders)?;
        let gpu = pollster::block_on(Gpu::new(target, size, config.gpu.clone()))?;
        Ok(Self::with_gpu(gpu, &library, &config))
    }

    /// Creates a renderer without a view; presents only update the canvas.
    pub fn headless(
        size: SurfaceSize,
        shaders: Option<&[u8]>,
        config: RendererConfig,
    ) -> Result<Self, RendererError> {
        let library = ShaderLibrary::from_bytes(shaders)?;
        let gpu = pollster::block_on(Gpu::headless(size, config.gpu.clone()))?;
        Ok(Self::with_gpu(gpu, &library, &config))
    }

    fn with_gpu(gpu: Gpu, library: &ShaderLibrary, config: &RendererConfig) -> Self {
        let device = gpu.device();
        let module = library.create_module(device);

        let canvas = Canvas::new(device, gpu.size());
        let images = ImageRenderer::new(device, &module, CANVAS_FORMAT);
        let graphs = GraphRenderer::new(device, &module, CANVAS_FORMAT);
        let present = gpu.target_format().map(|format| PresentRenderer::new(device, &module, format));

        let ctx = RenderCtx::new(device, gpu.queue());
        let resources = ResourceImages::new(&ctx, &images);

        canvas.clear_now(device, gpu.queue(), config.background.to_wgpu());

        let size = gpu.size();
        log::info!(
            "renderer created: {}x{}, {} shaders{}",
            size.width,
            size.height,
            if library.is_builtin() { "built-in" } else { "custom" },
            if present.is_none() { ", headless" } else { "" },
        );

        Self {
            background: config.background,
            style: config.graph_style(),
            canvas,
            images,
            graphs,
            present,
            resources,
            frame: FrameList::new(),
            image_vertices: Vec::new(),
            graph_vertices: Vec::new(),
            draws: Vec::new(),
            gpu,
        }
    }

    /// Current drawable size in physical pixels.
    pub fn size(&self) -> SurfaceSize {
        self.canvas.size()
    }

    pub fn is_headless(&self) -> bool {
        self.gpu.is_headless()
    }

    /// Slot `draw_image` currently reads from.
    pub fn selected_page(&self) -> TabPageType {
        self.resources.selected()
    }

    /// Commands recorded since the last present.
    pub fn pending_commands(&self) -> usize {
        self.frame.items().len()
    }

    /// Drops the commands recorded since the last present without drawing
    /// them. The canvas keeps its content.
    pub fn discard_frame(&mut self) {
        if !self.frame.is_empty() {
            log::debug!("discarding {} recorded commands", self.frame.items().len());
        }
        self.frame.reset();
    }

    // ── lifecycle ──────────────────────────────────────────────────────────

    /// Reconfigures the surface and recreates the canvas at `size`.
    ///
    /// Same size is a no-op. An empty size is ignored until a usable one
    /// arrives, and a size over the device's texture limit is ignored.
    /// Otherwise commands recorded before the resize are discarded and the
    /// new canvas starts from the background color.
    pub fn resize(&mut self, size: SurfaceSize) {
        if size == self.canvas.size() {
            return;
        }
        if size.is_empty() {
            log::warn!("resize to {}x{} ignored", size.width, size.height);
            return;
        }
        let max = self.gpu.max_dimension();
        if !size.fits_within(max) {
            log::warn!("resize to {}x{} ignored: device limit is {max}", size.width, size.height);
            return;
        }

        self.gpu.resize(size);
        self.canvas.resize(self.gpu.device(), size);
        self.canvas.clear_now(self.gpu.device(), self.gpu.queue(), self.background.to_wgpu());

        if !self.frame.is_empty() {
            log::debug!("resize discarded {} recorded commands", self.frame.items().len());
        }
        self.frame.reset();

        log::debug!("resized to {}x{}", size.width, size.height);
    }

    // ── textures ───────────────────────────────────────────────────────────

    /// Uploads a tightly packed straight-alpha RGBA8 image into the next
    /// resource slot. Returns the page that received it.
    pub fn load_texture(&mut self, data: &[u8], width: u32, height: u32) -> Result<TabPageType, RendererError> {
        let ctx = RenderCtx::new(self.gpu.device(), self.gpu.queue());
        self.resources.load(&ctx, &self.images, data, width, height)
    }

    /// Selects the slot subsequent `draw_image` calls read from.
    pub fn set_resource_image(&mut self, page: TabPageType) {
        self.resources.select(page);
    }

    // ── drawing ────────────────────────────────────────────────────────────

    /// Clears the canvas to the background color.
    pub fn clear(&mut self) {
        self.frame.clear();
    }

    /// Draws the `image` UV rect of the selected resource image into
    /// `client` (normalized canvas coordinates).
    pub fn draw_image(&mut self, client: RectF, image: RectF) {
        let Some(client) = client.drawable() else {
            log::debug!("draw_image: degenerate client rect {client:?} skipped");
            return;
        };
        if !image.is_finite() {
            log::debug!("draw_image: non-finite image rect {image:?} skipped");
            return;
        }

        self.frame.push(DrawCmd::Image(ImageCmd {
            client,
            image,
            page: self.resources.selected(),
        }));
    }

    /// Draws the filter magnitude response for a cutoff in [0, 1].
    pub fn draw_filter_graph(&mut self, client: RectF, normalized_cutoff: f32, resonance: f32) {
        self.push_graph(client, |n| Curve::filter(normalized_cutoff, resonance, n));
    }

    pub fn draw_modulator_graph(&mut self, client: RectF, params: &GraphParameters) {
        self.push_graph(client, |n| Curve::modulator(params, n));
    }

    /// Draws the carrier waveform phase-modulated by `fm`.
    pub fn draw_carrier_graph(&mut self, client: RectF, params: &GraphParameters, fm: &FmParameters) {
        self.push_graph(client, |n| Curve::carrier(params, fm, n));
    }

    fn push_graph(&mut self, client: RectF, curve: impl FnOnce(usize) -> Curve) {
        let Some(client) = client.drawable() else {
            log::debug!("graph with degenerate client rect {client:?} skipped");
            return;
        };

        let samples = graph::sample_count(client, self.canvas.viewport());
        self.frame.push(DrawCmd::Graph(GraphCmd { client, curve: curve(samples) }));
    }

    // ── present ────────────────────────────────────────────────────────────

    /// Executes the recorded commands on the canvas and shows the canvas.
    ///
    /// The frame list is emptied whether or not the frame reached the view.
    /// Only a fatal surface error (out of memory) is returned.
    pub fn present(&mut self) -> Result<(), RendererError> {
        let result = self.render_and_present();
        self.frame.reset();
        result
    }

    fn render_and_present(&mut self) -> Result<(), RendererError> {
        self.build_geometry();

        let device = self.gpu.device();
        let queue = self.gpu.queue();
        let ctx = RenderCtx::new(device, queue);
        self.images.prepare(&ctx, &self.image_vertices);
        self.graphs.prepare(&ctx, &self.graph_vertices);

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("tsumiki frame"),
        });

        if !self.frame.is_empty() {
            let clear = self.frame.is_cleared().then(|| self.background.to_wgpu());
            let mut target = RenderTarget::new(&mut encoder, self.canvas.view());
            let mut rpass = target.begin_pass("tsumiki canvas pass", clear);

            for draw in &self.draws {
                match draw {
                    Draw::Image { page, range } => {
                        let texture = self.resources.bind_group(*page);
                        self.images.draw(&mut rpass, texture, range.clone());
                    }
                    Draw::Graph { range } => self.graphs.draw(&mut rpass, range.clone()),
                }
            }
        }

        let Some(present) = self.present.as_mut() else {
            queue.submit(std::iter::once(encoder.finish()));
            return Ok(());
        };

        let frame = match self.gpu.acquire_frame() {
            Ok(Some(frame)) => frame,
            Ok(None) => {
                queue.submit(std::iter::once(encoder.finish()));
                return Ok(());
            }
            Err(err) => {
                // The canvas still advances; only the copy to the view is lost.
                queue.submit(std::iter::once(encoder.finish()));
                return match self.gpu.handle_surface_error(err.clone()) {
                    SurfaceErrorAction::Fatal => {
                        log::error!("surface error {err:?} is fatal");
                        Err(RendererError::OutOfMemory)
                    }
                    action => {
                        log::warn!("surface error {err:?}: {action:?}, frame skipped");
                        Ok(())
                    }
                };
            }
        };

        {
            let mut target = RenderTarget::new(&mut encoder, &frame.view);
            present.blit(device, &self.canvas, &mut target);
        }

        queue.submit(std::iter::once(encoder.finish()));
        self.gpu.present(frame);
        Ok(())
    }

    /// Resolves recorded commands into vertex ranges.
    fn build_geometry(&mut self) {
        self.image_vertices.clear();
        self.graph_vertices.clear();
        self.draws.clear();

        let viewport = self.canvas.viewport();
        for cmd in self.frame.items() {
            match cmd {
                DrawCmd::Image(cmd) => {
                    let start = self.image_vertices.len() as u32;
                    self.image_vertices.extend_from_slice(&render::quad(cmd.client, cmd.image));
                    let end = self.image_vertices.len() as u32;
                    self.draws.push(Draw::Image { page: cmd.page, range: start..end });
                }
                DrawCmd::Graph(cmd) => {
                    let start = self.graph_vertices.len() as u32;
                    graph::tessellate(&cmd.curve, cmd.client, viewport, &self.style, &mut self.graph_vertices);
                    let end = self.graph_vertices.len() as u32;
                    if end > start {
                        self.draws.push(Draw::Graph { range: start..end });
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// When set, GPU tests fail instead of skipping on machines without a GPU.
    const REQUIRE_GPU_ENV: &str = "TSUMIKI_REQUIRE_GPU";

    const BACKGROUND: [u8; 4] = [0x50, 0x45, 0x30, 0xFF];
    const RED: [u8; 4] = [0xFF, 0x00, 0x00, 0xFF];

    fn skip_without_gpu(reason: &RendererError) {
        if std::env::var_os(REQUIRE_GPU_ENV).is_some() {
            panic!("{REQUIRE_GPU_ENV} is set but no GPU is usable: {reason}");
        }
        eprintln!("test skipped: no usable GPU ({reason}); set {REQUIRE_GPU_ENV}=1 to fail instead");
    }

    /// Headless renderer, or `None` (skipped) on machines without a usable adapter.
    fn headless(width: u32, height: u32) -> Option<Renderer> {
        match Renderer::headless(SurfaceSize::new(width, height), None, RendererConfig::default()) {
            Ok(r) => Some(r),
            Err(e @ (RendererError::NoAdapter(_) | RendererError::Device(_))) => {
                skip_without_gpu(&e);
                None
            }
            Err(e) => panic!("headless renderer failed: {e}"),
        }
    }

    /// Reads the canvas back, one `[r, g, b, a]` per pixel in row-major order.
    ///
    /// The canvas width must be a multiple of 64 so rows need no padding.
    fn canvas_pixels(r: &Renderer) -> Vec<[u8; 4]> {
        let device = r.gpu.device();
        let size = r.canvas.size();
        let bytes_per_row = size.width * 4;
        assert_eq!(bytes_per_row % wgpu::COPY_BYTES_PER_ROW_ALIGNMENT, 0);

        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("canvas readback"),
            size: u64::from(bytes_per_row) * u64::from(size.height),
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("canvas readback"),
        });
        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture: r.canvas.texture(),
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &buffer,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(bytes_per_row),
                    rows_per_image: Some(size.height),
                },
            },
            wgpu::Extent3d { width: size.width, height: size.height, depth_or_array_layers: 1 },
        );
        r.gpu.queue().submit(std::iter::once(encoder.finish()));

        buffer.slice(..).map_async(wgpu::MapMode::Read, |result| result.unwrap());
        device.poll(wgpu::PollType::wait_indefinitely()).unwrap();

        let data = buffer.slice(..).get_mapped_range();
        data.chunks_exact(4).map(|p| [p[0], p[1], p[2], p[3]]).collect()
    }

    fn pixel_at(r: &Renderer, x: u32, y: u32) -> [u8; 4] {
        canvas_pixels(r)[(y * r.size().width + x) as usize]
    }

    fn assert_near(actual: [u8; 4], expected: [u8; 4]) {
        let near = actual.iter().zip(expected).all(|(a, e)| a.abs_diff(e) <= 2);
        assert!(near, "pixel {actual:?}, expected {expected:?}");
    }

    fn checker(width: u32, height: u32) -> Vec<u8> {
        (0..width * height)
            .flat_map(|i| if i % 2 == 0 { [255, 255, 255, 255] } else { [0, 0, 0, 128] })
            .collect()
    }

    #[test]
    fn parses_present_modes() {
        assert_eq!(parse_present_mode("mailbox"), Some(wgpu::PresentMode::Mailbox));
        assert_eq!(parse_present_mode(" Auto-No-Vsync "), Some(wgpu::PresentMode::AutoNoVsync));
        assert_eq!(parse_present_mode("vsync"), None);
    }

    #[test]
    fn default_background_is_editor_brown() {
        assert_eq!(RendererConfig::default().background, Color::from_srgb_u8(0x50, 0x45, 0x30, 0xFF));
    }

    #[test]
    fn invalid_shader_library_fails_before_touching_the_gpu() {
        let err = Renderer::headless(SurfaceSize::new(8, 8), Some(b"not wgsl"), RendererConfig::default())
            .err()
            .map(|e| matches!(e, RendererError::ShaderCompile(_)));
        assert_eq!(err, Some(true));
    }

    #[test]
    fn empty_size_is_rejected() {
        let result = Renderer::headless(SurfaceSize::new(0, 600), None, RendererConfig::default());
        assert!(matches!(result, Err(RendererError::InvalidSize { .. }) | Err(RendererError::NoAdapter(_))));
    }

    #[test]
    fn create_and_drop() {
        let Some(r) = headless(64, 32) else { return };
        assert!(r.is_headless());
        assert_eq!(r.size(), SurfaceSize::new(64, 32));
        drop(r);
    }

    #[test]
    fn resize_to_same_size_is_a_no_op() {
        let Some(mut r) = headless(64, 32) else { return };
        r.clear();
        r.resize(SurfaceSize::new(64, 32));
        r.resize(SurfaceSize::new(64, 32));
        assert_eq!(r.size(), SurfaceSize::new(64, 32));
        assert!(!r.frame.is_empty());
    }

    #[test]
    fn resize_discards_recorded_commands() {
        let Some(mut r) = headless(64, 32) else { return };
        r.draw_image(RectF::unit(), RectF::unit());
        r.resize(SurfaceSize::new(128, 96));
        assert_eq!(r.size(), SurfaceSize::new(128, 96));
        assert_eq!(r.pending_commands(), 0);
    }

    #[test]
    fn oversized_create_is_rejected() {
        let size = SurfaceSize::new(1 << 20, 16);
        match Renderer::headless(size, None, RendererConfig::default()) {
            Err(RendererError::InvalidSize { width, height }) => {
                assert_eq!((width, height), (1 << 20, 16));
            }
            Err(e @ (RendererError::NoAdapter(_) | RendererError::Device(_))) => skip_without_gpu(&e),
            Err(e) => panic!("unexpected error: {e}"),
            Ok(_) => panic!("a {}x{} canvas was created", size.width, size.height),
        }
    }

    #[test]
    fn oversized_resize_is_ignored() {
        let Some(mut r) = headless(64, 64) else { return };
        r.draw_image(RectF::unit(), RectF::unit());

        r.resize(SurfaceSize::new(1 << 20, 1 << 20));
        assert_eq!(r.size(), SurfaceSize::new(64, 64));
        assert_eq!(r.gpu.size(), SurfaceSize::new(64, 64));
        assert_eq!(r.pending_commands(), 1);
        assert!(!r.gpu.resize(SurfaceSize::new(1 << 20, 1)));
        assert_eq!(r.gpu.size(), SurfaceSize::new(64, 64));

        r.present().unwrap();
    }

    #[test]
    fn discard_frame_drops_recorded_commands() {
        let Some(mut r) = headless(32, 32) else { return };
        r.clear();
        r.draw_image(RectF::unit(), RectF::unit());
        r.discard_frame();
        assert_eq!(r.pending_commands(), 0);
        r.present().unwrap();
    }

    #[test]
    fn empty_resize_is_ignored() {
        let Some(mut r) = headless(64, 32) else { return };
        r.resize(SurfaceSize::new(0, 32));
        assert_eq!(r.size(), SurfaceSize::new(64, 32));
    }

    #[test]
    fn every_page_is_selectable_without_textures() {
        let Some(mut r) = headless(32, 32) else { return };
        for page in TabPageType::ALL {
            r.set_resource_image(page);
            assert_eq!(r.selected_page(), page);
            r.clear();
            r.draw_image(RectF::unit(), RectF::unit());
            r.present().unwrap();
        }
    }

    #[test]
    fn textures_fill_slots_in_load_order() {
        let Some(mut r) = headless(32, 32) else { return };
        let image = checker(4, 4);
        let pages: Vec<_> = (0..4).map(|_| r.load_texture(&image, 4, 4).unwrap()).collect();
        assert_eq!(pages[..3], TabPageType::ALL);
        // All slots full: the selected page (Main) is replaced.
        assert_eq!(pages[3], TabPageType::Main);

        r.set_resource_image(TabPageType::Tuning);
        assert_eq!(r.load_texture(&image, 4, 4).unwrap(), TabPageType::Tuning);
    }

    #[test]
    fn bad_texture_input_is_rejected() {
        let Some(mut r) = headless(32, 32) else { return };
        assert!(r.load_texture(&[0; 15], 2, 2).is_err());
        assert!(r.load_texture(&[], 0, 0).is_err());
        // Nothing was consumed: the first valid load still lands in Main.
        assert_eq!(r.load_texture(&checker(2, 2), 2, 2).unwrap(), TabPageType::Main);
    }

    #[test]
    fn degenerate_rects_record_nothing() {
        let Some(mut r) = headless(32, 32) else { return };
        r.draw_image(RectF::new(0.5, 0.5, 0.5, 0.9), RectF::unit());
        r.draw_image(RectF::new(f32::NAN, 0.0, 1.0, 1.0), RectF::unit());
        r.draw_image(RectF::unit(), RectF::new(0.0, f32::INFINITY, 1.0, 1.0));
        r.draw_filter_graph(RectF::new(0.0, 0.0, 0.0, 0.0), 0.5, 0.5);
        assert_eq!(r.pending_commands(), 0);

        r.draw_image(RectF::new(0.9, 0.9, 0.1, 0.1), RectF::unit());
        assert_eq!(r.pending_commands(), 1);
        r.present().unwrap();
        assert_eq!(r.pending_commands(), 0);
    }

    #[test]
    fn full_frame_presents() {
        let Some(mut r) = headless(320, 200) else { return };
        r.load_texture(&checker(8, 8), 8, 8).unwrap();

        let params = GraphParameters::new(0.5, 0.0, 2.0, 1.0);
        let fm = FmParameters::new(0.3, -0.5, 3.0, 0.5, 0.4);

        r.clear();
        r.draw_image(RectF::unit(), RectF::new(0.0, 0.0, 0.5, 0.5));
        r.draw_filter_graph(RectF::new(0.05, 0.05, 0.45, 0.45), 0.4, 0.8);
        r.draw_modulator_graph(RectF::new(0.55, 0.05, 0.95, 0.45), &params);
        r.draw_carrier_graph(RectF::new(0.05, 0.55, 0.95, 0.95), &params, &fm);
        assert_eq!(r.pending_commands(), 4);
        r.present().unwrap();

        // A partial redraw on top of the previous frame.
        r.draw_modulator_graph(RectF::new(0.55, 0.05, 0.95, 0.45), &params);
        r.present().unwrap();

        // Nothing recorded.
        r.present().unwrap();
    }

    #[test]
    fn canvas_starts_from_the_background() {
        let Some(r) = headless(64, 32) else { return };
        let pixels = canvas_pixels(&r);
        assert_eq!(pixels.len(), 64 * 32);
        assert_near(pixels[0], BACKGROUND);
        assert_near(pixels[pixels.len() - 1], BACKGROUND);
    }

    #[test]
    fn images_persist_until_the_next_clear() {
        let Some(mut r) = headless(64, 32) else { return };
        assert_eq!(r.load_texture(&RED, 1, 1).unwrap(), TabPageType::Main);

        r.clear();
        r.draw_image(RectF::new(0.0, 0.0, 0.5, 1.0), RectF::unit());
        r.present().unwrap();
        assert_near(pixel_at(&r, 8, 16), RED);
        assert_near(pixel_at(&r, 48, 16), BACKGROUND);

        // No clear: the previous frame stays on the canvas.
        r.present().unwrap();
        assert_near(pixel_at(&r, 8, 16), RED);

        r.clear();
        r.present().unwrap();
        assert_near(pixel_at(&r, 8, 16), BACKGROUND);
    }

    #[test]
    fn empty_slots_draw_nothing_visible() {
        let Some(mut r) = headless(64, 32) else { return };
        r.set_resource_image(TabPageType::Tuning);
        r.clear();
        r.draw_image(RectF::unit(), RectF::unit());
        r.present().unwrap();
        assert_near(pixel_at(&r, 32, 16), BACKGROUND);
    }

    #[test]
    fn commands_draw_in_call_order() {
        let Some(mut r) = headless(64, 32) else { return };
        r.load_texture(&RED, 1, 1).unwrap();
        // (8, 28) lies in the filter fill: pass band at 0 dB, fill down to the bottom edge.
        let (x, y) = (8, 28);

        r.clear();
        r.draw_image(RectF::unit(), RectF::unit());
        r.draw_filter_graph(RectF::unit(), 1.0, 0.0);
        r.present().unwrap();
        let tinted = pixel_at(&r, x, y);
        assert!(tinted[0] > 200 && tinted[1] > 64, "graph fill not blended over the image: {tinted:?}");
        assert_eq!(tinted[3], 0xFF);

        r.clear();
        r.draw_filter_graph(RectF::unit(), 1.0, 0.0);
        r.draw_image(RectF::unit(), RectF::unit());
        r.present().unwrap();
        assert_near(pixel_at(&r, x, y), RED);
    }
}
