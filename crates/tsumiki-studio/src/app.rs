use std::time::Instant;

use anyhow::{Context, Result};
use raw_window_handle::{HasDisplayHandle, HasWindowHandle};
use tsumiki_engine::device::{NativeSurface, SurfaceSize};
use tsumiki_engine::resources::TabPageType;
use tsumiki_engine::{Renderer, RendererConfig};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::demo::{self, Image};
use crate::Cli;

/// Window + renderer, driven the way the editor host drives the C ABI.
pub struct StudioApp {
    initial_size: LogicalSize<f64>,
    images: [Image; 3],
    page: TabPageType,
    started: Instant,

    // The renderer is declared (and dropped) before the window it draws into.
    renderer: Option<Renderer>,
    window: Option<Window>,

    error: Option<anyhow::Error>,
}

impl StudioApp {
    pub fn new(cli: &Cli, images: [Image; 3]) -> Self {
        Self {
            initial_size: LogicalSize::new(cli.width as f64, cli.height as f64),
            images,
            page: TabPageType::Main,
            started: Instant::now(),
            renderer: None,
            window: None,
            error: None,
        }
    }

    /// The error that stopped the event loop, if any.
    pub fn into_result(self) -> Result<()> {
        self.error.map_or(Ok(()), Err)
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("{error:#}");
        self.error = Some(error);
        event_loop.exit();
    }

    fn create(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title("Tsumiki Studio")
            .with_inner_size(self.initial_size);
        let window = event_loop.create_window(attrs).context("failed to create window")?;

        let surface = NativeSurface::from_raw(
            window.window_handle().context("window handle")?.as_raw(),
            window.display_handle().context("display handle")?.as_raw(),
        );
        let size = window.inner_size();
        let size = SurfaceSize::new(size.width, size.height);

        let mut renderer = Renderer::new(&surface, size, None, RendererConfig::from_env())?;
        for image in &self.images {
            let page = renderer.load_texture(&image.pixels, image.width, image.height)?;
            log::info!("loaded {}x{} image for {page:?}", image.width, image.height);
        }

        self.renderer = Some(renderer);
        self.window = Some(window);
        Ok(())
    }

    fn select(&mut self, page: TabPageType) {
        if self.page != page {
            log::info!("tab page {page:?}");
            self.page = page;
        }
    }
}

impl ApplicationHandler for StudioApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.create(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);
        if let Some(window) = self.window.as_ref() {
            window.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::Resized(size) => {
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.resize(SurfaceSize::new(size.width, size.height));
                }
            }

            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                match event.physical_key {
                    PhysicalKey::Code(KeyCode::Digit1) => self.select(TabPageType::Main),
                    PhysicalKey::Code(KeyCode::Digit2) => self.select(TabPageType::Modulation),
                    PhysicalKey::Code(KeyCode::Digit3) => self.select(TabPageType::Tuning),
                    PhysicalKey::Code(KeyCode::Escape) => event_loop.exit(),
                    _ => {}
                }
            }

            WindowEvent::RedrawRequested => {
                let Some(renderer) = self.renderer.as_mut() else { return };
                let t = self.started.elapsed().as_secs_f32();
                if let Err(e) = demo::draw_page(renderer, self.page, t) {
                    self.fail(event_loop, e.context("renderer stopped"));
                }
            }

            _ => {}
        }
    }
}
