mod app;
mod demo;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tsumiki_engine::logging::{init_logging, LoggingConfig};
use winit::event_loop::EventLoop;

use crate::app::StudioApp;

#[derive(Parser, Debug)]
#[command(name = "tsumiki-studio", about = "Drives the Tsumiki renderer in a standalone window")]
pub struct Cli {
    /// PNG for the Main tab (a generated pattern when omitted)
    #[arg(long)]
    main: Option<PathBuf>,

    /// PNG for the Modulation tab
    #[arg(long)]
    modulation: Option<PathBuf>,

    /// PNG for the Tuning tab
    #[arg(long)]
    tuning: Option<PathBuf>,

    /// Initial window width in logical pixels
    #[arg(long, default_value_t = 900)]
    width: u32,

    /// Initial window height in logical pixels
    #[arg(long, default_value_t = 600)]
    height: u32,

    /// Log filter (env_logger syntax); overrides TSUMIKI_LOG and RUST_LOG
    #[arg(long)]
    log: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(LoggingConfig {
        env_filter: cli.log.clone(),
        ..LoggingConfig::default()
    });

    let images = demo::load_images(&cli)?;

    let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
    let mut app = StudioApp::new(&cli, images);
    event_loop
        .run_app(&mut app)
        .context("winit event loop terminated with error")?;

    app.into_result()
}
