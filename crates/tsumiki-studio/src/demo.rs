//! What the studio draws: resource images and animated parameter graphs laid
//! out like the editor's tab pages.

use std::path::Path;

use anyhow::{Context, Result};
use tsumiki_engine::coords::RectF;
use tsumiki_engine::graph::{FmParameters, GraphParameters};
use tsumiki_engine::resources::TabPageType;
use tsumiki_engine::Renderer;

use crate::Cli;

/// Straight-alpha RGBA8 pixels.
pub struct Image {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Images for Main, Modulation and Tuning, in load order.
pub fn load_images(cli: &Cli) -> Result<[Image; 3]> {
    let pick = |path: Option<&Path>, page: TabPageType| match path {
        Some(path) => load_png(path),
        None => Ok(generated(page, 512, 512)),
    };
    Ok([
        pick(cli.main.as_deref(), TabPageType::Main)?,
        pick(cli.modulation.as_deref(), TabPageType::Modulation)?,
        pick(cli.tuning.as_deref(), TabPageType::Tuning)?,
    ])
}

fn load_png(path: &Path) -> Result<Image> {
    let rgba = image::open(path)
        .with_context(|| format!("failed to read {}", path.display()))?
        .to_rgba8();
    Ok(Image {
        width: rgba.width(),
        height: rgba.height(),
        pixels: rgba.into_raw(),
    })
}

/// A translucent panel grid tinted per page.
fn generated(page: TabPageType, width: u32, height: u32) -> Image {
    let tint: [u8; 3] = match page {
        TabPageType::Main => [0xC8, 0x9B, 0x5A],
        TabPageType::Modulation => [0x5A, 0x9B, 0xC8],
        TabPageType::Tuning => [0x8C, 0xC8, 0x5A],
    };

    let mut pixels = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            let border = x % 128 < 3 || y % 128 < 3;
            let alpha = if border { 0xE0 } else { 0x30 };
            pixels.extend_from_slice(&[tint[0], tint[1], tint[2], alpha]);
        }
    }
    Image { width, height, pixels }
}

const FILTER_RECT: RectF = RectF::new(0.05, 0.08, 0.48, 0.46);
const MODULATOR_RECT: RectF = RectF::new(0.52, 0.08, 0.95, 0.46);
const CARRIER_RECT: RectF = RectF::new(0.05, 0.54, 0.95, 0.92);

/// Records one frame of `page` at time `t` (seconds) and presents it.
pub fn draw_page(renderer: &mut Renderer, page: TabPageType, t: f32) -> Result<()> {
    renderer.clear();
    renderer.set_resource_image(page);
    renderer.draw_image(RectF::unit(), RectF::unit());

    match page {
        TabPageType::Main => {
            let cutoff = 0.5 + 0.35 * (t * 0.4).sin();
            let resonance = 0.5 + 0.45 * (t * 0.23).sin();
            renderer.draw_filter_graph(FILTER_RECT, cutoff, resonance);
            renderer.draw_modulator_graph(MODULATOR_RECT, &operator(t));
        }
        TabPageType::Modulation => {
            let carrier = operator(t);
            let modulator = FmParameters::new(
                0.5,
                -0.5 + 0.5 * (t * 0.3).sin(),
                3.0,
                1.0,
                0.5 + 0.5 * (t * 0.5).sin(),
            );
            renderer.draw_modulator_graph(MODULATOR_RECT, &modulator.graph());
            renderer.draw_carrier_graph(CARRIER_RECT, &carrier, &modulator);
        }
        TabPageType::Tuning => {}
    }

    renderer.present().context("present failed")
}

fn operator(t: f32) -> GraphParameters {
    GraphParameters::new(
        0.5 + 0.4 * (t * 0.7).sin(),
        (t * 0.31).sin(),
        2.0,
        // Sync visualization comes and goes.
        if (t * 0.2).sin() > 0.0 { 0.5 } else { 1.0 },
    )
}
