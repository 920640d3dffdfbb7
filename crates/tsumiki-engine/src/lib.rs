//! Tsumiki engine crate.
//!
//! This crate owns the GPU runtime behind the editor's drawing surface: the
//! wgpu device and swap surface, the persistent canvas, the resource images,
//! and the renderers for images and parameter graphs.

pub mod coords;
pub mod device;
pub mod graph;
pub mod logging;
pub mod paint;
pub mod render;
pub mod resources;

mod error;
mod renderer;
mod scene;

pub use error::RendererError;
pub use renderer::{Renderer, RendererConfig};
