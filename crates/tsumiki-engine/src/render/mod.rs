//! GPU rendering subsystem.
//!
//! Renderers consume recorded frames and issue GPU commands via wgpu.
//! Each renderer owns its pipeline and buffers; all share one shader module
//! built from the [`ShaderLibrary`].
//!
//! Convention:
//! - CPU geometry is in normalized canvas coordinates (top-left origin, +Y down).
//! - Vertex shaders map to clip space with a constant transform uniform.

mod canvas;
mod common;
mod ctx;
mod graph;
mod image;
mod present;
mod shader;

pub use canvas::{Canvas, CANVAS_FORMAT};
pub use ctx::{RenderCtx, RenderTarget};
pub use graph::GraphRenderer;
pub use image::{quad, ImageRenderer, QUAD_VERTEX_COUNT};
pub use present::PresentRenderer;
pub use shader::{ShaderLibrary, BUILTIN_WGSL, ENTRY_POINTS};
