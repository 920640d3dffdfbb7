//! GPU device + surface management.
//!
//! This module is responsible for:
//! - binding a host-owned native view (NSView / HWND) as a wgpu surface
//! - creating the wgpu Instance/Adapter/Device/Queue
//! - configuring the Surface (swapchain) and acquiring frames
//!
//! A `Gpu` may also be created headless (no surface), which is what tests and
//! offscreen tooling use.

mod gpu;
mod init;
mod native;
mod surface;

pub use gpu::Gpu;
pub use init::{GpuInit, SurfaceSize};
pub use native::NativeSurface;
pub use surface::{GpuFrame, SurfaceErrorAction};
