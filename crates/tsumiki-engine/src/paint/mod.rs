//! Paint model shared by the renderers.
//!
//! Colors are linear premultiplied RGBA; sRGB conversion happens once, when a
//! color is built from host-facing byte values.

pub mod color;

pub use color::Color;
