//! Parameter graphs: the math behind the filter, modulator and carrier
//! visualizations, and the CPU tessellation that turns a sampled curve into
//! triangles.
//!
//! Everything here is pure and GPU-free; `render::GraphRenderer` only uploads
//! and draws what `tessellate` produces.

mod curve;
mod filter;
mod params;
mod tessellate;
mod wave;

pub use curve::{Curve, CurveKind};
pub use filter::FilterResponse;
pub use params::{FmParameters, GraphParameters};
pub use tessellate::{sample_count, tessellate, GraphStyle, GraphVertex};
pub use wave::{tri_to_sin, tri_to_sin2, OperatorShape, Oscillator};
