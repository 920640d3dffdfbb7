//! Coordinate and geometry types shared with the host and the renderers.
//!
//! Canonical space:
//! - normalized canvas coordinates in [0, 1]
//! - origin top-left
//! - +X right, +Y down
//!
//! Shaders convert to NDC through the transform uniform; CPU tessellation
//! works in physical pixels (`Viewport`) when it needs isotropic distances.

mod rect;
mod vec2;
mod vertex;
mod viewport;

pub use rect::RectF;
pub use vec2::Vec2;
pub use vertex::Vertex;
pub use viewport::Viewport;
