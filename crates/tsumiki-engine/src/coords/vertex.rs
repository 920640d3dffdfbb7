use bytemuck::{Pod, Zeroable};

/// Textured vertex: position (x, y, z, w) followed by texture coordinate (u, v).
///
/// Shared with the host as `TsumikiVertex` and used directly as the GPU
/// vertex format of image quads, so the layout is fixed at 24 bytes.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
    pub u: f32,
    pub v: f32,
}

impl Vertex {
    /// Depth used for every 2D vertex; the renderer has no depth buffer.
    pub const PLANE_Z: f32 = 0.5;

    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x4, // position
        1 => Float32x2  // texcoord
    ];

    #[inline]
    pub const fn new(x: f32, y: f32, u: f32, v: f32) -> Self {
        Self { x, y, z: Self::PLANE_Z, w: 1.0, u, v }
    }

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abi_layout() {
        assert_eq!(std::mem::size_of::<Vertex>(), 24);
        assert_eq!(std::mem::offset_of!(Vertex, x), 0);
        assert_eq!(std::mem::offset_of!(Vertex, w), 12);
        assert_eq!(std::mem::offset_of!(Vertex, u), 16);
        assert_eq!(std::mem::offset_of!(Vertex, v), 20);
    }

    #[test]
    fn texcoord_attribute_follows_position() {
        let layout = Vertex::layout();
        assert_eq!(layout.array_stride, 24);
        assert_eq!(layout.attributes[1].offset, 16);
    }
}
