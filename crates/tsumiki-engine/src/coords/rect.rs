use bytemuck::{Pod, Zeroable};

use super::{Vec2, Viewport};

/// Axis-aligned rectangle in normalized coordinates.
///
/// Client rects are fractions of the canvas (top-left origin, +Y down); image
/// rects are texture UV coordinates. The layout is part of the C ABI
/// (`TsumikiRectF`): four `f32` in left, top, right, bottom order.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct RectF {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl RectF {
    #[inline]
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self { left, top, right, bottom }
    }

    /// The full unit square.
    #[inline]
    pub const fn unit() -> Self {
        Self::new(0.0, 0.0, 1.0, 1.0)
    }

    #[inline]
    pub fn width(self) -> f32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(self) -> f32 {
        self.bottom - self.top
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.left.is_finite() && self.top.is_finite() && self.right.is_finite() && self.bottom.is_finite()
    }

    /// Swaps edges so that `left <= right` and `top <= bottom`.
    #[inline]
    pub fn normalized(self) -> Self {
        Self {
            left: self.left.min(self.right),
            top: self.top.min(self.bottom),
            right: self.left.max(self.right),
            bottom: self.top.max(self.bottom),
        }
    }

    /// Returns the normalized rect if it has a finite, positive area.
    #[inline]
    pub fn drawable(self) -> Option<Self> {
        let r = self.normalized();
        (r.is_finite() && !r.is_empty()).then_some(r)
    }

    /// Maps a point given as fractions of this rect (`u` right, `v` down) to
    /// the enclosing normalized space.
    #[inline]
    pub fn lerp(self, u: f32, v: f32) -> Vec2 {
        Vec2::new(
            self.left + (self.right - self.left) * u,
            self.top + (self.bottom - self.top) * v,
        )
    }

    /// Size of this rect in physical pixels of `viewport`.
    #[inline]
    pub fn pixel_size(self, viewport: Viewport) -> Vec2 {
        Vec2::new(self.width() * viewport.width, self.height() * viewport.height)
    }
}
