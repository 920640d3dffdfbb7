use bytemuck::{Pod, Zeroable};

use crate::coords::{RectF, Vec2, Viewport};
use crate::paint::Color;

use super::Curve;

/// Bounds on the number of samples per graph.
pub const MIN_SAMPLES: usize = 16;
pub const MAX_SAMPLES: usize = 4096;

/// Colored vertex in normalized canvas coordinates (top-left origin).
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct GraphVertex {
    pub position: [f32; 2],
    /// Premultiplied linear RGBA.
    pub color: [f32; 4],
}

impl GraphVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x2, // position
        1 => Float32x4  // color
    ];

    #[inline]
    fn new(p: Vec2, color: [f32; 4]) -> Self {
        Self { position: [p.x, p.y], color }
    }

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GraphVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Colors and stroke width of a graph.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GraphStyle {
    pub stroke: Color,
    pub fill: Color,
    /// Stroke width in physical pixels.
    pub line_width_px: f32,
}

impl Default for GraphStyle {
    fn default() -> Self {
        Self {
            stroke: Color::from_srgb_u8(0xF2, 0xE6, 0xC8, 0xFF),
            fill: Color::from_srgb(0xF2 as f32 / 255.0, 0xE6 as f32 / 255.0, 0xC8 as f32 / 255.0, 0.25),
            line_width_px: 1.5,
        }
    }
}

/// Samples needed to draw `rect` at one sample per horizontal pixel.
pub fn sample_count(rect: RectF, viewport: Viewport) -> usize {
    let px = rect.normalized().pixel_size(viewport).x;
    if !px.is_finite() {
        return MIN_SAMPLES;
    }
    (px.ceil().max(0.0) as usize).clamp(MIN_SAMPLES, MAX_SAMPLES)
}

/// Appends the fill and stroke triangles of `curve` drawn inside `rect`.
///
/// The output is a triangle list: fill first, stroke on top.
pub fn tessellate(
    curve: &Curve,
    rect: RectF,
    viewport: Viewport,
    style: &GraphStyle,
    out: &mut Vec<GraphVertex>,
) {
    let Some(rect) = rect.drawable() else { return };
    if !viewport.is_valid() {
        return;
    }

    let values = curve.values();
    if values.len() < 2 {
        return;
    }

    let last = (values.len() - 1) as f32;
    let at = |i: usize, v: f32| rect.lerp(i as f32 / last, (1.0 - v.clamp(-1.0, 1.0)) * 0.5);

    out.reserve((values.len() - 1) * 12);

    let base = curve.baseline();
    let fill = style.fill.to_array();
    if fill[3] > 0.0 {
        for (i, pair) in values.windows(2).enumerate() {
            fill_segment(out, fill, base, (i, pair[0]), (i + 1, pair[1]), &at);
        }
    }

    let stroke = style.stroke.to_array();
    let half_width = style.line_width_px.max(0.0) * 0.5;
    if stroke[3] > 0.0 && half_width > 0.0 {
        for (i, pair) in values.windows(2).enumerate() {
            stroke_segment(out, stroke, at(i, pair[0]), at(i + 1, pair[1]), half_width, viewport);
        }
    }
}

/// Area between one segment and the baseline; split where the curve crosses it.
fn fill_segment(
    out: &mut Vec<GraphVertex>,
    color: [f32; 4],
    base: f32,
    (i0, v0): (usize, f32),
    (i1, v1): (usize, f32),
    at: &impl Fn(usize, f32) -> Vec2,
) {
    let (p0, p1) = (at(i0, v0), at(i1, v1));
    let (b0, b1) = (at(i0, base), at(i1, base));

    let (d0, d1) = (v0 - base, v1 - base);
    if d0 * d1 < 0.0 {
        let s = d0 / (d0 - d1);
        let c = Vec2::new(p0.x + (p1.x - p0.x) * s, b0.y);
        push_triangle(out, color, p0, b0, c);
        push_triangle(out, color, c, b1, p1);
    } else {
        push_triangle(out, color, p0, b0, p1);
        push_triangle(out, color, p1, b0, b1);
    }
}

/// A quad of `half_width` pixels around `a → b`, extended by the half width
/// at both ends so consecutive segments overlap at the joints.
fn stroke_segment(
    out: &mut Vec<GraphVertex>,
    color: [f32; 4],
    a: Vec2,
    b: Vec2,
    half_width: f32,
    viewport: Viewport,
) {
    let (w, h) = (viewport.width, viewport.height);
    let a_px = a.scale(w, h);
    let b_px = b.scale(w, h);
    let dir = b_px - a_px;
    let len = dir.length();
    if len <= f32::EPSILON {
        return;
    }

    let along = dir / len * half_width;
    let normal = dir.perp_normalized() * half_width;

    let to_norm = |p: Vec2| p.scale(1.0 / w, 1.0 / h);
    let a0 = to_norm(a_px - along + normal);
    let a1 = to_norm(a_px - along - normal);
    let b0 = to_norm(b_px + along + normal);
    let b1 = to_norm(b_px + along - normal);

    push_triangle(out, color, a0, a1, b0);
    push_triangle(out, color, b0, a1, b1);
}

#[inline]
fn push_triangle(out: &mut Vec<GraphVertex>, color: [f32; 4], a: Vec2, b: Vec2, c: Vec2) {
    out.extend_from_slice(&[
        GraphVertex::new(a, color),
        GraphVertex::new(b, color),
        GraphVertex::new(c, color),
    ]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Curve, GraphParameters};

    const VIEW: Viewport = Viewport::new(800.0, 600.0);

    fn sine(samples: usize) -> Curve {
        Curve::modulator(&GraphParameters::new(0.5, 0.0, 1.0, 1.0), samples)
    }

    #[test]
    fn sample_count_follows_pixel_width() {
        assert_eq!(sample_count(RectF::new(0.0, 0.0, 0.5, 1.0), VIEW), 400);
        assert_eq!(sample_count(RectF::new(0.5, 0.0, 0.0, 1.0), VIEW), 400);
    }

    #[test]
    fn sample_count_is_clamped() {
        assert_eq!(sample_count(RectF::new(0.0, 0.0, 0.001, 1.0), VIEW), MIN_SAMPLES);
        assert_eq!(sample_count(RectF::new(0.0, 0.0, 100.0, 1.0), VIEW), MAX_SAMPLES);
        assert_eq!(sample_count(RectF::new(f32::NAN, 0.0, 1.0, 1.0), VIEW), MIN_SAMPLES);
    }

    #[test]
    fn emits_fill_and_stroke_per_segment() {
        let curve = sine(17);
        let mut out = Vec::new();
        tessellate(&curve, RectF::new(0.1, 0.1, 0.9, 0.5), VIEW, &GraphStyle::default(), &mut out);
        assert_eq!(out.len(), 16 * 12);
        assert_eq!(out.len() % 3, 0);
    }

    #[test]
    fn fill_stays_inside_the_rect() {
        let rect = RectF::new(0.2, 0.3, 0.6, 0.7);
        let style = GraphStyle { line_width_px: 0.0, ..GraphStyle::default() };
        let mut out = Vec::new();
        tessellate(&sine(33), rect, VIEW, &style, &mut out);

        assert!(!out.is_empty());
        for v in &out {
            let [x, y] = v.position;
            assert!((rect.left - 1e-5..=rect.right + 1e-5).contains(&x), "x={x}");
            assert!((rect.top - 1e-5..=rect.bottom + 1e-5).contains(&y), "y={y}");
        }
    }

    #[test]
    fn stroke_width_is_in_pixels() {
        // A flat curve: the stroke quad spans exactly line_width_px vertically.
        let curve = Curve::modulator(&GraphParameters::new(0.5, 0.0, 0.0, 1.0), 2);
        let style = GraphStyle {
            fill: Color::transparent(),
            line_width_px: 4.0,
            ..GraphStyle::default()
        };
        let mut out = Vec::new();
        tessellate(&curve, RectF::unit(), VIEW, &style, &mut out);

        assert_eq!(out.len(), 6);
        let ys: Vec<f32> = out.iter().map(|v| v.position[1] * VIEW.height).collect();
        let min = ys.iter().cloned().fold(f32::INFINITY, f32::min);
        let max = ys.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        assert!((max - min - 4.0).abs() < 1e-3, "span={}", max - min);
    }

    #[test]
    fn degenerate_rect_emits_nothing() {
        let mut out = Vec::new();
        tessellate(&sine(16), RectF::new(0.5, 0.5, 0.5, 0.9), VIEW, &GraphStyle::default(), &mut out);
        tessellate(&sine(16), RectF::new(f32::NAN, 0.0, 1.0, 1.0), VIEW, &GraphStyle::default(), &mut out);
        tessellate(&sine(16), RectF::unit(), Viewport::new(0.0, 0.0), &GraphStyle::default(), &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn filter_fill_reaches_the_bottom_edge() {
        let rect = RectF::new(0.0, 0.0, 1.0, 0.5);
        let style = GraphStyle { line_width_px: 0.0, ..GraphStyle::default() };
        let mut out = Vec::new();
        tessellate(&Curve::filter(0.5, 0.5, 32), rect, VIEW, &style, &mut out);
        let max_y = out.iter().map(|v| v.position[1]).fold(f32::NEG_INFINITY, f32::max);
        assert!((max_y - rect.bottom).abs() < 1e-6);
    }
}
