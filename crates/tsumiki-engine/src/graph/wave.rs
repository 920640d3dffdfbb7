use std::f64::consts::PI;

use super::GraphParameters;

/// Slopes are capped so that a fully flattened shape stays finite.
const MAX_SLOPE: f32 = 48000.0;

/// Shape X is kept off ±1, where one half of the cycle would have zero width.
const MIN_X: f32 = 1.0 / 32768.0;
const MAX_X: f32 = 1.0 - MIN_X;

// Odd Taylor coefficients of sin(πx/2), used to bend a triangle into a sine.
const A1: f32 = (PI / 2.0) as f32;
const A1B: f32 = (PI / 2.0 - 1.0) as f32;
const A3: f32 = (PI * PI * PI / (8.0 * 6.0)) as f32;
const A5: f32 = (PI * PI * PI * PI * PI / (32.0 * 120.0)) as f32;
const A7: f32 = (PI * PI * PI * PI * PI * PI * PI / (128.0 * 5040.0)) as f32;

/// Approximates `sin(π/2 · tri)` for a triangle value in [-1, 1].
#[inline]
pub fn tri_to_sin(tri: f32) -> f32 {
    let tri2 = tri * tri;
    (((-A7 * tri2 + A5) * tri2 - A3) * tri2 + A1) * tri
}

/// Blends a triangle value toward its sine image; `b = 0` is the triangle,
/// `b = 1` the sine.
#[inline]
pub fn tri_to_sin2(tri: f32, b: f32) -> f32 {
    if b <= 0.0 {
        return tri;
    }
    let tri2 = tri * tri;
    (b * (((-A7 * tri2 + A5) * tri2 - A3) * tri2 + A1B) + 1.0) * tri
}

/// Precomputed slopes for an operator waveform shape.
///
/// Shape X moves the peak (rise vs. fall balance); shape Y morphs
/// triangle (-1) → sine (0) → square (+1).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct OperatorShape {
    sin_factor: f32,
    up_slope: f32,
    down_slope: f32,
}

impl OperatorShape {
    /// Builds a shape from signed shape values in [-1, 1].
    pub fn new(shape_x: f32, shape_y: f32) -> Self {
        let shape_x = sanitize(shape_x, 0.0).clamp(MIN_X * 2.0 - 1.0, MAX_X * 2.0 - 1.0);
        let shape_y = sanitize(shape_y, 0.0).clamp(-1.0, 1.0);

        let sin_factor = if shape_y > 0.0 { 1.0 } else { 1.0 + shape_y };
        let flatness = (1.0 - shape_y).min(1.0);
        Self {
            sin_factor,
            up_slope: MAX_SLOPE.min(4.0 / flatness / (1.0 + shape_x)),
            down_slope: -MAX_SLOPE.min(4.0 / flatness / (1.0 - shape_x)),
        }
    }

    /// Builds a shape from graph parameters (`x` normalized, `y` signed).
    pub fn from_normalized(x: f32, y: f32) -> Self {
        let x = sanitize(x, 0.5).clamp(MIN_X, MAX_X);
        Self::new(x * 2.0 - 1.0, y)
    }

    /// Output in [-1, 1] at `phase` (cycles; any real value).
    pub fn sample(&self, phase: f64) -> f32 {
        if !phase.is_finite() {
            return 0.0;
        }

        let d = phase + 1.0;
        let up = (((d - (d + 0.5).floor()).abs() as f32) * self.up_slope).min(1.0);
        let down = ((d - d.floor() - 0.5) as f32) * self.down_slope;
        tri_to_sin2(down.max(-up).min(up), self.sin_factor)
    }
}

/// An operator shape placed on the graph's time axis.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Oscillator {
    shape: OperatorShape,
    pitch: f64,
    period: f64,
}

impl Oscillator {
    pub fn new(params: &GraphParameters) -> Self {
        let period = params.period as f64;
        Self {
            shape: OperatorShape::from_normalized(params.x, params.y),
            pitch: sanitize(params.pitch, 1.0) as f64,
            // A non-positive period would never restart; treat it as free running.
            period: if period.is_finite() && period > 0.0 { period } else { 1.0 },
        }
    }

    /// Phase (cycles) at graph position `t` in [0, 1].
    ///
    /// The phase restarts every `period`, which is how sync is visualized.
    #[inline]
    pub fn phase_at(&self, t: f64) -> f64 {
        t.rem_euclid(self.period) * self.pitch
    }

    /// Output at graph position `t`, with an extra phase offset (FM input).
    #[inline]
    pub fn sample_at(&self, t: f64, phase_offset: f64) -> f32 {
        self.shape.sample(self.phase_at(t) + phase_offset)
    }
}

#[inline]
fn sanitize(v: f32, fallback: f32) -> f32 {
    if v.is_finite() { v } else { fallback }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32, eps: f32) -> bool {
        (a - b).abs() <= eps
    }

    // ── polynomial ────────────────────────────────────────────────────────

    #[test]
    fn tri_to_sin_tracks_sine() {
        for i in -10..=10 {
            let x = i as f32 / 10.0;
            let expect = (std::f32::consts::FRAC_PI_2 * x).sin();
            assert!(close(tri_to_sin(x), expect, 1e-3), "x={x}");
        }
    }

    #[test]
    fn tri_to_sin2_endpoints() {
        assert_eq!(tri_to_sin2(0.5, 0.0), 0.5);
        assert!(close(tri_to_sin2(0.5, 1.0), tri_to_sin(0.5), 1e-5));
    }

    // ── shapes ────────────────────────────────────────────────────────────

    #[test]
    fn centered_shape_is_sine() {
        let s = OperatorShape::from_normalized(0.5, 0.0);
        assert!(close(s.sample(0.0), 0.0, 1e-4));
        assert!(close(s.sample(0.25), 1.0, 1e-3));
        assert!(close(s.sample(0.5), 0.0, 1e-4));
        assert!(close(s.sample(0.75), -1.0, 1e-3));
        assert!(close(s.sample(0.125), (std::f32::consts::PI / 4.0).sin(), 2e-3));
    }

    #[test]
    fn negative_y_is_triangle() {
        let s = OperatorShape::from_normalized(0.5, -1.0);
        assert!(close(s.sample(0.125), 0.5, 1e-5));
        assert!(close(s.sample(0.25), 1.0, 1e-5));
        assert!(close(s.sample(0.625), -0.5, 1e-5));
    }

    #[test]
    fn positive_y_saturates_to_square() {
        let s = OperatorShape::from_normalized(0.5, 1.0);
        for p in [0.05, 0.2, 0.45] {
            assert!(close(s.sample(p), 1.0, 1e-3), "p={p}");
        }
        for p in [0.55, 0.8, 0.95] {
            assert!(close(s.sample(p), -1.0, 1e-3), "p={p}");
        }
    }

    #[test]
    fn shape_x_moves_the_peak() {
        // A small X shortens the rise: the wave reaches its peak early.
        let s = OperatorShape::from_normalized(0.1, -1.0);
        assert!(close(s.sample(0.05), 1.0, 1e-4));
        assert!(s.sample(0.25) < 1.0);
    }

    #[test]
    fn output_is_periodic_and_bounded() {
        let s = OperatorShape::from_normalized(0.3, 0.4);
        for i in 0..200 {
            let p = i as f64 / 37.0 - 2.0;
            let v = s.sample(p);
            assert!((-1.001..=1.001).contains(&v), "p={p} v={v}");
            assert!(close(v, s.sample(p + 3.0), 1e-4), "p={p}");
        }
    }

    #[test]
    fn extreme_inputs_stay_finite() {
        let s = OperatorShape::new(1.0, 1.0);
        assert!(s.sample(0.3).is_finite());
        let s = OperatorShape::from_normalized(f32::NAN, f32::INFINITY);
        assert!(s.sample(0.3).is_finite());
        assert_eq!(s.sample(f64::NAN), 0.0);
    }

    // ── oscillator ────────────────────────────────────────────────────────

    #[test]
    fn free_running_phase_scales_with_pitch() {
        let osc = Oscillator::new(&GraphParameters::new(0.5, 0.0, 2.0, 1.0));
        assert!((osc.phase_at(0.5) - 1.0).abs() < 1e-12);
        assert!((osc.phase_at(0.75) - 1.5).abs() < 1e-12);
    }

    #[test]
    fn sync_restarts_phase_every_period() {
        let osc = Oscillator::new(&GraphParameters::new(0.5, 0.0, 3.0, 0.5));
        assert!((osc.phase_at(0.1) - osc.phase_at(0.6)).abs() < 1e-12);
        assert_eq!(osc.phase_at(0.5), 0.0);
    }

    #[test]
    fn invalid_period_is_free_running() {
        let osc = Oscillator::new(&GraphParameters::new(0.5, 0.0, 1.0, 0.0));
        assert!((osc.phase_at(0.75) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn phase_offset_shifts_the_wave() {
        let osc = Oscillator::new(&GraphParameters::new(0.5, 0.0, 1.0, 1.0));
        assert!(close(osc.sample_at(0.0, 0.25), osc.sample_at(0.25, 0.0), 1e-5));
    }
}
