/// Semitones covered by the graph's horizontal axis (ten octaves).
pub const SPAN_SEMITONES: f64 = 120.0;

/// Vertical range of the graph in dB.
pub const DB_TOP: f64 = 24.0;
pub const DB_BOTTOM: f64 = -48.0;

/// Lower bound on damping; keeps the resonance peak finite (about +30 dB).
const MIN_DAMPING: f64 = 1.0 / 32.0;

/// Magnitude response of the resonant 2-pole low-pass (state-variable) filter.
///
/// `H(s) = 1 / (s² + d·s + 1)` evaluated on the frequency axis, with the
/// damping `d = 1 - resonance`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FilterResponse {
    cutoff: f64,
    damping: f64,
}

impl FilterResponse {
    /// `normalized_cutoff` places the cutoff on the graph's x axis in [0, 1];
    /// `resonance` is in [0, 1).
    pub fn new(normalized_cutoff: f32, resonance: f32) -> Self {
        let cutoff = if normalized_cutoff.is_finite() { normalized_cutoff.clamp(0.0, 1.0) } else { 0.5 };
        let resonance = if resonance.is_finite() { resonance } else { 0.0 };
        Self {
            cutoff: cutoff as f64,
            damping: (1.0 - resonance as f64).max(MIN_DAMPING),
        }
    }

    /// Frequency relative to the cutoff at graph position `t`.
    #[inline]
    pub fn ratio_at(&self, t: f64) -> f64 {
        ((t - self.cutoff) * SPAN_SEMITONES / 12.0).exp2()
    }

    /// Linear magnitude at frequency ratio `r`.
    #[inline]
    pub fn magnitude(&self, r: f64) -> f64 {
        let r2 = r * r;
        let re = 1.0 - r2;
        let im = self.damping * r;
        1.0 / (re * re + im * im).sqrt()
    }

    /// Response in dB at graph position `t`.
    #[inline]
    pub fn db_at(&self, t: f64) -> f64 {
        20.0 * self.magnitude(self.ratio_at(t)).log10()
    }

    /// Response at `t` mapped to the graph's [-1, 1] value range.
    #[inline]
    pub fn value_at(&self, t: f64) -> f32 {
        let v = (self.db_at(t) - DB_BOTTOM) / (DB_TOP - DB_BOTTOM) * 2.0 - 1.0;
        if v.is_nan() { -1.0 } else { v.clamp(-1.0, 1.0) as f32 }
    }
}
