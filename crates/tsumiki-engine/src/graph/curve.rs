use super::{FilterResponse, FmParameters, GraphParameters, Oscillator};

/// Which visualization a curve belongs to; decides the fill baseline.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CurveKind {
    Filter,
    Modulator,
    Carrier,
}

/// A curve sampled at evenly spaced graph positions `t = i / (n - 1)`.
///
/// Values are in [-1, 1], +1 at the top of the graph rect.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    kind: CurveKind,
    values: Vec<f32>,
}

impl Curve {
    /// Filter magnitude response, `samples` points (at least two).
    pub fn filter(normalized_cutoff: f32, resonance: f32, samples: usize) -> Self {
        let response = FilterResponse::new(normalized_cutoff, resonance);
        Self::sampled(CurveKind::Filter, samples, |t| response.value_at(t))
    }

    pub fn modulator(params: &GraphParameters, samples: usize) -> Self {
        let osc = Oscillator::new(params);
        Self::sampled(CurveKind::Modulator, samples, |t| osc.sample_at(t, 0.0))
    }

    /// Carrier waveform phase-modulated by `fm`.
    pub fn carrier(params: &GraphParameters, fm: &FmParameters, samples: usize) -> Self {
        let carrier = Oscillator::new(params);
        let modulator = Oscillator::new(&fm.graph());
        let level = if fm.level.is_finite() { fm.level as f64 } else { 0.0 };

        Self::sampled(CurveKind::Carrier, samples, |t| {
            let m = modulator.sample_at(t, 0.0) as f64;
            carrier.sample_at(t, level * m)
        })
    }

    fn sampled(kind: CurveKind, samples: usize, f: impl Fn(f64) -> f32) -> Self {
        let n = samples.max(2);
        let last = (n - 1) as f64;
        let values = (0..n).map(|i| f(i as f64 / last)).collect();
        Self { kind, values }
    }

    #[inline]
    pub fn kind(&self) -> CurveKind {
        self.kind
    }

    #[inline]
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Value the fill extends to: the bottom edge for the filter, the center
    /// line for waveforms.
    #[inline]
    pub fn baseline(&self) -> f32 {
        match self.kind {
            CurveKind::Filter => -1.0,
            CurveKind::Modulator | CurveKind::Carrier => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_count_is_at_least_two() {
        let c = Curve::modulator(&GraphParameters::new(0.5, 0.0, 1.0, 1.0), 0);
        assert_eq!(c.values().len(), 2);
    }

    #[test]
    fn modulator_covers_pitch_cycles() {
        // Two cycles over 9 samples: t = 1/8 is a quarter cycle.
        let c = Curve::modulator(&GraphParameters::new(0.5, 0.0, 2.0, 1.0), 9);
        let v = c.values();
        assert!((v[1] - 1.0).abs() < 1e-3);
        assert!((v[3] + 1.0).abs() < 1e-3);
        assert!((v[5] - 1.0).abs() < 1e-3);
        assert_eq!(c.baseline(), 0.0);
    }

    #[test]
    fn zero_level_carrier_matches_modulator_shape() {
        let params = GraphParameters::new(0.4, -0.3, 3.0, 1.0);
        let fm = FmParameters::new(0.5, 0.0, 5.0, 1.0, 0.0);
        let carrier = Curve::carrier(&params, &fm, 64);
        let plain = Curve::modulator(&params, 64);
        assert_eq!(carrier.values(), plain.values());
        assert_eq!(carrier.kind(), CurveKind::Carrier);
    }

    #[test]
    fn modulation_changes_the_carrier() {
        let params = GraphParameters::new(0.5, 0.0, 1.0, 1.0);
        let fm = FmParameters::new(0.5, 0.0, 4.0, 1.0, 0.5);
        let carrier = Curve::carrier(&params, &fm, 64);
        let plain = Curve::modulator(&params, 64);
        assert_ne!(carrier.values(), plain.values());
        assert!(carrier.values().iter().all(|v| (-1.001..=1.001).contains(v)));
    }

    #[test]
    fn filter_curve_falls_past_cutoff() {
        let c = Curve::filter(0.3, 0.0, 101);
        let v = c.values();
        assert!(v[0] > v[100]);
        assert_eq!(v[100], -1.0);
        assert_eq!(c.baseline(), -1.0);
    }
}
