use bytemuck::{Pod, Zeroable};

/// Visual parameters of one operator waveform (`TsumikiGraphParameters`).
///
/// - `x`: normalized shape X in (0, 1); 0.5 is symmetric
/// - `y`: shape Y in [-1, 1]; -1 triangle, 0 sine, +1 square
/// - `pitch`: wave cycles across the full graph width
/// - `period`: fraction of the graph after which the phase restarts
///   (1 = free running, 0.5 = synced to the master cycle)
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct GraphParameters {
    pub x: f32,
    pub y: f32,
    pub pitch: f32,
    pub period: f32,
}

/// FM operator parameters (`TsumikiFmParameters`).
///
/// Same fields as [`GraphParameters`] plus `level`, the modulation depth in
/// phase units. The trailing padding keeps the stride at 32 bytes so the
/// struct can be uploaded as a uniform unchanged.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct FmParameters {
    pub x: f32,
    pub y: f32,
    pub pitch: f32,
    pub period: f32,
    pub level: f32,
    pub _padding: [f32; 3],
}

impl GraphParameters {
    #[inline]
    pub const fn new(x: f32, y: f32, pitch: f32, period: f32) -> Self {
        Self { x, y, pitch, period }
    }
}

impl FmParameters {
    #[inline]
    pub const fn new(x: f32, y: f32, pitch: f32, period: f32, level: f32) -> Self {
        Self { x, y, pitch, period, level, _padding: [0.0; 3] }
    }

    /// The operator part, without the level.
    #[inline]
    pub const fn graph(&self) -> GraphParameters {
        GraphParameters::new(self.x, self.y, self.pitch, self.period)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::{offset_of, size_of};

    #[test]
    fn graph_parameters_layout() {
        assert_eq!(size_of::<GraphParameters>(), 16);
        assert_eq!(offset_of!(GraphParameters, x), 0);
        assert_eq!(offset_of!(GraphParameters, y), 4);
        assert_eq!(offset_of!(GraphParameters, pitch), 8);
        assert_eq!(offset_of!(GraphParameters, period), 12);
    }

    #[test]
    fn fm_parameters_layout() {
        assert_eq!(size_of::<FmParameters>(), 32);
        assert_eq!(offset_of!(FmParameters, level), 16);
        assert_eq!(offset_of!(FmParameters, _padding), 20);
    }

    #[test]
    fn fm_graph_drops_level() {
        let fm = FmParameters::new(0.25, -0.5, 2.0, 0.5, 0.3);
        assert_eq!(fm.graph(), GraphParameters::new(0.25, -0.5, 2.0, 0.5));
    }
}
