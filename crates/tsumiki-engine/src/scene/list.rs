use super::DrawCmd;

/// Commands recorded for the next present.
///
/// A clear discards everything recorded before it, since the canvas is
/// overwritten anyway; the frame then starts from the background color
/// instead of the canvas's previous content.
#[derive(Debug, Default)]
pub struct FrameList {
    items: Vec<DrawCmd>,
    cleared: bool,
}

impl FrameList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a clear to the background color.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
        self.cleared = true;
    }

    #[inline]
    pub fn push(&mut self, cmd: DrawCmd) {
        self.items.push(cmd);
    }

    /// Whether the frame starts with a clear (otherwise it draws over the
    /// canvas's existing content).
    #[inline]
    pub fn is_cleared(&self) -> bool {
        self.cleared
    }

    /// Commands in call order.
    #[inline]
    pub fn items(&self) -> &[DrawCmd] {
        &self.items
    }

    /// True when presenting would leave the canvas untouched.
    #[inline]
    pub fn is_empty(&self) -> bool {
        !self.cleared && self.items.is_empty()
    }

    /// Empties the list after a present. Keeps allocated capacity for reuse.
    #[inline]
    pub fn reset(&mut self) {
        self.items.clear();
        self.cleared = false;
    }
}
