use super::TabPageType;

/// Which slots hold a loaded image, and which one drawing reads from.
///
/// Loads fill empty slots in page order (the order the host loads its
/// images). Once every slot is filled, a load replaces the selected one.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct SlotState {
    filled: [bool; 3],
    selected: TabPageType,
}

impl SlotState {
    #[inline]
    pub fn selected(&self) -> TabPageType {
        self.selected
    }

    #[inline]
    pub fn select(&mut self, page: TabPageType) {
        self.selected = page;
    }

    #[inline]
    pub fn is_filled(&self, page: TabPageType) -> bool {
        self.filled[page.index()]
    }

    /// Slot the next load goes to.
    pub fn load_target(&self) -> TabPageType {
        TabPageType::ALL
            .into_iter()
            .find(|page| !self.is_filled(*page))
            .unwrap_or(self.selected)
    }

    #[inline]
    pub fn mark_filled(&mut self, page: TabPageType) {
        self.filled[page.index()] = true;
    }
}
