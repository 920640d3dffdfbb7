use crate::RendererError;

/// Editor tab page; each page has its own resource image.
///
/// The discriminants are part of the C ABI (`TsumikiTabPageType`).
#[repr(i32)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum TabPageType {
    #[default]
    Main = 0,
    Modulation = 1,
    Tuning = 2,
}

impl TabPageType {
    /// All pages, in slot order.
    pub const ALL: [TabPageType; 3] = [Self::Main, Self::Modulation, Self::Tuning];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<i32> for TabPageType {
    type Error = RendererError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Main),
            1 => Ok(Self::Modulation),
            2 => Ok(Self::Tuning),
            other => Err(RendererError::InvalidTabPage(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abi_values_are_fixed() {
        assert_eq!(TabPageType::Main as i32, 0);
        assert_eq!(TabPageType::Modulation as i32, 1);
        assert_eq!(TabPageType::Tuning as i32, 2);
        assert_eq!(std::mem::size_of::<TabPageType>(), 4);
    }

    #[test]
    fn try_from_round_trips_defined_values() {
        for page in TabPageType::ALL {
            assert_eq!(TabPageType::try_from(page as i32).ok(), Some(page));
        }
    }

    #[test]
    fn try_from_rejects_unknown_values() {
        assert!(matches!(TabPageType::try_from(3), Err(RendererError::InvalidTabPage(3))));
        assert!(matches!(TabPageType::try_from(-1), Err(RendererError::InvalidTabPage(-1))));
    }
}
