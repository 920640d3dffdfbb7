//! Boundary types. Layouts match `include/tsumiki_renderer.h` byte for byte.

use std::mem::{align_of, offset_of, size_of};

use tsumiki_engine::Renderer;

pub type TsumikiVertex = tsumiki_engine::coords::Vertex;
pub type TsumikiRectF = tsumiki_engine::coords::RectF;
pub type TsumikiGraphParameters = tsumiki_engine::graph::GraphParameters;
pub type TsumikiFmParameters = tsumiki_engine::graph::FmParameters;

/// `TsumikiTabPageType`: a C enum, passed as `int`.
pub type TsumikiTabPageType = std::ffi::c_int;

pub const TSUMIKI_TAB_PAGE_MAIN: TsumikiTabPageType = 0;
pub const TSUMIKI_TAB_PAGE_MODULATION: TsumikiTabPageType = 1;
pub const TSUMIKI_TAB_PAGE_TUNING: TsumikiTabPageType = 2;

/// Opaque renderer behind a `TsumikiRendererHandle`.
///
/// Created by `tsumiki_renderer_create`, released by `tsumiki_renderer_destroy`.
pub struct TsumikiRenderer {
    pub(crate) inner: Renderer,
}

/// `TsumikiRendererHandle` (`void*` in C).
pub type TsumikiRendererHandle = *mut TsumikiRenderer;

const _: () = {
    assert!(size_of::<TsumikiVertex>() == 24);
    assert!(align_of::<TsumikiVertex>() == 4);
    assert!(offset_of!(TsumikiVertex, u) == 16);

    assert!(size_of::<TsumikiRectF>() == 16);
    assert!(offset_of!(TsumikiRectF, bottom) == 12);

    assert!(size_of::<TsumikiGraphParameters>() == 16);
    assert!(offset_of!(TsumikiGraphParameters, period) == 12);

    assert!(size_of::<TsumikiFmParameters>() == 32);
    assert!(offset_of!(TsumikiFmParameters, level) == 16);

    assert!(size_of::<TsumikiTabPageType>() == 4);
};

#[cfg(test)]
mod tests {
    use super::*;
    use tsumiki_engine::resources::TabPageType;

    #[test]
    fn tab_page_constants_match_the_engine() {
        assert_eq!(TSUMIKI_TAB_PAGE_MAIN, TabPageType::Main as i32);
        assert_eq!(TSUMIKI_TAB_PAGE_MODULATION, TabPageType::Modulation as i32);
        assert_eq!(TSUMIKI_TAB_PAGE_TUNING, TabPageType::Tuning as i32);
    }

    #[test]
    fn fm_parameters_field_order() {
        assert_eq!(offset_of!(TsumikiFmParameters, x), 0);
        assert_eq!(offset_of!(TsumikiFmParameters, y), 4);
        assert_eq!(offset_of!(TsumikiFmParameters, pitch), 8);
        assert_eq!(offset_of!(TsumikiFmParameters, period), 12);
        assert_eq!(offset_of!(TsumikiFmParameters, _padding), 20);
    }
}
