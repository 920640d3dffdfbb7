use std::ffi::c_void;

use raw_window_handle::{
    DisplayHandle, HandleError, HasDisplayHandle, HasWindowHandle, RawDisplayHandle,
    RawWindowHandle, WindowHandle,
};

use crate::RendererError;

/// A host-owned native view the renderer draws into.
///
/// The renderer never owns the view. The host must keep it alive until the
/// renderer bound to it has been dropped.
#[derive(Debug, Copy, Clone)]
pub struct NativeSurface {
    window: RawWindowHandle,
    display: RawDisplayHandle,
}

impl NativeSurface {
    /// Wraps already-resolved raw handles (e.g. from a winit window).
    pub fn from_raw(window: RawWindowHandle, display: RawDisplayHandle) -> Self {
        Self { window, display }
    }

    /// Wraps a platform view pointer handed over the C boundary.
    ///
    /// - macOS: an `NSView*`
    /// - Windows: an `HWND`
    ///
    /// Other platforms have no single-pointer view type and are rejected.
    pub fn from_platform_view(view: *mut c_void) -> Result<Self, RendererError> {
        if view.is_null() {
            return Err(RendererError::NullSurface);
        }
        platform_handles(view).map(|(window, display)| Self { window, display })
    }
}

#[cfg(target_os = "macos")]
fn platform_handles(view: *mut c_void) -> Result<(RawWindowHandle, RawDisplayHandle), RendererError> {
    use raw_window_handle::{AppKitDisplayHandle, AppKitWindowHandle};

    let ns_view = std::ptr::NonNull::new(view).ok_or(RendererError::NullSurface)?;
    Ok((
        RawWindowHandle::AppKit(AppKitWindowHandle::new(ns_view)),
        RawDisplayHandle::AppKit(AppKitDisplayHandle::new()),
    ))
}

#[cfg(target_os = "windows")]
fn platform_handles(view: *mut c_void) -> Result<(RawWindowHandle, RawDisplayHandle), RendererError> {
    use raw_window_handle::{Win32WindowHandle, WindowsDisplayHandle};

    let hwnd = std::num::NonZeroIsize::new(view as isize).ok_or(RendererError::NullSurface)?;
    Ok((
        RawWindowHandle::Win32(Win32WindowHandle::new(hwnd)),
        RawDisplayHandle::Windows(WindowsDisplayHandle::new()),
    ))
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn platform_handles(_view: *mut c_void) -> Result<(RawWindowHandle, RawDisplayHandle), RendererError> {
    Err(RendererError::UnsupportedPlatform)
}

impl HasWindowHandle for NativeSurface {
    fn window_handle(&self) -> Result<WindowHandle<'_>, HandleError> {
        // SAFETY: the host guarantees the view outlives every renderer bound to it.
        Ok(unsafe { WindowHandle::borrow_raw(self.window) })
    }
}

impl HasDisplayHandle for NativeSurface {
    fn display_handle(&self) -> Result<DisplayHandle<'_>, HandleError> {
        // SAFETY: see `window_handle`; display handles on AppKit/Win32 carry no pointer.
        Ok(unsafe { DisplayHandle::borrow_raw(self.display) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_view_is_rejected() {
        let err = NativeSurface::from_platform_view(std::ptr::null_mut()).unwrap_err();
        assert!(matches!(err, RendererError::NullSurface));
    }

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    #[test]
    fn pointer_views_are_unsupported_elsewhere() {
        let mut dummy = 0u8;
        let view = (&mut dummy as *mut u8).cast::<c_void>();
        let err = NativeSurface::from_platform_view(view).unwrap_err();
        assert!(matches!(err, RendererError::UnsupportedPlatform));
    }
}
