//! Exported functions.
//!
//! Every function tolerates a null handle and null struct pointers (logged,
//! then ignored). Other invalid input is rejected the same way.

use std::ffi::{c_int, c_void};
use std::ptr;

use tsumiki_engine::device::{NativeSurface, SurfaceSize};
use tsumiki_engine::logging::{init_logging, LoggingConfig};
use tsumiki_engine::resources::TabPageType;
use tsumiki_engine::{Renderer, RendererConfig, RendererError};

use crate::panic_guard::{guard, with_renderer};
use crate::types::{
    TsumikiFmParameters, TsumikiGraphParameters, TsumikiRectF, TsumikiRenderer,
    TsumikiRendererHandle, TsumikiTabPageType,
};

/// Creates a renderer drawing into `ns_view` (an `NSView*` on macOS, an
/// `HWND` on Windows).
///
/// `shader_data` holds `shader_data_length` bytes of UTF-8 WGSL; null or a
/// zero length selects the built-in library. Returns null on failure.
///
/// # Safety
///
/// `ns_view` must stay valid until the handle is destroyed. `shader_data`
/// must be null or readable for `shader_data_length` bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn tsumiki_renderer_create(
    ns_view: *mut c_void,
    width: c_int,
    height: c_int,
    shader_data: *const u8,
    shader_data_length: c_int,
) -> TsumikiRendererHandle {
    init_logging(LoggingConfig::default());

    guard("tsumiki_renderer_create", ptr::null_mut(), || {
        // SAFETY: forwarded caller contract.
        let shaders = unsafe { shader_bytes(shader_data, shader_data_length) };
        match create(ns_view, width, height, shaders) {
            Ok(renderer) => Box::into_raw(Box::new(TsumikiRenderer { inner: renderer })),
            Err(e) => {
                log::error!("tsumiki_renderer_create failed: {e}");
                ptr::null_mut()
            }
        }
    })
}

fn create(
    ns_view: *mut c_void,
    width: c_int,
    height: c_int,
    shaders: Option<&[u8]>,
) -> Result<Renderer, RendererError> {
    let surface = NativeSurface::from_platform_view(ns_view)?;
    let size = SurfaceSize::from_signed(width, height).ok_or(RendererError::InvalidSize {
        width: width.into(),
        height: height.into(),
    })?;
    Renderer::new(&surface, size, shaders, RendererConfig::from_env())
}

unsafe fn shader_bytes<'a>(data: *const u8, len: c_int) -> Option<&'a [u8]> {
    if data.is_null() || len <= 0 {
        return None;
    }
    // SAFETY: non-null and readable for `len` bytes (caller contract).
    Some(unsafe { std::slice::from_raw_parts(data, len as usize) })
}

/// Releases the renderer. Null is ignored.
///
/// # Safety
///
/// `handle` is null or a live handle; it must not be used afterwards.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn tsumiki_renderer_destroy(handle: TsumikiRendererHandle) {
    if handle.is_null() {
        log::warn!("tsumiki_renderer_destroy: null handle ignored");
        return;
    }

    guard("tsumiki_renderer_destroy", (), || {
        // SAFETY: created by `Box::into_raw` in `tsumiki_renderer_create`.
        drop(unsafe { Box::from_raw(handle) });
        log::debug!("renderer destroyed");
    });
}

/// Resizes the drawable. Non-positive sizes are ignored.
///
/// # Safety
///
/// `handle` is null or a live handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn tsumiki_renderer_resize(handle: TsumikiRendererHandle, width: c_int, height: c_int) {
    unsafe {
        with_renderer("tsumiki_renderer_resize", handle, |r| match SurfaceSize::from_signed(width, height) {
            Some(size) => r.resize(size),
            None => log::warn!("tsumiki_renderer_resize: {width}x{height} ignored"),
        });
    }
}

/// Uploads a tightly packed RGBA8 image (`width * height * 4` bytes) into the
/// next resource slot.
///
/// # Safety
///
/// `handle` is null or a live handle. `data` is null or readable for
/// `width * height * 4` bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn tsumiki_renderer_load_texture(
    handle: TsumikiRendererHandle,
    data: *const u8,
    width: c_int,
    height: c_int,
) {
    unsafe {
        with_renderer("tsumiki_renderer_load_texture", handle, |r| {
            if data.is_null() {
                log::warn!("tsumiki_renderer_load_texture: null data ignored");
                return;
            }
            let Some(size) = SurfaceSize::from_signed(width, height) else {
                log::warn!("tsumiki_renderer_load_texture: {width}x{height} ignored");
                return;
            };
            let Some(len) = (size.width as usize)
                .checked_mul(size.height as usize)
                .and_then(|n| n.checked_mul(4))
            else {
                log::warn!("tsumiki_renderer_load_texture: {width}x{height} overflows");
                return;
            };

            // SAFETY: readable for `len` bytes (caller contract).
            let pixels = std::slice::from_raw_parts(data, len);
            if let Err(e) = r.load_texture(pixels, size.width, size.height) {
                log::warn!("tsumiki_renderer_load_texture: {e}");
            }
        });
    }
}

/// Selects the resource image used by subsequent `draw_image` calls.
///
/// # Safety
///
/// `handle` is null or a live handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn tsumiki_renderer_set_resource_image(
    handle: TsumikiRendererHandle,
    page: TsumikiTabPageType,
) {
    unsafe {
        with_renderer("tsumiki_renderer_set_resource_image", handle, |r| match TabPageType::try_from(page) {
            Ok(page) => r.set_resource_image(page),
            Err(e) => log::warn!("tsumiki_renderer_set_resource_image: {e}"),
        });
    }
}

/// Clears the canvas to the background color.
///
/// # Safety
///
/// `handle` is null or a live handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn tsumiki_renderer_clear(handle: TsumikiRendererHandle) {
    unsafe { with_renderer("tsumiki_renderer_clear", handle, |r| r.clear()) }
}

/// Draws part of the selected resource image.
///
/// # Safety
///
/// `handle` is null or a live handle; the rect pointers are null or valid.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn tsumiki_renderer_draw_image(
    handle: TsumikiRendererHandle,
    client_range: *const TsumikiRectF,
    image_range: *const TsumikiRectF,
) {
    const NAME: &str = "tsumiki_renderer_draw_image";
    unsafe {
        with_renderer(NAME, handle, |r| {
            let (Some(client), Some(image)) = (read(NAME, client_range), read(NAME, image_range)) else {
                return;
            };
            r.draw_image(client, image);
        });
    }
}

/// Draws the filter response graph.
///
/// # Safety
///
/// `handle` is null or a live handle; `client_range` is null or valid.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn tsumiki_renderer_draw_filter_graph(
    handle: TsumikiRendererHandle,
    client_range: *const TsumikiRectF,
    normalized_cutoff: f32,
    resonance: f32,
) {
    const NAME: &str = "tsumiki_renderer_draw_filter_graph";
    unsafe {
        with_renderer(NAME, handle, |r| {
            let Some(client) = read(NAME, client_range) else { return };
            r.draw_filter_graph(client, normalized_cutoff, resonance);
        });
    }
}

/// Draws the modulator waveform graph.
///
/// # Safety
///
/// `handle` is null or a live handle; the pointers are null or valid.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn tsumiki_renderer_draw_modulator_graph(
    handle: TsumikiRendererHandle,
    client_range: *const TsumikiRectF,
    parameters: *const TsumikiGraphParameters,
) {
    const NAME: &str = "tsumiki_renderer_draw_modulator_graph";
    unsafe {
        with_renderer(NAME, handle, |r| {
            let (Some(client), Some(params)) = (read(NAME, client_range), read(NAME, parameters)) else {
                return;
            };
            r.draw_modulator_graph(client, &params);
        });
    }
}

/// Draws the carrier waveform graph, phase-modulated by `fm_params`.
///
/// # Safety
///
/// `handle` is null or a live handle; the pointers are null or valid.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn tsumiki_renderer_draw_carrier_graph(
    handle: TsumikiRendererHandle,
    client_range: *const TsumikiRectF,
    graph_params: *const TsumikiGraphParameters,
    fm_params: *const TsumikiFmParameters,
) {
    const NAME: &str = "tsumiki_renderer_draw_carrier_graph";
    unsafe {
        with_renderer(NAME, handle, |r| {
            let (Some(client), Some(params), Some(fm)) =
                (read(NAME, client_range), read(NAME, graph_params), read(NAME, fm_params))
            else {
                return;
            };
            r.draw_carrier_graph(client, &params, &fm);
        });
    }
}

/// Executes the recorded commands and shows the frame.
///
/// # Safety
///
/// `handle` is null or a live handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn tsumiki_renderer_present(handle: TsumikiRendererHandle) {
    unsafe {
        with_renderer("tsumiki_renderer_present", handle, |r| {
            if let Err(e) = r.present() {
                log::error!("tsumiki_renderer_present: {e}; the host should recreate the renderer");
            }
        });
    }
}

/// Copies a boundary struct out of `ptr`; null is logged and yields `None`.
///
/// # Safety
///
/// `ptr` is null or points to a valid, aligned `T`.
unsafe fn read<T: Copy>(name: &str, ptr: *const T) -> Option<T> {
    // SAFETY: caller contract.
    let value = unsafe { ptr.as_ref() }.copied();
    if value.is_none() {
        log::warn!("{name}: null {} ignored", std::any::type_name::<T>());
    }
    value
}
