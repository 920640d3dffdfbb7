use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};

use tsumiki_engine::Renderer;

use crate::types::TsumikiRendererHandle;

/// Runs `f`, turning a panic into `fallback` so it never unwinds into the host.
pub(crate) fn guard<T>(name: &'static str, fallback: T, f: impl FnOnce() -> T) -> T {
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => value,
        Err(payload) => {
            log::error!("{name}: panicked: {}", panic_message(payload.as_ref()));
            fallback
        }
    }
}

/// Runs `f` on the renderer behind `handle`; a null handle is ignored.
///
/// If `f` panics, the commands recorded for the current frame are discarded
/// so the next present starts from a clean list. The canvas and the GPU
/// objects are kept as they were.
///
/// # Safety
///
/// `handle` is null or a live handle from `tsumiki_renderer_create` that no
/// other call is using.
pub(crate) unsafe fn with_renderer(
    name: &'static str,
    handle: TsumikiRendererHandle,
    f: impl FnOnce(&mut Renderer),
) {
    if handle.is_null() {
        log::warn!("{name}: null handle ignored");
        return;
    }

    let completed = guard(name, false, || {
        // SAFETY: non-null and exclusively ours for this call (caller contract).
        let renderer = unsafe { &mut (*handle).inner };
        f(renderer);
        true
    });

    if !completed {
        guard(name, (), || {
            // SAFETY: as above; the borrow taken inside `f` ended with the unwind.
            let renderer = unsafe { &mut (*handle).inner };
            renderer.discard_frame();
        });
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "non-string panic payload"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_values_through() {
        assert_eq!(guard("test", 0, || 7), 7);
    }

    #[test]
    fn panics_become_the_fallback() {
        let value = guard("test", -1, || -> i32 { panic!("boom") });
        assert_eq!(value, -1);
    }

    #[test]
    fn panic_mid_frame_discards_recorded_commands() {
        use tsumiki_engine::coords::RectF;
        use tsumiki_engine::device::SurfaceSize;
        use tsumiki_engine::RendererConfig;

        use crate::types::TsumikiRenderer;

        let renderer = match Renderer::headless(SurfaceSize::new(16, 16), None, RendererConfig::default()) {
            Ok(r) => r,
            Err(e) => {
                if std::env::var_os("TSUMIKI_REQUIRE_GPU").is_some() {
                    panic!("TSUMIKI_REQUIRE_GPU is set but no GPU is usable: {e}");
                }
                eprintln!("test skipped: no usable GPU ({e})");
                return;
            }
        };
        let handle = Box::into_raw(Box::new(TsumikiRenderer { inner: renderer }));

        unsafe {
            with_renderer("test", handle, |r| r.clear());
            with_renderer("test", handle, |r| {
                r.draw_image(RectF::unit(), RectF::unit());
                panic!("mid-frame failure");
            });
            assert_eq!((*handle).inner.pending_commands(), 0);

            // The handle stays usable.
            with_renderer("test", handle, |r| r.draw_image(RectF::unit(), RectF::unit()));
            assert_eq!((*handle).inner.pending_commands(), 1);

            drop(Box::from_raw(handle));
        }
    }

    #[test]
    fn extracts_panic_messages() {
        let payload: Box<dyn Any + Send> = Box::new(String::from("formatted"));
        assert_eq!(panic_message(payload.as_ref()), "formatted");
        let payload: Box<dyn Any + Send> = Box::new(42u8);
        assert_eq!(panic_message(payload.as_ref()), "non-string panic payload");
    }
}
