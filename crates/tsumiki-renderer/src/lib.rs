//! C ABI over `tsumiki-engine` for the managed editor host.
//!
//! The declarations are mirrored in `include/tsumiki_renderer.h`.
//!
//! # Symbol prefix
//!
//! - Functions: `tsumiki_renderer_*`
//! - Types: `Tsumiki*`
//!
//! # Errors
//!
//! No error codes cross the boundary. Failures are logged; `create` returns
//! null, every other call becomes a no-op. Panics are caught at the boundary.
//!
//! # Thread safety
//!
//! **NOT thread-safe.** All calls on the same handle must be serialized by the
//! caller (the host's UI thread).

pub mod functions;
pub mod types;

mod panic_guard;

pub use functions::*;
pub use types::*;
