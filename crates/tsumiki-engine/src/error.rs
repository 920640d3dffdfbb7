use thiserror::Error;

/// Failures surfaced by the renderer.
///
/// None of these cross the C boundary; the ABI layer logs them and degrades
/// (null handle on creation, no-op otherwise).
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("native surface pointer is null")]
    NullSurface,

    #[error("invalid size {width}x{height}")]
    InvalidSize { width: i64, height: i64 },

    #[error("native surfaces are not supported on this platform")]
    UnsupportedPlatform,

    #[error("native handle rejected: {0}")]
    Handle(#[from] raw_window_handle::HandleError),

    #[error("no suitable GPU adapter: {0}")]
    NoAdapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to create GPU device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("failed to bind surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("surface reports no supported formats")]
    NoSurfaceFormat,

    #[error("shader library failed to compile: {0}")]
    ShaderCompile(String),

    #[error("shader library has no entry point `{0}`")]
    MissingEntryPoint(&'static str),

    #[error("unknown tab page value {0}")]
    InvalidTabPage(i32),

    #[error("texture upload rejected: {0}")]
    TextureUpload(String),

    #[error("GPU out of memory")]
    OutOfMemory,
}
