use std::borrow::Cow;

use crate::RendererError;

/// WGSL source of the built-in library.
pub const BUILTIN_WGSL: &str = include_str!("shaders/tsumiki.wgsl");

/// Entry points every library must export.
pub const ENTRY_POINTS: [&str; 6] = [
    "vs_image",
    "fs_image",
    "vs_graph",
    "fs_graph",
    "vs_present",
    "fs_present",
];

/// A validated WGSL shader library.
#[derive(Debug, Clone)]
pub struct ShaderLibrary {
    source: Cow<'static, str>,
}

impl ShaderLibrary {
    /// The library compiled into the crate.
    pub fn builtin() -> Self {
        Self { source: Cow::Borrowed(BUILTIN_WGSL) }
    }

    /// Resolves host-supplied library bytes: `None` or empty selects the
    /// built-in library, anything else must be valid UTF-8 WGSL.
    pub fn from_bytes(bytes: Option<&[u8]>) -> Result<Self, RendererError> {
        match bytes {
            None | Some([]) => Ok(Self::builtin()),
            Some(bytes) => {
                let source = std::str::from_utf8(bytes)
                    .map_err(|e| RendererError::ShaderCompile(format!("not UTF-8: {e}")))?;
                Self::from_wgsl(source.to_owned())
            }
        }
    }

    /// Parses and validates `source`, and checks the required entry points.
    pub fn from_wgsl(source: String) -> Result<Self, RendererError> {
        validate(&source)?;
        Ok(Self { source: Cow::Owned(source) })
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self.source, Cow::Borrowed(_))
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn create_module(&self, device: &wgpu::Device) -> wgpu::ShaderModule {
        device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("tsumiki shader library"),
            source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(self.source())),
        })
    }
}

fn validate(source: &str) -> Result<(), RendererError> {
    let module = naga::front::wgsl::parse_str(source)
        .map_err(|e| RendererError::ShaderCompile(e.emit_to_string(source)))?;

    naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    )
    .validate(&module)
    .map_err(|e| RendererError::ShaderCompile(e.as_inner().to_string()))?;

    for name in ENTRY_POINTS {
        if !module.entry_points.iter().any(|ep| ep.name == name) {
            return Err(RendererError::MissingEntryPoint(name));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_library_validates() {
        validate(BUILTIN_WGSL).unwrap();
        assert!(ShaderLibrary::builtin().is_builtin());
    }

    #[test]
    fn empty_bytes_select_builtin() {
        assert!(ShaderLibrary::from_bytes(None).unwrap().is_builtin());
        assert!(ShaderLibrary::from_bytes(Some(&[])).unwrap().is_builtin());
    }

    #[test]
    fn custom_library_is_kept() {
        let lib = ShaderLibrary::from_bytes(Some(BUILTIN_WGSL.as_bytes())).unwrap();
        assert!(!lib.is_builtin());
        assert_eq!(lib.source(), BUILTIN_WGSL);
    }

    #[test]
    fn garbage_fails_to_compile() {
        let err = ShaderLibrary::from_bytes(Some(b"fn {{ nope")).unwrap_err();
        assert!(matches!(err, RendererError::ShaderCompile(_)));
    }

    #[test]
    fn invalid_utf8_fails() {
        let err = ShaderLibrary::from_bytes(Some(&[0xff, 0xfe, 0x00])).unwrap_err();
        assert!(matches!(err, RendererError::ShaderCompile(_)));
    }

    #[test]
    fn missing_entry_point_is_reported() {
        let source = BUILTIN_WGSL.replace("fn fs_present", "fn fs_blit");
        let err = ShaderLibrary::from_wgsl(source).unwrap_err();
        assert!(matches!(err, RendererError::MissingEntryPoint("fs_present")));
    }
}
