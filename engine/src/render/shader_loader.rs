//! Shader Loading Utilities
//!
//! The maze shader is embedded at compile time; a runtime file can replace it
//! for iteration without a rebuild.

use std::path::Path;

use log::info;

use crate::error::{MazeError, MazeResult};

/// Shader source that can be either embedded at compile time or loaded at runtime.
#[derive(Debug, Clone)]
pub enum ShaderSource {
    /// Embedded shader source (no file I/O at runtime)
    Embedded(&'static str),
    /// Runtime-loaded shader source
    Runtime(String),
}

impl ShaderSource {
    pub fn as_str(&self) -> &str {
        match self {
            ShaderSource::Embedded(s) => s,
            ShaderSource::Runtime(s) => s.as_str(),
        }
    }

    /// Runtime file when `path` is given, the embedded maze shader otherwise.
    pub fn resolve(path: Option<&Path>) -> MazeResult<Self> {
        match path {
            Some(path) => load_shader_file(path),
            None => Ok(ShaderSource::Embedded(embedded::CUBICMAP)),
        }
    }
}

/// Load a WGSL shader from the filesystem at runtime.
pub fn load_shader_file(path: impl AsRef<Path>) -> MazeResult<ShaderSource> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path).map_err(|e| MazeError::io(path, e))?;
    info!("[Shader] Loaded {}", path.display());
    Ok(ShaderSource::Runtime(source))
}

/// Create a wgpu shader module from the given source.
pub fn create_shader_module(
    device: &wgpu::Device,
    label: &str,
    source: &ShaderSource,
) -> wgpu::ShaderModule {
    device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(source.as_str().into()),
    })
}

/// Shaders compiled into the binary.
pub mod embedded {
    /// Textured, tinted cubicmap shader (`vs_main` / `fs_main`).
    pub const CUBICMAP: &str = include_str!("../../../shaders/cubicmap.wgsl");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shader_source_runtime() {
        let source = ShaderSource::Runtime("fn main() {}".to_string());
        assert_eq!(source.as_str(), "fn main() {}");
    }

    #[test]
    fn test_resolve_defaults_to_embedded() {
        let source = ShaderSource::resolve(None).unwrap();
        assert!(matches!(source, ShaderSource::Embedded(_)));
        assert!(source.as_str().contains("fn vs_main"));
        assert!(source.as_str().contains("fn fs_main"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_shader_file("does/not/exist.wgsl").unwrap_err();
        assert!(matches!(err, MazeError::Io { .. }));
    }
}
