//! Error Types
//!
//! A single error enum covers map loading, pixel decoding, configuration and
//! GPU/window initialization. Library code returns [`MazeResult`]; only the
//! binary decides that an error is fatal.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the engine.
pub type MazeResult<T> = Result<T, MazeError>;

#[derive(Debug, Error)]
pub enum MazeError {
    /// The image crate could not open or decode a file.
    #[error("failed to load image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Raw pixel buffer is shorter than `width * height * bytes_per_pixel`.
    #[error("pixel data too short for {width}x{height} {format}: expected {expected} bytes, got {actual}")]
    PixelData {
        format: &'static str,
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    /// A cubicmap must be at least one cell wide and tall.
    #[error("cubicmap has no cells ({width}x{height})")]
    EmptyGrid { width: u32, height: u32 },

    /// Strict palette mode found pixels that are neither solid nor open.
    #[error("{count} cubicmap pixels are neither white nor black (first at cell {first:?})")]
    UnclassifiedPixels { count: usize, first: (u32, u32) },

    #[error("cube size must be positive, got {0}")]
    InvalidCubeSize(f32),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create window surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to create GPU device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("render error: {0}")]
    Render(String),

    #[error("event loop error: {0}")]
    EventLoop(String),
}

impl MazeError {
    /// Wrap an I/O error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        MazeError::Io {
            path: path.into(),
            source,
        }
    }
}
