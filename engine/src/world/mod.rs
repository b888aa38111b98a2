//! World Module
//!
//! The maze layout: cubicmap pixel grid, cell classification and raw pixel
//! format decoding.
//!
//! ## Units
//! One cell is `cube_size` world units wide (1.0 by default). Cell `(x, z)`
//! covers `[x - 0.5, x + 0.5] * cube_size` on X and the same on Z, offset by
//! the map position.

pub mod cubicmap;
pub mod pixel_format;

pub use cubicmap::{CellKind, PixelGrid};
pub use pixel_format::{Color, PixelFormat};
