//! Raw Pixel Formats
//!
//! Uncompressed pixel layouts a cubicmap can arrive in, and their expansion to
//! per-pixel RGBA. 16-bit layouts are read as native-endian `u16` words.

use crate::error::{MazeError, MazeResult};

/// RGBA colour, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::new(255, 255, 255, 255);
    pub const BLACK: Color = Color::new(0, 0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Normalized `[r, g, b, a]` for shader uniforms.
    pub fn to_array_f32(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }
}

/// Uncompressed pixel layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// 8 bpp, no alpha
    Grayscale,
    /// 16 bpp, gray + alpha bytes
    GrayAlpha,
    /// 16 bpp
    R5G6B5,
    /// 24 bpp
    R8G8B8,
    /// 16 bpp, 1-bit alpha
    R5G5B5A1,
    /// 16 bpp, 4-bit alpha
    R4G4B4A4,
    /// 32 bpp
    R8G8B8A8,
}

// Integer quotients, so a full 5-bit channel expands to 248 rather than 255.
const SCALE_5BIT: u16 = 255 / 31;
const SCALE_6BIT: u16 = 255 / 63;
const SCALE_4BIT: u16 = 255 / 15;

impl PixelFormat {
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Grayscale => 1,
            PixelFormat::GrayAlpha
            | PixelFormat::R5G6B5
            | PixelFormat::R5G5B5A1
            | PixelFormat::R4G4B4A4 => 2,
            PixelFormat::R8G8B8 => 3,
            PixelFormat::R8G8B8A8 => 4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PixelFormat::Grayscale => "GRAYSCALE",
            PixelFormat::GrayAlpha => "GRAY_ALPHA",
            PixelFormat::R5G6B5 => "R5G6B5",
            PixelFormat::R8G8B8 => "R8G8B8",
            PixelFormat::R5G5B5A1 => "R5G5B5A1",
            PixelFormat::R4G4B4A4 => "R4G4B4A4",
            PixelFormat::R8G8B8A8 => "R8G8B8A8",
        }
    }

    /// Decode a single pixel from exactly `bytes_per_pixel()` bytes.
    fn decode_pixel(self, bytes: &[u8]) -> Color {
        match self {
            PixelFormat::Grayscale => Color::new(bytes[0], bytes[0], bytes[0], 255),
            PixelFormat::GrayAlpha => Color::new(bytes[0], bytes[0], bytes[0], bytes[1]),
            PixelFormat::R5G6B5 => {
                let p = u16::from_ne_bytes([bytes[0], bytes[1]]);
                Color::new(
                    expand((p >> 11) & 0x1f, SCALE_5BIT),
                    expand((p >> 5) & 0x3f, SCALE_6BIT),
                    expand(p & 0x1f, SCALE_5BIT),
                    255,
                )
            }
            PixelFormat::R5G5B5A1 => {
                let p = u16::from_ne_bytes([bytes[0], bytes[1]]);
                Color::new(
                    expand((p >> 11) & 0x1f, SCALE_5BIT),
                    expand((p >> 6) & 0x1f, SCALE_5BIT),
                    expand((p >> 1) & 0x1f, SCALE_5BIT),
                    if p & 0x1 != 0 { 255 } else { 0 },
                )
            }
            PixelFormat::R4G4B4A4 => {
                let p = u16::from_ne_bytes([bytes[0], bytes[1]]);
                Color::new(
                    expand((p >> 12) & 0xf, SCALE_4BIT),
                    expand((p >> 8) & 0xf, SCALE_4BIT),
                    expand((p >> 4) & 0xf, SCALE_4BIT),
                    expand(p & 0xf, SCALE_4BIT),
                )
            }
            PixelFormat::R8G8B8 => Color::new(bytes[0], bytes[1], bytes[2], 255),
            PixelFormat::R8G8B8A8 => Color::new(bytes[0], bytes[1], bytes[2], bytes[3]),
        }
    }

    /// Expand `width * height` pixels of raw data to RGBA.
    ///
    /// Trailing bytes beyond the last pixel are ignored.
    pub fn decode(self, data: &[u8], width: u32, height: u32) -> MazeResult<Vec<Color>> {
        let count = width as usize * height as usize;
        let bpp = self.bytes_per_pixel();
        let expected = count * bpp;
        if data.len() < expected {
            return Err(MazeError::PixelData {
                format: self.name(),
                width,
                height,
                expected,
                actual: data.len(),
            });
        }

        Ok(data[..expected]
            .chunks_exact(bpp)
            .map(|px| self.decode_pixel(px))
            .collect())
    }
}

#[inline]
fn expand(value: u16, scale: u16) -> u8 {
    (value * scale) as u8
}
