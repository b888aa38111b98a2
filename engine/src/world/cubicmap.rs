//! Cubicmap Pixel Grid
//!
//! A cubicmap is a small image whose pixels encode a maze layout: white pixels
//! are wall cells, black pixels are walkable floor. The grid is row-major with
//! the origin at the top-left; pixel column `x` maps to world X and pixel row
//! `z` maps to world Z.
//!
//! The grid is immutable once loaded and is shared (read-only) by the mesh
//! generator and the collision resolver.

use std::path::Path;

use image::DynamicImage;
use log::{info, warn};

use super::pixel_format::{Color, PixelFormat};
use crate::error::{MazeError, MazeResult};

/// How a single cell of the maze behaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
    /// r = g = b = 255: extruded into a full cube and collidable
    Solid,
    /// r = g = b = 0: floor and ceiling quads only
    Open,
    /// Any other colour: produces no geometry and never collides
    Unclassified,
}

impl CellKind {
    pub fn classify(color: Color) -> Self {
        match (color.r, color.g, color.b) {
            (255, 255, 255) => CellKind::Solid,
            (0, 0, 0) => CellKind::Open,
            _ => CellKind::Unclassified,
        }
    }
}

/// Immutable grid of RGBA pixels, one per maze cell.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl PixelGrid {
    /// Build a grid from already expanded RGBA pixels.
    pub fn new(width: u32, height: u32, pixels: Vec<Color>) -> MazeResult<Self> {
        if width == 0 || height == 0 {
            return Err(MazeError::EmptyGrid { width, height });
        }
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(MazeError::PixelData {
                format: "RGBA",
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build a grid from raw bytes in one of the supported [`PixelFormat`]s.
    pub fn from_raw(data: &[u8], width: u32, height: u32, format: PixelFormat) -> MazeResult<Self> {
        if width == 0 || height == 0 {
            return Err(MazeError::EmptyGrid { width, height });
        }
        let pixels = format.decode(data, width, height)?;
        Self::new(width, height, pixels)
    }

    /// Load a cubicmap image from disk.
    pub fn load(path: impl AsRef<Path>) -> MazeResult<Self> {
        let path = path.as_ref();
        let image = image::open(path).map_err(|source| MazeError::Image {
            path: path.to_path_buf(),
            source,
        })?;
        let grid = Self::from_image(&image)?;
        info!(
            "[Cubicmap] Loaded {} ({}x{})",
            path.display(),
            grid.width,
            grid.height
        );
        Ok(grid)
    }

    /// Convert a decoded image, keeping its native layout where one matches.
    pub fn from_image(image: &DynamicImage) -> MazeResult<Self> {
        let (width, height) = (image.width(), image.height());
        match image {
            DynamicImage::ImageLuma8(buf) => {
                Self::from_raw(buf.as_raw(), width, height, PixelFormat::Grayscale)
            }
            DynamicImage::ImageLumaA8(buf) => {
                Self::from_raw(buf.as_raw(), width, height, PixelFormat::GrayAlpha)
            }
            DynamicImage::ImageRgb8(buf) => {
                Self::from_raw(buf.as_raw(), width, height, PixelFormat::R8G8B8)
            }
            DynamicImage::ImageRgba8(buf) => {
                Self::from_raw(buf.as_raw(), width, height, PixelFormat::R8G8B8A8)
            }
            other => {
                warn!(
                    "[Cubicmap] Colour type {:?} has no raw pixel format, converting to RGBA8",
                    other.color()
                );
                let rgba = other.to_rgba8();
                Self::from_raw(rgba.as_raw(), width, height, PixelFormat::R8G8B8A8)
            }
        }
    }

    /// Build a grid from text rows: `#` is a wall, `.` is floor and any other
    /// character becomes a mid-gray (unclassified) pixel.
    pub fn from_layout(rows: &[&str]) -> MazeResult<Self> {
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |r| r.chars().count()) as u32;
        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for row in rows {
            if row.chars().count() as u32 != width {
                return Err(MazeError::Config(format!(
                    "layout rows must all be {width} cells wide"
                )));
            }
            pixels.extend(row.chars().map(|c| match c {
                '#' => Color::WHITE,
                '.' => Color::BLACK,
                _ => Color::new(128, 128, 128, 255),
            }));
        }
        Self::new(width, height, pixels)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Pixel at `(x, z)`, or `None` outside the grid.
    pub fn get(&self, x: i64, z: i64) -> Option<Color> {
        if x < 0 || z < 0 || x >= self.width as i64 || z >= self.height as i64 {
            return None;
        }
        Some(self.pixels[z as usize * self.width as usize + x as usize])
    }

    /// Cell classification at `(x, z)`, or `None` outside the grid.
    pub fn cell(&self, x: i64, z: i64) -> Option<CellKind> {
        self.get(x, z).map(CellKind::classify)
    }

    #[inline]
    pub fn is_solid(&self, x: i64, z: i64) -> bool {
        self.cell(x, z) == Some(CellKind::Solid)
    }

    /// Whether a solid cell's face toward `(x, z)` is visible: the neighbour is
    /// past the map edge or is open floor.
    #[inline]
    pub fn exposes_face(&self, x: i64, z: i64) -> bool {
        matches!(self.cell(x, z), None | Some(CellKind::Open))
    }

    /// Iterate `(x, z, kind)` in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32, CellKind)> + '_ {
        let width = self.width;
        self.pixels.iter().enumerate().map(move |(i, &color)| {
            let i = i as u32;
            (i % width, i / width, CellKind::classify(color))
        })
    }

    pub fn count(&self, kind: CellKind) -> usize {
        self.cells().filter(|&(_, _, k)| k == kind).count()
    }

    /// Report pixels that are neither solid nor open.
    ///
    /// With `strict` set they are an error; otherwise a warning is logged and
    /// the cells are left as empty space.
    pub fn check_palette(&self, strict: bool) -> MazeResult<usize> {
        let mut unclassified = self
            .cells()
            .filter(|&(_, _, kind)| kind == CellKind::Unclassified);
        let Some((fx, fz, _)) = unclassified.next() else {
            return Ok(0);
        };
        let count = 1 + unclassified.count();
        if strict {
            return Err(MazeError::UnclassifiedPixels {
                count,
                first: (fx, fz),
            });
        }
        warn!(
            "[Cubicmap] {} pixels are neither white nor black (first at {}, {}); they produce no geometry",
            count, fx, fz
        );
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(CellKind::classify(Color::WHITE), CellKind::Solid);
        assert_eq!(CellKind::classify(Color::new(255, 255, 255, 0)), CellKind::Solid);
        assert_eq!(CellKind::classify(Color::BLACK), CellKind::Open);
        assert_eq!(CellKind::classify(Color::new(0, 0, 0, 0)), CellKind::Open);
        assert_eq!(
            CellKind::classify(Color::new(255, 0, 0, 255)),
            CellKind::Unclassified
        );
    }

    #[test]
    fn test_empty_grid_rejected() {
        assert!(matches!(
            PixelGrid::new(0, 3, vec![]),
            Err(MazeError::EmptyGrid { .. })
        ));
        assert!(matches!(
            PixelGrid::from_raw(&[], 2, 0, PixelFormat::Grayscale),
            Err(MazeError::EmptyGrid { .. })
        ));
    }

    #[test]
    fn test_pixel_count_must_match() {
        let err = PixelGrid::new(2, 2, vec![Color::BLACK; 3]).unwrap_err();
        assert!(matches!(err, MazeError::PixelData { expected: 4, actual: 3, .. }));
    }

    #[test]
    fn test_row_major_lookup() {
        let grid = PixelGrid::from_layout(&["#.", ".."]).unwrap();
        assert_eq!(grid.width(), 2);
        assert_eq!(grid.height(), 2);
        assert!(grid.is_solid(0, 0));
        assert!(!grid.is_solid(1, 0));
        assert_eq!(grid.cell(0, 1), Some(CellKind::Open));
        assert_eq!(grid.cell(2, 0), None);
        assert_eq!(grid.cell(-1, 0), None);
    }

    #[test]
    fn test_exposes_face() {
        let grid = PixelGrid::from_layout(&["#.x"]).unwrap();
        // Map edge and open cells expose faces
        assert!(grid.exposes_face(-1, 0));
        assert!(grid.exposes_face(1, 0));
        // Solid and unclassified neighbours hide them
        assert!(!grid.exposes_face(0, 0));
        assert!(!grid.exposes_face(2, 0));
    }

    #[test]
    fn test_cells_iterates_row_major() {
        let grid = PixelGrid::from_layout(&["#.", ".#"]).unwrap();
        let cells: Vec<_> = grid.cells().collect();
        assert_eq!(cells[0], (0, 0, CellKind::Solid));
        assert_eq!(cells[1], (1, 0, CellKind::Open));
        assert_eq!(cells[2], (0, 1, CellKind::Open));
        assert_eq!(cells[3], (1, 1, CellKind::Solid));
        assert_eq!(grid.count(CellKind::Solid), 2);
    }

    #[test]
    fn test_check_palette() {
        let clean = PixelGrid::from_layout(&["#."]).unwrap();
        assert_eq!(clean.check_palette(true).unwrap(), 0);

        let dirty = PixelGrid::from_layout(&["#?", "?."]).unwrap();
        assert_eq!(dirty.check_palette(false).unwrap(), 2);
        match dirty.check_palette(true) {
            Err(MazeError::UnclassifiedPixels { count, first }) => {
                assert_eq!(count, 2);
                assert_eq!(first, (1, 0));
            }
            other => panic!("expected UnclassifiedPixels, got {other:?}"),
        }
    }

    #[test]
    fn test_from_image_grayscale() {
        let img = image::GrayImage::from_raw(2, 1, vec![255, 0]).unwrap();
        let grid = PixelGrid::from_image(&DynamicImage::ImageLuma8(img)).unwrap();
        assert!(grid.is_solid(0, 0));
        assert_eq!(grid.cell(1, 0), Some(CellKind::Open));
    }

    #[test]
    fn test_from_image_converts_other_types() {
        let img = image::ImageBuffer::<image::Rgb<u16>, _>::from_raw(1, 1, vec![65535u16, 65535, 65535])
            .unwrap();
        let grid = PixelGrid::from_image(&DynamicImage::ImageRgb16(img)).unwrap();
        assert!(grid.is_solid(0, 0));
    }
}
