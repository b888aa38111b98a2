//! Atlas Texture
//!
//! The maze samples a single RGBA texture split into a 2x2 grid of tiles:
//! side walls on the top row, top and bottom faces on the bottom row. When
//! the atlas file cannot be loaded a generated placeholder with four flat
//! tiles stands in so the maze stays navigable.

use std::path::Path;

use log::{info, warn};

use crate::error::{MazeError, MazeResult};
use crate::world::Color;

/// Edge length of each tile in the generated placeholder.
pub const PLACEHOLDER_TILE: u32 = 32;

/// Placeholder tile colours: right/front, left/back, top, bottom.
const PLACEHOLDER_COLORS: [Color; 4] = [
    Color::new(170, 120, 80, 255),
    Color::new(140, 95, 60, 255),
    Color::new(90, 90, 100, 255),
    Color::new(60, 60, 60, 255),
];

/// CPU-side RGBA8 image ready for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct AtlasImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl AtlasImage {
    pub fn load(path: impl AsRef<Path>) -> MazeResult<Self> {
        let path = path.as_ref();
        let image = image::open(path)
            .map_err(|source| MazeError::Image {
                path: path.to_path_buf(),
                source,
            })?
            .to_rgba8();
        let (width, height) = image.dimensions();
        info!("[Atlas] Loaded {} ({}x{})", path.display(), width, height);
        Ok(Self {
            width,
            height,
            rgba: image.into_raw(),
        })
    }

    /// 2x2-tile stand-in atlas.
    pub fn placeholder() -> Self {
        let size = PLACEHOLDER_TILE * 2;
        let mut rgba = Vec::with_capacity((size * size * 4) as usize);
        for y in 0..size {
            for x in 0..size {
                let tile = (y / PLACEHOLDER_TILE) * 2 + x / PLACEHOLDER_TILE;
                let mut c = PLACEHOLDER_COLORS[tile as usize];
                // Darken tile borders so cell edges stay readable
                let (tx, ty) = (x % PLACEHOLDER_TILE, y % PLACEHOLDER_TILE);
                if tx == 0 || ty == 0 || tx == PLACEHOLDER_TILE - 1 || ty == PLACEHOLDER_TILE - 1 {
                    c = Color::new(c.r / 2, c.g / 2, c.b / 2, 255);
                }
                rgba.extend_from_slice(&[c.r, c.g, c.b, c.a]);
            }
        }
        Self {
            width: size,
            height: size,
            rgba,
        }
    }

    /// Load the atlas, degrading to [`placeholder`](Self::placeholder) on failure.
    pub fn load_or_placeholder(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(image) => image,
            Err(e) => {
                warn!("[Atlas] {e}; using placeholder atlas");
                Self::placeholder()
            }
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y * self.width + x) * 4) as usize;
        let p = &self.rgba[i..i + 4];
        Some(Color::new(p[0], p[1], p[2], p[3]))
    }
}

/// Atlas uploaded to the GPU with its view and sampler.
pub struct AtlasTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
}

impl AtlasTexture {
    pub fn upload(device: &wgpu::Device, queue: &wgpu::Queue, image: &AtlasImage) -> Self {
        let size = wgpu::Extent3d {
            width: image.width,
            height: image.height,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Maze Atlas"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &image.rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * image.width),
                rows_per_image: Some(image.height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Maze Atlas Sampler"),
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::FilterMode::Nearest,
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
        }
    }
}
