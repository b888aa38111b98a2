//! Cubicmap Mesh Generation
//!
//! Extrudes a [`PixelGrid`] into a flat-shaded triangle soup:
//!
//! - **Solid** cells become cubes. Top and bottom faces are always emitted;
//!   each side face is emitted only when the neighbour on that side is open
//!   floor or past the map edge, so faces shared by two walls never exist.
//! - **Open** cells get a floor quad (facing up) and a ceiling quad (facing
//!   down) and no walls.
//! - **Unclassified** cells emit nothing.
//!
//! Every face is two triangles with six unshared vertices, one of six axis
//! normals and one of six UV rectangles in a single 2x2 texture atlas, so the
//! whole maze draws with one texture and one draw call. Triangles wind
//! counter-clockwise when seen from the side their normal points to.
//!
//! # Example
//!
//! ```ignore
//! let grid = PixelGrid::load("resources/map04.png")?;
//! let mesh = generate_cubicmap_mesh(&grid, 1.0)?;
//! let vertices = mesh.interleaved(); // ready for a vertex buffer
//! ```

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};
use log::info;

use crate::error::{MazeError, MazeResult};
use crate::world::{CellKind, PixelGrid};

/// Upper bound of triangles a single cell can produce (a fully exposed cube).
pub const MAX_TRIANGLES_PER_CELL: usize = 12;

const VERTICES_PER_FACE: usize = 6;

/// Sub-rectangle of the texture atlas, in normalized UV space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtlasRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl AtlasRect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    fn top_left(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    #[inline]
    fn top_right(&self) -> Vec2 {
        Vec2::new(self.x + self.width, self.y)
    }

    #[inline]
    fn bottom_left(&self) -> Vec2 {
        Vec2::new(self.x, self.y + self.height)
    }

    #[inline]
    fn bottom_right(&self) -> Vec2 {
        Vec2::new(self.x + self.width, self.y + self.height)
    }
}

/// Atlas layout: side walls share the top row, top and bottom faces the
/// bottom row.
pub mod atlas {
    use super::AtlasRect;

    pub const RIGHT: AtlasRect = AtlasRect::new(0.0, 0.0, 0.5, 0.5);
    pub const LEFT: AtlasRect = AtlasRect::new(0.5, 0.0, 0.5, 0.5);
    pub const FRONT: AtlasRect = AtlasRect::new(0.0, 0.0, 0.5, 0.5);
    pub const BACK: AtlasRect = AtlasRect::new(0.5, 0.0, 0.5, 0.5);
    pub const TOP: AtlasRect = AtlasRect::new(0.0, 0.5, 0.5, 0.5);
    pub const BOTTOM: AtlasRect = AtlasRect::new(0.5, 0.5, 0.5, 0.5);
}

/// The six faces of a cube cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    /// +Y
    Top,
    /// -Y
    Bottom,
    /// +Z, toward row `z + 1`
    Front,
    /// -Z, toward row `z - 1`
    Back,
    /// +X, toward column `x + 1`
    Right,
    /// -X, toward column `x - 1`
    Left,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::Top,
        Face::Bottom,
        Face::Front,
        Face::Back,
        Face::Right,
        Face::Left,
    ];

    /// Outward unit normal.
    pub fn normal(self) -> Vec3 {
        match self {
            Face::Top => Vec3::Y,
            Face::Bottom => Vec3::NEG_Y,
            Face::Front => Vec3::Z,
            Face::Back => Vec3::NEG_Z,
            Face::Right => Vec3::X,
            Face::Left => Vec3::NEG_X,
        }
    }

    /// Grid offset `(dx, dz)` of the neighbour this face looks at, for side faces.
    pub fn neighbour_offset(self) -> Option<(i64, i64)> {
        match self {
            Face::Front => Some((0, 1)),
            Face::Back => Some((0, -1)),
            Face::Right => Some((1, 0)),
            Face::Left => Some((-1, 0)),
            Face::Top | Face::Bottom => None,
        }
    }
}

/// Interleaved vertex uploaded to the GPU.
///
/// Layout (32 bytes):
/// - position: vec3<f32> at @location(0)
/// - texcoord: vec2<f32> at @location(1)
/// - normal: vec3<f32> at @location(2)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub texcoord: [f32; 2],
    pub normal: [f32; 3],
}

static_assertions::assert_eq_size!(MeshVertex, [u8; 32]);

impl MeshVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 3] = [
        wgpu::VertexAttribute {
            format: wgpu::VertexFormat::Float32x3,
            offset: 0,
            shader_location: 0,
        },
        wgpu::VertexAttribute {
            format: wgpu::VertexFormat::Float32x2,
            offset: 12,
            shader_location: 1,
        },
        wgpu::VertexAttribute {
            format: wgpu::VertexFormat::Float32x3,
            offset: 20,
            shader_location: 2,
        },
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Non-indexed triangle list in separate attribute streams.
///
/// `positions` and `normals` hold 3 floats per vertex, `texcoords` 2, and the
/// vertex count is always a multiple of 3.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CubicmapMesh {
    pub positions: Vec<f32>,
    pub normals: Vec<f32>,
    pub texcoords: Vec<f32>,
}

impl CubicmapMesh {
    fn with_vertex_capacity(vertices: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertices * 3),
            normals: Vec::with_capacity(vertices * 3),
            texcoords: Vec::with_capacity(vertices * 2),
        }
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.vertex_count() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn position(&self, i: usize) -> Vec3 {
        Vec3::from_slice(&self.positions[i * 3..i * 3 + 3])
    }

    pub fn normal(&self, i: usize) -> Vec3 {
        Vec3::from_slice(&self.normals[i * 3..i * 3 + 3])
    }

    pub fn texcoord(&self, i: usize) -> Vec2 {
        Vec2::from_slice(&self.texcoords[i * 2..i * 2 + 2])
    }

    /// Interleave the attribute streams for a single vertex buffer.
    pub fn interleaved(&self) -> Vec<MeshVertex> {
        (0..self.vertex_count())
            .map(|i| MeshVertex {
                position: self.position(i).to_array(),
                texcoord: self.texcoord(i).to_array(),
                normal: self.normal(i).to_array(),
            })
            .collect()
    }

    fn push_face(&mut self, corners: [Vec3; 6], normal: Vec3, uvs: [Vec2; 6]) {
        for (corner, uv) in corners.iter().zip(uvs.iter()) {
            self.positions.extend_from_slice(&corner.to_array());
            self.normals.extend_from_slice(&normal.to_array());
            self.texcoords.extend_from_slice(&uv.to_array());
        }
    }
}

/// The eight corners of the cube at cell `(x, z)`.
///
/// `c[0..4]` are the top ring, `c[4..8]` the bottom ring.
struct CellCorners([Vec3; 8]);

impl CellCorners {
    fn new(x: u32, z: u32, size: f32) -> Self {
        let (x, z) = (x as f32, z as f32);
        let (x0, x1) = (size * (x - 0.5), size * (x + 0.5));
        let (z0, z1) = (size * (z - 0.5), size * (z + 0.5));
        let top = size;
        Self([
            Vec3::new(x0, top, z0),
            Vec3::new(x0, top, z1),
            Vec3::new(x1, top, z1),
            Vec3::new(x1, top, z0),
            Vec3::new(x1, 0.0, z0),
            Vec3::new(x0, 0.0, z0),
            Vec3::new(x0, 0.0, z1),
            Vec3::new(x1, 0.0, z1),
        ])
    }

    /// Pick six corners by 1-based index, top ring 1..=4, bottom ring 5..=8.
    #[inline]
    fn pick(&self, idx: [usize; 6]) -> [Vec3; 6] {
        idx.map(|i| self.0[i - 1])
    }
}

/// Number of faces the generator will emit for `grid`.
pub fn count_faces(grid: &PixelGrid) -> usize {
    grid.cells()
        .map(|(x, z, kind)| match kind {
            CellKind::Solid => {
                2 + Face::ALL
                    .iter()
                    .filter_map(|face| face.neighbour_offset())
                    .filter(|&(dx, dz)| grid.exposes_face(x as i64 + dx, z as i64 + dz))
                    .count()
            }
            CellKind::Open => 2,
            CellKind::Unclassified => 0,
        })
        .sum()
}

/// Extrude a cubicmap into a mesh. Deterministic for a given grid and size.
pub fn generate_cubicmap_mesh(grid: &PixelGrid, cube_size: f32) -> MazeResult<CubicmapMesh> {
    if !(cube_size > 0.0) || !cube_size.is_finite() {
        return Err(MazeError::InvalidCubeSize(cube_size));
    }

    let mut mesh = CubicmapMesh::with_vertex_capacity(count_faces(grid) * VERTICES_PER_FACE);

    for (x, z, kind) in grid.cells() {
        let v = CellCorners::new(x, z, cube_size);
        match kind {
            CellKind::Solid => emit_solid(&mut mesh, grid, &v, x as i64, z as i64),
            CellKind::Open => emit_open(&mut mesh, &v),
            CellKind::Unclassified => {}
        }
    }

    info!(
        "[Cubicmap] Mesh generated successfully (vertexCount: {}, triangles: {})",
        mesh.vertex_count(),
        mesh.triangle_count()
    );

    Ok(mesh)
}

fn emit_solid(mesh: &mut CubicmapMesh, grid: &PixelGrid, v: &CellCorners, x: i64, z: i64) {
    let r = atlas::TOP;
    mesh.push_face(
        v.pick([1, 2, 3, 1, 3, 4]),
        Face::Top.normal(),
        [
            r.top_left(),
            r.bottom_left(),
            r.bottom_right(),
            r.top_left(),
            r.bottom_right(),
            r.top_right(),
        ],
    );

    let r = atlas::BOTTOM;
    mesh.push_face(
        v.pick([6, 8, 7, 6, 5, 8]),
        Face::Bottom.normal(),
        [
            r.top_right(),
            r.bottom_left(),
            r.bottom_right(),
            r.top_right(),
            r.top_left(),
            r.bottom_left(),
        ],
    );

    if grid.exposes_face(x, z + 1) {
        let r = atlas::FRONT;
        mesh.push_face(
            v.pick([2, 7, 3, 3, 7, 8]),
            Face::Front.normal(),
            [
                r.top_left(),
                r.bottom_left(),
                r.top_right(),
                r.top_right(),
                r.bottom_left(),
                r.bottom_right(),
            ],
        );
    }

    if grid.exposes_face(x, z - 1) {
        let r = atlas::BACK;
        mesh.push_face(
            v.pick([1, 5, 6, 1, 4, 5]),
            Face::Back.normal(),
            [
                r.top_right(),
                r.bottom_left(),
                r.bottom_right(),
                r.top_right(),
                r.top_left(),
                r.bottom_left(),
            ],
        );
    }

    if grid.exposes_face(x + 1, z) {
        let r = atlas::RIGHT;
        mesh.push_face(
            v.pick([3, 8, 4, 4, 8, 5]),
            Face::Right.normal(),
            [
                r.top_left(),
                r.bottom_left(),
                r.top_right(),
                r.top_right(),
                r.bottom_left(),
                r.bottom_right(),
            ],
        );
    }

    if grid.exposes_face(x - 1, z) {
        let r = atlas::LEFT;
        mesh.push_face(
            v.pick([1, 7, 2, 1, 6, 7]),
            Face::Left.normal(),
            [
                r.top_left(),
                r.bottom_right(),
                r.top_right(),
                r.top_left(),
                r.bottom_left(),
                r.bottom_right(),
            ],
        );
    }
}

fn emit_open(mesh: &mut CubicmapMesh, v: &CellCorners) {
    // Ceiling at cube height, seen from below
    let r = atlas::TOP;
    mesh.push_face(
        v.pick([1, 3, 2, 1, 4, 3]),
        Face::Bottom.normal(),
        [
            r.top_left(),
            r.bottom_right(),
            r.bottom_left(),
            r.top_left(),
            r.top_right(),
            r.bottom_right(),
        ],
    );

    // Floor at base height, seen from above
    let r = atlas::BOTTOM;
    mesh.push_face(
        v.pick([6, 7, 8, 6, 8, 5]),
        Face::Top.normal(),
        [
            r.top_right(),
            r.bottom_right(),
            r.bottom_left(),
            r.top_right(),
            r.bottom_left(),
            r.top_left(),
        ],
    );
}
