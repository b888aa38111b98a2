//! Render Module
//!
//! Cubicmap mesh generation and the wgpu renderer that draws it: one
//! pipeline, one atlas texture, one draw call per frame.

pub mod cubicmap_mesh;
pub mod gpu_context;
pub mod maze_renderer;
pub mod shader_loader;
pub mod texture;
pub mod uniforms;

pub use cubicmap_mesh::{AtlasRect, CubicmapMesh, Face, MeshVertex, generate_cubicmap_mesh};
pub use gpu_context::{GpuContext, GpuContextConfig};
pub use maze_renderer::{FrameStatus, MazeRenderer};
pub use shader_loader::{ShaderSource, create_shader_module, load_shader_file};
pub use texture::{AtlasImage, AtlasTexture};
pub use uniforms::{MazeUniforms, model_matrix};
