//! Maze Renderer
//!
//! Uploads the cubicmap mesh once and draws it every frame with a single
//! pipeline, a single atlas texture and a single non-indexed draw call.
//!
//! Depth test is less-or-equal, back faces are culled (counter-clockwise
//! front faces) and colour blending is standard alpha.
//!
//! # Usage
//!
//! ```rust,ignore
//! let renderer = MazeRenderer::new(&gpu, &mesh, &atlas, &shader);
//!
//! // Each frame:
//! renderer.update_uniforms(&gpu, &MazeUniforms::new(mvp, Color::WHITE));
//! match renderer.render(&mut gpu) { ... }
//! ```

use log::{error, info, warn};

use super::cubicmap_mesh::{CubicmapMesh, MeshVertex};
use super::gpu_context::{DEPTH_FORMAT, GpuContext};
use super::shader_loader::{ShaderSource, create_shader_module};
use super::texture::{AtlasImage, AtlasTexture};
use super::uniforms::MazeUniforms;
use crate::error::{MazeError, MazeResult};

/// What happened to a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    Presented,
    /// The surface was unavailable; try again next frame
    Skipped,
    /// The device cannot continue; the loop should exit
    Fatal,
}

/// Background behind the maze.
pub const CLEAR_COLOR: wgpu::Color = wgpu::Color::BLACK;

pub struct MazeRenderer {
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    uniform_buffer: wgpu::Buffer,
    vertex_buffer: wgpu::Buffer,
    vertex_count: u32,
    #[allow(dead_code)]
    atlas: AtlasTexture,
}

impl MazeRenderer {
    pub fn new(
        gpu: &GpuContext,
        mesh: &CubicmapMesh,
        atlas_image: &AtlasImage,
        shader_source: &ShaderSource,
    ) -> MazeResult<Self> {
        let device = &gpu.device;

        let vertex_count = draw_vertex_count(mesh.vertex_count())?;
        let vertices = mesh.interleaved();
        let vertex_buffer = gpu.create_vertex_buffer("Maze Vertex Buffer", &vertices);
        info!(
            "[Renderer] Uploaded {} vertices ({} bytes)",
            vertices.len(),
            std::mem::size_of_val(vertices.as_slice())
        );

        let atlas = AtlasTexture::upload(device, &gpu.queue, atlas_image);
        let uniform_buffer = gpu.create_uniform_buffer("Maze Uniform Buffer", &MazeUniforms::default());

        // Bind group layout:
        //   0: uniforms
        //   1: atlas texture
        //   2: sampler
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Maze Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Maze Bind Group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&atlas.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&atlas.sampler),
                },
            ],
        });

        let shader = create_shader_module(device, "Maze Shader", shader_source);

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Maze Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Maze Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[MeshVertex::layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: gpu.format(),
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::LessEqual,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Ok(Self {
            pipeline,
            bind_group,
            uniform_buffer,
            vertex_buffer,
            vertex_count,
            atlas,
        })
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    pub fn update_uniforms(&self, gpu: &GpuContext, uniforms: &MazeUniforms) {
        gpu.write_buffer(&self.uniform_buffer, uniforms);
    }

    /// Clear, draw the maze and present.
    pub fn render(&self, gpu: &mut GpuContext) -> FrameStatus {
        let frame = match gpu.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.reconfigure();
                return FrameStatus::Skipped;
            }
            Err(wgpu::SurfaceError::Timeout) => {
                warn!("[Renderer] Surface timeout, skipping frame");
                return FrameStatus::Skipped;
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                error!("[Renderer] Out of GPU memory");
                return FrameStatus::Fatal;
            }
            Err(e) => {
                warn!("[Renderer] Surface error: {e}");
                return FrameStatus::Skipped;
            }
        };

        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Maze Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Maze Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &gpu.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if self.vertex_count > 0 {
                render_pass.set_pipeline(&self.pipeline);
                render_pass.set_bind_group(0, &self.bind_group, &[]);
                render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
                render_pass.draw(0..self.vertex_count, 0..1);
            }
        }

        gpu.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        FrameStatus::Presented
    }
}

/// Vertex count for a single non-indexed draw call.
fn draw_vertex_count(vertices: usize) -> MazeResult<u32> {
    u32::try_from(vertices).map_err(|_| {
        MazeError::Render(format!(
            "mesh has {vertices} vertices, more than one draw call can address"
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_vertex_count_in_range() {
        assert_eq!(draw_vertex_count(0).unwrap(), 0);
        assert_eq!(draw_vertex_count(36).unwrap(), 36);
        assert_eq!(draw_vertex_count(u32::MAX as usize).unwrap(), u32::MAX);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_draw_vertex_count_overflow_is_error() {
        let too_many = u32::MAX as usize + 1;
        assert!(matches!(
            draw_vertex_count(too_many),
            Err(MazeError::Render(_))
        ));
    }
}
