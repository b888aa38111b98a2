//! Uniform Structs for GPU Shaders
//!
//! GPU-compatible uniform buffer structures that must match the WGSL layout
//! exactly.

use glam::Mat4;

use crate::world::Color;

/// Uniforms for `cubicmap.wgsl`.
///
/// WGSL layout (80 bytes total):
///   offset  0: mvp (mat4x4<f32>)         = 64 bytes
///   offset 64: col_diffuse (vec4<f32>)   = 16 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MazeUniforms {
    /// projection * view * model, column-major
    pub mvp: [[f32; 4]; 4],
    /// Tint multiplied with the sampled atlas texel
    pub col_diffuse: [f32; 4],
}

const _: () = assert!(std::mem::size_of::<MazeUniforms>() == 80);

impl Default for MazeUniforms {
    fn default() -> Self {
        Self::new(Mat4::IDENTITY, Color::WHITE)
    }
}

impl MazeUniforms {
    pub fn new(mvp: Mat4, tint: Color) -> Self {
        Self {
            mvp: mvp.to_cols_array_2d(),
            col_diffuse: tint.to_array_f32(),
        }
    }
}

/// Model transform for a map drawn at `position` with uniform `scale`.
pub fn model_matrix(position: glam::Vec3, scale: f32) -> Mat4 {
    Mat4::from_translation(position) * Mat4::from_scale(glam::Vec3::splat(scale))
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_uniforms_size() {
        assert_eq!(std::mem::size_of::<MazeUniforms>(), 80);
    }

    #[test]
    fn test_default_is_identity_white() {
        let u = MazeUniforms::default();
        assert_eq!(u.mvp, Mat4::IDENTITY.to_cols_array_2d());
        assert_eq!(u.col_diffuse, [1.0; 4]);
    }

    #[test]
    fn test_model_matrix_translates() {
        let m = model_matrix(Vec3::new(2.0, 0.0, -1.0), 1.0);
        assert_eq!(m.transform_point3(Vec3::ZERO), Vec3::new(2.0, 0.0, -1.0));
    }
}
