use glam::{Mat4, Vec3, Vec4};

use crate::uniforms::{
    Uniforms, U_COLOR, U_COLOR_MULT, U_LIGHTING, U_MATRIX, U_REVERSE_LIGHT_DIRECTION,
    U_WORLD_INVERSE_TRANSPOSE,
};

/// Vertex data for GPU (position, normal, RGBA color)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 4],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x4];

    pub const fn new(position: [f32; 3], normal: [f32; 3], color: [f32; 4]) -> Self {
        Self { position, normal, color }
    }

    /// Flat 2D vertex in the z = 0 plane
    pub const fn flat(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y, 0.0],
            normal: [0.0, 0.0, 1.0],
            color,
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Per-draw uniform buffer data for GPU
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DrawUniform {
    pub matrix: [[f32; 4]; 4],
    pub world_inverse_transpose: [[f32; 4]; 4],
    pub color_mult: [f32; 4],
    pub color: [f32; 4],
    pub reverse_light_direction: [f32; 3],
    pub lighting: f32,
}

impl DrawUniform {
    /// Pack a uniform mapping into the shader's fixed layout.
    /// Missing entries fall back to identity matrices, white, and no lighting.
    pub fn from_uniforms(uniforms: &Uniforms) -> Self {
        Self {
            matrix: uniforms.mat4(U_MATRIX).unwrap_or(Mat4::IDENTITY).to_cols_array_2d(),
            world_inverse_transpose: uniforms
                .mat4(U_WORLD_INVERSE_TRANSPOSE)
                .unwrap_or(Mat4::IDENTITY)
                .to_cols_array_2d(),
            color_mult: uniforms.vec4(U_COLOR_MULT).unwrap_or(Vec4::ONE).to_array(),
            color: uniforms.vec4(U_COLOR).unwrap_or(Vec4::ONE).to_array(),
            reverse_light_direction: uniforms
                .vec3(U_REVERSE_LIGHT_DIRECTION)
                .unwrap_or(Vec3::Z)
                .to_array(),
            lighting: uniforms.float(U_LIGHTING).unwrap_or(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_size_matches_layout() {
        assert_eq!(std::mem::size_of::<Vertex>(), 40);
        assert_eq!(Vertex::layout().array_stride, 40);
        assert_eq!(Vertex::layout().attributes.len(), 3);
    }

    #[test]
    fn test_draw_uniform_size_is_wgsl_compatible() {
        // 2 mat4 + 3 vec4-sized rows, 16-byte aligned
        assert_eq!(std::mem::size_of::<DrawUniform>(), 176);
        assert_eq!(std::mem::size_of::<DrawUniform>() % 16, 0);
    }

    #[test]
    fn test_draw_uniform_defaults() {
        let packed = DrawUniform::from_uniforms(&Uniforms::new());
        assert_eq!(packed.matrix, Mat4::IDENTITY.to_cols_array_2d());
        assert_eq!(packed.color_mult, [1.0; 4]);
        assert_eq!(packed.color, [1.0; 4]);
        assert_eq!(packed.lighting, 0.0);
    }

    #[test]
    fn test_draw_uniform_packs_values() {
        let m = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        let uniforms = Uniforms::new()
            .with(U_MATRIX, m)
            .with(U_COLOR_MULT, Vec4::new(1.0, 0.3, 0.3, 1.0))
            .with(U_LIGHTING, 1.0);
        let packed = DrawUniform::from_uniforms(&uniforms);
        assert_eq!(packed.matrix, m.to_cols_array_2d());
        assert_eq!(packed.color_mult, [1.0, 0.3, 0.3, 1.0]);
        assert_eq!(packed.lighting, 1.0);
    }

    #[test]
    fn test_flat_vertex() {
        let v = Vertex::flat(1.0, -2.0, [1.0; 4]);
        assert_eq!(v.position(), Vec3::new(1.0, -2.0, 0.0));
    }
}
