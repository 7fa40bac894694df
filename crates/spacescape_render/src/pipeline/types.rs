//! GPU-compatible data types
//!
//! These types are designed to match the shader layouts exactly.
//! All types derive Pod and Zeroable for safe GPU buffer operations.

use bytemuck::{Pod, Zeroable};
use spacescape_core::{CameraView, MaterialDesc};
use spacescape_math::{mat4, Mat4};

/// Mesh and point vertex
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct GpuVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    /// Per-vertex color, used when the material asks for vertex colors
    pub color: [f32; 3],
    pub uv: [f32; 2],
}

impl GpuVertex {
    /// Vertex buffer layout shared by every pipeline
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
            0 => Float32x3,
            1 => Float32x3,
            2 => Float32x3,
            3 => Float32x2,
        ];
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GpuVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &ATTRIBUTES,
        }
    }
}

impl Default for GpuVertex {
    fn default() -> Self {
        Self {
            position: [0.0; 3],
            normal: [0.0, 1.0, 0.0],
            color: [1.0; 3],
            uv: [0.0; 2],
        }
    }
}

/// Per-frame uniforms (group 0)
/// Layout: 192 bytes total (must match FrameUniforms in the shaders)
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct FrameUniforms {
    pub view: Mat4,
    pub projection: Mat4,
    /// Eye position, w unused
    pub eye: [f32; 4],
    /// Ambient light color, w unused
    pub ambient: [f32; 4],
    /// Point light position, w unused
    pub light_position: [f32; 4],
    /// Point light color, w is the intensity
    pub light_color: [f32; 4],
}

impl FrameUniforms {
    /// Build from a camera view and the scene lighting
    pub fn new(camera: &CameraView, lighting: &Lighting) -> Self {
        let a = lighting.ambient;
        let p = lighting.light_position;
        let c = lighting.light_color;
        Self {
            view: camera.view,
            projection: camera.projection,
            eye: [camera.eye.x, camera.eye.y, camera.eye.z, 1.0],
            ambient: [a[0], a[1], a[2], 1.0],
            light_position: [p[0], p[1], p[2], 1.0],
            light_color: [c[0], c[1], c[2], lighting.light_intensity],
        }
    }
}

impl Default for FrameUniforms {
    fn default() -> Self {
        Self {
            view: mat4::IDENTITY,
            projection: mat4::IDENTITY,
            eye: [0.0, 0.0, 0.0, 1.0],
            ambient: [0.25, 0.25, 0.25, 1.0],
            light_position: [0.0, 0.0, 0.0, 1.0],
            light_color: [1.0, 1.0, 1.0, 1.0],
        }
    }
}

/// Per-object uniforms (group 1, binding 0)
/// Layout: 96 bytes total (must match ObjectUniforms in the shaders)
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct ObjectUniforms {
    pub model: Mat4,
    /// Base color, alpha is opacity
    pub color: [f32; 4],
    /// x = material flag bits, y = 1 when a texture is bound
    pub flags: [u32; 4],
}

impl ObjectUniforms {
    pub fn new(model: Mat4, material: &MaterialDesc, textured: bool) -> Self {
        Self {
            model,
            color: material.color,
            flags: [material.flags.bits() as u32, textured as u32, 0, 0],
        }
    }
}

/// Scene lighting parameters
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lighting {
    pub ambient: [f32; 3],
    pub light_position: [f32; 3],
    pub light_color: [f32; 3],
    pub light_intensity: f32,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            // 0x404040
            ambient: [0.251, 0.251, 0.251],
            // The sun sits at the origin
            light_position: [0.0, 0.0, 0.0],
            light_color: [1.0, 0.96, 0.88],
            light_intensity: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::size_of;

    #[test]
    fn test_gpu_vertex_size() {
        // 3 + 3 + 3 + 2 floats = 44 bytes
        assert_eq!(size_of::<GpuVertex>(), 44);
        assert_eq!(GpuVertex::layout().array_stride, 44);
    }

    #[test]
    fn test_frame_uniforms_size() {
        // 2 matrices + 4 vec4 = 32 + 16 floats = 192 bytes
        assert_eq!(size_of::<FrameUniforms>(), 192);
    }

    #[test]
    fn test_object_uniforms_size() {
        assert_eq!(size_of::<ObjectUniforms>(), 96);
    }

    #[test]
    fn test_object_flags_pack_material_bits() {
        let material = MaterialDesc::wing(0.9);
        let uniforms = ObjectUniforms::new(mat4::IDENTITY, &material, true);
        assert_eq!(uniforms.flags[0], material.flags.bits() as u32);
        assert_eq!(uniforms.flags[1], 1);
    }
}
