//! Render pipelines for meshes and point clouds
//!
//! One pipeline exists per combination of topology, blend mode and culling,
//! all sharing the same bind group layouts and vertex layout.

use std::collections::HashMap;

use spacescape_core::{MaterialDesc, MaterialFlags};

use super::types::GpuVertex;

/// Depth buffer format
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// How fragments combine with the frame
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlendMode {
    /// Depth-written, no blending
    Opaque,
    /// Standard alpha blending, depth-tested but not written
    Alpha,
    /// Additive blending, depth-tested but not written
    Additive,
}

impl BlendMode {
    fn state(self) -> Option<wgpu::BlendState> {
        match self {
            BlendMode::Opaque => None,
            BlendMode::Alpha => Some(wgpu::BlendState::ALPHA_BLENDING),
            BlendMode::Additive => Some(wgpu::BlendState {
                color: wgpu::BlendComponent {
                    src_factor: wgpu::BlendFactor::SrcAlpha,
                    dst_factor: wgpu::BlendFactor::One,
                    operation: wgpu::BlendOperation::Add,
                },
                alpha: wgpu::BlendComponent {
                    src_factor: wgpu::BlendFactor::One,
                    dst_factor: wgpu::BlendFactor::One,
                    operation: wgpu::BlendOperation::Add,
                },
            }),
        }
    }

    fn writes_depth(self) -> bool {
        self == BlendMode::Opaque
    }
}

/// Primitive kind
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Topology {
    Triangles,
    Points,
}

/// Selects one pipeline variant
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PipelineKey {
    pub topology: Topology,
    pub blend: BlendMode,
    pub double_sided: bool,
}

impl PipelineKey {
    /// Variant for a material
    pub fn for_material(topology: Topology, material: &MaterialDesc) -> Self {
        let blend = if material.flags.contains(MaterialFlags::ADDITIVE) {
            BlendMode::Additive
        } else if material.flags.contains(MaterialFlags::TRANSPARENT) {
            BlendMode::Alpha
        } else {
            BlendMode::Opaque
        };
        Self {
            topology,
            blend,
            // Points have no faces to cull
            double_sided: topology == Topology::Points
                || material.flags.contains(MaterialFlags::DOUBLE_SIDED),
        }
    }

    /// Check if the variant is drawn in the blended pass
    pub fn is_blended(&self) -> bool {
        self.blend != BlendMode::Opaque
    }

    fn all() -> Vec<PipelineKey> {
        let mut keys = Vec::new();
        for blend in [BlendMode::Opaque, BlendMode::Alpha, BlendMode::Additive] {
            for double_sided in [false, true] {
                keys.push(PipelineKey { topology: Topology::Triangles, blend, double_sided });
            }
            keys.push(PipelineKey { topology: Topology::Points, blend, double_sided: true });
        }
        keys
    }
}

/// All pipeline variants plus their shared layouts
pub struct ScenePipelines {
    frame_layout: wgpu::BindGroupLayout,
    object_layout: wgpu::BindGroupLayout,
    pipelines: HashMap<PipelineKey, wgpu::RenderPipeline>,
}

impl ScenePipelines {
    /// Create every variant for the given surface format
    pub fn new(device: &wgpu::Device, surface_format: wgpu::TextureFormat) -> Self {
        let frame_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Frame Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let object_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Object Bind Group Layout"),
            entries: &[
                // Object uniforms
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
                // Base color texture
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
                // Sampler
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Scene Pipeline Layout"),
            bind_group_layouts: &[&frame_layout, &object_layout],
            push_constant_ranges: &[],
        });

        let mesh_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Mesh Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/mesh.wgsl").into()),
        });
        let points_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Points Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/points.wgsl").into()),
        });

        let pipelines = PipelineKey::all()
            .into_iter()
            .map(|key| {
                let shader = match key.topology {
                    Topology::Triangles => &mesh_shader,
                    Topology::Points => &points_shader,
                };
                let pipeline = create_pipeline(device, &layout, shader, surface_format, key);
                (key, pipeline)
            })
            .collect();

        Self {
            frame_layout,
            object_layout,
            pipelines,
        }
    }

    /// Layout of the per-frame bind group
    pub fn frame_layout(&self) -> &wgpu::BindGroupLayout {
        &self.frame_layout
    }

    /// Layout of the per-object bind group
    pub fn object_layout(&self) -> &wgpu::BindGroupLayout {
        &self.object_layout
    }

    /// Pipeline for a variant
    pub fn get(&self, key: &PipelineKey) -> Option<&wgpu::RenderPipeline> {
        self.pipelines.get(key)
    }
}

fn create_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    surface_format: wgpu::TextureFormat,
    key: PipelineKey,
) -> wgpu::RenderPipeline {
    let label = format!("Scene Pipeline {:?}", key);
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(&label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &[GpuVertex::layout()],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: surface_format,
                blend: key.blend.state(),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: match key.topology {
                Topology::Triangles => wgpu::PrimitiveTopology::TriangleList,
                Topology::Points => wgpu::PrimitiveTopology::PointList,
            },
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: if key.double_sided { None } else { Some(wgpu::Face::Back) },
            unclipped_depth: false,
            polygon_mode: wgpu::PolygonMode::Fill,
            conservative: false,
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: key.blend.writes_depth(),
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState {
            count: 1,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        multiview: None,
        cache: None,
    })
}
