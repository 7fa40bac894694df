//! wgpu implementation of the core [`Renderer`]
//!
//! Every uploaded mesh, point cloud and texture lives in a slot map; the
//! ffi form of its key is handed out as the [`ResourceHandle`]. Each drawable
//! owns its object uniform buffer and bind group, so a drawable is drawn at
//! most once per frame.

use slotmap::{new_key_type, Key, KeyData, SlotMap};
use spacescape_core::{
    CameraView, DrawItem, Geometry, MaterialDesc, MeshData, RenderError,
    Renderer, ResourceHandle, StarField, TextureData,
};
use spacescape_math::Vec3;
use wgpu::util::DeviceExt;
use winit::dpi::PhysicalSize;

use crate::context::RenderContext;
use crate::geometry::tessellate;
use crate::pipeline::{
    FrameUniforms, GpuVertex, Lighting, ObjectUniforms, PipelineKey, ScenePipelines, Topology,
    DEPTH_FORMAT,
};

new_key_type! {
    /// Key of a GPU resource
    pub struct ResourceKey;
}

impl From<ResourceKey> for ResourceHandle {
    fn from(key: ResourceKey) -> Self {
        ResourceHandle(key.data().as_ffi())
    }
}

impl From<ResourceHandle> for ResourceKey {
    fn from(handle: ResourceHandle) -> Self {
        KeyData::from_ffi(handle.0).into()
    }
}

/// A mesh or point cloud ready to draw
struct Drawable {
    vertex_buffer: wgpu::Buffer,
    index_buffer: Option<wgpu::Buffer>,
    /// Index count for meshes, vertex count for point clouds
    element_count: u32,
    material: MaterialDesc,
    pipeline: PipelineKey,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    texture: Option<ResourceKey>,
}

enum GpuResource {
    Drawable(Drawable),
    Texture {
        _texture: wgpu::Texture,
        view: wgpu::TextureView,
    },
}

/// Depth attachment sized to the surface
struct DepthTarget {
    view: wgpu::TextureView,
    size: (u32, u32),
}

impl DepthTarget {
    fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        Self {
            view: texture.create_view(&wgpu::TextureViewDescriptor::default()),
            size: (width, height),
        }
    }
}

/// Renderer drawing the scene into a window surface
pub struct GpuRenderer {
    context: RenderContext,
    pipelines: ScenePipelines,
    frame_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    sampler: wgpu::Sampler,
    /// Bound when a drawable has no texture of its own
    _white_texture: wgpu::Texture,
    white_view: wgpu::TextureView,
    depth: DepthTarget,
    resources: SlotMap<ResourceKey, GpuResource>,
    lighting: Lighting,
    clear_color: wgpu::Color,
}

impl GpuRenderer {
    /// Create a renderer on an initialized context
    pub fn new(context: RenderContext, lighting: Lighting, background: [f32; 4]) -> Self {
        let device = &context.device;
        let pipelines = ScenePipelines::new(device, context.format());

        let frame_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Frame Uniforms"),
            contents: bytemuck::cast_slice(&[FrameUniforms::default()]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Frame Bind Group"),
            layout: pipelines.frame_layout(),
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_buffer.as_entire_binding(),
            }],
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Base Sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let (white_texture, white_view) =
            upload_texture(&context, &TextureData::solid([255, 255, 255, 255]), "White Texture");
        let depth = DepthTarget::new(device, context.size.width, context.size.height);

        Self {
            context,
            pipelines,
            frame_buffer,
            frame_bind_group,
            sampler,
            _white_texture: white_texture,
            white_view,
            depth,
            resources: SlotMap::with_key(),
            lighting,
            clear_color: wgpu::Color {
                r: background[0] as f64,
                g: background[1] as f64,
                b: background[2] as f64,
                a: background[3] as f64,
            },
        }
    }

    /// Handle window resize
    pub fn resize(&mut self, width: u32, height: u32) {
        self.context.resize(PhysicalSize::new(width, height));
        if width > 0 && height > 0 && self.depth.size != (width, height) {
            self.depth = DepthTarget::new(&self.context.device, width, height);
        }
    }

    /// Width over height of the surface
    pub fn aspect_ratio(&self) -> f32 {
        self.context.aspect_ratio()
    }

    /// Number of live resources
    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }

    fn create_drawable(
        &mut self,
        vertices: &[GpuVertex],
        indices: Option<&[u32]>,
        topology: Topology,
        material: &MaterialDesc,
        label: &str,
    ) -> ResourceHandle {
        let device = &self.context.device;

        // Zero-sized vertex buffers are not bindable; keep one unused vertex
        let fallback = [GpuVertex::default()];
        let contents = if vertices.is_empty() { &fallback[..] } else { vertices };
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(contents),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let (index_buffer, element_count) = match indices {
            Some(indices) if !indices.is_empty() && !vertices.is_empty() => {
                let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(label),
                    contents: bytemuck::cast_slice(indices),
                    usage: wgpu::BufferUsages::INDEX,
                });
                (Some(buffer), indices.len() as u32)
            }
            Some(_) => (None, 0),
            None => (None, vertices.len() as u32),
        };

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Object Uniforms"),
            contents: bytemuck::cast_slice(&[ObjectUniforms::new(
                spacescape_math::mat4::IDENTITY,
                material,
                false,
            )]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = object_bind_group(
            device,
            self.pipelines.object_layout(),
            &uniform_buffer,
            &self.white_view,
            &self.sampler,
        );

        let key = self.resources.insert(GpuResource::Drawable(Drawable {
            vertex_buffer,
            index_buffer,
            element_count,
            material: *material,
            pipeline: PipelineKey::for_material(topology, material),
            uniform_buffer,
            bind_group,
            texture: None,
        }));
        log::debug!("Created {} ({} elements) as {:?}", label, element_count, key);
        key.into()
    }
}

impl Renderer for GpuRenderer {
    fn create_mesh(
        &mut self,
        geometry: &Geometry,
        material: &MaterialDesc,
    ) -> Result<ResourceHandle, RenderError> {
        let mesh = tessellate(geometry);
        let vertices = mesh_vertices(&mesh);
        Ok(self.create_drawable(
            &vertices,
            Some(&mesh.indices),
            Topology::Triangles,
            material,
            "Mesh Vertices",
        ))
    }

    fn create_points(
        &mut self,
        stars: &StarField,
        material: &MaterialDesc,
    ) -> Result<ResourceHandle, RenderError> {
        let vertices = star_vertices(stars);
        Ok(self.create_drawable(&vertices, None, Topology::Points, material, "Star Vertices"))
    }

    fn create_texture(&mut self, texture: &TextureData) -> Result<ResourceHandle, RenderError> {
        let max_dimension = self.context.device.limits().max_texture_dimension_2d;
        check_texture(texture, max_dimension)?;
        let (texture, view) = upload_texture(&self.context, texture, "Base Texture");
        let key = self.resources.insert(GpuResource::Texture {
            _texture: texture,
            view,
        });
        Ok(key.into())
    }

    fn bind_texture(
        &mut self,
        mesh: ResourceHandle,
        texture: ResourceHandle,
    ) -> Result<(), RenderError> {
        let mesh_key = ResourceKey::from(mesh);
        let texture_key = ResourceKey::from(texture);

        let bind_group = {
            let Some(GpuResource::Drawable(drawable)) = self.resources.get(mesh_key) else {
                return Err(RenderError::UnknownResource(mesh));
            };
            let Some(GpuResource::Texture { view, .. }) = self.resources.get(texture_key) else {
                return Err(RenderError::UnknownResource(texture));
            };
            object_bind_group(
                &self.context.device,
                self.pipelines.object_layout(),
                &drawable.uniform_buffer,
                view,
                &self.sampler,
            )
        };

        if let Some(GpuResource::Drawable(drawable)) = self.resources.get_mut(mesh_key) {
            drawable.bind_group = bind_group;
            drawable.texture = Some(texture_key);
        }
        Ok(())
    }

    fn draw(&mut self, items: &[DrawItem], camera: &CameraView) -> Result<(), RenderError> {
        // Resolve everything before touching the surface
        let mut opaque = Vec::new();
        let mut blended = Vec::new();
        for item in items {
            let Some(GpuResource::Drawable(drawable)) =
                self.resources.get(ResourceKey::from(item.mesh))
            else {
                return Err(RenderError::UnknownResource(item.mesh));
            };
            let uniforms =
                ObjectUniforms::new(item.model, &drawable.material, drawable.texture.is_some());
            self.context.queue.write_buffer(
                &drawable.uniform_buffer,
                0,
                bytemuck::cast_slice(&[uniforms]),
            );
            if drawable.pipeline.is_blended() {
                let position = Vec3::new(item.model[3][0], item.model[3][1], item.model[3][2]);
                blended.push((drawable, position.distance(camera.eye)));
            } else {
                opaque.push(drawable);
            }
        }
        sort_back_to_front(&mut blended);

        let frame = FrameUniforms::new(camera, &self.lighting);
        self.context
            .queue
            .write_buffer(&self.frame_buffer, 0, bytemuck::cast_slice(&[frame]));

        let output = match self.context.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
                self.context.reconfigure();
                return Err(RenderError::SurfaceLost);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => return Err(RenderError::OutOfMemory),
            Err(e) => return Err(RenderError::Other(format!("{:?}", e))),
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder =
            self.context
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("Render Encoder"),
                });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_bind_group(0, &self.frame_bind_group, &[]);
            let ordered = opaque
                .into_iter()
                .chain(blended.into_iter().map(|(drawable, _)| drawable));
            for drawable in ordered {
                if drawable.element_count == 0 {
                    continue;
                }
                let Some(pipeline) = self.pipelines.get(&drawable.pipeline) else {
                    continue;
                };
                render_pass.set_pipeline(pipeline);
                render_pass.set_bind_group(1, &drawable.bind_group, &[]);
                render_pass.set_vertex_buffer(0, drawable.vertex_buffer.slice(..));
                match &drawable.index_buffer {
                    Some(indices) => {
                        render_pass.set_index_buffer(indices.slice(..), wgpu::IndexFormat::Uint32);
                        render_pass.draw_indexed(0..drawable.element_count, 0, 0..1);
                    }
                    None => render_pass.draw(0..drawable.element_count, 0..1),
                }
            }
        }

        self.context.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }

    fn dispose(&mut self, handle: ResourceHandle) -> bool {
        let removed = self.resources.remove(ResourceKey::from(handle)).is_some();
        if removed {
            log::trace!("Disposed {:?}", handle);
        }
        removed
    }
}

fn upload_texture(
    context: &RenderContext,
    data: &TextureData,
    label: &str,
) -> (wgpu::Texture, wgpu::TextureView) {
    let size = wgpu::Extent3d {
        width: data.width,
        height: data.height,
        depth_or_array_layers: 1,
    };
    let texture = context.device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });
    context.queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        &data.rgba,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4 * data.width),
            rows_per_image: Some(data.height),
        },
        size,
    );
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    (texture, view)
}

fn object_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    uniforms: &wgpu::Buffer,
    texture: &wgpu::TextureView,
    sampler: &wgpu::Sampler,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("Object Bind Group"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: uniforms.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::TextureView(texture),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    })
}

/// Interleave a mesh into GPU vertices
///
/// Missing normals, colors or uvs fall back to the [`GpuVertex`] defaults.
pub fn mesh_vertices(mesh: &MeshData) -> Vec<GpuVertex> {
    let fallback = GpuVertex::default();
    mesh.positions
        .iter()
        .enumerate()
        .map(|(i, &position)| GpuVertex {
            position,
            normal: mesh.normals.get(i).copied().unwrap_or(fallback.normal),
            color: mesh.colors.get(i).copied().unwrap_or(fallback.color),
            uv: mesh.uvs.get(i).copied().unwrap_or(fallback.uv),
        })
        .collect()
}

/// One point vertex per star
pub fn star_vertices(stars: &StarField) -> Vec<GpuVertex> {
    stars
        .positions()
        .iter()
        .zip(stars.colors())
        .map(|(p, &color)| GpuVertex {
            position: p.to_array(),
            color,
            ..GpuVertex::default()
        })
        .collect()
}

/// Reject texture data the device cannot hold
fn check_texture(texture: &TextureData, max_dimension: u32) -> Result<(), RenderError> {
    if texture.width == 0 || texture.height == 0 || !texture.is_consistent() {
        return Err(RenderError::Other(format!(
            "texture data does not match {}x{}",
            texture.width, texture.height
        )));
    }
    if texture.width > max_dimension || texture.height > max_dimension {
        return Err(RenderError::Other(format!(
            "texture {}x{} exceeds the device limit of {}",
            texture.width, texture.height, max_dimension
        )));
    }
    Ok(())
}

/// Order blended draws farthest first
fn sort_back_to_front<T>(items: &mut [(T, f32)]) {
    items.sort_by(|a, b| b.1.total_cmp(&a.1));
}
