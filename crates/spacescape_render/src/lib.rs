//! wgpu renderer for Spacescape
//!
//! This crate provides the GPU side of the vignette:
//!
//! - [`context::RenderContext`] - WGPU device, queue and surface management
//! - [`gpu_renderer::GpuRenderer`] - [`Renderer`] implementation with a slot map of GPU resources
//! - [`pipeline::ScenePipelines`] - Mesh and point pipelines per blend mode
//! - [`geometry`] - Procedural sphere, torus knot and wing tessellation
//! - [`camera::OrbitCamera`] - Perspective camera orbiting a target
//! - [`texture::ImageDecoder`] / [`gltf_model::GltfDecoder`] - Asset decoders
//!   for the background loader

pub mod camera;
pub mod context;
pub mod geometry;
pub mod gltf_model;
pub mod gpu_renderer;
pub mod pipeline;
pub mod texture;

pub use camera::OrbitCamera;
pub use context::RenderContext;
pub use gltf_model::GltfDecoder;
pub use gpu_renderer::GpuRenderer;
pub use pipeline::Lighting;
pub use texture::ImageDecoder;

// Re-export core types for convenience
pub use spacescape_core::{CameraView, RenderError, Renderer, ResourceHandle};
