//! Rendering pipeline components

pub mod types;
pub mod scene_pipeline;

pub use types::{FrameUniforms, GpuVertex, Lighting, ObjectUniforms};
pub use scene_pipeline::{BlendMode, PipelineKey, ScenePipelines, Topology, DEPTH_FORMAT};
