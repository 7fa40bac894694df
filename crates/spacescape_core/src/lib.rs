//! Core types for Spacescape
//!
//! This crate holds the procedural motion and scene composition layer:
//!
//! - [`StarField`] - One-shot starfield point cloud
//! - [`OrbitalSystem`] - Time-parameterized planet orbits
//! - [`Swarm`] / [`Butterfly`] - Wandering agents with flapping wings
//! - [`Deferred`] - Slot for the asynchronously loaded astronaut
//! - [`World`] - Owner of every entity, ticked once per frame
//! - [`SceneLayout`] - RON description of the scene
//! - [`FrameDriver`] - Per-frame loop and GPU resource bookkeeping
//! - [`Renderer`] / [`CameraService`] / [`AssetDecoder`] - Interfaces to the
//!   external collaborators

mod asset_error;
mod asset_loader;
mod astronaut;
mod butterfly;
mod deferred;
mod driver;
mod geometry;
mod material;
mod orbit;
mod primary;
mod rng;
mod scene;
mod services;
mod starfield;
mod transform;
mod tunables;
mod world;

pub use asset_error::AssetError;
pub use asset_loader::{AssetDecoder, AssetLoader, AssetSlot, AssetSource, Loaded, LoadedAsset, SceneAssets};
pub use astronaut::Astronaut;
pub use butterfly::{Butterfly, Swarm, WingSide};
pub use deferred::Deferred;
pub use driver::{FrameDriver, FrameReport, ResourceLedger};
pub use geometry::{Geometry, MeshData, TextureData};
pub use material::{MaterialDesc, MaterialFlags};
pub use orbit::{OrbitalBody, OrbitalSystem};
pub use primary::PrimaryMesh;
pub use rng::{RngExt, SceneRng};
pub use scene::{
    AstronautSpec, KnotSpec, PlanetSpec, SceneError, SceneLayout, SceneLoadError, StarSpec,
    SunSpec, SwarmSpec,
};
pub use services::{CameraService, CameraView, DrawItem, RenderError, Renderer, ResourceHandle};
pub use starfield::{StarColorBand, StarField};
pub use transform::Transform3D;
pub use tunables::{MotionTunables, SwarmSpawn, DEFAULT_WING_HUE};
pub use world::{MeshRequest, RenderSlot, Renderable, World};

// Re-export commonly used types from spacescape_math for convenience
pub use spacescape_math::{Mat4, Vec3};
