//! Interfaces to the external collaborators
//!
//! The core drives a [`Renderer`] and a [`CameraService`] without knowing how
//! either is implemented. Resources created through the renderer are
//! identified by opaque [`ResourceHandle`]s.

use std::fmt;

use spacescape_math::{Mat4, Vec3};

use crate::geometry::{Geometry, TextureData};
use crate::material::MaterialDesc;
use crate::starfield::StarField;

/// Opaque id of a GPU-resident resource
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceHandle(pub u64);

/// One mesh to draw with its model matrix
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawItem {
    pub mesh: ResourceHandle,
    pub model: Mat4,
}

/// Camera state handed to the renderer each frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraView {
    pub view: Mat4,
    pub projection: Mat4,
    /// Eye position in world space
    pub eye: Vec3,
}

/// Rendering backend
pub trait Renderer {
    /// Upload a mesh with its material
    fn create_mesh(
        &mut self,
        geometry: &Geometry,
        material: &MaterialDesc,
    ) -> Result<ResourceHandle, RenderError>;

    /// Upload a point cloud
    fn create_points(
        &mut self,
        stars: &StarField,
        material: &MaterialDesc,
    ) -> Result<ResourceHandle, RenderError>;

    /// Upload a texture
    fn create_texture(&mut self, texture: &TextureData) -> Result<ResourceHandle, RenderError>;

    /// Use `texture` as the base color map of `mesh`
    fn bind_texture(
        &mut self,
        mesh: ResourceHandle,
        texture: ResourceHandle,
    ) -> Result<(), RenderError>;

    /// Draw one frame
    fn draw(&mut self, items: &[DrawItem], camera: &CameraView) -> Result<(), RenderError>;

    /// Release a resource
    ///
    /// Returns `false` if the handle was unknown or already released.
    fn dispose(&mut self, handle: ResourceHandle) -> bool;
}

/// Camera/control service
pub trait CameraService {
    /// Advance damping and auto-rotation
    fn update(&mut self, dt: f32);

    /// Current camera matrices
    fn view(&self) -> CameraView;
}

/// Error type for renderer operations
#[derive(Debug)]
pub enum RenderError {
    /// No compatible GPU adapter
    NoAdapter,
    /// The window surface could not be created
    NoSurface(String),
    /// Device request failed
    Device(String),
    /// The surface was lost or outdated and has to be reconfigured
    SurfaceLost,
    /// GPU memory exhausted
    OutOfMemory,
    /// Handle does not name a live resource of the expected kind
    UnknownResource(ResourceHandle),
    /// Anything else, including per-frame timeouts
    Other(String),
}

impl RenderError {
    /// Errors that must stop the application
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            RenderError::NoAdapter
                | RenderError::NoSurface(_)
                | RenderError::Device(_)
                | RenderError::OutOfMemory
        )
    }
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::NoAdapter => write!(f, "No suitable GPU adapter found"),
            RenderError::NoSurface(msg) => write!(f, "Failed to create render surface: {}", msg),
            RenderError::Device(msg) => write!(f, "Failed to create device: {}", msg),
            RenderError::SurfaceLost => write!(f, "Render surface lost"),
            RenderError::OutOfMemory => write!(f, "Out of GPU memory"),
            RenderError::UnknownResource(handle) => write!(f, "Unknown resource {:?}", handle),
            RenderError::Other(msg) => write!(f, "Render error: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_classification() {
        assert!(RenderError::NoAdapter.is_fatal());
        assert!(RenderError::NoSurface("headless".into()).is_fatal());
        assert!(RenderError::OutOfMemory.is_fatal());
        assert!(!RenderError::SurfaceLost.is_fatal());
        assert!(!RenderError::UnknownResource(ResourceHandle(3)).is_fatal());
    }

    #[test]
    fn test_display() {
        let msg = format!("{}", RenderError::NoSurface("no window".into()));
        assert!(msg.contains("surface"));
        assert!(msg.contains("no window"));
    }
}
