//! Frame driver
//!
//! The [`FrameDriver`] runs the per-frame sequence: apply finished asset
//! loads, tick the [`World`], update the camera and hand the composed draw
//! list to the renderer. Every GPU resource it creates is recorded in a
//! [`ResourceLedger`] so teardown can release each one exactly once.

use std::collections::HashMap;

use crate::asset_loader::{AssetSlot, AssetSource, LoadedAsset};
use crate::geometry::{Geometry, MeshData, TextureData};
use crate::material::{MaterialDesc, MaterialFlags};
use crate::services::{CameraService, DrawItem, RenderError, Renderer, ResourceHandle};
use crate::world::{RenderSlot, World};

/// Handles acquired from the renderer, in acquisition order
#[derive(Debug, Default)]
pub struct ResourceLedger {
    handles: Vec<ResourceHandle>,
}

impl ResourceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a freshly created handle
    pub fn record(&mut self, handle: ResourceHandle) -> ResourceHandle {
        self.handles.push(handle);
        handle
    }

    /// Number of live handles
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Dispose every recorded handle, newest first
    ///
    /// Returns the number of handles the renderer actually released. The
    /// ledger is empty afterwards, so calling this again does nothing.
    pub fn release_all(&mut self, renderer: &mut dyn Renderer) -> usize {
        let mut released = 0;
        while let Some(handle) = self.handles.pop() {
            if renderer.dispose(handle) {
                released += 1;
            } else {
                log::warn!("Renderer did not recognise {:?} during release", handle);
            }
        }
        released
    }
}

/// What happened during one frame
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Draw items handed to the renderer
    pub drawn: usize,
    /// Finished loads applied this frame (successes and failures)
    pub assets: usize,
}

/// Owns the resource bookkeeping of the render loop
#[derive(Debug, Default)]
pub struct FrameDriver {
    ledger: ResourceLedger,
    bindings: HashMap<RenderSlot, ResourceHandle>,
    draw_items: Vec<DrawItem>,
}

impl FrameDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create every mesh and the star points for `world`
    ///
    /// Anything created before a failure stays recorded and is released by
    /// [`FrameDriver::teardown`].
    pub fn setup(&mut self, world: &World, renderer: &mut dyn Renderer) -> Result<(), RenderError> {
        let stars = renderer.create_points(world.stars(), &MaterialDesc::stars())?;
        self.bind(RenderSlot::Stars, stars);

        let requests = world.mesh_requests();
        let count = requests.len();
        for request in requests {
            let handle = renderer.create_mesh(&request.geometry, &request.material)?;
            self.bind(request.slot, handle);
        }

        log::info!("Frame driver ready: {} meshes, {} stars", count, world.stars().len());
        Ok(())
    }

    /// Run one frame
    ///
    /// Asset failures and recoverable draw errors are logged and swallowed.
    /// Only fatal renderer errors are returned.
    pub fn frame(
        &mut self,
        world: &mut World,
        renderer: &mut dyn Renderer,
        camera: &mut dyn CameraService,
        assets: &mut dyn AssetSource,
        elapsed: f32,
        dt: f32,
    ) -> Result<FrameReport, RenderError> {
        let loaded = assets.drain();
        let applied = loaded.len();
        for asset in loaded {
            self.apply(asset, world, renderer)?;
        }

        world.tick(elapsed, dt);
        camera.update(dt);

        let drawn = self.submit(world, renderer, &*camera)?;
        log::trace!("Frame at {:.3}s: {} draw items", elapsed, drawn);
        Ok(FrameReport {
            drawn,
            assets: applied,
        })
    }

    /// Draw the world as it is, without ticking it or applying loads
    ///
    /// Used while the animation is paused; the camera keeps moving.
    pub fn redraw(
        &mut self,
        world: &World,
        renderer: &mut dyn Renderer,
        camera: &mut dyn CameraService,
        dt: f32,
    ) -> Result<FrameReport, RenderError> {
        camera.update(dt);
        let drawn = self.submit(world, renderer, &*camera)?;
        Ok(FrameReport { drawn, assets: 0 })
    }

    /// Release every resource acquired so far
    ///
    /// Idempotent: a second call releases nothing and returns 0.
    pub fn teardown(&mut self, renderer: &mut dyn Renderer) -> usize {
        self.bindings.clear();
        self.draw_items.clear();
        let released = self.ledger.release_all(renderer);
        if released > 0 {
            log::info!("Released {} GPU resources", released);
        }
        released
    }

    /// Mesh bound to a slot, if any
    pub fn binding(&self, slot: RenderSlot) -> Option<ResourceHandle> {
        self.bindings.get(&slot).copied()
    }

    /// Resources currently held
    pub fn resource_count(&self) -> usize {
        self.ledger.len()
    }

    fn submit(
        &mut self,
        world: &World,
        renderer: &mut dyn Renderer,
        camera: &dyn CameraService,
    ) -> Result<usize, RenderError> {
        self.draw_items.clear();
        for renderable in world.renderables() {
            if let Some(&mesh) = self.bindings.get(&renderable.slot) {
                self.draw_items.push(DrawItem {
                    mesh,
                    model: renderable.model,
                });
            }
        }

        let view = camera.view();
        match renderer.draw(&self.draw_items, &view) {
            Ok(()) => {}
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => log::warn!("Frame skipped: {}", e),
        }
        Ok(self.draw_items.len())
    }

    fn bind(&mut self, slot: RenderSlot, handle: ResourceHandle) {
        self.ledger.record(handle);
        self.bindings.insert(slot, handle);
    }

    fn apply(
        &mut self,
        asset: LoadedAsset,
        world: &mut World,
        renderer: &mut dyn Renderer,
    ) -> Result<(), RenderError> {
        match asset {
            LoadedAsset::Texture(loaded) => match loaded.result {
                Ok(texture) => self.apply_texture(loaded.slot, &texture, renderer),
                Err(e) => {
                    log::warn!("Texture {} unavailable, drawing untextured: {}", loaded.path.display(), e);
                    Ok(())
                }
            },
            LoadedAsset::Model(loaded) => match loaded.result {
                Ok(mesh) => self.apply_model(mesh, world, renderer),
                Err(e) => {
                    log::error!("Model {} failed to load, continuing without it: {}", loaded.path.display(), e);
                    Ok(())
                }
            },
        }
    }

    fn apply_texture(
        &mut self,
        slot: AssetSlot,
        texture: &TextureData,
        renderer: &mut dyn Renderer,
    ) -> Result<(), RenderError> {
        let target = match slot {
            AssetSlot::SunTexture => RenderSlot::Sun,
            AssetSlot::PlanetTexture(i) => RenderSlot::Planet(i),
            AssetSlot::AstronautModel => {
                log::warn!("Texture delivered to the model slot; ignored");
                return Ok(());
            }
        };
        let Some(&mesh) = self.bindings.get(&target) else {
            log::warn!("No mesh for {:?}; texture dropped", target);
            return Ok(());
        };

        let handle = match renderer.create_texture(texture) {
            Ok(handle) => self.ledger.record(handle),
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                log::warn!("Could not upload texture for {:?}: {}", target, e);
                return Ok(());
            }
        };
        match renderer.bind_texture(mesh, handle) {
            Ok(()) => log::debug!("Textured {:?} ({}x{})", target, texture.width, texture.height),
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => log::warn!("Could not bind texture to {:?}: {}", target, e),
        }
        Ok(())
    }

    fn apply_model(
        &mut self,
        mesh: MeshData,
        world: &mut World,
        renderer: &mut dyn Renderer,
    ) -> Result<(), RenderError> {
        let mut material = MaterialDesc::default();
        if !mesh.colors.is_empty() {
            material.flags |= MaterialFlags::VERTEX_COLORS;
        }
        let triangles = mesh.triangle_count();

        match renderer.create_mesh(&Geometry::Mesh(mesh), &material) {
            Ok(handle) => {
                if let Some(old) = self.bindings.insert(RenderSlot::Astronaut, handle) {
                    log::warn!("Astronaut mesh replaced; previous {:?} kept until teardown", old);
                }
                self.ledger.record(handle);
                world.install_astronaut();
                log::info!("Astronaut loaded ({} triangles)", triangles);
                Ok(())
            }
            Err(e) if e.is_fatal() => Err(e),
            Err(e) => {
                log::warn!("Could not upload astronaut mesh: {}", e);
                Ok(())
            }
        }
    }
}
