//! GPU rendering system
//!
//! Creates the render context for the window and owns the renderer the
//! frame driver draws through.

use std::sync::Arc;
use winit::window::Window;
use spacescape_render::{GpuRenderer, RenderContext, RenderError};
use crate::config::RenderingConfig;

/// Manages GPU rendering
pub struct RenderSystem {
    renderer: GpuRenderer,
}

impl RenderSystem {
    /// Create render system from window and config
    ///
    /// Fails when the window has no usable surface or adapter.
    pub fn new(
        window: Arc<Window>,
        render_config: &RenderingConfig,
        vsync: bool,
    ) -> Result<Self, RenderError> {
        let context = pollster::block_on(RenderContext::new(window, vsync))?;
        log::info!(
            "Render surface {}x{} ({:?})",
            context.size.width,
            context.size.height,
            context.format()
        );
        let renderer = GpuRenderer::new(
            context,
            render_config.lighting(),
            render_config.background_color,
        );
        Ok(Self { renderer })
    }

    /// Handle window resize
    pub fn resize(&mut self, width: u32, height: u32) {
        self.renderer.resize(width, height);
    }

    /// Width over height of the surface
    pub fn aspect_ratio(&self) -> f32 {
        self.renderer.aspect_ratio()
    }

    /// Renderer for the frame driver
    pub fn renderer_mut(&mut self) -> &mut GpuRenderer {
        &mut self.renderer
    }
}
