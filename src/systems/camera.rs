//! Camera system
//!
//! Pairs the orbit camera with its input controller and exposes both to the
//! frame driver as a [`CameraService`].

use spacescape_core::{CameraService, CameraView};
use spacescape_input::OrbitController;
use spacescape_render::OrbitCamera;
use winit::event::{ElementState, MouseButton, MouseScrollDelta};

/// Orbit camera driven by mouse input
pub struct CameraSystem {
    camera: OrbitCamera,
    controller: OrbitController,
}

impl CameraSystem {
    pub fn new(camera: OrbitCamera, controller: OrbitController) -> Self {
        Self { camera, controller }
    }

    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        self.controller.process_mouse_button(button, state);
    }

    pub fn process_mouse_motion(&mut self, delta_x: f64, delta_y: f64) {
        self.controller.process_mouse_motion(delta_x, delta_y);
    }

    pub fn process_scroll(&mut self, delta: MouseScrollDelta) {
        self.controller.process_scroll(delta);
    }

    /// Update the projection after a resize
    pub fn set_aspect(&mut self, aspect: f32) {
        self.camera.set_aspect(aspect);
    }

    /// Return to the starting viewpoint and stop residual motion
    pub fn reset(&mut self) {
        self.controller.halt();
        self.camera.reset();
        log::info!("Camera reset to starting position");
    }

    /// Toggle auto-rotation, returning the new state
    pub fn toggle_auto_rotate(&mut self) -> bool {
        self.controller.toggle_auto_rotate()
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }
}

impl CameraService for CameraSystem {
    fn update(&mut self, dt: f32) {
        self.controller.update(&mut self.camera, dt);
    }

    fn view(&self) -> CameraView {
        self.camera.camera_view()
    }
}
