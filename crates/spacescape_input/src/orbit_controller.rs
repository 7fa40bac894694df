//! Damped orbit controller
//!
//! Controls:
//! - Left mouse drag: orbit around the target
//! - Mouse wheel: zoom in/out
//!
//! Drag input is converted into angular velocity which decays every update,
//! so the camera keeps gliding briefly after the mouse is released.

use std::f32::consts::TAU;

use spacescape_math::Vec3;
use winit::event::{ElementState, MouseButton, MouseScrollDelta};

/// Reference frame rate the damping factor is expressed in
const REFERENCE_FPS: f32 = 60.0;

/// Orbit controller for handling input
pub struct OrbitController {
    // Mouse state
    dragging: bool,
    pending_yaw: f32,
    pending_pitch: f32,
    pending_zoom: f32,

    // Damped angular velocity (radians per reference frame)
    yaw_velocity: f32,
    pitch_velocity: f32,

    // Configuration
    pub rotate_sensitivity: f32,
    pub zoom_step: f32,
    /// Fraction of velocity removed per reference frame
    pub damping_factor: f32,
    pub damping_enabled: bool,
    /// Full turns per minute while idle
    pub auto_rotate_speed: f32,
    pub auto_rotate: bool,
}

impl Default for OrbitController {
    fn default() -> Self {
        Self::new()
    }
}

impl OrbitController {
    pub fn new() -> Self {
        Self {
            dragging: false,
            pending_yaw: 0.0,
            pending_pitch: 0.0,
            pending_zoom: 0.0,

            yaw_velocity: 0.0,
            pitch_velocity: 0.0,

            rotate_sensitivity: 0.005,
            zoom_step: 0.95,
            damping_factor: 0.05,
            damping_enabled: true,
            auto_rotate_speed: 0.2,
            auto_rotate: true,
        }
    }

    /// Process mouse button input
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        if button == MouseButton::Left {
            self.dragging = state == ElementState::Pressed;
        }
    }

    /// Process mouse movement (only counts while dragging)
    pub fn process_mouse_motion(&mut self, delta_x: f64, delta_y: f64) {
        if self.dragging {
            self.pending_yaw += delta_x as f32;
            self.pending_pitch += delta_y as f32;
        }
    }

    /// Process mouse wheel input
    pub fn process_scroll(&mut self, delta: MouseScrollDelta) {
        let steps = match delta {
            MouseScrollDelta::LineDelta(_, y) => y,
            MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 50.0,
        };
        self.pending_zoom += steps;
    }

    /// Apply accumulated input to the camera
    ///
    /// Returns the camera eye position.
    pub fn update<C: OrbitControl>(&mut self, camera: &mut C, dt: f32) -> Vec3 {
        let frames = (dt * REFERENCE_FPS).max(0.0);

        // Dragging the mouse to the right swings the camera left around the target
        self.yaw_velocity -= self.pending_yaw * self.rotate_sensitivity;
        self.pitch_velocity -= self.pending_pitch * self.rotate_sensitivity;

        let mut yaw = self.yaw_velocity;
        let mut pitch = self.pitch_velocity;
        if self.damping_enabled {
            // Scale by elapsed frames (capped after stalls), then decay
            yaw *= frames.min(4.0);
            pitch *= frames.min(4.0);
            let keep = (1.0 - self.damping_factor).powf(frames);
            self.yaw_velocity *= keep;
            self.pitch_velocity *= keep;
        } else {
            self.yaw_velocity = 0.0;
            self.pitch_velocity = 0.0;
        }

        if self.auto_rotate && !self.dragging {
            yaw += self.auto_rotate_angle(dt);
        }

        camera.orbit(yaw, pitch);

        if self.pending_zoom != 0.0 {
            camera.zoom(self.zoom_step.powf(self.pending_zoom));
        }

        self.pending_yaw = 0.0;
        self.pending_pitch = 0.0;
        self.pending_zoom = 0.0;

        camera.eye()
    }

    /// Auto-rotation angle for a time step
    pub fn auto_rotate_angle(&self, dt: f32) -> f32 {
        TAU / 60.0 * self.auto_rotate_speed * dt
    }

    /// Stop any residual motion
    pub fn halt(&mut self) {
        self.yaw_velocity = 0.0;
        self.pitch_velocity = 0.0;
        self.pending_yaw = 0.0;
        self.pending_pitch = 0.0;
        self.pending_zoom = 0.0;
    }

    /// Toggle auto-rotation on/off
    pub fn toggle_auto_rotate(&mut self) -> bool {
        self.auto_rotate = !self.auto_rotate;
        self.auto_rotate
    }

    /// Check if the left button is held
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Builder: set drag sensitivity
    pub fn with_rotate_sensitivity(mut self, sensitivity: f32) -> Self {
        self.rotate_sensitivity = sensitivity;
        self
    }

    /// Builder: set zoom factor per wheel step
    pub fn with_zoom_step(mut self, step: f32) -> Self {
        self.zoom_step = step;
        self
    }

    /// Builder: set damping factor, `None` disables damping
    pub fn with_damping(mut self, factor: Option<f32>) -> Self {
        match factor {
            Some(f) => {
                self.damping_factor = f;
                self.damping_enabled = true;
            }
            None => self.damping_enabled = false,
        }
        self
    }

    /// Builder: set auto-rotate speed, `None` disables it
    pub fn with_auto_rotate(mut self, speed: Option<f32>) -> Self {
        match speed {
            Some(s) => {
                self.auto_rotate_speed = s;
                self.auto_rotate = true;
            }
            None => self.auto_rotate = false,
        }
        self
    }
}

/// Trait for orbit camera control
/// Allows the controller to work with different camera implementations
pub trait OrbitControl {
    /// Rotate around the target by yaw (about world Y) and pitch
    fn orbit(&mut self, delta_yaw: f32, delta_pitch: f32);
    /// Multiply the distance to the target
    fn zoom(&mut self, factor: f32);
    /// Eye position
    fn eye(&self) -> Vec3;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingCamera {
        yaw: f32,
        pitch: f32,
        distance: f32,
    }

    impl OrbitControl for RecordingCamera {
        fn orbit(&mut self, delta_yaw: f32, delta_pitch: f32) {
            self.yaw += delta_yaw;
            self.pitch += delta_pitch;
        }

        fn zoom(&mut self, factor: f32) {
            self.distance *= factor;
        }

        fn eye(&self) -> Vec3 {
            Vec3::new(0.0, 0.0, self.distance)
        }
    }

    fn camera() -> RecordingCamera {
        RecordingCamera {
            distance: 15.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_motion_ignored_without_drag() {
        let mut controller = OrbitController::new().with_auto_rotate(None);
        let mut cam = camera();
        controller.process_mouse_motion(100.0, 50.0);
        controller.update(&mut cam, 1.0 / 60.0);
        assert_eq!(cam.yaw, 0.0);
        assert_eq!(cam.pitch, 0.0);
    }

    #[test]
    fn test_drag_orbits() {
        let mut controller = OrbitController::new().with_auto_rotate(None).with_damping(None);
        let mut cam = camera();
        controller.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        controller.process_mouse_motion(100.0, 0.0);
        controller.update(&mut cam, 1.0 / 60.0);
        assert!((cam.yaw + 0.5).abs() < 1e-5);

        // Without damping nothing carries over
        controller.update(&mut cam, 1.0 / 60.0);
        assert!((cam.yaw + 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_damping_glides_and_decays() {
        let mut controller = OrbitController::new().with_auto_rotate(None);
        let mut cam = camera();
        controller.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        controller.process_mouse_motion(20.0, 0.0);
        controller.process_mouse_button(MouseButton::Left, ElementState::Released);

        controller.update(&mut cam, 1.0 / 60.0);
        let first = cam.yaw;
        controller.update(&mut cam, 1.0 / 60.0);
        let second = cam.yaw - first;

        assert!(first < 0.0);
        assert!(second < 0.0, "camera should keep gliding");
        assert!(second.abs() < first.abs(), "glide should decay");

        for _ in 0..600 {
            controller.update(&mut cam, 1.0 / 60.0);
        }
        let before = cam.yaw;
        controller.update(&mut cam, 1.0 / 60.0);
        assert!((cam.yaw - before).abs() < 1e-6);
    }

    #[test]
    fn test_auto_rotate_rate() {
        let mut controller = OrbitController::new();
        let mut cam = camera();
        // 0.2 turns per minute -> 60 s gives a fifth of a turn
        for _ in 0..60 {
            controller.update(&mut cam, 1.0);
        }
        assert!((cam.yaw - TAU * 0.2).abs() < 1e-3);
    }

    #[test]
    fn test_auto_rotate_pauses_while_dragging() {
        let mut controller = OrbitController::new();
        let mut cam = camera();
        controller.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        controller.update(&mut cam, 1.0);
        assert_eq!(cam.yaw, 0.0);
    }

    #[test]
    fn test_toggle_auto_rotate() {
        let mut controller = OrbitController::new();
        assert!(!controller.toggle_auto_rotate());
        let mut cam = camera();
        controller.update(&mut cam, 1.0);
        assert_eq!(cam.yaw, 0.0);
        assert!(controller.toggle_auto_rotate());
    }

    #[test]
    fn test_scroll_zooms() {
        let mut controller = OrbitController::new().with_auto_rotate(None);
        let mut cam = camera();
        controller.process_scroll(MouseScrollDelta::LineDelta(0.0, 2.0));
        let eye = controller.update(&mut cam, 1.0 / 60.0);
        assert!((cam.distance - 15.0 * 0.95 * 0.95).abs() < 1e-4);
        assert_eq!(eye.z, cam.distance);
    }
}
