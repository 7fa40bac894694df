//! Perspective camera orbiting a target point
//!
//! Position is kept in spherical coordinates around the target so that
//! damped orbit and zoom input never drifts off the sphere.

use spacescape_core::CameraView;
use spacescape_input::OrbitControl;
use spacescape_math::{mat4, Mat4, Vec3};

/// Pitch limit, just short of the poles to keep the up vector valid
const MAX_PITCH: f32 = 1.5;

/// Orbiting perspective camera
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitCamera {
    /// Point the camera looks at
    pub target: Vec3,
    distance: f32,
    /// Angle about world Y, zero looks down -Z
    yaw: f32,
    pitch: f32,
    /// Vertical field of view in degrees
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub aspect: f32,
    /// Zoom limits
    pub min_distance: f32,
    pub max_distance: f32,
    home: (f32, f32, f32),
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, 15.0), Vec3::ZERO)
    }
}

impl OrbitCamera {
    /// Place the camera at `eye`, looking at `target`
    pub fn new(eye: Vec3, target: Vec3) -> Self {
        let offset = eye - target;
        let distance = offset.length().max(1e-3);
        let yaw = offset.x.atan2(offset.z);
        let pitch = (offset.y / distance).clamp(-1.0, 1.0).asin().clamp(-MAX_PITCH, MAX_PITCH);

        Self {
            target,
            distance,
            yaw,
            pitch,
            fov: 75.0,
            near: 0.1,
            far: 1000.0,
            aspect: 16.0 / 9.0,
            min_distance: 1.0,
            max_distance: 500.0,
            home: (distance, yaw, pitch),
        }
    }

    /// Set the projection parameters
    pub fn with_projection(mut self, fov: f32, near: f32, far: f32) -> Self {
        self.fov = fov;
        self.near = near;
        self.far = far;
        self
    }

    /// Set the zoom limits
    pub fn with_distance_limits(mut self, min: f32, max: f32) -> Self {
        self.min_distance = min;
        self.max_distance = max.max(min);
        self.distance = self.distance.clamp(self.min_distance, self.max_distance);
        self
    }

    /// Distance to the target
    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Update the aspect ratio after a resize
    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    /// Return to the initial viewpoint
    pub fn reset(&mut self) {
        (self.distance, self.yaw, self.pitch) = self.home;
    }

    pub fn view_matrix(&self) -> Mat4 {
        mat4::look_at(self.eye(), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        mat4::perspective(self.fov.to_radians(), self.aspect, self.near, self.far)
    }

    /// Matrices for the renderer
    pub fn camera_view(&self) -> CameraView {
        CameraView {
            view: self.view_matrix(),
            projection: self.projection_matrix(),
            eye: self.eye(),
        }
    }
}

impl OrbitControl for OrbitCamera {
    fn orbit(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw = (self.yaw + delta_yaw).rem_euclid(std::f32::consts::TAU);
        self.pitch = (self.pitch + delta_pitch).clamp(-MAX_PITCH, MAX_PITCH);
    }

    fn zoom(&mut self, factor: f32) {
        if factor.is_finite() && factor > 0.0 {
            self.distance = (self.distance * factor).clamp(self.min_distance, self.max_distance);
        }
    }

    fn eye(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.target
            + Vec3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw) * self.distance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    #[test]
    fn test_default_eye() {
        let camera = OrbitCamera::default();
        assert!((camera.eye() - Vec3::new(0.0, 0.0, 15.0)).length() < EPSILON);
        assert_eq!(camera.fov, 75.0);
        assert_eq!(camera.near, 0.1);
        assert_eq!(camera.far, 1000.0);
    }

    #[test]
    fn test_new_recovers_eye() {
        let eye = Vec3::new(3.0, 4.0, -5.0);
        let camera = OrbitCamera::new(eye, Vec3::ZERO);
        assert!((camera.eye() - eye).length() < EPSILON);
    }

    #[test]
    fn test_orbit_keeps_distance() {
        let mut camera = OrbitCamera::default();
        camera.orbit(1.0, 0.3);
        assert!((camera.eye().length() - 15.0).abs() < EPSILON);
    }

    #[test]
    fn test_pitch_clamped() {
        let mut camera = OrbitCamera::default();
        camera.orbit(0.0, 10.0);
        assert_eq!(camera.pitch(), MAX_PITCH);
        camera.orbit(0.0, -20.0);
        assert_eq!(camera.pitch(), -MAX_PITCH);
    }

    #[test]
    fn test_zoom_clamped() {
        let mut camera = OrbitCamera::default().with_distance_limits(2.0, 40.0);
        camera.zoom(100.0);
        assert_eq!(camera.distance(), 40.0);
        camera.zoom(0.001);
        assert_eq!(camera.distance(), 2.0);
        camera.zoom(0.0);
        assert_eq!(camera.distance(), 2.0);
    }

    #[test]
    fn test_reset() {
        let mut camera = OrbitCamera::default();
        camera.orbit(2.0, 0.5);
        camera.zoom(0.5);
        camera.reset();
        assert!((camera.eye() - Vec3::new(0.0, 0.0, 15.0)).length() < EPSILON);
    }

    #[test]
    fn test_view_centers_target() {
        let camera = OrbitCamera::new(Vec3::new(0.0, 5.0, 10.0), Vec3::ZERO);
        let view = camera.camera_view();
        // Target lands on the view axis at the camera distance
        let p = mat4::transform_point(view.view, Vec3::ZERO);
        assert!(p.x.abs() < EPSILON && p.y.abs() < EPSILON);
        assert!((p.z + camera.distance()).abs() < EPSILON);
    }

    #[test]
    fn test_aspect_ignores_degenerate() {
        let mut camera = OrbitCamera::default();
        camera.set_aspect(0.0);
        assert_eq!(camera.aspect, 16.0 / 9.0);
        camera.set_aspect(2.0);
        assert_eq!(camera.aspect, 2.0);
    }
}
