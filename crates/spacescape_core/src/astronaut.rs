//! The loaded astronaut model and its circular sweep

use spacescape_math::{Mat4, Vec3};

use crate::transform::Transform3D;

/// Astronaut entity, present only after its model has loaded
#[derive(Clone, Debug, PartialEq)]
pub struct Astronaut {
    /// Current transform
    pub transform: Transform3D,
    /// Radius of the sweep around the origin
    pub sweep_radius: f32,
    /// Angular rate in rad/s
    pub sweep_rate: f32,
}

impl Astronaut {
    /// Create an astronaut at `(0, 0, radius)` with uniform `scale`
    pub fn new(scale: f32, sweep_radius: f32, sweep_rate: f32) -> Self {
        Self {
            transform: Transform3D::from_position(Vec3::new(0.0, 0.0, sweep_radius))
                .with_uniform_scale(scale),
            sweep_radius,
            sweep_rate,
        }
    }

    /// Place on the sweep circle for `elapsed` seconds and face the origin
    pub fn update(&mut self, elapsed: f32) {
        let (sin, cos) = (elapsed * self.sweep_rate).sin_cos();
        self.transform.position.x = self.sweep_radius * cos;
        self.transform.position.z = self.sweep_radius * sin;
        self.transform.face_towards(Vec3::ZERO);
    }

    /// Model matrix
    pub fn matrix(&self) -> Mat4 {
        self.transform.matrix()
    }
}
