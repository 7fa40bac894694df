//! Orbital motion model
//!
//! Planets sweep fixed-radius circles in the XZ plane. The angle is a pure
//! function of elapsed time and body index, so frame rate never changes
//! where a planet is.

use spacescape_math::Vec3;

use crate::scene::PlanetSpec;

/// A body on a circular orbit around the origin
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitalBody {
    /// Distance from the origin (fixed at creation)
    pub orbit_radius: f32,
    /// Multiplier on the global orbital rate (`index + 1`)
    pub speed_factor: f32,
    /// Visual sphere radius
    pub visual_radius: f32,
    /// Fixed y coordinate
    pub height: f32,
    /// Current orbital angle in radians
    pub angle: f32,
    /// Self-rotation about the body's y axis
    pub spin: f32,
    /// Current position
    pub position: Vec3,
}

impl OrbitalBody {
    /// Create a body for orbit slot `index`, placed at `(radius, height, 0)`
    pub fn new(index: usize, orbit_radius: f32, visual_radius: f32) -> Self {
        Self {
            orbit_radius,
            speed_factor: (index + 1) as f32,
            visual_radius,
            height: 0.0,
            angle: 0.0,
            spin: 0.0,
            position: Vec3::new(orbit_radius, 0.0, 0.0),
        }
    }

    /// Orbital angle at `elapsed` seconds for global rate `k`
    #[inline]
    pub fn angle_at(&self, elapsed: f32, k: f32) -> f32 {
        elapsed * k * self.speed_factor
    }

    /// Recompute the position from elapsed time
    pub fn update(&mut self, elapsed: f32, k: f32) {
        self.angle = self.angle_at(elapsed, k);
        let (sin, cos) = self.angle.sin_cos();
        self.position = Vec3::new(self.orbit_radius * cos, self.height, self.orbit_radius * sin);
    }
}

/// All orbital bodies, indexed in creation order
#[derive(Clone, Debug, Default)]
pub struct OrbitalSystem {
    bodies: Vec<OrbitalBody>,
}

impl OrbitalSystem {
    /// Build bodies from an ordered list of planet records
    pub fn from_specs(specs: &[PlanetSpec]) -> Self {
        let bodies = specs
            .iter()
            .enumerate()
            .map(|(i, spec)| OrbitalBody::new(i, spec.radius, spec.size))
            .collect();
        Self { bodies }
    }

    /// Advance every body
    ///
    /// Position depends on `elapsed` only. Spin advances by `spin_step` per call.
    pub fn update(&mut self, elapsed: f32, k: f32, spin_step: f32) {
        for body in &mut self.bodies {
            body.update(elapsed, k);
            body.spin += spin_step;
        }
    }

    /// All bodies
    pub fn bodies(&self) -> &[OrbitalBody] {
        &self.bodies
    }

    /// Get a body by index
    pub fn get(&self, index: usize) -> Option<&OrbitalBody> {
        self.bodies.get(index)
    }

    /// Number of bodies
    #[inline]
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Check if there are no bodies
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}
