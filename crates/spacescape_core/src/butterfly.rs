//! Butterfly agent motion model
//!
//! Each butterfly flies straight along its heading, flaps two mirrored wings
//! and occasionally picks a brand new heading at random. There is no
//! steering toward goals and no containment: butterflies may drift away.

use spacescape_math::{mat4, Mat4, Vec3};

use crate::rng::{RngExt, SceneRng};
use crate::tunables::{MotionTunables, SwarmSpawn, DEFAULT_WING_HUE};

/// Which wing of a butterfly
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WingSide {
    Left,
    Right,
}

impl WingSide {
    /// Local x offset of the wing pivot
    pub fn offset(self) -> f32 {
        match self {
            WingSide::Left => -0.5,
            WingSide::Right => 0.5,
        }
    }
}

/// A single wandering butterfly
#[derive(Clone, Debug, PartialEq)]
pub struct Butterfly {
    /// Position without the vertical bob
    pub position: Vec3,
    /// Unit flight direction
    heading: Vec3,
    /// Wing phase accumulator (radians)
    pub wing_phase: f32,
    /// Phase advance per tick
    pub wing_frequency: f32,
    /// Distance flown per tick
    pub flight_speed: f32,
    /// Wing hue in `0..1`
    pub hue: f32,
}

impl Butterfly {
    /// Create a butterfly with [`DEFAULT_WING_HUE`]; the heading is normalized
    pub fn new(position: Vec3, heading: Vec3, wing_frequency: f32, flight_speed: f32) -> Self {
        Self {
            position,
            heading: heading.normalized(),
            wing_phase: 0.0,
            wing_frequency,
            flight_speed,
            hue: DEFAULT_WING_HUE,
        }
    }

    /// Spawn with randomized parameters
    pub fn spawn(spawn: &SwarmSpawn, rng: &mut SceneRng) -> Self {
        let position = rng.random_in_cube(spawn.extent);
        let wing_frequency = rng.random_f32(spawn.wing_frequency[0], spawn.wing_frequency[1]);
        let flight_speed = rng.random_f32(spawn.flight_speed[0], spawn.flight_speed[1]);
        let wing_phase = rng.random_f32(0.0, spawn.max_initial_phase);
        let heading = rng.random_unit_vector();
        let hue = rng.random_f32(spawn.hue[0], spawn.hue[1]);

        Self {
            position,
            heading,
            wing_phase,
            wing_frequency,
            flight_speed,
            hue,
        }
    }

    /// Current unit heading
    pub fn heading(&self) -> Vec3 {
        self.heading
    }

    /// Replace the heading; the new value is normalized
    pub fn set_heading(&mut self, heading: Vec3) {
        self.heading = heading.normalized();
    }

    /// Advance one tick
    ///
    /// Returns `true` if the butterfly re-steered this tick.
    pub fn update(&mut self, tunables: &MotionTunables, rng: &mut SceneRng) -> bool {
        self.wing_phase += self.wing_frequency;
        self.position += self.heading * self.flight_speed;

        if rng.random_bool(tunables.resteer_probability) {
            self.heading = rng.random_unit_vector();
            return true;
        }
        false
    }

    /// Wing yaw for one side; the two sides are mirrored
    pub fn wing_angle(&self, side: WingSide, amplitude: f32) -> f32 {
        let deflection = self.wing_phase.sin() * amplitude;
        match side {
            WingSide::Left => deflection,
            WingSide::Right => -deflection,
        }
    }

    /// Vertical bob derived from the current phase
    pub fn bob(&self, amplitude: f32) -> f32 {
        (self.wing_phase * 2.0).sin() * amplitude
    }

    /// Position including the bob, as drawn
    pub fn render_position(&self, bob_amplitude: f32) -> Vec3 {
        self.position + Vec3::new(0.0, self.bob(bob_amplitude), 0.0)
    }

    /// Model matrix for one wing
    pub fn wing_matrix(&self, side: WingSide, tunables: &MotionTunables) -> Mat4 {
        let body = mat4::translation(self.render_position(tunables.bob_amplitude));
        let pivot = mat4::translation(Vec3::new(side.offset(), 0.0, 0.0));
        let flap = mat4::rotation_y(self.wing_angle(side, tunables.wing_amplitude));
        mat4::mul(body, mat4::mul(pivot, flap))
    }
}

/// Fixed-size batch of butterflies
#[derive(Clone, Debug, Default)]
pub struct Swarm {
    butterflies: Vec<Butterfly>,
}

impl Swarm {
    /// Spawn `count` butterflies
    pub fn spawn(count: usize, spawn: &SwarmSpawn, rng: &mut SceneRng) -> Self {
        let butterflies = (0..count).map(|_| Butterfly::spawn(spawn, rng)).collect();
        Self { butterflies }
    }

    /// Advance every butterfly one tick
    ///
    /// Returns the number of re-steer events.
    pub fn update(&mut self, tunables: &MotionTunables, rng: &mut SceneRng) -> usize {
        let mut resteered = 0;
        for butterfly in &mut self.butterflies {
            if butterfly.update(tunables, rng) {
                resteered += 1;
            }
        }
        if resteered > 0 {
            log::trace!("{} butterflies changed heading", resteered);
        }
        resteered
    }

    /// All butterflies
    pub fn butterflies(&self) -> &[Butterfly] {
        &self.butterflies
    }

    /// Number of butterflies
    #[inline]
    pub fn len(&self) -> usize {
        self.butterflies.len()
    }

    /// Check if the swarm is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.butterflies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_resteer() -> MotionTunables {
        MotionTunables {
            resteer_probability: 0.0,
            ..MotionTunables::default()
        }
    }

    #[test]
    fn test_heading_normalized_on_construction() {
        let b = Butterfly::new(Vec3::ZERO, Vec3::new(3.0, 0.0, 4.0), 0.2, 0.03);
        assert!((b.heading().length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_explicit_butterfly_uses_default_hue() {
        let b = Butterfly::new(Vec3::ZERO, Vec3::X, 0.2, 0.03);
        assert_eq!(b.hue, DEFAULT_WING_HUE);
    }

    #[test]
    fn test_heading_normalized_on_set() {
        let mut b = Butterfly::new(Vec3::ZERO, Vec3::X, 0.2, 0.03);
        b.set_heading(Vec3::new(0.0, -9.0, 0.0));
        assert!((b.heading().length() - 1.0).abs() < 1e-6);
        assert!((b.heading().y + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_spawned_heading_is_unit() {
        let mut rng = SceneRng::new(4);
        let swarm = Swarm::spawn(20, &SwarmSpawn::default(), &mut rng);
        for b in swarm.butterflies() {
            assert!((b.heading().length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_heading_unit_after_every_resteer() {
        let mut rng = SceneRng::new(8);
        let tunables = MotionTunables {
            resteer_probability: 1.0,
            ..MotionTunables::default()
        };
        let mut b = Butterfly::new(Vec3::ZERO, Vec3::X, 0.2, 0.03);
        for _ in 0..200 {
            assert!(b.update(&tunables, &mut rng));
            assert!((b.heading().length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_straight_line_without_resteer() {
        let mut rng = SceneRng::new(5);
        let tunables = no_resteer();
        let mut b = Butterfly::spawn(&SwarmSpawn::default(), &mut rng);
        let start = b.position;
        let heading = b.heading();

        for _ in 0..100 {
            assert!(!b.update(&tunables, &mut rng));
        }

        assert_eq!(b.heading(), heading);
        let expected = start + heading * b.flight_speed * 100.0;
        assert!((b.position - expected).length() < 1e-4, "{:?} vs {:?}", b.position, expected);
    }

    #[test]
    fn test_wings_mirror() {
        let mut b = Butterfly::new(Vec3::ZERO, Vec3::X, 0.2, 0.03);
        b.wing_phase = 1.1;
        let left = b.wing_angle(WingSide::Left, 0.5);
        let right = b.wing_angle(WingSide::Right, 0.5);
        assert_eq!(left, -right);
        assert!((left - 1.1f32.sin() * 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_bob_not_accumulated() {
        let mut rng = SceneRng::new(6);
        let tunables = no_resteer();
        let mut b = Butterfly::new(Vec3::ZERO, Vec3::X, 0.3, 0.0);
        for _ in 0..50 {
            b.update(&tunables, &mut rng);
        }
        // Zero flight speed: stored position never moves, bob stays bounded
        assert_eq!(b.position, Vec3::ZERO);
        let drawn = b.render_position(tunables.bob_amplitude);
        assert!(drawn.y.abs() <= tunables.bob_amplitude + 1e-6);
    }

    #[test]
    fn test_phase_advances_by_frequency() {
        let mut rng = SceneRng::new(6);
        let mut b = Butterfly::new(Vec3::ZERO, Vec3::X, 0.25, 0.0);
        for _ in 0..4 {
            b.update(&no_resteer(), &mut rng);
        }
        assert!((b.wing_phase - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_wing_matrix_places_pivot() {
        let mut b = Butterfly::new(Vec3::new(1.0, 2.0, 3.0), Vec3::X, 0.2, 0.03);
        b.wing_phase = 0.0;
        let tunables = MotionTunables::default();
        let m = b.wing_matrix(WingSide::Right, &tunables);
        let pivot = mat4::transform_point(m, Vec3::ZERO);
        assert!((pivot - Vec3::new(1.5, 2.0, 3.0)).length() < 1e-5);
    }

    #[test]
    fn test_spawn_ranges() {
        let mut rng = SceneRng::new(10);
        let spawn = SwarmSpawn::default();
        let swarm = Swarm::spawn(200, &spawn, &mut rng);
        for b in swarm.butterflies() {
            assert!((0.1..0.3).contains(&b.wing_frequency));
            assert!((0.02..0.05).contains(&b.flight_speed));
            assert!((0.8..1.0).contains(&b.hue));
            for c in [b.position.x, b.position.y, b.position.z] {
                assert!((-10.0..=10.0).contains(&c));
            }
        }
    }
}
