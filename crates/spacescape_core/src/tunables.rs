//! Named motion constants
//!
//! All per-tick increments and rates that drive the vignette. Defaults
//! reproduce the reference look; every value can be overridden from the
//! `[motion]` config section.

use serde::{Serialize, Deserialize};

/// Motion tunables shared by every animated entity
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionTunables {
    /// Global orbital rate `k` in rad/s; body `i` sweeps at `k * (i + 1)`
    pub orbit_rate: f32,
    /// Planet self-spin added every tick (radians)
    pub planet_spin_step: f32,
    /// Torus knot rotation added to x and y every tick (radians)
    pub knot_spin_step: f32,
    /// Peak wing yaw in radians
    pub wing_amplitude: f32,
    /// Peak vertical bob in world units
    pub bob_amplitude: f32,
    /// Per-tick probability that a butterfly picks a new heading
    pub resteer_probability: f32,
    /// Radius of the astronaut's circular sweep
    pub astronaut_orbit_radius: f32,
    /// Angular rate of the astronaut's sweep in rad/s
    pub astronaut_orbit_rate: f32,
}

impl Default for MotionTunables {
    fn default() -> Self {
        Self {
            orbit_rate: 0.1,
            planet_spin_step: 0.01,
            knot_spin_step: 0.01,
            wing_amplitude: 0.5,
            bob_amplitude: 0.02,
            resteer_probability: 0.01,
            astronaut_orbit_radius: 10.0,
            astronaut_orbit_rate: 0.2,
        }
    }
}

/// Wing hue of a butterfly built without a random spawn, the middle of the
/// default spawn hue range
pub const DEFAULT_WING_HUE: f32 = 0.9;

/// Ranges used when spawning butterflies
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwarmSpawn {
    /// Edge length of the spawn cube centered on the origin
    pub extent: f32,
    /// Wing frequency range `[min, max)` in radians per tick
    pub wing_frequency: [f32; 2],
    /// Flight speed range `[min, max)` in units per tick
    pub flight_speed: [f32; 2],
    /// Upper bound of the random initial wing phase
    pub max_initial_phase: f32,
    /// Hue range `[min, max)` for wing colors
    pub hue: [f32; 2],
}

impl Default for SwarmSpawn {
    fn default() -> Self {
        Self {
            extent: 20.0,
            wing_frequency: [0.1, 0.3],
            flight_speed: [0.02, 0.05],
            max_initial_phase: 100.0,
            hue: [0.8, 1.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_wing_hue_inside_spawn_range() {
        let [min, max] = SwarmSpawn::default().hue;
        assert!((min..max).contains(&DEFAULT_WING_HUE));
    }

    #[test]
    fn test_defaults() {
        let t = MotionTunables::default();
        assert_eq!(t.resteer_probability, 0.01);
        assert_eq!(t.astronaut_orbit_radius, 10.0);
        let s = SwarmSpawn::default();
        assert!(s.flight_speed[0] > 0.0);
        assert!(s.wing_frequency[0] > 0.0);
    }

    #[test]
    fn test_partial_ron_uses_defaults() {
        let t: MotionTunables = ron::from_str("(orbit_rate: 0.5)").unwrap();
        assert_eq!(t.orbit_rate, 0.5);
        assert_eq!(t.wing_amplitude, 0.5);
    }
}
