//! Orbit camera input handling
//!
//! Mouse drag orbits the camera around its target, the wheel zooms, and the
//! view slowly auto-rotates. Panning is not supported.

mod orbit_controller;

pub use orbit_controller::{OrbitControl, OrbitController};
