//! Spacescape - a 3D space vignette
//!
//! Library half of the binary: configuration, input mapping and the
//! window/clock/camera/render systems driven by `main.rs`.

pub mod config;
pub mod input;
pub mod systems;
