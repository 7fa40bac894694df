//! Application systems
//!
//! Window, clock, camera and GPU state used by the event loop in main.rs.

mod camera;
mod render;
mod simulation;
mod window;

pub use camera::CameraSystem;
pub use render::RenderSystem;
pub use simulation::{FrameTime, SimulationSystem};
pub use window::{WindowError, WindowSystem};
