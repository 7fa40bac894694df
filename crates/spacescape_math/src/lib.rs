//! 3D Mathematics Library
//!
//! Small vector and matrix toolkit shared by the Spacescape crates.
//!
//! ## Core Types
//!
//! - [`Vec3`] - 3D vector with x, y, z components
//! - [`Mat4`] - column-major 4x4 matrix used for model/view/projection
//!
//! ## Colors
//!
//! - [`hsl_to_rgb`] - HSL to linear RGB conversion for procedural tints

mod vec3;
pub mod mat4;
pub mod color;

pub use vec3::Vec3;
pub use mat4::Mat4;
pub use color::{hsl_to_rgb, hex_to_rgb};
