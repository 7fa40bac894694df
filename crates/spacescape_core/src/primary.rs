//! The spinning torus knot at the center of the scene

use spacescape_math::{mat4, Mat4, Vec3};

/// Single mesh whose only state is a continuously increasing rotation
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PrimaryMesh {
    /// Euler rotation in radians
    pub rotation: Vec3,
}

impl PrimaryMesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `step` to the x and y rotation
    pub fn spin(&mut self, step: f32) {
        self.rotation.x += step;
        self.rotation.y += step;
    }

    /// Model matrix
    pub fn matrix(&self) -> Mat4 {
        mat4::rotation_euler(self.rotation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spin_accumulates_on_x_and_y() {
        let mut knot = PrimaryMesh::new();
        for _ in 0..100 {
            knot.spin(0.01);
        }
        assert!((knot.rotation.x - 1.0).abs() < 1e-4);
        assert!((knot.rotation.y - 1.0).abs() < 1e-4);
        assert_eq!(knot.rotation.z, 0.0);
    }
}
