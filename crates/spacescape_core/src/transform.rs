//! 3D Transform (position, rotation, scale)

use serde::{Serialize, Deserialize};
use spacescape_math::{mat4, Mat4, Vec3};

/// Position, Euler rotation (radians, XYZ order) and per-axis scale
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform3D {
    /// Position in world space
    pub position: Vec3,
    /// Euler angles in radians, applied X then Y then Z
    pub rotation: Vec3,
    /// Per-axis scale factor
    pub scale: Vec3,
}

impl Default for Transform3D {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform3D {
    /// Create an identity transform
    pub fn identity() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }

    /// Create a transform with just a position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::identity()
        }
    }

    /// Set a uniform scale
    pub fn with_uniform_scale(mut self, s: f32) -> Self {
        self.scale = Vec3::splat(s);
        self
    }

    /// Model matrix (`T * R * S`)
    pub fn matrix(&self) -> Mat4 {
        mat4::from_trs(self.position, self.rotation, self.scale)
    }

    /// Transform a point from local space to world space
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        mat4::transform_point(self.matrix(), p)
    }

    /// Orient the local +Z axis toward `target`
    ///
    /// Leaves the rotation untouched when `target` coincides with the position.
    pub fn face_towards(&mut self, target: Vec3) {
        let d = target - self.position;
        if d.length_squared() < 1e-12 {
            return;
        }

        // Orthonormal basis with forward on +Z, then decompose into XYZ Euler angles.
        let forward = d.normalized();
        let mut right = Vec3::Y.cross(forward);
        if right.length_squared() < 1e-12 {
            right = Vec3::X;
        }
        let right = right.normalized();
        let up = forward.cross(right);

        let sin_y = forward.x.clamp(-1.0, 1.0);
        self.rotation = if sin_y.abs() < 0.999_999 {
            Vec3::new(
                (-forward.y).atan2(forward.z),
                sin_y.asin(),
                (-up.x).atan2(right.x),
            )
        } else {
            Vec3::new(up.z.atan2(up.y), sin_y.asin(), 0.0)
        };
    }

    /// Translate the transform by an offset
    pub fn translate(&mut self, offset: Vec3) {
        self.position += offset;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    fn vec_approx_eq(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < EPSILON
    }

    #[test]
    fn test_identity_transform() {
        let t = Transform3D::identity();
        let p = Vec3::new(1.0, 2.0, 3.0);
        assert!(vec_approx_eq(t.transform_point(p), p));
    }

    #[test]
    fn test_translation_and_scale() {
        let t = Transform3D::from_position(Vec3::new(1.0, 0.0, 0.0)).with_uniform_scale(0.5);
        let p = t.transform_point(Vec3::new(2.0, 2.0, 2.0));
        assert!(vec_approx_eq(p, Vec3::new(2.0, 1.0, 1.0)));
    }

    #[test]
    fn test_face_towards_origin() {
        for pos in [
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 10.0),
            Vec3::new(-7.0, 0.0, 7.0),
            Vec3::new(3.0, 4.0, -5.0),
        ] {
            let mut t = Transform3D::from_position(pos);
            t.face_towards(Vec3::ZERO);

            // Local +Z must point at the origin
            let forward = mat4::transform_direction(t.matrix(), Vec3::Z);
            let expected = (-pos).normalized();
            assert!(
                vec_approx_eq(forward.normalized(), expected),
                "pos {:?}: forward {:?} expected {:?}",
                pos,
                forward,
                expected
            );
        }
    }

    #[test]
    fn test_face_towards_self_is_noop() {
        let mut t = Transform3D::from_position(Vec3::ONE);
        t.rotation = Vec3::new(0.1, 0.2, 0.3);
        t.face_towards(Vec3::ONE);
        assert_eq!(t.rotation, Vec3::new(0.1, 0.2, 0.3));
    }
}
