//! 4x4 Matrix utilities for 3D transformations
//!
//! Matrices are column-major (`m[column][row]`), matching WGSL's `mat4x4<f32>`
//! layout so they can be uploaded to uniform buffers without conversion.
//! Projection matrices target wgpu's clip space (depth in `0..1`).

use crate::Vec3;

/// 4x4 matrix type (column-major)
pub type Mat4 = [[f32; 4]; 4];

/// Identity matrix
pub const IDENTITY: Mat4 = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// Multiply two 4x4 matrices: result = a * b
///
/// In column-major convention, this applies b first, then a.
#[allow(clippy::needless_range_loop)]
pub fn mul(a: Mat4, b: Mat4) -> Mat4 {
    let mut result = [[0.0f32; 4]; 4];

    for i in 0..4 {
        for j in 0..4 {
            for k in 0..4 {
                result[i][j] += a[k][j] * b[i][k];
            }
        }
    }

    result
}

/// Transform a point (w = 1) by a matrix
pub fn transform_point(m: Mat4, p: Vec3) -> Vec3 {
    Vec3::new(
        m[0][0] * p.x + m[1][0] * p.y + m[2][0] * p.z + m[3][0],
        m[0][1] * p.x + m[1][1] * p.y + m[2][1] * p.z + m[3][1],
        m[0][2] * p.x + m[1][2] * p.y + m[2][2] * p.z + m[3][2],
    )
}

/// Transform a direction (w = 0) by a matrix
pub fn transform_direction(m: Mat4, d: Vec3) -> Vec3 {
    Vec3::new(
        m[0][0] * d.x + m[1][0] * d.y + m[2][0] * d.z,
        m[0][1] * d.x + m[1][1] * d.y + m[2][1] * d.z,
        m[0][2] * d.x + m[1][2] * d.y + m[2][2] * d.z,
    )
}

/// Translation matrix
pub fn translation(t: Vec3) -> Mat4 {
    let mut m = IDENTITY;
    m[3][0] = t.x;
    m[3][1] = t.y;
    m[3][2] = t.z;
    m
}

/// Non-uniform scale matrix
pub fn scale(s: Vec3) -> Mat4 {
    let mut m = IDENTITY;
    m[0][0] = s.x;
    m[1][1] = s.y;
    m[2][2] = s.z;
    m
}

/// Rotation about the X axis (right-handed)
pub fn rotation_x(angle: f32) -> Mat4 {
    let (s, c) = angle.sin_cos();
    [
        [1.0, 0.0, 0.0, 0.0],
        [0.0, c, s, 0.0],
        [0.0, -s, c, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]
}

/// Rotation about the Y axis (right-handed)
pub fn rotation_y(angle: f32) -> Mat4 {
    let (s, c) = angle.sin_cos();
    [
        [c, 0.0, -s, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [s, 0.0, c, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]
}

/// Rotation about the Z axis (right-handed)
pub fn rotation_z(angle: f32) -> Mat4 {
    let (s, c) = angle.sin_cos();
    [
        [c, s, 0.0, 0.0],
        [-s, c, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]
}

/// Rotation from Euler angles applied in XYZ order (`Rx * Ry * Rz`)
pub fn rotation_euler(angles: Vec3) -> Mat4 {
    mul(rotation_x(angles.x), mul(rotation_y(angles.y), rotation_z(angles.z)))
}

/// Compose translation, Euler rotation and scale into a model matrix (`T * R * S`)
pub fn from_trs(position: Vec3, rotation: Vec3, scale_factors: Vec3) -> Mat4 {
    mul(translation(position), mul(rotation_euler(rotation), scale(scale_factors)))
}

/// Transpose a matrix
#[allow(clippy::needless_range_loop)]
pub fn transpose(m: Mat4) -> Mat4 {
    let mut result = [[0.0f32; 4]; 4];
    for i in 0..4 {
        for j in 0..4 {
            result[i][j] = m[j][i];
        }
    }
    result
}

/// Right-handed perspective projection with a `0..1` depth range
pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    let f = 1.0 / (fov_y / 2.0).tan();
    let nf = 1.0 / (near - far);

    [
        [f / aspect, 0.0, 0.0, 0.0],
        [0.0, f, 0.0, 0.0],
        [0.0, 0.0, far * nf, -1.0],
        [0.0, 0.0, near * far * nf, 0.0],
    ]
}

/// Right-handed look-at view matrix
pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
    let f = (target - eye).normalized();
    let s = f.cross(up).normalized();
    let u = s.cross(f);

    [
        [s.x, u.x, -f.x, 0.0],
        [s.y, u.y, -f.y, 0.0],
        [s.z, u.z, -f.z, 0.0],
        [-s.dot(eye), -u.dot(eye), f.dot(eye), 1.0],
    ]
}
