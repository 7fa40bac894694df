//! UV sphere

use std::f32::consts::{PI, TAU};

use spacescape_core::MeshData;

/// UV sphere centered on the origin
///
/// Texture coordinates wrap `u` around the equator and run `v` from the
/// north pole (0) to the south pole (1).
pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> MeshData {
    let w = width_segments.max(3);
    let h = height_segments.max(2);
    let mut mesh = MeshData::default();

    for iy in 0..=h {
        let v = iy as f32 / h as f32;
        let (sin_theta, cos_theta) = (v * PI).sin_cos();

        for ix in 0..=w {
            let u = ix as f32 / w as f32;
            let (sin_phi, cos_phi) = (u * TAU).sin_cos();
            let normal = [-cos_phi * sin_theta, cos_theta, sin_phi * sin_theta];

            mesh.positions.push([normal[0] * radius, normal[1] * radius, normal[2] * radius]);
            mesh.normals.push(normal);
            mesh.uvs.push([u, v]);
        }
    }

    let row = w + 1;
    for iy in 0..h {
        for ix in 0..w {
            let a = iy * row + ix + 1;
            let b = iy * row + ix;
            let c = (iy + 1) * row + ix;
            let d = (iy + 1) * row + ix + 1;

            // The pole rows collapse to a point, so each emits one triangle per quad
            if iy != 0 {
                mesh.indices.extend_from_slice(&[a, b, d]);
            }
            if iy != h - 1 {
                mesh.indices.extend_from_slice(&[b, c, d]);
            }
        }
    }

    mesh
}
