//! Procedural geometry
//!
//! Turns the core's [`Geometry`] descriptions into triangle meshes.

mod sphere;
mod torus_knot;
mod wing;

use spacescape_core::{Geometry, MeshData};

pub use sphere::sphere;
pub use torus_knot::torus_knot;
pub use wing::wing;

/// Tessellate a geometry description
pub fn tessellate(geometry: &Geometry) -> MeshData {
    let mut mesh = match geometry {
        Geometry::TorusKnot {
            radius,
            tube,
            tubular_segments,
            radial_segments,
            p,
            q,
        } => torus_knot(*radius, *tube, *tubular_segments, *radial_segments, *p, *q),
        Geometry::Sphere {
            radius,
            width_segments,
            height_segments,
        } => sphere(*radius, *width_segments, *height_segments),
        Geometry::Wing(side) => wing(*side),
        Geometry::Mesh(data) => data.clone(),
    };
    if mesh.normals.len() != mesh.positions.len() {
        mesh.normals = vertex_normals(&mesh.positions, &mesh.indices);
    }
    mesh
}

/// Smooth per-vertex normals from area-weighted face normals
pub fn vertex_normals(positions: &[[f32; 3]], indices: &[u32]) -> Vec<[f32; 3]> {
    let mut normals = vec![[0.0f32; 3]; positions.len()];

    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        if a >= positions.len() || b >= positions.len() || c >= positions.len() {
            continue;
        }
        let (pa, pb, pc) = (positions[a], positions[b], positions[c]);
        let e1 = [pb[0] - pa[0], pb[1] - pa[1], pb[2] - pa[2]];
        let e2 = [pc[0] - pa[0], pc[1] - pa[1], pc[2] - pa[2]];
        let n = [
            e1[1] * e2[2] - e1[2] * e2[1],
            e1[2] * e2[0] - e1[0] * e2[2],
            e1[0] * e2[1] - e1[1] * e2[0],
        ];
        for i in [a, b, c] {
            for axis in 0..3 {
                normals[i][axis] += n[axis];
            }
        }
    }

    for n in &mut normals {
        let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
        *n = if len > 1e-12 {
            [n[0] / len, n[1] / len, n[2] / len]
        } else {
            [0.0, 1.0, 0.0]
        };
    }
    normals
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_normals_are_generated() {
        let data = MeshData {
            positions: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            indices: vec![0, 1, 2],
            ..Default::default()
        };
        let mesh = tessellate(&Geometry::Mesh(data));
        assert_eq!(mesh.normals.len(), 3);
        for n in &mesh.normals {
            assert!((n[2] - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_every_geometry_has_consistent_buffers() {
        for geometry in [
            Geometry::sphere(2.0),
            Geometry::TorusKnot {
                radius: 1.0,
                tube: 0.3,
                tubular_segments: 100,
                radial_segments: 16,
                p: 2,
                q: 3,
            },
            Geometry::Wing(spacescape_core::WingSide::Left),
        ] {
            let mesh = tessellate(&geometry);
            assert_eq!(mesh.normals.len(), mesh.positions.len());
            assert_eq!(mesh.uvs.len(), mesh.positions.len());
            assert_eq!(mesh.indices.len() % 3, 0);
            assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.positions.len()));
        }
    }
}
