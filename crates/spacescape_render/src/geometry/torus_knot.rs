//! (p, q) torus knot tube

use std::f32::consts::TAU;

use spacescape_core::MeshData;

/// Point on the knot curve at parameter `u`
fn curve(u: f32, p: f32, q: f32, radius: f32) -> [f32; 3] {
    let (su, cu) = u.sin_cos();
    let qu = q / p * u;
    let cs = qu.cos();
    [
        radius * (2.0 + cs) * 0.5 * cu,
        radius * (2.0 + cs) * 0.5 * su,
        radius * qu.sin() * 0.5,
    ]
}

fn sub(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn normalize(v: [f32; 3]) -> [f32; 3] {
    let len = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    if len > 0.0 {
        [v[0] / len, v[1] / len, v[2] / len]
    } else {
        v
    }
}

/// Tube of radius `tube` swept along a (p, q) torus knot
///
/// The tube's cross-section frame comes from the curve tangent and the
/// vector toward the next sample, so no explicit Frenet frame is needed.
pub fn torus_knot(
    radius: f32,
    tube: f32,
    tubular_segments: u32,
    radial_segments: u32,
    p: u32,
    q: u32,
) -> MeshData {
    let tubular = tubular_segments.max(3);
    let radial = radial_segments.max(3);
    let (pf, qf) = (p.max(1) as f32, q as f32);
    let mut mesh = MeshData::default();

    for i in 0..=tubular {
        let u = i as f32 / tubular as f32 * pf * TAU;
        let p1 = curve(u, pf, qf, radius);
        let p2 = curve(u + 0.01, pf, qf, radius);

        let t = sub(p2, p1);
        let n = [p2[0] + p1[0], p2[1] + p1[1], p2[2] + p1[2]];
        let b = normalize(cross(t, n));
        let n = normalize(cross(b, t));

        for j in 0..=radial {
            let v = j as f32 / radial as f32 * TAU;
            let cx = -tube * v.cos();
            let cy = tube * v.sin();

            let position = [
                p1[0] + cx * n[0] + cy * b[0],
                p1[1] + cx * n[1] + cy * b[1],
                p1[2] + cx * n[2] + cy * b[2],
            ];
            mesh.normals.push(normalize(sub(position, p1)));
            mesh.positions.push(position);
            mesh.uvs.push([i as f32 / tubular as f32, j as f32 / radial as f32]);
        }
    }

    let row = radial + 1;
    for j in 1..=tubular {
        for i in 1..=radial {
            let a = row * (j - 1) + (i - 1);
            let b = row * j + (i - 1);
            let c = row * j + i;
            let d = row * (j - 1) + i;
            mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let mesh = torus_knot(1.0, 0.3, 100, 16, 2, 3);
        assert_eq!(mesh.vertex_count(), 101 * 17);
        assert_eq!(mesh.triangle_count(), 100 * 16 * 2);
    }

    #[test]
    fn test_vertices_stay_on_tube() {
        let mesh = torus_knot(1.0, 0.3, 64, 8, 2, 3);
        // Every ring of vertices sits `tube` away from its curve point
        for (i, ring) in mesh.positions.chunks(9).enumerate() {
            let u = i as f32 / 64.0 * 2.0 * TAU;
            let center = curve(u, 2.0, 3.0, 1.0);
            for p in ring {
                let d = sub(*p, center);
                let dist = (d[0] * d[0] + d[1] * d[1] + d[2] * d[2]).sqrt();
                assert!((dist - 0.3).abs() < 1e-3, "ring {} distance {}", i, dist);
            }
        }
    }

    #[test]
    fn test_normals_unit_length() {
        let mesh = torus_knot(1.0, 0.3, 32, 8, 2, 3);
        for n in &mesh.normals {
            let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
            assert!((len - 1.0).abs() < 1e-4);
        }
    }
}
