//! Geometry descriptions handed to the renderer
//!
//! The core only describes shapes; tessellation happens in the renderer.

use crate::butterfly::WingSide;

/// Decoded triangle mesh (e.g. from a model file)
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    /// Per-vertex normals; empty means flat shading is derived by the renderer
    pub normals: Vec<[f32; 3]>,
    /// Per-vertex colors; may be empty
    pub colors: Vec<[f32; 3]>,
    /// Per-vertex texture coordinates; may be empty
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Append another mesh, offsetting its indices
    pub fn append(&mut self, other: MeshData) {
        let base = self.positions.len();
        let count = other.positions.len();

        merge(&mut self.normals, other.normals, base, count, [0.0, 1.0, 0.0]);
        merge(&mut self.colors, other.colors, base, count, [1.0, 1.0, 1.0]);
        merge(&mut self.uvs, other.uvs, base, count, [0.0, 0.0]);

        self.positions.extend(other.positions);
        self.indices.extend(other.indices.into_iter().map(|i| i + base as u32));
    }

    /// Bounding box as `(min, max)`, `None` when empty
    pub fn bounds(&self) -> Option<([f32; 3], [f32; 3])> {
        let first = *self.positions.first()?;
        let mut min = first;
        let mut max = first;
        for p in &self.positions {
            for axis in 0..3 {
                min[axis] = min[axis].min(p[axis]);
                max[axis] = max[axis].max(p[axis]);
            }
        }
        Some((min, max))
    }
}

/// Keep an optional attribute array aligned with positions after an append
fn merge<T: Copy>(ours: &mut Vec<T>, theirs: Vec<T>, base: usize, count: usize, fill: T) {
    if ours.is_empty() && theirs.is_empty() {
        return;
    }
    ours.resize(base, fill);
    if theirs.is_empty() {
        ours.resize(base + count, fill);
    } else {
        ours.extend(theirs);
    }
}

/// Decoded RGBA8 texture
#[derive(Clone, Debug, PartialEq)]
pub struct TextureData {
    pub width: u32,
    pub height: u32,
    /// Tightly packed RGBA8 rows
    pub rgba: Vec<u8>,
}

impl TextureData {
    /// 1x1 texture of a single color
    pub fn solid(rgba: [u8; 4]) -> Self {
        Self {
            width: 1,
            height: 1,
            rgba: rgba.to_vec(),
        }
    }

    /// Check the pixel buffer matches the dimensions
    pub fn is_consistent(&self) -> bool {
        self.rgba.len() == self.width as usize * self.height as usize * 4
    }
}

/// Shape to be tessellated and uploaded by the renderer
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    /// (p, q) torus knot
    TorusKnot {
        radius: f32,
        tube: f32,
        tubular_segments: u32,
        radial_segments: u32,
        p: u32,
        q: u32,
    },
    /// UV sphere
    Sphere {
        radius: f32,
        width_segments: u32,
        height_segments: u32,
    },
    /// Single flat wing triangle, hinged at the local origin
    Wing(WingSide),
    /// Pre-built triangle mesh
    Mesh(MeshData),
}

impl Geometry {
    /// UV sphere with the default segment counts
    pub fn sphere(radius: f32) -> Self {
        Geometry::Sphere {
            radius,
            width_segments: 32,
            height_segments: 32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle(offset: f32) -> MeshData {
        MeshData {
            positions: vec![[offset, 0.0, 0.0], [offset + 1.0, 0.0, 0.0], [offset, 1.0, 0.0]],
            normals: vec![[0.0, 0.0, 1.0]; 3],
            colors: Vec::new(),
            uvs: Vec::new(),
            indices: vec![0, 1, 2],
        }
    }

    #[test]
    fn test_append_offsets_indices() {
        let mut mesh = triangle(0.0);
        mesh.append(triangle(5.0));
        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(&mesh.indices[3..], &[3, 4, 5]);
        assert_eq!(mesh.normals.len(), 6);
        assert!(mesh.colors.is_empty());
    }

    #[test]
    fn test_append_fills_missing_attributes() {
        let mut mesh = triangle(0.0);
        let mut colored = triangle(1.0);
        colored.colors = vec![[1.0, 0.0, 0.0]; 3];
        mesh.append(colored);
        assert_eq!(mesh.colors.len(), 6);
        assert_eq!(mesh.colors[0], [1.0, 1.0, 1.0]);
        assert_eq!(mesh.colors[5], [1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_bounds() {
        let mut mesh = triangle(-2.0);
        mesh.append(triangle(3.0));
        let (min, max) = mesh.bounds().unwrap();
        assert_eq!(min, [-2.0, 0.0, 0.0]);
        assert_eq!(max, [4.0, 1.0, 0.0]);
        assert!(MeshData::default().bounds().is_none());
    }

    #[test]
    fn test_solid_texture() {
        let tex = TextureData::solid([255, 0, 0, 255]);
        assert!(tex.is_consistent());
        assert_eq!(tex.rgba, vec![255, 0, 0, 255]);
    }
}
