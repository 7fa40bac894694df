//! Flat butterfly wing

use spacescape_core::{MeshData, WingSide};

/// One triangular wing hinged at the local origin
///
/// The left wing spans toward -x and the right toward +x. Wings are meant to
/// be drawn double-sided.
pub fn wing(side: WingSide) -> MeshData {
    let tip = match side {
        WingSide::Left => -0.5,
        WingSide::Right => 0.5,
    };
    let positions = vec![[tip, 0.0, 0.0], [0.0, 0.5, 0.0], [0.0, 0.0, 0.0]];
    // Keep the front face toward +z on both sides
    let indices = match side {
        WingSide::Left => vec![0, 2, 1],
        WingSide::Right => vec![0, 1, 2],
    };

    MeshData {
        positions,
        normals: vec![[0.0, 0.0, 1.0]; 3],
        colors: Vec::new(),
        uvs: vec![[0.0, 1.0], [0.5, 0.0], [0.5, 1.0]],
        indices,
    }
}
