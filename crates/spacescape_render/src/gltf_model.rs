//! glTF model decoding for the astronaut
//!
//! Every mesh primitive in the default scene is flattened into one
//! [`MeshData`] in model space, with node transforms applied and each
//! vertex tinted by its material's base color factor.

use std::path::Path;

use spacescape_core::{AssetDecoder, AssetError, MeshData};
use spacescape_math::{mat4, Mat4, Vec3};

/// Decodes `.gltf` and `.glb` files into a single triangle mesh
#[derive(Clone, Copy, Debug, Default)]
pub struct GltfDecoder;

impl AssetDecoder for GltfDecoder {
    type Output = MeshData;

    fn decode(&self, path: &Path) -> Result<MeshData, AssetError> {
        let (document, buffers, _images) = gltf::import(path).map_err(|e| match e {
            gltf::Error::Io(err) => AssetError::Io(err),
            other => AssetError::decode(path, other),
        })?;

        let mut mesh = MeshData::default();
        let scene = document
            .default_scene()
            .or_else(|| document.scenes().next())
            .ok_or_else(|| AssetError::Empty(path.to_path_buf()))?;
        for node in scene.nodes() {
            process_node(&node, mat4::IDENTITY, &buffers, &mut mesh)
                .map_err(|message| AssetError::decode(path, message))?;
        }

        if mesh.indices.is_empty() {
            return Err(AssetError::Empty(path.to_path_buf()));
        }

        log::info!(
            "Decoded model {}: {} vertices, {} triangles",
            path.display(),
            mesh.vertex_count(),
            mesh.triangle_count()
        );
        Ok(mesh)
    }
}

/// Append a node's primitives and recurse into its children
fn process_node(
    node: &gltf::Node,
    parent: Mat4,
    buffers: &[gltf::buffer::Data],
    out: &mut MeshData,
) -> Result<(), String> {
    let world = mat4::mul(parent, node.transform().matrix());

    if let Some(mesh) = node.mesh() {
        for primitive in mesh.primitives() {
            if primitive.mode() != gltf::mesh::Mode::Triangles {
                log::debug!("Skipping non-triangle primitive in mesh {:?}", mesh.name());
                continue;
            }
            out.append(read_primitive(&primitive, world, buffers)?);
        }
    }

    for child in node.children() {
        process_node(&child, world, buffers, out)?;
    }
    Ok(())
}

fn read_primitive(
    primitive: &gltf::Primitive,
    world: Mat4,
    buffers: &[gltf::buffer::Data],
) -> Result<MeshData, String> {
    let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|data| &data[..]));

    let positions: Vec<[f32; 3]> = reader
        .read_positions()
        .ok_or_else(|| "primitive has no positions".to_string())?
        .map(|p| mat4::transform_point(world, Vec3::new(p[0], p[1], p[2])).to_array())
        .collect();

    let normals: Vec<[f32; 3]> = reader
        .read_normals()
        .map(|normals| {
            normals
                .map(|n| {
                    mat4::transform_direction(world, Vec3::new(n[0], n[1], n[2]))
                        .normalized()
                        .to_array()
                })
                .collect()
        })
        .unwrap_or_default();

    let uvs: Vec<[f32; 2]> = reader
        .read_tex_coords(0)
        .map(|uvs| uvs.into_f32().collect())
        .unwrap_or_default();

    let indices: Vec<u32> = match reader.read_indices() {
        Some(indices) => indices.into_u32().collect(),
        None => (0..positions.len() as u32).collect(),
    };
    if let Some(&bad) = indices.iter().find(|&&i| i as usize >= positions.len()) {
        return Err(format!("index {} out of range for {} vertices", bad, positions.len()));
    }

    let factor = primitive.material().pbr_metallic_roughness().base_color_factor();
    let colors = vec![[factor[0], factor[1], factor[2]]; positions.len()];

    Ok(MeshData {
        positions,
        normals,
        colors,
        uvs,
        indices,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    // One triangle (0,0,0) (1,0,0) (0,1,0), non-indexed, under a translated node
    const TRIANGLE: &str = r#"{
        "asset": { "version": "2.0" },
        "scene": 0,
        "scenes": [ { "nodes": [0] } ],
        "nodes": [ { "mesh": 0, "translation": [0.0, 2.0, 0.0] } ],
        "materials": [ { "pbrMetallicRoughness": { "baseColorFactor": [0.5, 0.25, 1.0, 1.0] } } ],
        "meshes": [ { "primitives": [ { "attributes": { "POSITION": 0 }, "material": 0 } ] } ],
        "buffers": [ {
            "byteLength": 36,
            "uri": "data:application/octet-stream;base64,AAAAAAAAAAAAAAAAAACAPwAAAAAAAAAAAAAAAAAAgD8AAAAA"
        } ],
        "bufferViews": [ { "buffer": 0, "byteOffset": 0, "byteLength": 36 } ],
        "accessors": [ {
            "bufferView": 0,
            "componentType": 5126,
            "count": 3,
            "type": "VEC3",
            "min": [0.0, 0.0, 0.0],
            "max": [1.0, 1.0, 0.0]
        } ]
    }"#;

    #[test]
    fn test_decode_triangle() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("astronaut.gltf");
        fs::write(&path, TRIANGLE).unwrap();

        let mesh = GltfDecoder.decode(&path).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.indices, vec![0, 1, 2]);
        // Node translation applied
        assert_eq!(mesh.positions[1], [1.0, 2.0, 0.0]);
        assert_eq!(mesh.colors[0], [0.5, 0.25, 1.0]);
        assert!(mesh.normals.is_empty());
    }

    #[test]
    fn test_missing_model_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = GltfDecoder.decode(&dir.path().join("missing.glb")).unwrap_err();
        assert!(matches!(err, AssetError::Io(_)), "{:?}", err);
    }

    #[test]
    fn test_model_without_meshes_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.gltf");
        fs::write(
            &path,
            r#"{ "asset": { "version": "2.0" }, "scenes": [ { "nodes": [] } ] }"#,
        )
        .unwrap();
        let err = GltfDecoder.decode(&path).unwrap_err();
        assert!(matches!(err, AssetError::Empty(_)), "{:?}", err);
    }

    #[test]
    fn test_invalid_json_is_decode_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.gltf");
        fs::write(&path, "{ not json").unwrap();
        let err = GltfDecoder.decode(&path).unwrap_err();
        assert!(matches!(err, AssetError::Decode { .. }), "{:?}", err);
    }
}
