//! glTF → [`ModelData`] decoding.
//!
//! Loading happens in three steps so the browser side can do the network
//! work in between:
//!
//! 1. [`parse_asset`] parses the `.gltf` JSON or `.glb` container.
//! 2. The caller fetches every URI returned by [`external_buffer_uris`]
//!    (resolved with [`resolve_uri`]) and hands the bytes to
//!    [`resolve_buffers`].
//! 3. [`decode_model`] flattens the scene into triangle meshes.
//!
//! Only geometry, node transforms and the material base color are read.

use crate::error::LoadError;
use crate::model::{compute_vertex_normals, MeshData, ModelData, Vertex};
use glam::Mat4;

/// Parse a `.gltf` (JSON) or `.glb` (binary) asset.
pub fn parse_asset(bytes: &[u8]) -> Result<gltf::Gltf, LoadError> {
    Ok(gltf::Gltf::from_slice(bytes)?)
}

/// `(buffer index, uri)` for every buffer that lives in a separate file.
/// GLB-embedded and `data:` buffers are not listed.
pub fn external_buffer_uris(document: &gltf::Document) -> Vec<(usize, String)> {
    document
        .buffers()
        .filter_map(|buffer| match buffer.source() {
            gltf::buffer::Source::Uri(uri) if !uri.starts_with("data:") => {
                Some((buffer.index(), uri.to_string()))
            }
            _ => None,
        })
        .collect()
}

/// Assemble the raw bytes of every buffer, in document order.
///
/// `fetched` holds the bytes for the indices returned by
/// [`external_buffer_uris`]. The GLB binary chunk and `data:` URIs are
/// decoded by the `gltf` importer.
pub fn resolve_buffers(
    asset: gltf::Gltf,
    fetched: Vec<(usize, Vec<u8>)>,
) -> Result<(gltf::Document, Vec<Vec<u8>>), LoadError> {
    let gltf::Gltf { document, mut blob } = asset;

    let mut fetched: Vec<Option<Vec<u8>>> = {
        let mut slots = vec![None; document.buffers().count()];
        for (index, bytes) in fetched {
            if let Some(slot) = slots.get_mut(index) {
                *slot = Some(bytes);
            }
        }
        slots
    };

    let mut buffers = Vec::with_capacity(fetched.len());
    for buffer in document.buffers() {
        let index = buffer.index();
        let bytes = match buffer.source() {
            gltf::buffer::Source::Uri(uri) if !uri.starts_with("data:") => {
                fetched[index].take().ok_or_else(|| {
                    LoadError::Unsupported(format!("buffer {} ({}) was not fetched", index, uri))
                })?
            }
            source => gltf::buffer::Data::from_source_and_blob(source, None, &mut blob)?.0,
        };
        if bytes.len() < buffer.length() {
            return Err(LoadError::BufferTooShort {
                index,
                expected: buffer.length(),
                actual: bytes.len(),
            });
        }
        buffers.push(bytes);
    }
    Ok((document, buffers))
}

/// Flatten the default scene (or the first one) into meshes.
pub fn decode_model(
    name: &str,
    document: &gltf::Document,
    buffers: &[Vec<u8>],
) -> Result<ModelData, LoadError> {
    let mut model = ModelData {
        name: name.to_string(),
        meshes: Vec::new(),
    };

    match document.default_scene().or_else(|| document.scenes().next()) {
        Some(scene) => {
            for node in scene.nodes() {
                visit_node(&node, Mat4::IDENTITY, buffers, &mut model.meshes)?;
            }
        }
        None => {
            log::warn!("[asset] {} has no scene; using every mesh untransformed", name);
            for mesh in document.meshes() {
                load_mesh(&mesh, Mat4::IDENTITY, buffers, &mut model.meshes)?;
            }
        }
    }

    if model.meshes.is_empty() {
        return Err(LoadError::EmptyModel);
    }
    Ok(model)
}

fn visit_node(
    node: &gltf::Node,
    parent: Mat4,
    buffers: &[Vec<u8>],
    out: &mut Vec<MeshData>,
) -> Result<(), LoadError> {
    let world = parent * Mat4::from_cols_array_2d(&node.transform().matrix());
    if let Some(mesh) = node.mesh() {
        load_mesh(&mesh, world, buffers, out)?;
    }
    for child in node.children() {
        visit_node(&child, world, buffers, out)?;
    }
    Ok(())
}

fn load_mesh(
    mesh: &gltf::Mesh,
    transform: Mat4,
    buffers: &[Vec<u8>],
    out: &mut Vec<MeshData>,
) -> Result<(), LoadError> {
    let mesh_name = mesh.name().unwrap_or("unnamed");
    for primitive in mesh.primitives() {
        if primitive.mode() != gltf::mesh::Mode::Triangles {
            log::warn!(
                "[asset] skipping {:?} primitive in mesh {}",
                primitive.mode(),
                mesh_name
            );
            continue;
        }
        let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(Vec::as_slice));

        let positions: Vec<[f32; 3]> = reader
            .read_positions()
            .ok_or_else(|| {
                LoadError::Unsupported(format!("primitive in mesh {} has no positions", mesh_name))
            })?
            .collect();

        let indices: Vec<u32> = match reader.read_indices() {
            Some(read) => read.into_u32().collect(),
            None => (0..positions.len() as u32).collect(),
        };
        if let Some(bad) = indices.iter().find(|&&i| i as usize >= positions.len()) {
            return Err(LoadError::Unsupported(format!(
                "index {} out of range in mesh {} ({} vertices)",
                bad,
                mesh_name,
                positions.len()
            )));
        }

        let mut vertices: Vec<Vertex> = match reader.read_normals() {
            Some(normals) => positions
                .iter()
                .zip(normals)
                .map(|(&position, normal)| Vertex { position, normal })
                .collect(),
            None => positions
                .iter()
                .map(|&position| Vertex {
                    position,
                    normal: [0.0; 3],
                })
                .collect(),
        };
        if vertices.len() != positions.len() {
            return Err(LoadError::Unsupported(format!(
                "normal count mismatch in mesh {}",
                mesh_name
            )));
        }
        if primitive.get(&gltf::Semantic::Normals).is_none() {
            compute_vertex_normals(&mut vertices, &indices);
        }

        let base_color = primitive
            .material()
            .pbr_metallic_roughness()
            .base_color_factor();

        out.push(MeshData {
            name: mesh_name.to_string(),
            vertices,
            indices,
            base_color,
            transform,
        });
    }
    Ok(())
}

/// Resolve a buffer URI relative to the URL the asset came from.
pub fn resolve_uri(base_url: &str, uri: &str) -> String {
    if uri.contains("://") || uri.starts_with('/') || uri.starts_with("data:") {
        return uri.to_string();
    }
    let base = strip_query(base_url);
    match base.rfind('/') {
        Some(slash) => format!("{}{}", &base[..=slash], uri),
        None => uri.to_string(),
    }
}

/// Display name for an asset URL: its file name without extension.
pub fn model_name_from_url(url: &str) -> String {
    let path = strip_query(url);
    let file = path.rsplit('/').next().unwrap_or(path);
    match file.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem.to_string(),
        _ => file.to_string(),
    }
}

fn strip_query(url: &str) -> &str {
    url.split(|c| c == '?' || c == '#').next().unwrap_or(url)
}
