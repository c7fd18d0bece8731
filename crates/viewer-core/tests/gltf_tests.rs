// glTF decoding against small assets assembled in memory.

use glam::Vec3;
use viewer_core::gltf_import::{
    decode_model, external_buffer_uris, model_name_from_url, parse_asset, resolve_buffers,
    resolve_uri,
};
use viewer_core::LoadError;

/// One triangle in the XY plane, wound counter-clockwise, with u16 indices.
fn triangle_bin() -> Vec<u8> {
    let positions: [[f32; 3]; 3] = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
    let mut bin = Vec::new();
    for p in positions.iter().flatten() {
        bin.extend_from_slice(&p.to_le_bytes());
    }
    for i in [0u16, 1, 2] {
        bin.extend_from_slice(&i.to_le_bytes());
    }
    bin
}

fn triangle_json(buffer: &str, mode: u32) -> String {
    format!(
        r#"{{
  "asset": {{ "version": "2.0" }},
  "scene": 0,
  "scenes": [{{ "nodes": [0] }}],
  "nodes": [{{ "mesh": 0, "translation": [1.0, 2.0, 3.0] }}],
  "meshes": [{{
    "name": "tri",
    "primitives": [{{ "attributes": {{ "POSITION": 0 }}, "indices": 1, "material": 0, "mode": {mode} }}]
  }}],
  "materials": [{{ "pbrMetallicRoughness": {{ "baseColorFactor": [0.5, 0.25, 1.0, 1.0] }} }}],
  "buffers": [{buffer}],
  "bufferViews": [
    {{ "buffer": 0, "byteOffset": 0, "byteLength": 36, "target": 34962 }},
    {{ "buffer": 0, "byteOffset": 36, "byteLength": 6, "target": 34963 }}
  ],
  "accessors": [
    {{ "bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3",
       "min": [0.0, 0.0, 0.0], "max": [1.0, 1.0, 0.0] }},
    {{ "bufferView": 1, "componentType": 5123, "count": 3, "type": "SCALAR" }}
  ]
}}"#,
        buffer = buffer,
        mode = mode,
    )
}

fn glb(json: &str, bin: &[u8]) -> Vec<u8> {
    let mut json = json.as_bytes().to_vec();
    while json.len() % 4 != 0 {
        json.push(b' ');
    }
    let mut bin = bin.to_vec();
    while bin.len() % 4 != 0 {
        bin.push(0);
    }
    let total = 12 + 8 + json.len() + 8 + bin.len();

    let mut out = Vec::with_capacity(total);
    out.extend_from_slice(b"glTF");
    out.extend_from_slice(&2u32.to_le_bytes());
    out.extend_from_slice(&(total as u32).to_le_bytes());
    out.extend_from_slice(&(json.len() as u32).to_le_bytes());
    out.extend_from_slice(b"JSON");
    out.extend_from_slice(&json);
    out.extend_from_slice(&(bin.len() as u32).to_le_bytes());
    out.extend_from_slice(b"BIN\0");
    out.extend_from_slice(&bin);
    out
}

fn triangle_glb() -> Vec<u8> {
    glb(&triangle_json(r#"{ "byteLength": 42 }"#, 4), &triangle_bin())
}

/// `triangle_bin()` as base64, and its first 30 bytes.
const TRIANGLE_BASE64: &str = "AAAAAAAAAAAAAAAAAACAPwAAAAAAAAAAAAAAAAAAgD8AAAAAAAABAAIA";
const TRUNCATED_BASE64: &str = "AAAAAAAAAAAAAAAAAACAPwAAAAAAAAAAAAAAAAAA";
/// Just the three positions of `triangle_bin()`.
const POSITIONS_BASE64: &str = "AAAAAAAAAAAAAAAAAACAPwAAAAAAAAAAAAAAAAAAgD8AAAAA";

fn data_uri_gltf(payload: &str) -> Vec<u8> {
    let buffer = format!(
        r#"{{ "uri": "data:application/octet-stream;base64,{}", "byteLength": 42 }}"#,
        payload
    );
    triangle_json(&buffer, 4).into_bytes()
}

/// Positions inline as a data URI, indices in a separate `tri.idx` file.
fn mixed_buffers_gltf() -> Vec<u8> {
    format!(
        r#"{{
  "asset": {{ "version": "2.0" }},
  "scene": 0,
  "scenes": [{{ "nodes": [0] }}],
  "nodes": [{{ "mesh": 0 }}],
  "meshes": [{{ "primitives": [{{ "attributes": {{ "POSITION": 0 }}, "indices": 1 }}] }}],
  "buffers": [
    {{ "uri": "data:application/octet-stream;base64,{positions}", "byteLength": 36 }},
    {{ "uri": "tri.idx", "byteLength": 6 }}
  ],
  "bufferViews": [
    {{ "buffer": 0, "byteOffset": 0, "byteLength": 36, "target": 34962 }},
    {{ "buffer": 1, "byteOffset": 0, "byteLength": 6, "target": 34963 }}
  ],
  "accessors": [
    {{ "bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3",
       "min": [0.0, 0.0, 0.0], "max": [1.0, 1.0, 0.0] }},
    {{ "bufferView": 1, "componentType": 5123, "count": 3, "type": "SCALAR" }}
  ]
}}"#,
        positions = POSITIONS_BASE64,
    )
    .into_bytes()
}

fn separate_triangle_gltf() -> Vec<u8> {
    triangle_json(r#"{ "uri": "tri.bin", "byteLength": 42 }"#, 4).into_bytes()
}

#[test]
fn glb_triangle_decodes_geometry_material_and_transform() {
    let asset = parse_asset(&triangle_glb()).expect("valid glb");
    assert!(external_buffer_uris(&asset.document).is_empty());

    let (document, buffers) = resolve_buffers(asset, Vec::new()).expect("embedded buffer");
    let model = decode_model("tri", &document, &buffers).expect("decodes");

    assert_eq!(model.name, "tri");
    assert_eq!(model.meshes.len(), 1);
    assert_eq!(model.triangle_count(), 1);
    assert_eq!(model.vertex_count(), 3);

    let mesh = &model.meshes[0];
    assert_eq!(mesh.indices, vec![0, 1, 2]);
    assert_eq!(mesh.vertices[1].position, [1.0, 0.0, 0.0]);
    assert_eq!(mesh.base_color, [0.5, 0.25, 1.0, 1.0]);
    assert_eq!(mesh.transform.w_axis.truncate(), Vec3::new(1.0, 2.0, 3.0));
}

#[test]
fn missing_normals_are_generated_from_faces() {
    let asset = parse_asset(&triangle_glb()).unwrap();
    let (document, buffers) = resolve_buffers(asset, Vec::new()).unwrap();
    let model = decode_model("tri", &document, &buffers).unwrap();

    for v in &model.meshes[0].vertices {
        assert_eq!(v.normal, [0.0, 0.0, 1.0]);
    }
}

#[test]
fn bounds_include_node_transform() {
    let asset = parse_asset(&triangle_glb()).unwrap();
    let (document, buffers) = resolve_buffers(asset, Vec::new()).unwrap();
    let model = decode_model("tri", &document, &buffers).unwrap();

    let (min, max) = model.bounds().expect("non-empty");
    assert_eq!(min, Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(max, Vec3::new(2.0, 3.0, 3.0));
}

#[test]
fn separate_bin_is_listed_and_used_once_fetched() {
    let asset = parse_asset(&separate_triangle_gltf()).expect("valid gltf json");
    let uris = external_buffer_uris(&asset.document);
    assert_eq!(uris, vec![(0, "tri.bin".to_string())]);

    let (document, buffers) =
        resolve_buffers(asset, vec![(0, triangle_bin())]).expect("fetched buffer");
    let model = decode_model("tri", &document, &buffers).unwrap();
    assert_eq!(model.meshes[0].indices, vec![0, 1, 2]);
}

#[test]
fn data_uri_buffer_decodes_without_fetching() {
    let asset = parse_asset(&data_uri_gltf(TRIANGLE_BASE64)).expect("valid gltf json");
    assert!(external_buffer_uris(&asset.document).is_empty());

    let (document, buffers) = resolve_buffers(asset, Vec::new()).expect("inline buffer");
    let model = decode_model("tri", &document, &buffers).unwrap();
    assert_eq!(model.triangle_count(), 1);
    assert_eq!(model.meshes[0].indices, vec![0, 1, 2]);
    assert_eq!(model.meshes[0].vertices[2].position, [0.0, 1.0, 0.0]);
    assert_eq!(model.meshes[0].base_color, [0.5, 0.25, 1.0, 1.0]);
}

#[test]
fn short_data_uri_buffer_is_rejected() {
    let asset = parse_asset(&data_uri_gltf(TRUNCATED_BASE64)).unwrap();
    let err = resolve_buffers(asset, Vec::new()).unwrap_err();
    match err {
        LoadError::BufferTooShort {
            index, expected, ..
        } => {
            assert_eq!(index, 0);
            assert_eq!(expected, 42);
        }
        other => panic!("expected BufferTooShort, got {:?}", other),
    }
}

#[test]
fn data_uri_and_fetched_buffers_combine() {
    let asset = parse_asset(&mixed_buffers_gltf()).unwrap();
    assert_eq!(
        external_buffer_uris(&asset.document),
        vec![(1, "tri.idx".to_string())]
    );

    let indices: Vec<u8> = [2u16, 1, 0].iter().flat_map(|i| i.to_le_bytes()).collect();
    let (document, buffers) = resolve_buffers(asset, vec![(1, indices)]).expect("both buffers");
    assert_eq!(buffers.len(), 2);

    let model = decode_model("mixed", &document, &buffers).unwrap();
    assert_eq!(model.meshes[0].indices, vec![2, 1, 0]);
    assert_eq!(model.meshes[0].vertices[1].position, [1.0, 0.0, 0.0]);
}

#[test]
fn mixed_asset_without_its_external_buffer_is_reported() {
    let asset = parse_asset(&mixed_buffers_gltf()).unwrap();
    let err = resolve_buffers(asset, Vec::new()).unwrap_err();
    assert!(matches!(err, LoadError::Unsupported(_)), "got {:?}", err);
}

#[test]
fn unfetched_external_buffer_is_reported() {
    let asset = parse_asset(&separate_triangle_gltf()).unwrap();
    let err = resolve_buffers(asset, vec![(3, triangle_bin())]).unwrap_err();
    assert!(matches!(err, LoadError::Unsupported(_)), "got {:?}", err);
}

#[test]
fn short_external_buffer_is_rejected() {
    let asset = parse_asset(&separate_triangle_gltf()).unwrap();
    let err = resolve_buffers(asset, vec![(0, vec![0u8; 10])]).unwrap_err();
    match err {
        LoadError::BufferTooShort {
            index,
            expected,
            actual,
        } => {
            assert_eq!(index, 0);
            assert_eq!(expected, 42);
            assert_eq!(actual, 10);
        }
        other => panic!("expected BufferTooShort, got {:?}", other),
    }
}

#[test]
fn point_primitives_are_skipped() {
    let bytes = glb(&triangle_json(r#"{ "byteLength": 42 }"#, 0), &triangle_bin());
    let asset = parse_asset(&bytes).unwrap();
    let (document, buffers) = resolve_buffers(asset, Vec::new()).unwrap();
    let err = decode_model("points", &document, &buffers).unwrap_err();
    assert!(matches!(err, LoadError::EmptyModel), "got {:?}", err);
}

#[test]
fn scene_without_meshes_is_empty_model() {
    let json = br#"{
        "asset": { "version": "2.0" },
        "scene": 0,
        "scenes": [{ "nodes": [0] }],
        "nodes": [{ "name": "empty" }]
    }"#;
    let asset = parse_asset(json).unwrap();
    let (document, buffers) = resolve_buffers(asset, Vec::new()).unwrap();
    assert!(buffers.is_empty());
    let err = decode_model("empty", &document, &buffers).unwrap_err();
    assert!(matches!(err, LoadError::EmptyModel));
}

#[test]
fn garbage_is_a_gltf_error() {
    let err = parse_asset(b"definitely not a model").unwrap_err();
    assert!(matches!(err, LoadError::Gltf(_)));
    assert!(err.to_string().starts_with("glTF error"));
}

#[test]
fn buffer_uris_resolve_against_the_asset_directory() {
    assert_eq!(
        resolve_uri("gltf/AntiqueCamera.gltf", "AntiqueCamera.bin"),
        "gltf/AntiqueCamera.bin"
    );
    assert_eq!(
        resolve_uri("https://host.test/models/a.gltf?v=2#top", "a.bin"),
        "https://host.test/models/a.bin"
    );
    assert_eq!(resolve_uri("a.gltf", "a.bin"), "a.bin");
    assert_eq!(
        resolve_uri("gltf/a.gltf", "https://cdn.test/a.bin"),
        "https://cdn.test/a.bin"
    );
    assert_eq!(resolve_uri("gltf/a.gltf", "/abs/a.bin"), "/abs/a.bin");
}

#[test]
fn model_names_come_from_the_file_stem() {
    assert_eq!(model_name_from_url("gltf/AntiqueCamera.gltf"), "AntiqueCamera");
    assert_eq!(model_name_from_url("https://host.test/Duck.glb?x=1"), "Duck");
    assert_eq!(model_name_from_url("noext"), "noext");
    assert_eq!(model_name_from_url(".hidden"), ".hidden");
}
