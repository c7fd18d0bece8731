// Camera, scene bookkeeping and the GPU uniform packing derived from them.

use glam::{Mat4, Vec3};
use viewer_core::*;

fn approx(a: Vec3, b: Vec3) -> bool {
    (a - b).abs().max_element() < 1e-5
}

#[test]
fn default_camera_frustum() {
    let cam = PerspectiveCamera::with_aspect(2.0);
    assert_eq!(cam.position, Vec3::new(0.0, 0.0, 5.0));
    assert_eq!(cam.rotation, Vec3::ZERO);
    assert_eq!(cam.fov_y_degrees, 75.0);
    assert_eq!(cam.near, 0.1);
    assert_eq!(cam.far, 1000.0);
    assert_eq!(
        cam.projection_matrix(),
        Mat4::perspective_rh(75.0_f32.to_radians(), 2.0, 0.1, 1000.0)
    );
}

#[test]
fn projection_is_cached_until_updated() {
    let mut cam = PerspectiveCamera::with_aspect(1.0);
    let before = cam.projection_matrix();
    cam.aspect = 3.0;
    assert_eq!(cam.projection_matrix(), before);
    cam.update_projection_matrix();
    assert_ne!(cam.projection_matrix(), before);
}

#[test]
fn view_matrix_moves_world_in_front_of_camera() {
    let mut cam = PerspectiveCamera::with_aspect(1.0);
    cam.position = Vec3::new(0.0, 0.0, 10.0);
    let origin = cam.view_matrix().transform_point3(Vec3::ZERO);
    assert!(approx(origin, Vec3::new(0.0, 0.0, -10.0)), "{:?}", origin);
}

#[test]
fn yaw_turns_camera_towards_negative_x() {
    let mut cam = PerspectiveCamera::with_aspect(1.0);
    cam.position = Vec3::new(0.0, 0.0, 10.0);
    cam.rotation.y = std::f32::consts::FRAC_PI_2;
    let p = cam.view_matrix().transform_point3(Vec3::new(-5.0, 0.0, 10.0));
    assert!(approx(p, Vec3::new(0.0, 0.0, -5.0)), "{:?}", p);
}

#[test]
fn model_world_matrix_uses_node_rotation() {
    let mut node = ModelNode::new(ModelData::default());
    assert_eq!(node.world_matrix(), Mat4::IDENTITY);
    node.rotation.y = std::f32::consts::PI;
    let p = node.world_matrix().transform_point3(Vec3::X);
    assert!(approx(p, -Vec3::X), "{:?}", p);
}

#[test]
fn scene_ids_are_stable_and_typed() {
    let mut scene = Scene::new();
    let light = scene.add(Node::Ambient(AmbientLight {
        color: Color::WHITE,
        intensity: 0.5,
    }));
    let model = scene.add(Node::Model(ModelNode::new(ModelData::default())));

    assert_ne!(light, model);
    assert!(scene.model(light).is_none());
    assert!(scene.model(model).is_some());
    assert_eq!(scene.models().count(), 1);
    assert_eq!(scene.light_count(), 1);
    assert!(matches!(scene.nodes().next(), Some((id, Node::Ambient(_))) if id == light));
}

#[test]
fn vertex_normals_are_area_weighted_and_skip_bad_indices() {
    let mut vertices = vec![
        Vertex {
            position: [0.0, 0.0, 0.0],
            ..Vertex::default()
        },
        Vertex {
            position: [1.0, 0.0, 0.0],
            ..Vertex::default()
        },
        Vertex {
            position: [0.0, 1.0, 0.0],
            ..Vertex::default()
        },
        Vertex::default(),
    ];
    // Second triangle references a vertex that does not exist.
    compute_vertex_normals(&mut vertices, &[0, 1, 2, 0, 1, 9]);
    assert_eq!(vertices[0].normal, [0.0, 0.0, 1.0]);
    assert_eq!(vertices[2].normal, [0.0, 0.0, 1.0]);
    // Unreferenced vertex gets a zero normal rather than NaN.
    assert_eq!(vertices[3].normal, [0.0, 0.0, 0.0]);
}

#[test]
fn hex_colors_round_trip() {
    for hex in [0x1e074e, 0xffffff, 0x000000, 0x123456] {
        assert_eq!(Color::from_hex(hex).to_hex(), hex);
    }
    assert_eq!(Color::from_hex(0xffffff), Color::WHITE);
}

#[test]
fn frame_uniforms_pack_scene_lights() {
    let mut scene = Scene::new();
    scene.add(Node::Ambient(AmbientLight {
        color: Color::WHITE,
        intensity: 0.5,
    }));
    scene.add(Node::Directional(DirectionalLight {
        color: Color::WHITE,
        intensity: 1.0,
        position: Vec3::new(1.0, 1.0, 1.0),
    }));
    let cam = PerspectiveCamera::with_aspect(1.0);

    let u = FrameUniforms::from_scene(&scene, &cam);
    assert_eq!(u.directional_count(), 1);
    for c in &u.ambient[..3] {
        assert!((c - 0.5).abs() < 1e-5);
    }
    let dir = Vec3::new(u.light_dir[0][0], u.light_dir[0][1], u.light_dir[0][2]);
    assert!(approx(dir, Vec3::ONE.normalize()));
    assert_eq!(u.light_dir[1], [0.0; 4]);
    assert_eq!(u.view_proj, cam.view_projection().to_cols_array_2d());
}

#[test]
fn frame_uniforms_cap_directional_lights() {
    let mut scene = Scene::new();
    for i in 0..6 {
        scene.add(Node::Directional(DirectionalLight {
            color: Color::WHITE,
            intensity: 1.0,
            position: Vec3::new(i as f32 + 1.0, 0.0, 0.0),
        }));
    }
    let u = FrameUniforms::from_scene(&scene, &PerspectiveCamera::with_aspect(1.0));
    assert_eq!(u.directional_count(), 4);
    assert_eq!(std::mem::size_of::<FrameUniforms>(), 208);
}

#[test]
fn mesh_uniforms_keep_normals_unscaled_under_translation() {
    let u = MeshUniforms::new(Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0)), [1.0; 4]);
    let n = Mat4::from_cols_array_2d(&u.normal_matrix);
    assert!(approx(n.transform_vector3(Vec3::Z), Vec3::Z));
    assert_eq!(std::mem::size_of::<MeshUniforms>(), 144);
}
