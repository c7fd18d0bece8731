//! CPU-side packing of scene lights into the mesh shader's frame uniforms.

use crate::camera::PerspectiveCamera;
use crate::constants::MAX_DIRECTIONAL_LIGHTS;
use crate::scene::Scene;

/// Mirrors `FrameUniforms` in `mesh.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub ambient: [f32; 4],
    pub light_dir: [[f32; 4]; MAX_DIRECTIONAL_LIGHTS],
    pub light_color: [[f32; 4]; MAX_DIRECTIONAL_LIGHTS],
}

/// Mirrors `MeshUniforms` in `mesh.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshUniforms {
    pub model: [[f32; 4]; 4],
    pub normal_matrix: [[f32; 4]; 4],
    pub base_color: [f32; 4],
}

impl MeshUniforms {
    pub fn new(model: glam::Mat4, base_color: [f32; 4]) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            normal_matrix: model.inverse().transpose().to_cols_array_2d(),
            base_color,
        }
    }
}

impl FrameUniforms {
    /// Ambient lights are summed; directional lights beyond the shader's
    /// limit are dropped with a warning.
    pub fn from_scene(scene: &Scene, camera: &PerspectiveCamera) -> Self {
        let mut ambient = [0.0_f32; 3];
        for light in scene.ambient_lights() {
            let c = light.color.scaled_linear(light.intensity);
            for (a, c) in ambient.iter_mut().zip(c) {
                *a += c;
            }
        }

        let mut light_dir = [[0.0_f32; 4]; MAX_DIRECTIONAL_LIGHTS];
        let mut light_color = [[0.0_f32; 4]; MAX_DIRECTIONAL_LIGHTS];
        let mut count = 0usize;
        for light in scene.directional_lights() {
            if count == MAX_DIRECTIONAL_LIGHTS {
                log::warn!(
                    "[gpu] more than {} directional lights; extra ones ignored",
                    MAX_DIRECTIONAL_LIGHTS
                );
                break;
            }
            light_dir[count] = light.direction_to_light().extend(0.0).to_array();
            let [r, g, b] = light.color.scaled_linear(light.intensity);
            light_color[count] = [r, g, b, 1.0];
            count += 1;
        }

        Self {
            view_proj: camera.view_projection().to_cols_array_2d(),
            ambient: [ambient[0], ambient[1], ambient[2], count as f32],
            light_dir,
            light_color,
        }
    }

    #[inline]
    pub fn directional_count(&self) -> usize {
        self.ambient[3] as usize
    }
}
