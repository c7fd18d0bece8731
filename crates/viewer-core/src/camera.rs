//! Perspective camera with an Euler orientation.
//!
//! The camera sits at `position` looking down its local -Z axis, rotated by
//! `rotation` (radians, applied in X, then Y, then Z intrinsic order). The
//! projection matrix is cached and only recomputed by
//! [`PerspectiveCamera::update_projection_matrix`], so callers that change
//! `aspect` or the frustum must call it afterwards.

use crate::constants::{CAMERA_FAR, CAMERA_FOV_Y_DEGREES, CAMERA_NEAR, CAMERA_START_Z};
use glam::{EulerRot, Mat4, Quat, Vec3};

#[derive(Clone, Debug)]
pub struct PerspectiveCamera {
    pub position: Vec3,
    pub rotation: Vec3,
    pub fov_y_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    projection: Mat4,
}

impl PerspectiveCamera {
    pub fn new(fov_y_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            fov_y_degrees,
            aspect,
            near,
            far,
            projection: Mat4::IDENTITY,
        };
        camera.update_projection_matrix();
        camera
    }

    /// Camera used before any model is attached: default frustum, pulled
    /// back along +Z.
    pub fn with_aspect(aspect: f32) -> Self {
        let mut camera = Self::new(CAMERA_FOV_Y_DEGREES, aspect, CAMERA_NEAR, CAMERA_FAR);
        camera.position = Vec3::new(0.0, 0.0, CAMERA_START_Z);
        camera
    }

    pub fn update_projection_matrix(&mut self) {
        self.projection = Mat4::perspective_rh(
            self.fov_y_degrees.to_radians(),
            self.aspect,
            self.near,
            self.far,
        );
    }

    /// Projection as of the last [`Self::update_projection_matrix`] call.
    #[inline]
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    pub fn orientation(&self) -> Quat {
        euler_quat(self.rotation)
    }

    /// Camera-to-world transform.
    pub fn world_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation(), self.position)
    }

    /// World-to-camera transform.
    pub fn view_matrix(&self) -> Mat4 {
        self.world_matrix().inverse()
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view_matrix()
    }
}

/// Rotation for an `(x, y, z)` Euler triple in XYZ order.
#[inline]
pub fn euler_quat(rotation: Vec3) -> Quat {
    Quat::from_euler(EulerRot::XYZ, rotation.x, rotation.y, rotation.z)
}
