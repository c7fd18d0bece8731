//! Viewport controller: turns pointer and resize events into camera/model
//! orientation changes and decides when the scene must be redrawn.
//!
//! All methods are expected to run on one thread (the browser main thread);
//! the controller owns the scene, the camera and the drag state outright.

use crate::camera::PerspectiveCamera;
use crate::color::Color;
use crate::config::{RedrawMode, ViewerConfig};
use crate::constants::{
    AMBIENT_INTENSITY, CAMERA_VIEW_Z, DIRECTIONAL_INTENSITY, DIRECTIONAL_POSITION, LIGHT_COLOR,
};
use crate::error::{LoadError, ViewerError};
use crate::input::{DragState, Orientation, Viewport};
use crate::model::ModelData;
use crate::renderer::Renderer;
use crate::scene::{AmbientLight, DirectionalLight, ModelNode, Node, NodeId, Scene};
use glam::Vec3;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadStatus {
    Loading,
    Loaded,
    /// Model is shown but cannot be rotated.
    Degraded(String),
    Failed(String),
}

pub struct ViewportController<R: Renderer> {
    config: ViewerConfig,
    renderer: R,
    scene: Scene,
    camera: PerspectiveCamera,
    drag: DragState,
    orientation: Orientation,
    viewport: Viewport,
    model: Option<NodeId>,
    status: LoadStatus,
    redraw_pending: bool,
}

impl<R: Renderer> ViewportController<R> {
    pub fn new(config: ViewerConfig, mut renderer: R, viewport: Viewport) -> Self {
        renderer.set_size(viewport.width, viewport.height);
        let camera = PerspectiveCamera::with_aspect(viewport.aspect());
        Self {
            config,
            renderer,
            scene: Scene::new(),
            camera,
            drag: DragState::default(),
            orientation: Orientation::default(),
            viewport,
            model: None,
            status: LoadStatus::Loading,
            redraw_pending: false,
        }
    }

    pub fn on_pointer_down(&mut self, x: f32, y: f32) {
        self.drag.begin(x, y);
    }

    pub fn on_pointer_up(&mut self) {
        self.drag.end();
    }

    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        let Some((dx_px, dy_px)) = self.drag.advance(x, y) else {
            return;
        };
        let dx = dx_px * self.config.sensitivity;
        let dy = dy_px * self.config.sensitivity;

        self.orientation.rotation_x += dy;
        self.orientation.rotation_y += dx;

        // Model and camera turn together.
        if let Some(model) = self.model.and_then(|id| self.scene.model_mut(id)) {
            model.rotation.x += dy;
            model.rotation.y += dx;
        }
        self.camera.rotation.x += dy;
        self.camera.rotation.y += dx;

        log::trace!(
            "[input] drag d=({:.4},{:.4}) rot=({:.4},{:.4})",
            dx,
            dy,
            self.orientation.rotation_x,
            self.orientation.rotation_y
        );
        self.request_redraw();
    }

    pub fn on_resize(&mut self, width: u32, height: u32) {
        self.viewport = Viewport::new(width, height);
        self.camera.aspect = self.viewport.aspect();
        self.camera.update_projection_matrix();
        self.renderer
            .set_size(self.viewport.width, self.viewport.height);
        log::debug!(
            "[viewer] resize {}x{}",
            self.viewport.width,
            self.viewport.height
        );
        if self.config.redraw_on_resize {
            self.request_redraw();
        }
    }

    /// Attach the loaded model, light it, frame it and draw once.
    pub fn on_model_loaded(&mut self, data: ModelData) -> Result<NodeId, ViewerError> {
        if self.model.is_some() {
            log::warn!("[viewer] ignoring second model {:?}", data.name);
            return Err(ViewerError::AlreadyLoaded);
        }
        log::info!(
            "[viewer] model {:?}: meshes={} triangles={}",
            data.name,
            data.meshes.len(),
            data.triangle_count()
        );

        let id = self.scene.add(Node::Model(ModelNode::new(data)));
        self.model = Some(id);

        let white = Color::from_hex(LIGHT_COLOR);
        self.scene.add(Node::Ambient(AmbientLight {
            color: white,
            intensity: AMBIENT_INTENSITY,
        }));
        self.scene.add(Node::Directional(DirectionalLight {
            color: white,
            intensity: DIRECTIONAL_INTENSITY,
            position: Vec3::from(DIRECTIONAL_POSITION),
        }));

        self.camera.position = Vec3::new(0.0, 0.0, CAMERA_VIEW_Z);
        self.renderer.set_clear_color(self.config.clear_color);
        self.status = LoadStatus::Loaded;
        self.redraw();
        Ok(id)
    }

    /// Record a failed load. The scene keeps its pre-load state.
    pub fn on_model_failed(&mut self, err: &LoadError) {
        log::error!("[viewer] model load failed: {}", err);
        self.status = LoadStatus::Failed(err.to_string());
    }

    /// Record that pointer input could not be wired up. Only a loaded
    /// model can be degraded; other states are kept.
    pub fn on_input_unavailable(&mut self, reason: &str) {
        log::error!("[input] rotation unavailable: {}", reason);
        if self.status == LoadStatus::Loaded {
            self.status = LoadStatus::Degraded(reason.to_string());
        }
    }

    pub fn request_redraw(&mut self) {
        match self.config.redraw {
            RedrawMode::Immediate => self.redraw(),
            RedrawMode::Coalesced => self.redraw_pending = true,
        }
    }

    /// Whether a coalesced redraw is waiting for the next frame.
    #[inline]
    pub fn needs_frame(&self) -> bool {
        self.redraw_pending
    }

    /// Render the pending frame, if any. Returns whether a frame was drawn.
    pub fn flush_redraw(&mut self) -> bool {
        if !self.redraw_pending {
            return false;
        }
        self.redraw();
        true
    }

    fn redraw(&mut self) {
        self.redraw_pending = false;
        if let Err(e) = self.renderer.render(&self.scene, &self.camera) {
            log::error!("[viewer] render error: {}", e);
        }
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn drag(&self) -> &DragState {
        &self.drag
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn model_id(&self) -> Option<NodeId> {
        self.model
    }

    pub fn model(&self) -> Option<&ModelNode> {
        self.model.and_then(|id| self.scene.model(id))
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }
}
