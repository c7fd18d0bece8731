use crate::camera::PerspectiveCamera;
use crate::color::Color;
use crate::error::RenderError;
use crate::scene::Scene;

/// What the viewport controller needs from a rendering backend.
pub trait Renderer {
    /// Draw one frame of `scene` as seen from `camera`, synchronously.
    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> Result<(), RenderError>;

    /// Resize the output surface, in CSS pixels.
    fn set_size(&mut self, width: u32, height: u32);

    fn set_clear_color(&mut self, color: Color);
}
