use web_sys as web;

/// Pointer position in CSS pixels relative to the viewport, the same space
/// the resize handler reports sizes in.
#[inline]
pub fn pointer_client_px(ev: &web::MouseEvent) -> (f32, f32) {
    (ev.client_x() as f32, ev.client_y() as f32)
}
