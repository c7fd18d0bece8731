use crate::constants::CANVAS_ID;
use crate::presentation::backing_size;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Window inner size in CSS pixels, at least 1x1.
pub fn window_inner_size() -> (u32, u32) {
    let Some(w) = web::window() else {
        return (1, 1);
    };
    let dim = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(1.0).max(1.0) as u32
    };
    (dim(w.inner_width()), dim(w.inner_height()))
}

#[inline]
pub fn device_pixel_ratio() -> f64 {
    web::window()
        .map(|w| w.device_pixel_ratio())
        .filter(|dpr| dpr.is_finite() && *dpr > 0.0)
        .unwrap_or(1.0)
}

/// Create the rendering surface and append it to `<body>`.
pub fn append_canvas(document: &web::Document) -> anyhow::Result<web::HtmlCanvasElement> {
    let body = document
        .body()
        .ok_or_else(|| anyhow::anyhow!("document has no body"))?;
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    canvas.set_id(CANVAS_ID);
    _ = canvas.style().set_property("display", "block");
    body.append_child(&canvas)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Ok(canvas)
}

/// Size the canvas: CSS size in CSS pixels, backing store scaled by the
/// device pixel ratio. Returns the backing store size.
pub fn size_canvas(canvas: &web::HtmlCanvasElement, width: u32, height: u32) -> (u32, u32) {
    let style = canvas.style();
    _ = style.set_property("width", &format!("{}px", width));
    _ = style.set_property("height", &format!("{}px", height));
    let (w_px, h_px) = backing_size(width, height, device_pixel_ratio());
    canvas.set_width(w_px);
    canvas.set_height(h_px);
    (w_px, h_px)
}

#[inline]
pub fn detach(element: &web::Element) {
    element.remove();
}

/// Query string of the page URL, including the leading `?`, if any.
pub fn location_search() -> String {
    web::window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default()
}
