#![cfg(target_arch = "wasm32")]
//! Browser front-end for the model viewer: canvas, WebGPU renderer, DOM
//! events and asset fetching around the `viewer-core` controller.

use wasm_bindgen::prelude::*;

mod asset;
mod constants;
mod dom;
mod events;
mod fetch;
mod frame;
mod input;
mod overlay;
mod presentation;
mod render;
mod viewer;

pub use viewer::Viewer;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("model-viewer-web starting");
    Ok(())
}

/// Mount a viewer for `asset_url` (or the configured default model) into
/// the page. Rejects when the browser cannot render; load failures are
/// reported through `Viewer.status()` and the page instead.
#[wasm_bindgen]
pub async fn mount(asset_url: Option<String>) -> Result<Viewer, JsValue> {
    viewer::mount_viewer(asset_url)
        .await
        .map_err(|e| JsValue::from_str(&format!("{:#}", e)))
}
