//! Viewer lifecycle: mount builds everything and starts the load, unmount
//! (or dropping the handle) releases every listener and removes the canvas.

use crate::asset;
use crate::dom;
use crate::events::{self, pointer::InputWiring, EventSubscription};
use crate::frame::FrameScheduler;
use crate::overlay;
use crate::presentation::{
    gpu_unavailable_message, load_failed_message, status_label, INPUT_UNAVAILABLE_MESSAGE,
    LOADING_MESSAGE,
};
use crate::render::GpuRenderer;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use viewer_core::{ViewerConfig, Viewport, ViewportController};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

pub type SharedController = Rc<RefCell<ViewportController<GpuRenderer>>>;

struct Mounted {
    controller: SharedController,
    frames: FrameScheduler,
    canvas: web::HtmlCanvasElement,
    document: web::Document,
    subscriptions: RefCell<Vec<EventSubscription>>,
}

impl Mounted {
    fn teardown(&self) {
        let released = {
            let mut subs = self.subscriptions.borrow_mut();
            let n = subs.len();
            subs.clear();
            n
        };
        self.frames.cancel();
        dom::detach(&self.canvas);
        overlay::remove(&self.document);
        log::info!("[viewer] unmounted ({} listeners released)", released);
    }
}

/// Handle returned to JavaScript by `mount`.
#[wasm_bindgen]
pub struct Viewer {
    inner: Option<Rc<Mounted>>,
}

#[wasm_bindgen]
impl Viewer {
    /// Detach the canvas and remove all event listeners. Safe to call twice.
    pub fn unmount(&mut self) {
        if let Some(mounted) = self.inner.take() {
            mounted.teardown();
        }
    }

    #[wasm_bindgen(getter)]
    pub fn mounted(&self) -> bool {
        self.inner.is_some()
    }

    /// `loading`, `loaded`, `degraded: <reason>`, `failed: <reason>` or
    /// `unmounted`.
    pub fn status(&self) -> String {
        match &self.inner {
            Some(m) => status_label(Some(m.controller.borrow().status())),
            None => status_label(None),
        }
    }
}

impl Drop for Viewer {
    fn drop(&mut self) {
        self.unmount();
    }
}

pub async fn mount_viewer(asset_url: Option<String>) -> anyhow::Result<Viewer> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let mut config = ViewerConfig::default();
    if let Err(e) = config.apply_query(&dom::location_search()) {
        log::warn!("[config] {}; using defaults", e);
    }
    if let Some(url) = asset_url.filter(|u| !u.is_empty()) {
        config.model_url = url;
    }
    log::info!(
        "[viewer] mounting model={} redraw={:?} sensitivity={}",
        config.model_url,
        config.redraw,
        config.sensitivity
    );

    let canvas = dom::append_canvas(&document)?;
    let (w, h) = dom::window_inner_size();
    let renderer = match GpuRenderer::new(&canvas, w, h).await {
        Ok(r) => r,
        Err(e) => {
            log::error!("[gpu] {}", e);
            dom::detach(&canvas);
            overlay::show_status(&document, &gpu_unavailable_message(&e));
            return Err(e.into());
        }
    };

    let model_url = config.model_url.clone();
    let controller: SharedController = Rc::new(RefCell::new(ViewportController::new(
        config,
        renderer,
        Viewport::new(w, h),
    )));
    let frames = FrameScheduler::new(controller.clone());
    let mounted = Rc::new(Mounted {
        controller: controller.clone(),
        frames: frames.clone(),
        canvas,
        document: document.clone(),
        subscriptions: RefCell::new(Vec::new()),
    });

    match events::wire_resize(&window, controller, frames) {
        Ok(sub) => mounted.subscriptions.borrow_mut().push(sub),
        Err(e) => {
            mounted.teardown();
            return Err(e);
        }
    }

    overlay::show_status(&document, LOADING_MESSAGE);
    spawn_local(load_and_attach(Rc::downgrade(&mounted), model_url));
    Ok(Viewer {
        inner: Some(mounted),
    })
}

async fn load_and_attach(mounted: Weak<Mounted>, url: String) {
    let result = asset::load_model(&url).await;
    let Some(m) = mounted.upgrade() else {
        log::info!("[viewer] {} finished loading after unmount; discarded", url);
        return;
    };

    let model = match result {
        Ok(model) => model,
        Err(e) => {
            m.controller.borrow_mut().on_model_failed(&e);
            overlay::show_status(&m.document, &load_failed_message(&url, &e));
            return;
        }
    };

    if let Err(e) = m.controller.borrow_mut().on_model_loaded(model) {
        log::warn!("[viewer] {}", e);
        return;
    }
    overlay::hide(&m.document);

    let wiring = InputWiring {
        target: m.document.clone().into(),
        controller: m.controller.clone(),
        frames: m.frames.clone(),
    };
    match events::wire_pointer_handlers(wiring) {
        Ok(subs) => m.subscriptions.borrow_mut().extend(subs),
        Err(e) => {
            m.controller
                .borrow_mut()
                .on_input_unavailable(&format!("{:#}", e));
            overlay::show_status(&m.document, INPUT_UNAVAILABLE_MESSAGE);
        }
    }
}
