use super::EventSubscription;
use crate::constants::{EVENT_POINTER_DOWN, EVENT_POINTER_MOVE, EVENT_POINTER_UP};
use crate::frame::FrameScheduler;
use crate::input;
use crate::viewer::SharedController;
use web_sys as web;

#[derive(Clone)]
pub struct InputWiring {
    pub target: web::EventTarget,
    pub controller: SharedController,
    pub frames: FrameScheduler,
}

/// Subscribe pointer down/move/up on `target` (the document, so a drag keeps
/// going when the pointer leaves the canvas).
pub fn wire_pointer_handlers(w: InputWiring) -> anyhow::Result<Vec<EventSubscription>> {
    Ok(vec![
        wire_pointerdown(&w)?,
        wire_pointermove(&w)?,
        wire_pointerup(&w)?,
    ])
}

fn wire_pointerdown(w: &InputWiring) -> anyhow::Result<EventSubscription> {
    let w2 = w.clone();
    EventSubscription::listen(&w.target, EVENT_POINTER_DOWN, move |ev: web::PointerEvent| {
        let (x, y) = input::pointer_client_px(&ev);
        w2.controller.borrow_mut().on_pointer_down(x, y);
        log::debug!("[input] drag start at ({}, {})", x, y);
    })
}

fn wire_pointermove(w: &InputWiring) -> anyhow::Result<EventSubscription> {
    let w2 = w.clone();
    EventSubscription::listen(&w.target, EVENT_POINTER_MOVE, move |ev: web::PointerEvent| {
        let (x, y) = input::pointer_client_px(&ev);
        let needs_frame = {
            let mut c = w2.controller.borrow_mut();
            c.on_pointer_move(x, y);
            c.needs_frame()
        };
        if needs_frame {
            w2.frames.schedule();
        }
    })
}

fn wire_pointerup(w: &InputWiring) -> anyhow::Result<EventSubscription> {
    let w2 = w.clone();
    EventSubscription::listen(&w.target, EVENT_POINTER_UP, move |_ev: web::PointerEvent| {
        w2.controller.borrow_mut().on_pointer_up();
        log::debug!("[input] drag end");
    })
}
