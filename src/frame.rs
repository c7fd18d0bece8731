//! One-shot `requestAnimationFrame` scheduling for coalesced redraws.
//!
//! Input handlers only mark the controller dirty and call
//! [`FrameScheduler::schedule`]; at most one animation frame is outstanding,
//! and that frame renders once no matter how many events arrived before it.

use crate::viewer::SharedController;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct FrameScheduler {
    inner: Rc<SchedulerInner>,
}

struct SchedulerInner {
    pending: Cell<Option<i32>>,
    tick: RefCell<Option<Closure<dyn FnMut()>>>,
}

impl FrameScheduler {
    pub fn new(controller: SharedController) -> Self {
        let inner = Rc::new(SchedulerInner {
            pending: Cell::new(None),
            tick: RefCell::new(None),
        });
        let weak: Weak<SchedulerInner> = Rc::downgrade(&inner);
        *inner.tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.pending.set(None);
            }
            match controller.try_borrow_mut() {
                Ok(mut c) => {
                    c.flush_redraw();
                }
                Err(_) => log::warn!("[frame] controller busy; frame skipped"),
            }
        }) as Box<dyn FnMut()>));
        Self { inner }
    }

    /// Request an animation frame unless one is already outstanding.
    pub fn schedule(&self) {
        if self.inner.pending.get().is_some() {
            return;
        }
        let Some(window) = web::window() else {
            return;
        };
        let tick = self.inner.tick.borrow();
        let Some(tick) = tick.as_ref() else {
            return;
        };
        match window.request_animation_frame(tick.as_ref().unchecked_ref()) {
            Ok(id) => self.inner.pending.set(Some(id)),
            Err(e) => log::error!("[frame] requestAnimationFrame failed: {:?}", e),
        }
    }

    pub fn cancel(&self) {
        self.inner.cancel();
    }
}

impl SchedulerInner {
    fn cancel(&self) {
        if let Some(id) = self.pending.take() {
            if let Some(window) = web::window() {
                _ = window.cancel_animation_frame(id);
            }
        }
    }
}

impl Drop for SchedulerInner {
    fn drop(&mut self) {
        self.cancel();
    }
}
