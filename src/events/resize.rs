use super::EventSubscription;
use crate::constants::EVENT_RESIZE;
use crate::dom;
use crate::frame::FrameScheduler;
use crate::viewer::SharedController;
use web_sys as web;

pub fn wire_resize(
    window: &web::Window,
    controller: SharedController,
    frames: FrameScheduler,
) -> anyhow::Result<EventSubscription> {
    EventSubscription::listen(window, EVENT_RESIZE, move |_ev: web::Event| {
        let (w, h) = dom::window_inner_size();
        let needs_frame = {
            let mut c = controller.borrow_mut();
            c.on_resize(w, h);
            c.needs_frame()
        };
        if needs_frame {
            frames.schedule();
        }
    })
}
