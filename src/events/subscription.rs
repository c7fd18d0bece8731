use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// A DOM event listener that is removed again when dropped.
pub struct EventSubscription {
    target: web::EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl EventSubscription {
    /// Register `handler` for `event` on `target`. Events that are not of
    /// type `E` are logged and skipped.
    pub fn listen<E, F>(
        target: &web::EventTarget,
        event: &'static str,
        mut handler: F,
    ) -> anyhow::Result<Self>
    where
        E: JsCast + 'static,
        F: FnMut(E) + 'static,
    {
        let closure = Closure::wrap(Box::new(move |ev: web::Event| match ev.dyn_into::<E>() {
            Ok(ev) => handler(ev),
            Err(ev) => log::warn!("[events] unexpected {} event: {:?}", ev.type_(), ev),
        }) as Box<dyn FnMut(web::Event)>);
        target
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .map_err(|e| anyhow::anyhow!("add {} listener: {:?}", event, e))?;
        Ok(Self {
            target: target.clone(),
            event,
            closure,
        })
    }
}

impl Drop for EventSubscription {
    fn drop(&mut self) {
        if let Err(e) = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref())
        {
            log::warn!("[events] failed to remove {} listener: {:?}", self.event, e);
        }
    }
}
