use crate::constants::{STATUS_ID, STATUS_STYLE};
use web_sys as web;

/// Show `message` in the status line, creating it on first use.
pub fn show_status(document: &web::Document, message: &str) {
    let el = match document.get_element_by_id(STATUS_ID) {
        Some(el) => el,
        None => {
            let Ok(el) = document.create_element("div") else {
                return;
            };
            el.set_id(STATUS_ID);
            _ = el.set_attribute("role", "status");
            if let Some(body) = document.body() {
                _ = body.append_child(&el);
            }
            el
        }
    };
    _ = el.set_attribute("style", STATUS_STYLE);
    el.set_text_content(Some(message));
}

#[inline]
pub fn hide(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(STATUS_ID) {
        _ = el.set_attribute("style", "display:none");
    }
}

#[inline]
pub fn remove(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(STATUS_ID) {
        el.remove();
    }
}
