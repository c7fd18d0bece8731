use viewer_core::LoadError;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

fn fetch_err(url: &str, e: wasm_bindgen::JsValue) -> LoadError {
    LoadError::Fetch {
        url: url.to_string(),
        reason: format!("{:?}", e),
    }
}

/// GET `url` and return the body. Non-2xx responses are errors.
pub async fn fetch_bytes(url: &str) -> Result<Vec<u8>, LoadError> {
    let win = web::window().ok_or_else(|| LoadError::Fetch {
        url: url.to_string(),
        reason: "no window".into(),
    })?;
    let resp_val = JsFuture::from(win.fetch_with_str(url))
        .await
        .map_err(|e| fetch_err(url, e))?;
    let resp: web::Response = resp_val.dyn_into().map_err(|e| fetch_err(url, e))?;

    if !resp.ok() {
        return Err(LoadError::Http {
            url: url.to_string(),
            status: resp.status(),
        });
    }

    let buf_promise = resp.array_buffer().map_err(|e| fetch_err(url, e))?;
    let buf_val = JsFuture::from(buf_promise)
        .await
        .map_err(|e| fetch_err(url, e))?;
    let u8 = js_sys::Uint8Array::new(&buf_val);
    let mut out = vec![0u8; u8.length() as usize];
    u8.copy_to(&mut out);
    Ok(out)
}
