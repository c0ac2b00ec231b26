//! Save exported bytes as a browser download.
//!
//! SYSTEM CONTEXT
//! ==============
//! Export responses arrive as raw bytes; the browser only offers a save
//! dialog for a navigated URL, so the bytes are wrapped in a Blob, given an
//! object URL, and clicked through a detached anchor. The object URL is
//! revoked right after the click.
//!
//! ERROR HANDLING
//! ==============
//! Failures are logged and otherwise ignored. The export toast has already
//! been decided by the time bytes reach this point.

/// Offer `bytes` to the user as `file_name`. No-op outside the browser.
pub fn save_bytes(file_name: &str, mime_type: &str, bytes: &[u8]) {
    #[cfg(feature = "hydrate")]
    {
        if let Err(err) = save_bytes_in_browser(file_name, mime_type, bytes) {
            log::warn!("saving {file_name} failed: {err:?}");
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (file_name, mime_type, bytes);
    }
}

#[cfg(feature = "hydrate")]
fn save_bytes_in_browser(file_name: &str, mime_type: &str, bytes: &[u8]) -> Result<(), wasm_bindgen::JsValue> {
    use wasm_bindgen::JsCast;

    let data = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::of1(&data);
    let options = web_sys::BlobPropertyBag::new();
    options.set_type(mime_type);
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| wasm_bindgen::JsValue::from_str("no document"))?;
    let anchor = document.create_element("a")?.dyn_into::<web_sys::HtmlAnchorElement>()?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.click();

    web_sys::Url::revoke_object_url(&url)
}
