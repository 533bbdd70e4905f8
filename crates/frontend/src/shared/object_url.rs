//! Showing downloaded files in a new tab through temporary object URLs

use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Blob, BlobPropertyBag, Url};

/// How long the tab has to load the file before the URL is released
pub const OBJECT_URL_TTL_MS: u32 = 60_000;

fn create_blob(bytes: &[u8], content_type: Option<&str>) -> Result<Blob, String> {
    let array = js_sys::Array::new();
    array.push(&JsValue::from(js_sys::Uint8Array::from(bytes)));

    let properties = BlobPropertyBag::new();
    if let Some(content_type) = content_type.filter(|t| !t.is_empty()) {
        properties.set_type(content_type);
    }

    Blob::new_with_u8_array_sequence_and_options(&array, &properties)
        .map_err(|e| format!("Failed to create blob: {:?}", e))
}

/// Open `bytes` in a new tab; the object URL is revoked after [`OBJECT_URL_TTL_MS`]
pub fn open_bytes_in_new_tab(bytes: &[u8], content_type: Option<&str>) -> Result<(), String> {
    let window = web_sys::window().ok_or("No window object")?;
    let blob = create_blob(bytes, content_type)?;

    let url = Url::create_object_url_with_blob(&blob)
        .map_err(|e| format!("Failed to create object URL: {:?}", e))?;

    let opened = window.open_with_url_and_target_and_features(&url, "_blank", "noopener,noreferrer");

    let revoke = url.clone();
    spawn_local(async move {
        TimeoutFuture::new(OBJECT_URL_TTL_MS).await;
        let _ = Url::revoke_object_url(&revoke);
    });

    opened
        .map(|_| ())
        .map_err(|e| format!("Failed to open {}: {:?}", url, e))
}
