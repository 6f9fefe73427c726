use js_sys::{Function, Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use crate::services::logging::Logger;

/// Blocking `window.alert`
pub fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        if window.alert_with_message(message).is_err() {
            Logger::warn_with_component("browser", "window.alert was refused");
        }
    }
}

pub fn print_page() {
    if let Some(window) = web_sys::window() {
        if window.print().is_err() {
            Logger::warn_with_component("browser", "window.print was refused");
        }
    }
}

/// Writes `text` through `navigator.clipboard.writeText`
pub async fn copy_to_clipboard(text: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or_else(|| "no window".to_string())?;
    let navigator = Reflect::get(&window, &JsValue::from_str("navigator"))
        .map_err(|_| "navigator unavailable".to_string())?;
    let clipboard = Reflect::get(&navigator, &JsValue::from_str("clipboard"))
        .map_err(|_| "clipboard unavailable".to_string())?;
    if clipboard.is_undefined() {
        return Err("clipboard API not supported".to_string());
    }

    let write_text = Reflect::get(&clipboard, &JsValue::from_str("writeText"))
        .map_err(|_| "writeText unavailable".to_string())?
        .dyn_into::<Function>()
        .map_err(|_| "writeText is not a function".to_string())?;
    let promise = write_text
        .call1(&clipboard, &JsValue::from_str(text))
        .map_err(|e| format!("writeText failed: {:?}", e))?
        .dyn_into::<Promise>()
        .map_err(|_| "writeText did not return a promise".to_string())?;

    JsFuture::from(promise)
        .await
        .map(|_| ())
        .map_err(|e| format!("clipboard write rejected: {:?}", e))
}
