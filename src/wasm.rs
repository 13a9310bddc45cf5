//! WASM bindings for texscrub
//!
//! This module exposes the sanitizer and audit to JavaScript callers.

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

#[cfg(feature = "wasm")]
use serde::Serialize;

/// Safely serialize a value to JsValue, returning null on failure.
///
/// This prevents panics from `unwrap()` when serialization fails.
#[cfg(feature = "wasm")]
fn to_js_value<T: Serialize>(value: &T) -> JsValue {
    serde_wasm_bindgen::to_value(value).unwrap_or(JsValue::NULL)
}

/// Initialize panic hook for better error messages in browser console
#[cfg(feature = "wasm")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Sanitize one string of mixed prose and math markup
///
/// # Arguments
/// * `input` - Text possibly containing `$`/`$$` math spans
///
/// # Returns
/// The sanitized text
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "sanitizeTex")]
pub fn sanitize_tex_wasm(input: &str) -> String {
    crate::sanitize(input)
}

/// Sanitize every string leaf of a JSON value
///
/// # Arguments
/// * `value` - Any JSON value (object, array, string, ...)
///
/// # Returns
/// The same shape with every string leaf sanitized
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "deepSanitizeTex")]
pub fn deep_sanitize_tex_wasm(value: JsValue) -> JsValue {
    let parsed: serde_json::Value = match serde_wasm_bindgen::from_value(value) {
        Ok(parsed) => parsed,
        Err(_) => return JsValue::NULL,
    };
    to_js_value(&crate::deep_sanitize(&parsed))
}

/// Sanitize and scan for residual defects
///
/// # Arguments
/// * `input` - Text possibly containing `$`/`$$` math spans
///
/// # Returns
/// An object with `original`, `sanitized` and an `issues` array
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "auditTex")]
pub fn audit_tex_wasm(input: &str) -> JsValue {
    to_js_value(&crate::audit(input))
}

/// Get version information
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "getVersion")]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
