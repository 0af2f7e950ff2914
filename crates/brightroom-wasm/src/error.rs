//! Conversions between `EditorError` and JavaScript exceptions.

use brightroom_core::EditorError;
use wasm_bindgen::{JsCast, JsValue};

/// Convert an editor error into a JS `Error` carrying its message.
pub(crate) fn to_js(err: EditorError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

/// Wrap a thrown JS value as `EditorError::Dom`.
pub(crate) fn dom_error(value: JsValue) -> EditorError {
    EditorError::Dom(js_message(&value))
}

/// Best-effort message extraction from a thrown JS value.
pub(crate) fn js_message(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}
