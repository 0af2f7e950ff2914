//! Thin helpers over `web-sys` for the nodes the editor owns.

use brightroom_core::EditorError;
use wasm_bindgen::JsCast;
use web_sys::{
    CanvasRenderingContext2d, Document, HtmlButtonElement, HtmlCanvasElement, HtmlElement, Window,
};

use crate::error::dom_error;

pub(crate) fn window() -> Result<Window, EditorError> {
    web_sys::window().ok_or_else(|| EditorError::Dom("no global window".to_string()))
}

pub(crate) fn document() -> Result<Document, EditorError> {
    window()?
        .document()
        .ok_or_else(|| EditorError::Dom("no document".to_string()))
}

pub(crate) fn create<T: JsCast>(document: &Document, tag: &str) -> Result<T, EditorError> {
    document
        .create_element(tag)
        .map_err(dom_error)?
        .dyn_into::<T>()
        .map_err(|_| EditorError::Dom(format!("<{tag}> has an unexpected type")))
}

pub(crate) fn create_canvas(document: &Document) -> Result<HtmlCanvasElement, EditorError> {
    create(document, "canvas")
}

pub(crate) fn create_button(
    document: &Document,
    label: &str,
    action: &str,
) -> Result<HtmlButtonElement, EditorError> {
    let button: HtmlButtonElement = create(document, "button")?;
    button.set_type("button");
    button.set_inner_text(label);
    button
        .set_attribute("data-action", action)
        .map_err(dom_error)?;
    Ok(button)
}

/// The 2D context of `canvas`.
///
/// # Errors
///
/// Returns `EditorError::ContextUnavailable` if the canvas already has a
/// context of another kind or the browser refuses one.
pub(crate) fn context_2d(
    canvas: &HtmlCanvasElement,
) -> Result<CanvasRenderingContext2d, EditorError> {
    canvas
        .get_context("2d")
        .map_err(|_| EditorError::ContextUnavailable)?
        .ok_or(EditorError::ContextUnavailable)?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| EditorError::ContextUnavailable)
}

/// Rendered CSS width and height of `element`, from its computed style.
pub(crate) fn rendered_size(element: &HtmlElement) -> Result<(f64, f64), EditorError> {
    let style = window()?
        .get_computed_style(element)
        .map_err(dom_error)?
        .ok_or_else(|| EditorError::Dom("no computed style".to_string()))?;
    let width = style.get_property_value("width").map_err(dom_error)?;
    let height = style.get_property_value("height").map_err(dom_error)?;
    Ok((parse_css_px(&width), parse_css_px(&height)))
}

/// Parse the leading number of a CSS length such as `"812.5px"`.
///
/// Mirrors `parseFloat`: the longest numeric prefix (sign, digits, fraction,
/// exponent) is read and trailing units are ignored. Anything without a
/// leading number (`"auto"`, `""`) reads as 0.
pub(crate) fn parse_css_px(value: &str) -> f64 {
    let bytes = value.trim().as_bytes();
    let digits_from = |mut i: usize| {
        while bytes.get(i).is_some_and(u8::is_ascii_digit) {
            i += 1;
        }
        i
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    end = digits_from(end);
    if bytes.get(end) == Some(&b'.') {
        end = digits_from(end + 1);
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        // "1e" and "1epx" keep the mantissa only.
        if exp_end > exp {
            end = exp_end;
        }
    }

    std::str::from_utf8(&bytes[..end])
        .ok()
        .and_then(|number| number.parse::<f64>().ok())
        .unwrap_or(0.0)
}
