//! Canvas-free bindings: image inspection and pixel-level export.
//!
//! These run anywhere WASM runs, including Web Workers without an
//! `OffscreenCanvas`.
//!
//! # Example
//!
//! ```typescript
//! import { inspect_image, render_edit } from '@brightroom/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const info = inspect_image(bytes);
//! const edited = render_edit(bytes, 90, false, true);
//! const data = new ImageData(new Uint8ClampedArray(edited.pixels()), edited.width);
//! ```

use brightroom_core::decode;
use brightroom_core::{apply_edit, EditState, EditorError, Rotation};
use wasm_bindgen::prelude::*;

use crate::error::to_js;
use crate::types::{JsDecodedImage, JsImageInfo};

/// Read dimensions and EXIF orientation without decoding pixels.
#[wasm_bindgen]
pub fn inspect_image(bytes: &[u8]) -> Result<JsImageInfo, JsValue> {
    decode::read_metadata(bytes)
        .map(JsImageInfo::from)
        .map_err(|e| to_js(e.into()))
}

/// Decode `bytes`, correct EXIF orientation, and apply the edit.
///
/// The result matches `Brightroom.toCanvas()` for the same image and edit.
#[wasm_bindgen]
pub fn render_edit(
    bytes: &[u8],
    rotation: u32,
    flip_horizontal: bool,
    flip_vertical: bool,
) -> Result<JsDecodedImage, JsValue> {
    render(bytes, rotation, flip_horizontal, flip_vertical)
        .map(JsDecodedImage::from_decoded)
        .map_err(to_js)
}

fn render(
    bytes: &[u8],
    rotation: u32,
    flip_horizontal: bool,
    flip_vertical: bool,
) -> Result<decode::DecodedImage, EditorError> {
    let state = EditState {
        rotation: Rotation::try_from(rotation)?,
        flip_horizontal,
        flip_vertical,
    };
    let upright = decode::decode_image_oriented(bytes)?;
    Ok(apply_edit(&upright, &state))
}


/// WASM-specific tests that go through `JsValue` errors.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_inspect_image_rejects_garbage() {
        assert!(inspect_image(&[0u8; 16]).is_err());
    }

    #[wasm_bindgen_test]
    fn test_render_edit_rejects_bad_rotation() {
        assert!(render_edit(&[0u8; 16], 30, false, false).is_err());
    }
}
