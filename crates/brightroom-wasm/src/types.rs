//! WASM-compatible wrapper types for image data.

use brightroom_core::decode::{DecodedImage, ImageMetadata};
use wasm_bindgen::prelude::*;

/// A decoded RGBA image for JavaScript.
///
/// The pixel layout matches `ImageData`, so
/// `new ImageData(new Uint8ClampedArray(img.pixels()), img.width)` works.
#[wasm_bindgen]
pub struct JsDecodedImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsDecodedImage {
    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of bytes in the pixel buffer (width * height * 4)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGBA pixel data as Uint8Array (a copy).
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }
}

impl JsDecodedImage {
    pub(crate) fn from_decoded(img: DecodedImage) -> Self {
        Self {
            width: img.width,
            height: img.height,
            pixels: img.pixels,
        }
    }
}

/// Header-level facts about an image file.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy)]
pub struct JsImageInfo {
    width: u32,
    height: u32,
    orientation: u8,
    display_width: u32,
    display_height: u32,
}

#[wasm_bindgen]
impl JsImageInfo {
    /// Stored width, before EXIF orientation.
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Stored height, before EXIF orientation.
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// EXIF orientation tag value (1-8, 1 when absent).
    #[wasm_bindgen(getter)]
    pub fn orientation(&self) -> u8 {
        self.orientation
    }

    /// Width as displayed, after EXIF orientation.
    #[wasm_bindgen(getter, js_name = displayWidth)]
    pub fn display_width(&self) -> u32 {
        self.display_width
    }

    #[wasm_bindgen(getter, js_name = displayHeight)]
    pub fn display_height(&self) -> u32 {
        self.display_height
    }
}

impl From<ImageMetadata> for JsImageInfo {
    fn from(meta: ImageMetadata) -> Self {
        let (display_width, display_height) = meta.oriented_dimensions();
        Self {
            width: meta.width,
            height: meta.height,
            orientation: meta.orientation.value(),
            display_width,
            display_height,
        }
    }
}
