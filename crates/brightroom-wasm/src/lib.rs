//! Brightroom WASM - the embeddable photo editor widget
//!
//! This crate exposes the brightroom-core editing model to JavaScript as a
//! widget that renders into any container element.
//!
//! # Module Structure
//!
//! - `widget` - The `Brightroom` editor: mount, load, edit, export
//! - `loader` - Fetching URLs and reading blobs into decodable images
//! - `mount` - Container claims and node attachment
//! - `controls` - The rotate/flip button panel
//! - `decode` - Canvas-free bindings (metadata inspection, pixel export)
//! - `types` - WASM-compatible wrapper types for image data
//!
//! # Usage
//!
//! ```typescript
//! import init, { Brightroom } from '@brightroom/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const editor = new Brightroom({ container: document.getElementById('editor') });
//! await editor.setImage(file);
//! editor.rotate(90);
//! const canvas = await editor.toCanvas();
//! ```

use wasm_bindgen::prelude::*;

mod controls;
mod decode;
mod dom;
mod error;
mod loader;
mod mount;
mod types;
mod widget;

// Re-export public types
pub use decode::{inspect_image, render_edit};
pub use types::{JsDecodedImage, JsImageInfo};
pub use widget::Brightroom;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    // A host page may have installed its own logger already.
    let _ = console_log::init_with_level(log_level());
}

fn log_level() -> log::Level {
    if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Warn
    }
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
