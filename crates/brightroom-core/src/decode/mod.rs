//! Image inspection and decoding for Brightroom.
//!
//! This module provides functionality for:
//! - Reading natural dimensions and the EXIF orientation tag from raw bytes
//! - Decoding JPEG/PNG images to RGBA pixels for the canvas-free export path
//!
//! # Architecture
//!
//! In the browser the display bitmap is decoded natively by an image element;
//! the functions here only inspect the bytes. Full decoding is used by hosts
//! without a canvas (workers, native tests).
//!
//! # Examples
//!
//! ```ignore
//! use brightroom_core::decode::read_metadata;
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let meta = read_metadata(&bytes).unwrap();
//! println!("{}x{} orientation {:?}", meta.width, meta.height, meta.orientation);
//! ```

mod metadata;
mod types;

#[cfg(test)]
pub(crate) use metadata::fixtures;
pub use metadata::{decode_image, decode_image_oriented, get_orientation, read_metadata};
pub use types::{DecodeError, DecodedImage, ImageMetadata, Orientation};
