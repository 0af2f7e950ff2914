//! Canvas-free export: the edit applied directly to an RGBA buffer.
//!
//! Quarter turns and mirrors are exact pixel permutations, so no
//! interpolation is involved and the output agrees pixel for pixel with the
//! canvas export plan.

use image::imageops;

use super::{EditState, Rotation};
use crate::decode::DecodedImage;

/// Apply rotation and flips to an image.
///
/// Rotation is clockwise and applied first; the flips mirror the rotated
/// result. An identity edit returns a copy of the input.
///
/// # Example
///
/// ```ignore
/// use brightroom_core::transform::{apply_edit, EditState, Rotation};
///
/// let mut state = EditState::new();
/// state.rotate(Rotation::Deg90);
/// let rotated = apply_edit(&image, &state);
/// assert_eq!(rotated.width, image.height);
/// ```
pub fn apply_edit(image: &DecodedImage, state: &EditState) -> DecodedImage {
    if state.is_identity() {
        return image.clone();
    }

    let Some(rgba) = image.to_rgba_image() else {
        // Buffer does not match the declared size; nothing sensible to permute.
        log::warn!(
            "apply_edit: {} byte buffer does not match {}x{}",
            image.pixels.len(),
            image.width,
            image.height
        );
        return image.clone();
    };

    let mut out = match state.rotation {
        Rotation::Deg0 => rgba,
        Rotation::Deg90 => imageops::rotate90(&rgba),
        Rotation::Deg180 => imageops::rotate180(&rgba),
        Rotation::Deg270 => imageops::rotate270(&rgba),
    };
    if state.flip_horizontal {
        imageops::flip_horizontal_in_place(&mut out);
    }
    if state.flip_vertical {
        imageops::flip_vertical_in_place(&mut out);
    }

    DecodedImage::from_rgba_image(out)
}
