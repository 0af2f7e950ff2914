//! Validation of image sources before their bytes are used.

/// Whether an HTTP `Content-Type` header is acceptable for an image.
///
/// A missing header is accepted (the decoder will judge the bytes); a
/// present one must start with `image/`.
pub fn is_image_content_type(content_type: Option<&str>) -> bool {
    match content_type {
        None => true,
        Some(value) => value
            .trim_start()
            .as_bytes()
            .get(..6)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(b"image/")),
    }
}
