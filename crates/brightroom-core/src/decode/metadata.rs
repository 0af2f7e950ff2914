//! Header-level inspection and full decoding of JPEG/PNG input.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageReader};

use super::{DecodeError, DecodedImage, ImageMetadata, Orientation};

/// Read dimensions and EXIF orientation without decoding pixel data.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the format cannot be sniffed from
/// the header, `DecodeError::CorruptedFile` if the header is unreadable, and
/// `DecodeError::EmptyImage` if it declares zero width or height.
pub fn read_metadata(bytes: &[u8]) -> Result<ImageMetadata, DecodeError> {
    let reader = guessed_reader(bytes)?;
    let (width, height) = reader
        .into_dimensions()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if width == 0 || height == 0 {
        return Err(DecodeError::EmptyImage { width, height });
    }

    Ok(ImageMetadata {
        width,
        height,
        orientation: extract_orientation(bytes),
    })
}

/// Decode an image to RGBA8 without applying EXIF orientation.
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    let img = decode_dynamic(bytes)?;
    let decoded = DecodedImage::from_rgba_image(img.into_rgba8());
    if decoded.is_empty() {
        return Err(DecodeError::EmptyImage {
            width: decoded.width,
            height: decoded.height,
        });
    }
    Ok(decoded)
}

/// Decode an image to RGBA8 with EXIF orientation applied, so that the
/// result matches what a browser shows for the same bytes.
pub fn decode_image_oriented(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    let decoded = decode_image(bytes)?;
    let orientation = extract_orientation(bytes);
    if orientation == Orientation::Normal {
        return Ok(decoded);
    }
    Ok(crate::transform::apply_edit(
        &decoded,
        &orientation.to_edit_state(),
    ))
}

/// Extract EXIF orientation value from image bytes (for external use).
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    extract_orientation(bytes)
}

fn guessed_reader(bytes: &[u8]) -> Result<ImageReader<Cursor<&[u8]>>, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;
    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }
    Ok(reader)
}

fn decode_dynamic(bytes: &[u8]) -> Result<DynamicImage, DecodeError> {
    guessed_reader(bytes)?
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))
}

/// Returns `Orientation::Normal` if no EXIF data is found or orientation
/// cannot be determined.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(e) => {
            log::trace!("no EXIF orientation: {e}");
            Orientation::Normal
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use image::codecs::jpeg::JpegEncoder;
    use image::codecs::png::PngEncoder;
    use image::{ExtendedColorType, ImageEncoder};

    // Minimal valid JPEG bytes (1x1 pixel, no EXIF)
    pub const MINIMAL_JPEG: &[u8] = &[
        0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46, 0x49, 0x46, 0x00, 0x01, 0x01, 0x00, 0x00,
        0x01, 0x00, 0x01, 0x00, 0x00, 0xFF, 0xDB, 0x00, 0x43, 0x00, 0x08, 0x06, 0x06, 0x07, 0x06,
        0x05, 0x08, 0x07, 0x07, 0x07, 0x09, 0x09, 0x08, 0x0A, 0x0C, 0x14, 0x0D, 0x0C, 0x0B, 0x0B,
        0x0C, 0x19, 0x12, 0x13, 0x0F, 0x14, 0x1D, 0x1A, 0x1F, 0x1E, 0x1D, 0x1A, 0x1C, 0x1C, 0x20,
        0x24, 0x2E, 0x27, 0x20, 0x22, 0x2C, 0x23, 0x1C, 0x1C, 0x28, 0x37, 0x29, 0x2C, 0x30, 0x31,
        0x34, 0x34, 0x34, 0x1F, 0x27, 0x39, 0x3D, 0x38, 0x32, 0x3C, 0x2E, 0x33, 0x34, 0x32, 0xFF,
        0xC0, 0x00, 0x0B, 0x08, 0x00, 0x01, 0x00, 0x01, 0x01, 0x01, 0x11, 0x00, 0xFF, 0xC4, 0x00,
        0x1F, 0x00, 0x00, 0x01, 0x05, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A, 0x0B,
        0xFF, 0xC4, 0x00, 0xB5, 0x10, 0x00, 0x02, 0x01, 0x03, 0x03, 0x02, 0x04, 0x03, 0x05, 0x05,
        0x04, 0x04, 0x00, 0x00, 0x01, 0x7D, 0x01, 0x02, 0x03, 0x00, 0x04, 0x11, 0x05, 0x12, 0x21,
        0x31, 0x41, 0x06, 0x13, 0x51, 0x61, 0x07, 0x22, 0x71, 0x14, 0x32, 0x81, 0x91, 0xA1, 0x08,
        0x23, 0x42, 0xB1, 0xC1, 0x15, 0x52, 0xD1, 0xF0, 0x24, 0x33, 0x62, 0x72, 0x82, 0x09, 0x0A,
        0x16, 0x17, 0x18, 0x19, 0x1A, 0x25, 0x26, 0x27, 0x28, 0x29, 0x2A, 0x34, 0x35, 0x36, 0x37,
        0x38, 0x39, 0x3A, 0x43, 0x44, 0x45, 0x46, 0x47, 0x48, 0x49, 0x4A, 0x53, 0x54, 0x55, 0x56,
        0x57, 0x58, 0x59, 0x5A, 0x63, 0x64, 0x65, 0x66, 0x67, 0x68, 0x69, 0x6A, 0x73, 0x74, 0x75,
        0x76, 0x77, 0x78, 0x79, 0x7A, 0x83, 0x84, 0x85, 0x86, 0x87, 0x88, 0x89, 0x8A, 0x92, 0x93,
        0x94, 0x95, 0x96, 0x97, 0x98, 0x99, 0x9A, 0xA2, 0xA3, 0xA4, 0xA5, 0xA6, 0xA7, 0xA8, 0xA9,
        0xAA, 0xB2, 0xB3, 0xB4, 0xB5, 0xB6, 0xB7, 0xB8, 0xB9, 0xBA, 0xC2, 0xC3, 0xC4, 0xC5, 0xC6,
        0xC7, 0xC8, 0xC9, 0xCA, 0xD2, 0xD3, 0xD4, 0xD5, 0xD6, 0xD7, 0xD8, 0xD9, 0xDA, 0xE1, 0xE2,
        0xE3, 0xE4, 0xE5, 0xE6, 0xE7, 0xE8, 0xE9, 0xEA, 0xF1, 0xF2, 0xF3, 0xF4, 0xF5, 0xF6, 0xF7,
        0xF8, 0xF9, 0xFA, 0xFF, 0xDA, 0x00, 0x08, 0x01, 0x01, 0x00, 0x00, 0x3F, 0x00, 0xFB, 0xD5,
        0xDB, 0x20, 0xA8, 0xF1, 0x7E, 0xFF, 0xD9,
    ];

    /// `MINIMAL_JPEG` with an APP1 Exif segment carrying the given orientation.
    pub fn jpeg_with_orientation(orientation: u16) -> Vec<u8> {
        with_exif_orientation(MINIMAL_JPEG, orientation)
    }

    /// Insert an APP1 Exif segment carrying `orientation` right after SOI.
    pub fn with_exif_orientation(jpeg: &[u8], orientation: u16) -> Vec<u8> {
        let [lo, hi] = orientation.to_le_bytes();
        #[rustfmt::skip]
        let tiff: [u8; 26] = [
            0x49, 0x49, 0x2A, 0x00, 0x08, 0x00, 0x00, 0x00, // "II", 42, IFD0 at 8
            0x01, 0x00,                                     // one entry
            0x12, 0x01, 0x03, 0x00, 0x01, 0x00, 0x00, 0x00, // Orientation, SHORT, count 1
            lo, hi, 0x00, 0x00,                             // value
            0x00, 0x00, 0x00, 0x00,                         // no next IFD
        ];
        let segment_len = (2 + 6 + tiff.len()) as u16;

        let mut out = vec![0xFF, 0xD8, 0xFF, 0xE1];
        out.extend_from_slice(&segment_len.to_be_bytes());
        out.extend_from_slice(b"Exif\0\0");
        out.extend_from_slice(&tiff);
        out.extend_from_slice(&jpeg[2..]);
        out
    }

    pub const YELLOW: [u8; 3] = [255, 255, 0];
    pub const GREEN: [u8; 3] = [0, 255, 0];
    pub const RED: [u8; 3] = [255, 0, 0];
    pub const BLACK: [u8; 3] = [0, 0, 0];

    /// A 48x32 JPEG split into flat quadrants at x = 16, y = 16:
    /// yellow top-left, green top-right, red bottom-left, black bottom-right.
    ///
    /// The split sits on MCU boundaries, so corner pixels survive
    /// compression almost exactly.
    pub fn quadrant_jpeg() -> Vec<u8> {
        let (width, height) = (48u32, 32u32);
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                let color = match (x < 16, y < 16) {
                    (true, true) => YELLOW,
                    (false, true) => GREEN,
                    (true, false) => RED,
                    (false, false) => BLACK,
                };
                pixels.extend_from_slice(&color);
            }
        }
        let mut out = Vec::new();
        JpegEncoder::new_with_quality(&mut out, 95)
            .write_image(&pixels, width, height, ExtendedColorType::Rgb8)
            .expect("JPEG encoding should succeed");
        out
    }

    /// Encode an RGBA buffer as PNG.
    pub fn png_bytes(width: u32, height: u32, pixels: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        PngEncoder::new(&mut out)
            .write_image(pixels, width, height, ExtendedColorType::Rgba8)
            .expect("PNG encoding should succeed");
        out
    }

    /// A PNG whose pixel at `(x, y)` is `[x, y, 0, 255]`.
    pub fn gradient_png(width: u32, height: u32) -> Vec<u8> {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[x as u8, y as u8, 0, 255]);
            }
        }
        png_bytes(width, height, &pixels)
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_read_metadata_png() {
        let meta = read_metadata(&gradient_png(7, 3)).unwrap();
        assert_eq!((meta.width, meta.height), (7, 3));
        assert_eq!(meta.orientation, Orientation::Normal);
    }

    #[test]
    fn test_read_metadata_jpeg_without_exif() {
        let meta = read_metadata(MINIMAL_JPEG).unwrap();
        assert_eq!((meta.width, meta.height), (1, 1));
        assert_eq!(meta.orientation, Orientation::Normal);
    }

    #[test]
    fn test_read_metadata_jpeg_with_exif_orientation() {
        let bytes = jpeg_with_orientation(6);
        let meta = read_metadata(&bytes).unwrap();
        assert_eq!(meta.orientation, Orientation::Rotate90CW);
        assert_eq!(get_orientation(&bytes), Orientation::Rotate90CW);
    }

    #[test]
    fn test_read_metadata_rejects_garbage() {
        match read_metadata(&[0x00, 0x01, 0x02, 0x03]) {
            Err(DecodeError::InvalidFormat) => {}
            other => panic!("Expected InvalidFormat, got: {:?}", other),
        }
    }

    #[test]
    fn test_read_metadata_empty_bytes() {
        assert!(read_metadata(&[]).is_err());
    }

    #[test]
    fn test_decode_image_png_pixels() {
        let img = decode_image(&gradient_png(4, 2)).unwrap();
        assert_eq!((img.width, img.height), (4, 2));
        assert_eq!(img.pixels.len(), 4 * 2 * 4);
        assert_eq!(img.pixel(3, 1), Some([3, 1, 0, 255]));
    }

    #[test]
    fn test_decode_truncated_jpeg() {
        assert!(decode_image(&MINIMAL_JPEG[0..20]).is_err());
    }

    #[test]
    fn test_decode_image_oriented_without_exif_is_unchanged() {
        let bytes = gradient_png(3, 2);
        assert_eq!(
            decode_image_oriented(&bytes).unwrap(),
            decode_image(&bytes).unwrap()
        );
    }

    fn assert_color(actual: Option<[u8; 4]>, expected: [u8; 3]) {
        let actual = actual.expect("pixel in bounds");
        for (channel, want) in actual.iter().zip(expected) {
            assert!(
                channel.abs_diff(want) <= 24,
                "expected {:?}, got {:?}",
                expected,
                actual
            );
        }
    }

    #[test]
    fn test_decode_image_without_orientation_keeps_stored_layout() {
        let img = decode_image(&with_exif_orientation(&quadrant_jpeg(), 6)).unwrap();
        assert_eq!((img.width, img.height), (48, 32));
        assert_color(img.pixel(0, 0), YELLOW);
        assert_color(img.pixel(47, 31), BLACK);
    }

    #[test]
    fn test_decode_oriented_rotate90() {
        // Orientation 6: turn clockwise, so the left column becomes the top row.
        let bytes = with_exif_orientation(&quadrant_jpeg(), 6);
        let meta = read_metadata(&bytes).unwrap();
        assert_eq!(meta.oriented_dimensions(), (32, 48));

        let img = decode_image_oriented(&bytes).unwrap();
        assert_eq!((img.width, img.height), (32, 48));
        assert_color(img.pixel(0, 0), RED);
        assert_color(img.pixel(31, 0), YELLOW);
        assert_color(img.pixel(31, 47), GREEN);
        assert_color(img.pixel(0, 47), BLACK);
    }

    #[test]
    fn test_decode_oriented_rotate270() {
        let img = decode_image_oriented(&with_exif_orientation(&quadrant_jpeg(), 8)).unwrap();
        assert_eq!((img.width, img.height), (32, 48));
        assert_color(img.pixel(0, 0), GREEN);
        assert_color(img.pixel(31, 0), BLACK);
        assert_color(img.pixel(0, 47), YELLOW);
        assert_color(img.pixel(31, 47), RED);
    }

    #[test]
    fn test_decode_oriented_transpose() {
        // Orientation 5 mirrors across the main diagonal: rows become columns.
        let img = decode_image_oriented(&with_exif_orientation(&quadrant_jpeg(), 5)).unwrap();
        assert_eq!((img.width, img.height), (32, 48));
        assert_color(img.pixel(0, 0), YELLOW);
        assert_color(img.pixel(31, 0), RED);
        assert_color(img.pixel(0, 47), GREEN);
        assert_color(img.pixel(31, 47), BLACK);
    }

    #[test]
    fn test_orientation_extraction_invalid_data() {
        assert_eq!(get_orientation(&[0x00, 0x01, 0x02]), Orientation::Normal);
    }
}
