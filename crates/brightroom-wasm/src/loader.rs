//! Obtaining image bytes from a URL or a `Blob`, and turning them into a
//! browser-decoded image element.

use brightroom_core::decode::{read_metadata, DecodeError, ImageMetadata};
use brightroom_core::source::is_image_content_type;
use brightroom_core::EditorError;
use js_sys::{Array, Uint8Array};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, HtmlImageElement, Response, Url};

use crate::dom;
use crate::error::{dom_error, js_message};

/// What `setImage` accepted.
#[derive(Debug)]
pub(crate) enum ImageSource {
    Url(String),
    Blob(Blob),
}

impl ImageSource {
    /// Classify a JS value; anything but a string or a `Blob` (including
    /// `File`) is rejected.
    pub(crate) fn from_js(value: &JsValue) -> Result<Self, EditorError> {
        if let Some(url) = value.as_string() {
            return Ok(ImageSource::Url(url));
        }
        value
            .dyn_ref::<Blob>()
            .map(|blob| ImageSource::Blob(blob.clone()))
            .ok_or(EditorError::UnsupportedSource)
    }

    /// Fetch or read the raw bytes.
    pub(crate) async fn read(&self) -> Result<Vec<u8>, EditorError> {
        match self {
            ImageSource::Url(url) => fetch_bytes(url).await,
            ImageSource::Blob(blob) => blob_bytes(blob).await,
        }
    }
}

async fn fetch_bytes(url: &str) -> Result<Vec<u8>, EditorError> {
    let failed = |status| EditorError::FetchFailed {
        url: url.to_string(),
        status,
    };

    let response: Response = JsFuture::from(dom::window()?.fetch_with_str(url))
        .await
        .map_err(|e| {
            log::debug!("fetch {url} rejected: {}", js_message(&e));
            failed(0)
        })?
        .dyn_into()
        .map_err(|_| failed(0))?;

    if !response.ok() {
        return Err(failed(response.status()));
    }

    let content_type = response
        .headers()
        .get("Content-Type")
        .map_err(dom_error)?;
    if !is_image_content_type(content_type.as_deref()) {
        return Err(EditorError::NotAnImage {
            url: url.to_string(),
            content_type: content_type.unwrap_or_default(),
        });
    }

    let buffer = JsFuture::from(response.array_buffer().map_err(dom_error)?)
        .await
        .map_err(dom_error)?;
    Ok(Uint8Array::new(&buffer).to_vec())
}

async fn blob_bytes(blob: &Blob) -> Result<Vec<u8>, EditorError> {
    let buffer = JsFuture::from(blob.array_buffer())
        .await
        .map_err(dom_error)?;
    Ok(Uint8Array::new(&buffer).to_vec())
}

/// An image element decoding from an object URL the loader owns.
///
/// The object URL is revoked when the image is dropped, which happens when a
/// newer `setImage` supersedes it.
pub(crate) struct LoadedImage {
    element: HtmlImageElement,
    object_url: String,
    metadata: Option<ImageMetadata>,
}

impl LoadedImage {
    /// Start decoding `bytes` in the browser.
    ///
    /// EXIF orientation is read here but not applied: browsers already honour
    /// it when decoding (`image-orientation: from-image`), so the element's
    /// natural size is upright.
    pub(crate) fn from_bytes(bytes: &[u8]) -> Result<Self, EditorError> {
        let metadata = match read_metadata(bytes) {
            Ok(meta) => Some(meta),
            Err(e) => {
                // The browser may still decode formats the core does not sniff.
                log::debug!("metadata unavailable: {e}");
                None
            }
        };

        let parts = Array::of1(&Uint8Array::from(bytes));
        let blob = Blob::new_with_u8_array_sequence(&parts).map_err(dom_error)?;
        let object_url = Url::create_object_url_with_blob(&blob).map_err(dom_error)?;

        let element = HtmlImageElement::new().map_err(dom_error)?;
        element.set_src(&object_url);

        Ok(Self {
            element,
            object_url,
            metadata,
        })
    }

    /// Resolves once the browser has decoded the image.
    pub(crate) fn decoded(&self) -> JsFuture {
        JsFuture::from(self.element.decode())
    }

    pub(crate) fn element(&self) -> &HtmlImageElement {
        &self.element
    }

    pub(crate) fn metadata(&self) -> Option<&ImageMetadata> {
        self.metadata.as_ref()
    }

    /// Finished decoding with a non-zero natural width.
    pub(crate) fn is_ready(&self) -> bool {
        self.element.complete() && self.element.natural_width() != 0
    }

    pub(crate) fn natural_size(&self) -> (u32, u32) {
        (self.element.natural_width(), self.element.natural_height())
    }
}

impl Drop for LoadedImage {
    fn drop(&mut self) {
        if let Err(e) = Url::revoke_object_url(&self.object_url) {
            log::debug!("revoke {} failed: {}", self.object_url, js_message(&e));
        }
    }
}

/// Map a rejected `HTMLImageElement.decode()` to an editor error.
pub(crate) fn decode_failure(err: JsValue) -> EditorError {
    EditorError::Decode(DecodeError::CorruptedFile(js_message(&err)))
}
