//! Error taxonomy surfaced to callers of the editor.

use thiserror::Error;

use crate::decode::DecodeError;

/// Errors returned by editor operations.
///
/// None of these are retried or logged by the editor itself; they are
/// propagated to the caller.
#[derive(Debug, Error)]
pub enum EditorError {
    /// `set_image` was given something other than a URL string or a blob.
    #[error("Unsupported input type.")]
    UnsupportedSource,

    /// The server answered with a non-image content type.
    #[error("Unable to load image from URL: {url} (content type {content_type})")]
    NotAnImage { url: String, content_type: String },

    /// The request failed or returned a non-success status.
    #[error("Unable to load image from URL: {url} (status {status})")]
    FetchFailed { url: String, status: u16 },

    /// The container is already claimed by another editor.
    #[error("Brightroom is already mounted in this container.")]
    AlreadyMounted,

    /// The canvas refused to hand out a 2D drawing context.
    #[error("Unable to obtain a 2D drawing context.")]
    ContextUnavailable,

    /// Export was requested before an image finished loading.
    #[error("No image is loaded.")]
    NotLoaded,

    /// A rotation other than 0, 90, 180 or 270 degrees.
    #[error("Invalid rotation: {0} (expected 0, 90, 180 or 270)")]
    InvalidRotation(String),

    /// The configuration failed validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The image bytes could not be read.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// A DOM call threw.
    #[error("DOM error: {0}")]
    Dom(String),
}

impl EditorError {
    /// Input validation failures: bad source, bad content, failed fetch, undecodable bytes.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            EditorError::UnsupportedSource
                | EditorError::NotAnImage { .. }
                | EditorError::FetchFailed { .. }
                | EditorError::InvalidRotation(_)
                | EditorError::Decode(_)
        )
    }
}

pub type Result<T, E = EditorError> = std::result::Result<T, E>;
