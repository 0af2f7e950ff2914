//! Editor configuration.
//!
//! Hosts pass a plain object; every field is optional and falls back to the
//! default below.

use serde::{Deserialize, Serialize};

use crate::error::{EditorError, Result};

/// Tunable presentation settings for an editor instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// CSS pixels kept free around the canvas inside the container.
    pub margin: f64,
    /// Canvas pixels per CSS pixel (Hi-DPI scale).
    pub hidpi_scale: f64,
    /// Canvas fill behind the image.
    pub background: String,
    /// Text drawn while no image is ready.
    pub placeholder: String,
    pub placeholder_color: String,
    /// Class added to the host container while mounted.
    pub container_class: String,
    /// Class of the control panel element.
    pub controls_class: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            margin: 100.0,
            hidpi_scale: 2.0,
            background: "#111".to_string(),
            placeholder: "Loading...".to_string(),
            placeholder_color: "white".to_string(),
            container_class: "brightroom__container".to_string(),
            controls_class: "brightroom__controls".to_string(),
        }
    }
}

impl EditorConfig {
    /// Reject values that would make the layout computation meaningless.
    pub fn validate(&self) -> Result<()> {
        if !self.margin.is_finite() || self.margin < 0.0 {
            return Err(EditorError::InvalidConfig(format!(
                "margin must be a non-negative number, got {}",
                self.margin
            )));
        }
        if !self.hidpi_scale.is_finite() || self.hidpi_scale <= 0.0 {
            return Err(EditorError::InvalidConfig(format!(
                "hidpiScale must be positive, got {}",
                self.hidpi_scale
            )));
        }
        Ok(())
    }
}
