//! Rotation and flip state of the editor.

use serde::{Deserialize, Serialize};

use super::Rotation;

/// The transform applied to the loaded image.
///
/// Rotation is applied first; flips mirror the rotated result along the
/// output's horizontal/vertical axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditState {
    pub rotation: Rotation,
    pub flip_horizontal: bool,
    pub flip_vertical: bool,
}

impl EditState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the rotation directly.
    pub fn rotate(&mut self, rotation: Rotation) {
        self.rotation = rotation;
    }

    /// Advance one quarter turn, as the Rotate control does.
    pub fn rotate_clockwise(&mut self) -> Rotation {
        self.rotation = self.rotation.next();
        self.rotation
    }

    pub fn toggle_flip_horizontal(&mut self) -> bool {
        self.flip_horizontal = !self.flip_horizontal;
        self.flip_horizontal
    }

    pub fn toggle_flip_vertical(&mut self) -> bool {
        self.flip_vertical = !self.flip_vertical;
        self.flip_vertical
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }

    /// Dimensions of the transformed image for a `width` x `height` source.
    pub fn oriented_dimensions(&self, width: u32, height: u32) -> (u32, u32) {
        if self.rotation.swaps_dimensions() {
            (height, width)
        } else {
            (width, height)
        }
    }

    /// CSS `transform` value for the live preview.
    ///
    /// The canvas is rendered at `hidpi_scale` times its CSS size, so it is
    /// scaled back down. CSS applies the rightmost function first: the canvas
    /// is rotated, then mirrored in screen space, which is the order the
    /// export uses.
    pub fn css_transform(&self, hidpi_scale: f64) -> String {
        let inverse = 1.0 / hidpi_scale;
        let sx = if self.flip_horizontal { -inverse } else { inverse };
        let sy = if self.flip_vertical { -inverse } else { inverse };
        format!(
            "scale({}, {}) rotate({}deg)",
            sx,
            sy,
            self.rotation.degrees()
        )
    }
}
