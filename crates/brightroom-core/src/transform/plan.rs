//! Export plan: the canvas operations that bake the edit into a
//! full-resolution copy of the image.
//!
//! The browser executes the plan on a `CanvasRenderingContext2D`; the same
//! operations compose into an [`Affine2`] that the tests and the pixel path
//! use to check where each source pixel lands.

use super::{EditState, Rotation};
use crate::error::{EditorError, Result};

/// A 2D affine matrix in canvas order: `x' = a*x + c*y + e`, `y' = b*x + d*y + f`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine2 {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Affine2 {
    pub const IDENTITY: Affine2 = Affine2 {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    pub fn translate(tx: f64, ty: f64) -> Self {
        Affine2 {
            e: tx,
            f: ty,
            ..Self::IDENTITY
        }
    }

    pub fn scale(sx: f64, sy: f64) -> Self {
        Affine2 {
            a: sx,
            d: sy,
            ..Self::IDENTITY
        }
    }

    pub fn rotate(rotation: Rotation) -> Self {
        let (cos, sin) = rotation.cos_sin();
        Affine2 {
            a: cos,
            b: sin,
            c: -sin,
            d: cos,
            e: 0.0,
            f: 0.0,
        }
    }

    /// `self * other`: `other` is applied to points first, like a canvas
    /// operation issued after `self`.
    pub fn then(self, other: Affine2) -> Affine2 {
        Affine2 {
            a: self.a * other.a + self.c * other.b,
            b: self.b * other.a + self.d * other.b,
            c: self.a * other.c + self.c * other.d,
            d: self.b * other.c + self.d * other.d,
            e: self.a * other.e + self.c * other.f + self.e,
            f: self.b * other.e + self.d * other.f + self.f,
        }
    }

    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.a * x + self.c * y + self.e,
            self.b * x + self.d * y + self.f,
        )
    }
}

impl Default for Affine2 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// One `CanvasRenderingContext2D` transform call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CanvasOp {
    Translate(f64, f64),
    Scale(f64, f64),
    Rotate(Rotation),
}

impl CanvasOp {
    pub fn to_affine(self) -> Affine2 {
        match self {
            CanvasOp::Translate(x, y) => Affine2::translate(x, y),
            CanvasOp::Scale(x, y) => Affine2::scale(x, y),
            CanvasOp::Rotate(rotation) => Affine2::rotate(rotation),
        }
    }
}

/// Everything needed to render the edited image onto a fresh canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportPlan {
    /// Output canvas width (natural size, swapped for 90°/270°).
    pub width: u32,
    /// Output canvas height.
    pub height: u32,
    /// Natural width of the source image.
    pub source_width: u32,
    /// Natural height of the source image.
    pub source_height: u32,
    /// Transform calls, issued between `save()` and `restore()`.
    pub ops: Vec<CanvasOp>,
}

impl ExportPlan {
    /// Build the plan for a `source_width` x `source_height` image.
    ///
    /// # Errors
    ///
    /// Returns `EditorError::NotLoaded` if either dimension is zero.
    pub fn new(source_width: u32, source_height: u32, state: &EditState) -> Result<Self> {
        if source_width == 0 || source_height == 0 {
            return Err(EditorError::NotLoaded);
        }

        let (width, height) = state.oriented_dimensions(source_width, source_height);
        let (w, h) = (f64::from(width), f64::from(height));

        let mut ops = Vec::with_capacity(7);
        if state.flip_vertical {
            ops.push(CanvasOp::Translate(0.0, h));
            ops.push(CanvasOp::Scale(1.0, -1.0));
        }
        if state.flip_horizontal {
            ops.push(CanvasOp::Translate(w, 0.0));
            ops.push(CanvasOp::Scale(-1.0, 1.0));
        }
        ops.push(CanvasOp::Translate(w / 2.0, h / 2.0));
        if state.rotation != Rotation::Deg0 {
            ops.push(CanvasOp::Rotate(state.rotation));
        }

        Ok(Self {
            width,
            height,
            source_width,
            source_height,
            ops,
        })
    }

    /// Where `drawImage` places the source: centered on the origin.
    pub fn draw_origin(&self) -> (f64, f64) {
        (
            -f64::from(self.source_width) / 2.0,
            -f64::from(self.source_height) / 2.0,
        )
    }

    /// The context transform in effect when the image is drawn.
    pub fn matrix(&self) -> Affine2 {
        self.ops
            .iter()
            .fold(Affine2::IDENTITY, |m, op| m.then(op.to_affine()))
    }

    /// Maps source pixel coordinates to output canvas coordinates.
    pub fn source_to_canvas(&self) -> Affine2 {
        let (x, y) = self.draw_origin();
        self.matrix().then(Affine2::translate(x, y))
    }
}
