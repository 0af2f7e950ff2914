//! Image transform operations: quarter-turn rotation and flips.
//!
//! # Transform Order
//!
//! 1. Rotation (clockwise, one of 0°, 90°, 180°, 270°)
//! 2. Vertical / horizontal mirror of the rotated result
//!
//! The live preview expresses this as a CSS transform, the export as a list
//! of canvas operations ([`ExportPlan`]), and hosts without a canvas use
//! [`apply_edit`] on decoded pixels. All three agree.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner, y grows downward
//! - Positive angles rotate clockwise on screen

mod pixels;
mod plan;
mod rotation;
mod state;

pub use pixels::apply_edit;
pub use plan::{Affine2, CanvasOp, ExportPlan};
pub use rotation::Rotation;
pub use state::EditState;
