//! Brightroom Core - transform, layout and metadata logic
//!
//! This crate holds everything about the Brightroom photo editor that does not
//! touch the DOM: the rotation/flip state machine, the preview fit
//! computation, the export plan, claim bookkeeping for host containers, redraw
//! coalescing, and image metadata (EXIF orientation) inspection.

pub mod config;
pub mod decode;
pub mod error;
pub mod frame;
pub mod layout;
pub mod mount;
pub mod source;
pub mod transform;

pub use config::EditorConfig;
pub use error::EditorError;
pub use layout::{fit, Layout};
pub use mount::{Claim, ClaimRegistry};
pub use transform::{apply_edit, EditState, ExportPlan, Rotation};
