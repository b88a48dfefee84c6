//! Pointer-driven editing of crop and highlight overlays.
//!
//! # Architecture
//!
//! ```text
//! mod.rs (public API)
//!   |
//!   +-- state.rs (EditSession state machine, commit on release)
//!   +-- geometry.rs (EditableGeometry: drag/resize math per overlay)
//!   +-- capture.rs (PointerCapture attach/detach seam)
//! ```
//!
//! A session never touches a keyframe track. It hands back a `CommittedEdit`
//! on release and the caller writes it at the playhead.

pub mod capture;
pub mod geometry;
pub mod state;

#[cfg(test)]
mod tests;

pub use capture::{NoCapture, PointerCapture};
pub use geometry::{EditContext, EditableGeometry};
pub use state::{CommittedEdit, EditSession, EditState};

use crate::geometry::{CropRect, HighlightEllipse};

/// Session editing a crop rectangle.
pub type CropSession<C = NoCapture> = EditSession<CropRect, C>;

/// Session editing a highlight ellipse.
pub type HighlightSession<C = NoCapture> = EditSession<HighlightEllipse, C>;
