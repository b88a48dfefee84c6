//! Crop/highlight geometry and its constraints.
//!
//! ## Components
//! - `types`: CropRect, HighlightEllipse, AspectRatio, resize handles
//! - `constraints`: pure clamping + aspect-ratio locking
//! - `coord`: phantom-typed coordinates and the `Viewport` transform

pub mod constraints;
pub mod coord;
pub mod types;

pub use constraints::{apply_aspect_ratio, constrain_crop, constrain_highlight};
pub use coord::{Coord, Rect, ScreenSpace, Size, VideoSpace, Viewport};
pub use types::*;
