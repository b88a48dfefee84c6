//! ClipForge editing core.
//!
//! Time mapping between a clip's source and edited timelines, keyframed crop
//! and highlight geometry, and the pointer-driven session that edits them.
//!
//! # Modules
//!
//! - `geometry`: crop/highlight types, constraints, viewport transform
//! - `keyframes`: keyframe tracks, clipboard, hit testing
//! - `timeline`: segments, trims, source <-> visual time mapping
//! - `session`: drag/resize/pan state machine
//! - `project`: per-clip facade and export payload
//! - `config`, `error`, `logging`: shared plumbing

pub mod config;
pub mod error;
pub mod geometry;
pub mod keyframes;
pub mod logging;
pub mod project;
pub mod session;
pub mod timeline;

pub use error::{ClipForgeError, ClipForgeResult};
pub use project::{ClipEditor, ExportPayload, VideoMetadata};
