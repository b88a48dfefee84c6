//! Editor configuration management.
//!
//! - `EditorConfig`: tunables for boundary snapping, keyframe hit-testing,
//!   segment merging and viewport zoom.
//!
//! Stored behind a `parking_lot::RwLock` so the host can batch-update all
//! settings at once; timelines and editors copy what they need at creation.

pub mod editor;

pub use editor::{
    get_editor_config, reset_editor_config, set_editor_config, EditorConfig, EDITOR_CONFIG,
};
