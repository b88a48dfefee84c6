//! Keyframe tracks for crop and highlight geometry.
//!
//! - `track`: KeyframeTrack with permanent start/end and the implicit end
//! - `clipboard`: single-value copy/paste across tracks
//! - `hit_test`: nearest keyframe marker under the pointer

pub mod clipboard;
pub mod hit_test;
pub mod track;

pub use clipboard::{ClipboardValue, KeyframeClipboard};
pub use hit_test::nearest_keyframe;
pub use track::{
    EndKeyframeMode, Keyframe, KeyframeOrigin, KeyframeTrack, KeyframeValue, FRAME_EPSILON,
};
