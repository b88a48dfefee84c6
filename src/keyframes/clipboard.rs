//! Single-slot keyframe clipboard shared by the crop and highlight tracks.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::geometry::{CropRect, HighlightEllipse};

use super::track::{KeyframeTrack, KeyframeValue};

/// One copied geometry value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
#[ts(export, export_to = "../web/types/generated/")]
pub enum ClipboardValue {
    Crop(CropRect),
    Highlight(HighlightEllipse),
}

/// Holds at most one value; copying replaces whatever was there.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyframeClipboard {
    value: Option<ClipboardValue>,
}

impl KeyframeClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn peek(&self) -> Option<&ClipboardValue> {
        self.value.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_none()
    }

    pub fn clear(&mut self) {
        self.value = None;
    }

    /// Copy the keyframe at `frame`. Returns `false` if there is none.
    pub fn copy_from<V: KeyframeValue>(&mut self, track: &KeyframeTrack<V>, frame: u32) -> bool {
        match track.copy_keyframe(frame) {
            Some(value) => {
                self.value = Some(value.to_clipboard());
                true
            }
            None => false,
        }
    }

    /// Paste into `track` at `frame`.
    ///
    /// Refused when empty or when the clipboard holds the other geometry kind.
    pub fn paste_into<V: KeyframeValue>(&self, track: &mut KeyframeTrack<V>, frame: u32) -> bool {
        let Some(value) = self.value.as_ref().and_then(V::from_clipboard) else {
            log::debug!("[KEYFRAMES] Nothing pasteable for a {} track", V::KIND);
            return false;
        };
        track.paste_keyframe(frame, value)
    }
}
