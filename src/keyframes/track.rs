//! Frame-indexed keyframe track for crop or highlight geometry.
//!
//! A track always holds a permanent start keyframe at frame 0 and a permanent
//! end keyframe at the final frame. Until the user edits the end keyframe
//! directly it is *implicit*: it mirrors the start value, so moving the start
//! moves the end too. The first direct edit of the end makes it *explicit*
//! and from then on the two are independent. That transition is one-way.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::geometry::{CropRect, HighlightEllipse};

use super::clipboard::ClipboardValue;

/// Geometry that can live in a keyframe track.
pub trait KeyframeValue: Clone + PartialEq + std::fmt::Debug {
    /// Short name used in log lines.
    const KIND: &'static str;

    /// Linear blend towards `other` (`t` in 0..=1).
    fn lerp(&self, other: &Self, t: f64) -> Self;

    fn to_clipboard(&self) -> ClipboardValue;

    /// `None` when the clipboard holds the other geometry kind.
    fn from_clipboard(value: &ClipboardValue) -> Option<Self>;
}

/// Whether a keyframe can be deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../web/types/generated/")]
pub enum KeyframeOrigin {
    /// Start/end keyframe, always present.
    Permanent,
    /// Added by the user.
    User,
}

/// End keyframe state for the whole track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../web/types/generated/")]
pub enum EndKeyframeMode {
    /// End mirrors the start keyframe.
    #[default]
    Implicit,
    /// End was edited and is stored independently.
    Explicit,
}

/// A geometry value pinned to a frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Keyframe<V> {
    pub frame: u32,
    pub value: V,
    pub origin: KeyframeOrigin,
}

/// Ordered keyframes, strictly increasing by frame.
///
/// Invariants: at least two keyframes, first at frame 0, last at `end_frame`,
/// no duplicate frames.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyframeTrack<V> {
    keyframes: Vec<Keyframe<V>>,
    end_mode: EndKeyframeMode,
}

impl<V: KeyframeValue> KeyframeTrack<V> {
    /// Create a track with permanent start/end keyframes holding `initial`.
    ///
    /// `end_frame` is the clip's final frame; it is raised to 1 so the two
    /// permanent keyframes never share a frame.
    pub fn new(initial: V, end_frame: u32) -> Self {
        let end_frame = end_frame.max(1);
        Self {
            keyframes: vec![
                Keyframe {
                    frame: 0,
                    value: initial.clone(),
                    origin: KeyframeOrigin::Permanent,
                },
                Keyframe {
                    frame: end_frame,
                    value: initial,
                    origin: KeyframeOrigin::Permanent,
                },
            ],
            end_mode: EndKeyframeMode::Implicit,
        }
    }

    pub fn keyframes(&self) -> &[Keyframe<V>] {
        &self.keyframes
    }

    pub fn len(&self) -> usize {
        self.keyframes.len()
    }

    /// Always false; a track holds at least its two permanent keyframes.
    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }

    pub fn frames(&self) -> Vec<u32> {
        self.keyframes.iter().map(|k| k.frame).collect()
    }

    pub fn end_frame(&self) -> u32 {
        self.keyframes[self.keyframes.len() - 1].frame
    }

    pub fn end_mode(&self) -> EndKeyframeMode {
        self.end_mode
    }

    pub fn is_end_explicit(&self) -> bool {
        self.end_mode == EndKeyframeMode::Explicit
    }

    pub fn start_value(&self) -> &V {
        &self.keyframes[0].value
    }

    /// Rendered end value (the start value while implicit).
    pub fn end_value(&self) -> &V {
        match self.end_mode {
            EndKeyframeMode::Implicit => self.start_value(),
            EndKeyframeMode::Explicit => &self.keyframes[self.keyframes.len() - 1].value,
        }
    }

    fn position(&self, frame: u32) -> Result<usize, usize> {
        self.keyframes.binary_search_by_key(&frame, |k| k.frame)
    }

    /// Exact stored value at `frame`, if a keyframe sits there.
    pub fn get(&self, frame: u32) -> Option<&V> {
        if frame == self.end_frame() {
            return Some(self.end_value());
        }
        self.position(frame).ok().map(|i| &self.keyframes[i].value)
    }

    pub fn has_keyframe(&self, frame: u32) -> bool {
        self.position(frame).is_ok()
    }

    /// Exact value when `time` lands on a keyframe frame; interpolation
    /// between control points is left to the caller.
    pub fn value_at(&self, time: f64, fps: u32) -> Option<&V> {
        let exact = time * fps as f64;
        let frame = exact.round();
        if frame < 0.0 || (exact - frame).abs() > FRAME_EPSILON {
            return None;
        }
        self.get(frame as u32)
    }

    /// Insert a keyframe, or overwrite the value of an existing one.
    ///
    /// Writing frame 0 while the end is implicit also moves the mirrored end.
    /// Writing the end frame makes the end explicit. Returns `false` when
    /// `frame` lies past the end of the track.
    pub fn add_keyframe(&mut self, frame: u32, value: V) -> bool {
        let end_frame = self.end_frame();
        if frame > end_frame {
            log::debug!(
                "[KEYFRAMES] Ignoring {} keyframe at frame {} past end {}",
                V::KIND,
                frame,
                end_frame
            );
            return false;
        }

        if frame == end_frame {
            if self.end_mode == EndKeyframeMode::Implicit {
                log::info!("[KEYFRAMES] {} end keyframe is now explicit", V::KIND);
                self.end_mode = EndKeyframeMode::Explicit;
            }
            let last = self.keyframes.len() - 1;
            self.keyframes[last].value = value;
            return true;
        }

        match self.position(frame) {
            Ok(i) => self.keyframes[i].value = value,
            Err(i) => self.keyframes.insert(
                i,
                Keyframe {
                    frame,
                    value,
                    origin: KeyframeOrigin::User,
                },
            ),
        }

        if frame == 0 && self.end_mode == EndKeyframeMode::Implicit {
            let mirrored = self.keyframes[0].value.clone();
            let last = self.keyframes.len() - 1;
            self.keyframes[last].value = mirrored;
        }
        true
    }

    /// Remove a user keyframe. Permanent or missing keyframes are left alone.
    pub fn delete_keyframe(&mut self, frame: u32) -> bool {
        match self.position(frame) {
            Ok(i) if self.keyframes[i].origin == KeyframeOrigin::User => {
                self.keyframes.remove(i);
                log::debug!("[KEYFRAMES] Deleted {} keyframe at frame {}", V::KIND, frame);
                true
            }
            Ok(_) => {
                log::debug!(
                    "[KEYFRAMES] Refusing to delete permanent {} keyframe at frame {}",
                    V::KIND,
                    frame
                );
                false
            }
            Err(_) => false,
        }
    }

    /// Copy of the value stored at `frame`.
    pub fn copy_keyframe(&self, frame: u32) -> Option<V> {
        self.get(frame).cloned()
    }

    /// Insert or overwrite `value` at `frame`.
    pub fn paste_keyframe(&mut self, frame: u32, value: V) -> bool {
        self.add_keyframe(frame, value)
    }

    /// Value at any frame, linearly interpolated between neighbours.
    pub fn interpolate_at(&self, frame: u32) -> V {
        match self.position(frame) {
            Ok(i) if i == self.keyframes.len() - 1 => self.end_value().clone(),
            Ok(i) => self.keyframes[i].value.clone(),
            Err(i) if i >= self.keyframes.len() => self.end_value().clone(),
            Err(i) => {
                // Frame 0 always exists, so i >= 1 here
                let prev = &self.keyframes[i - 1];
                let next = &self.keyframes[i];
                let t = (frame - prev.frame) as f64 / (next.frame - prev.frame) as f64;
                prev.value.lerp(&next.value, t)
            }
        }
    }
}

/// Tolerance for deciding that a time lands exactly on a frame.
pub const FRAME_EPSILON: f64 = 1e-6;

impl KeyframeValue for CropRect {
    const KIND: &'static str = "crop";

    fn lerp(&self, other: &Self, t: f64) -> Self {
        CropRect::new(
            lerp(self.x, other.x, t),
            lerp(self.y, other.y, t),
            lerp(self.width, other.width, t),
            lerp(self.height, other.height, t),
        )
    }

    fn to_clipboard(&self) -> ClipboardValue {
        ClipboardValue::Crop(*self)
    }

    fn from_clipboard(value: &ClipboardValue) -> Option<Self> {
        match value {
            ClipboardValue::Crop(rect) => Some(*rect),
            _ => None,
        }
    }
}

impl KeyframeValue for HighlightEllipse {
    const KIND: &'static str = "highlight";

    /// Color is a step value and holds the earlier keyframe's color.
    fn lerp(&self, other: &Self, t: f64) -> Self {
        HighlightEllipse {
            x: lerp(self.x, other.x, t),
            y: lerp(self.y, other.y, t),
            radius_x: lerp(self.radius_x, other.radius_x, t),
            radius_y: lerp(self.radius_y, other.radius_y, t),
            opacity: lerp(self.opacity, other.opacity, t),
            color: self.color.clone(),
        }
    }

    fn to_clipboard(&self) -> ClipboardValue {
        ClipboardValue::Highlight(self.clone())
    }

    fn from_clipboard(value: &ClipboardValue) -> Option<Self> {
        match value {
            ClipboardValue::Highlight(ellipse) => Some(ellipse.clone()),
            _ => None,
        }
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}
