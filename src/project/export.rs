//! JSON payload handed to the export backend.
//!
//! Every number is rounded to three decimals before serialization. The backend
//! re-derives pixel sampling from these values, so the rounding is part of the
//! wire contract.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ClipForgeResult;
use crate::geometry::{round3, CropRect, HighlightEllipse};
use crate::keyframes::KeyframeTrack;
use crate::timeline::{SegmentTimeline, TrimRange};

/// Crop keyframe as the backend expects it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../web/types/generated/")]
pub struct CropKeyframePayload {
    pub frame: u32,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Highlight keyframe as the backend expects it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../web/types/generated/")]
pub struct HighlightKeyframePayload {
    pub frame: u32,
    pub x: f64,
    pub y: f64,
    pub radius_x: f64,
    pub radius_y: f64,
    pub opacity: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../web/types/generated/")]
pub struct HighlightPayload {
    pub enabled: bool,
    /// Seconds the highlight stays on screen.
    pub duration: f64,
    pub keyframes: Vec<HighlightKeyframePayload>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../web/types/generated/")]
pub struct SegmentPayload {
    pub start: f64,
    pub end: f64,
    pub speed: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../web/types/generated/")]
pub struct SegmentData {
    /// All segments in source order, trimmed ones included.
    pub segments: Vec<SegmentPayload>,
    pub trim_range: TrimRange,
}

/// Everything the export renderer needs to reproduce the edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../web/types/generated/")]
pub struct ExportPayload {
    pub crop_keyframes: Vec<CropKeyframePayload>,
    pub highlight: HighlightPayload,
    pub segment_data: SegmentData,
}

impl ExportPayload {
    pub fn build(
        crop: &KeyframeTrack<CropRect>,
        highlight: &KeyframeTrack<HighlightEllipse>,
        highlight_enabled: bool,
        highlight_duration: f64,
        timeline: &SegmentTimeline,
    ) -> Self {
        let end_frame = crop.end_frame();
        let crop_keyframes = crop
            .keyframes()
            .iter()
            .map(|k| {
                // Export what is rendered: an implicit end mirrors the start.
                let rect = if k.frame == end_frame {
                    crop.end_value()
                } else {
                    &k.value
                };
                CropKeyframePayload {
                    frame: k.frame,
                    x: round3(rect.x),
                    y: round3(rect.y),
                    width: round3(rect.width),
                    height: round3(rect.height),
                }
            })
            .collect();

        let end_frame = highlight.end_frame();
        let highlight_keyframes = highlight
            .keyframes()
            .iter()
            .map(|k| {
                let ellipse = if k.frame == end_frame {
                    highlight.end_value()
                } else {
                    &k.value
                };
                HighlightKeyframePayload {
                    frame: k.frame,
                    x: round3(ellipse.x),
                    y: round3(ellipse.y),
                    radius_x: round3(ellipse.radius_x),
                    radius_y: round3(ellipse.radius_y),
                    opacity: round3(ellipse.opacity),
                    color: ellipse.color.clone(),
                }
            })
            .collect();

        let segments = timeline
            .segments()
            .iter()
            .map(|s| SegmentPayload {
                start: round3(s.start),
                end: round3(s.end),
                speed: round3(s.speed),
            })
            .collect();
        let range = timeline.trim_range();

        Self {
            crop_keyframes,
            highlight: HighlightPayload {
                enabled: highlight_enabled,
                duration: round3(highlight_duration),
                keyframes: highlight_keyframes,
            },
            segment_data: SegmentData {
                segments,
                trim_range: TrimRange {
                    start: round3(range.start),
                    end: round3(range.end),
                },
            },
        }
    }

    pub fn to_json(&self) -> ClipForgeResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> ClipForgeResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
