//! Percent-based layout of segments for the timeline strip.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::segments::{Segment, SegmentTimeline};

/// Where an active segment sits on the edited (visual) timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../web/types/generated/")]
pub struct SegmentLayout {
    pub segment: Segment,
    pub visual_start_percent: f64,
    pub visual_width_percent: f64,
}

/// Where a trimmed segment sits on the source timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../web/types/generated/")]
pub struct TrimIndicator {
    pub segment: Segment,
    pub source_start_percent: f64,
    pub source_width_percent: f64,
}

impl SegmentTimeline {
    /// Active segments in order with their share of the visual timeline.
    ///
    /// Widths sum to 100 (within float error) whenever any segment is active.
    pub fn visual_layout(&self) -> Vec<SegmentLayout> {
        let total = self.visual_duration();
        if total <= 0.0 {
            return Vec::new();
        }

        let mut cursor = 0.0;
        self.active_segments()
            .map(|segment| {
                let visual = segment.visual_duration();
                let layout = SegmentLayout {
                    segment: segment.clone(),
                    visual_start_percent: cursor / total * 100.0,
                    visual_width_percent: visual / total * 100.0,
                };
                cursor += visual;
                layout
            })
            .collect()
    }

    /// Trimmed segments positioned against the full source duration.
    pub fn trim_indicators(&self) -> Vec<TrimIndicator> {
        let duration = self.duration();
        self.trimmed_segments()
            .map(|segment| TrimIndicator {
                segment: segment.clone(),
                source_start_percent: segment.start / duration * 100.0,
                source_width_percent: segment.duration() / duration * 100.0,
            })
            .collect()
    }
}
