//! Piecewise-linear mapping between source time and visual time.
//!
//! A `TimeMapper` is a snapshot of a `SegmentTimeline`'s active segments. It is
//! rebuilt whole after every timeline edit, never patched.

use super::segments::SegmentTimeline;

/// Convert a frame index to seconds.
pub fn frame_to_time(frame: u32, fps: u32) -> f64 {
    if fps == 0 {
        return 0.0;
    }
    frame as f64 / fps as f64
}

/// Convert seconds to the nearest frame index. Negative times map to frame 0.
pub fn time_to_frame(time: f64, fps: u32) -> u32 {
    if !time.is_finite() || time <= 0.0 {
        return 0;
    }
    (time * fps as f64).round() as u32
}

/// One active segment laid out on both timelines.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Piece {
    source_start: f64,
    source_end: f64,
    visual_start: f64,
    visual_end: f64,
    speed: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TimeMapper {
    pieces: Vec<Piece>,
}

impl TimeMapper {
    pub fn new(timeline: &SegmentTimeline) -> Self {
        let mut visual_cursor = 0.0;
        let pieces = timeline
            .active_segments()
            .map(|segment| {
                let visual_start = visual_cursor;
                visual_cursor += segment.visual_duration();
                Piece {
                    source_start: segment.start,
                    source_end: segment.end,
                    visual_start,
                    visual_end: visual_cursor,
                    speed: segment.speed,
                }
            })
            .collect();

        Self { pieces }
    }

    /// Mapper with no active segments; both directions are identity.
    pub fn identity() -> Self {
        Self::default()
    }

    pub fn is_identity(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn total_visual_duration(&self) -> f64 {
        self.pieces.last().map(|p| p.visual_end).unwrap_or(0.0)
    }

    /// Visual position of a source time.
    ///
    /// Times inside a trimmed region clamp to the nearest active boundary.
    pub fn source_to_visual_time(&self, source_time: f64) -> f64 {
        let Some(last) = self.pieces.last() else {
            return source_time;
        };

        for piece in &self.pieces {
            if source_time < piece.source_start {
                return piece.visual_start;
            }
            if source_time <= piece.source_end {
                return piece.visual_start + (source_time - piece.source_start) / piece.speed;
            }
        }

        last.visual_end
    }

    /// Source time shown at a visual position. Clamps to `[0, total]`.
    pub fn visual_to_source_time(&self, visual_time: f64) -> f64 {
        let (Some(first), Some(last)) = (self.pieces.first(), self.pieces.last()) else {
            return visual_time;
        };

        if visual_time <= 0.0 {
            return first.source_start;
        }

        self.pieces
            .iter()
            .find(|piece| visual_time <= piece.visual_end)
            .map(|piece| piece.source_start + (visual_time - piece.visual_start) * piece.speed)
            .unwrap_or(last.source_end)
    }

    pub fn source_frame_to_visual_time(&self, frame: u32, fps: u32) -> f64 {
        self.source_to_visual_time(frame_to_time(frame, fps))
    }

    pub fn visual_time_to_source_frame(&self, visual_time: f64, fps: u32) -> u32 {
        time_to_frame(self.visual_to_source_time(visual_time), fps)
    }
}

impl From<&SegmentTimeline> for TimeMapper {
    fn from(timeline: &SegmentTimeline) -> Self {
        Self::new(timeline)
    }
}
