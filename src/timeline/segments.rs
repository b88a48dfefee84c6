//! Segment timeline: user boundaries, per-segment speed and edge trims.
//!
//! Segments are kept in source time and always partition `[0, duration]`
//! contiguously. Trimmed segments keep their data so a trim can be undone; they
//! only stop contributing visual time. Trims always eat inward from the edges
//! of the active region, and at least one segment always stays active.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::config::EDITOR_CONFIG;
use crate::error::{ClipForgeError, ClipForgeResult};

/// Which neighbour's attributes survive when a boundary is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../web/types/generated/")]
pub enum MergePolicy {
    /// Merged segment takes the left-hand segment's speed.
    KeepLeft,
    /// Merged segment takes the right-hand segment's speed.
    #[default]
    KeepRight,
}

/// A contiguous source-time range with its own speed and trim flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../web/types/generated/")]
pub struct Segment {
    pub index: usize,
    /// Source-time start in seconds.
    pub start: f64,
    /// Source-time end in seconds.
    pub end: f64,
    /// Playback multiplier (2.0 = twice as fast).
    pub speed: f64,
    pub is_trimmed: bool,
    pub is_first: bool,
    pub is_last: bool,
}

impl Segment {
    fn new(start: f64, end: f64, speed: f64) -> Self {
        Self {
            index: 0,
            start,
            end,
            speed,
            is_trimmed: false,
            is_first: false,
            is_last: false,
        }
    }

    /// Source duration in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Duration on the edited timeline; zero when trimmed.
    pub fn visual_duration(&self) -> f64 {
        if self.is_trimmed {
            0.0
        } else {
            self.duration() / self.speed
        }
    }

    pub fn contains(&self, source_time: f64) -> bool {
        source_time >= self.start && source_time <= self.end
    }
}

/// Side of the timeline a trim was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../web/types/generated/")]
pub enum TrimSide {
    Start,
    End,
}

/// One trim operation, oldest first in the history.
///
/// The trimmed segment is identified by its source start time, which stays
/// stable while boundaries elsewhere are added or removed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../web/types/generated/")]
pub struct TrimHistoryEntry {
    pub side: TrimSide,
    pub segment_start: f64,
}

/// Source-time range that survives trimming.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../web/types/generated/")]
pub struct TrimRange {
    pub start: f64,
    pub end: f64,
}

/// Ordered, contiguous segments over a clip's source duration.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentTimeline {
    duration: f64,
    segments: Vec<Segment>,
    trim_history: Vec<TrimHistoryEntry>,
    epsilon: f64,
    merge_policy: MergePolicy,
}

impl SegmentTimeline {
    /// One full-duration segment at normal speed, using the global config.
    pub fn new(duration: f64) -> ClipForgeResult<Self> {
        let (epsilon, merge_policy) = {
            let config = EDITOR_CONFIG.read();
            (config.boundary_epsilon, config.merge_policy)
        };
        Self::with_options(duration, epsilon, merge_policy)
    }

    pub fn with_options(
        duration: f64,
        epsilon: f64,
        merge_policy: MergePolicy,
    ) -> ClipForgeResult<Self> {
        if !duration.is_finite() || duration <= 0.0 {
            return Err(ClipForgeError::InvalidMetadata(format!(
                "duration must be positive, got {}",
                duration
            )));
        }

        let mut timeline = Self {
            duration,
            segments: vec![Segment::new(0.0, duration, 1.0)],
            trim_history: Vec::new(),
            epsilon,
            merge_policy,
        };
        timeline.reindex();
        Ok(timeline)
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn segment(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    pub fn merge_policy(&self) -> MergePolicy {
        self.merge_policy
    }

    pub fn set_merge_policy(&mut self, policy: MergePolicy) {
        self.merge_policy = policy;
    }

    pub fn trim_history(&self) -> &[TrimHistoryEntry] {
        &self.trim_history
    }

    /// Interior boundaries in source time, ascending.
    pub fn boundaries(&self) -> Vec<f64> {
        self.segments.iter().skip(1).map(|s| s.start).collect()
    }

    /// Index of the segment containing `source_time` (the last one at the very end).
    pub fn segment_index_at(&self, source_time: f64) -> Option<usize> {
        if !(0.0..=self.duration).contains(&source_time) {
            return None;
        }
        self.segments
            .iter()
            .position(|s| source_time >= s.start && source_time < s.end)
            .or(Some(self.segments.len() - 1))
    }

    pub fn active_segments(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter().filter(|s| !s.is_trimmed)
    }

    pub fn trimmed_segments(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter().filter(|s| s.is_trimmed)
    }

    pub fn active_count(&self) -> usize {
        self.active_segments().count()
    }

    fn first_active_index(&self) -> Option<usize> {
        self.segments.iter().position(|s| !s.is_trimmed)
    }

    fn last_active_index(&self) -> Option<usize> {
        self.segments.iter().rposition(|s| !s.is_trimmed)
    }

    /// Total duration of the edited timeline.
    pub fn visual_duration(&self) -> f64 {
        self.active_segments().map(Segment::visual_duration).sum()
    }

    /// Source range left after trims (`[0, duration]` with no trims).
    pub fn trim_range(&self) -> TrimRange {
        match (self.first_active_index(), self.last_active_index()) {
            (Some(first), Some(last)) => TrimRange {
                start: self.segments[first].start,
                end: self.segments[last].end,
            },
            _ => TrimRange {
                start: 0.0,
                end: self.duration,
            },
        }
    }

    fn reindex(&mut self) {
        let last = self.segments.len() - 1;
        for (i, segment) in self.segments.iter_mut().enumerate() {
            segment.index = i;
            segment.is_first = i == 0;
            segment.is_last = i == last;
        }
    }

    // ------------------------------------------------------------------------
    // Boundaries
    // ------------------------------------------------------------------------

    /// Split the segment containing `source_time`. Both halves keep its speed.
    ///
    /// No-op at the clip edges, within epsilon of an existing boundary, or
    /// inside a trimmed segment.
    pub fn add_boundary(&mut self, source_time: f64) -> bool {
        if !source_time.is_finite()
            || source_time <= self.epsilon
            || source_time >= self.duration - self.epsilon
        {
            log::debug!("[SEGMENTS] Boundary at {:.3}s is at a clip edge", source_time);
            return false;
        }

        if self
            .boundaries()
            .iter()
            .any(|b| (b - source_time).abs() < self.epsilon)
        {
            log::debug!("[SEGMENTS] Boundary at {:.3}s already exists", source_time);
            return false;
        }

        let Some(index) = self.segment_index_at(source_time) else {
            return false;
        };
        if self.segments[index].is_trimmed {
            log::debug!(
                "[SEGMENTS] Boundary at {:.3}s falls inside trimmed segment {}",
                source_time,
                index
            );
            return false;
        }

        let parent = &mut self.segments[index];
        let right = Segment::new(source_time, parent.end, parent.speed);
        parent.end = source_time;
        self.segments.insert(index + 1, right);
        self.reindex();

        log::info!(
            "[SEGMENTS] Split segment {} at {:.3}s ({} segments)",
            index,
            source_time,
            self.segments.len()
        );
        true
    }

    /// Merge the two segments meeting at `source_time`.
    ///
    /// The merged speed follows the timeline's `MergePolicy`. No-op when no
    /// boundary lies within epsilon or either neighbour is trimmed.
    pub fn remove_boundary(&mut self, source_time: f64) -> bool {
        let Some(right) = (1..self.segments.len())
            .find(|&i| (self.segments[i].start - source_time).abs() < self.epsilon)
        else {
            log::debug!("[SEGMENTS] No boundary at {:.3}s", source_time);
            return false;
        };
        let left = right - 1;

        if self.segments[left].is_trimmed || self.segments[right].is_trimmed {
            log::debug!(
                "[SEGMENTS] Boundary at {:.3}s borders a trimmed segment",
                source_time
            );
            return false;
        }

        let removed = self.segments.remove(right);
        let merged = &mut self.segments[left];
        merged.end = removed.end;
        merged.speed = match self.merge_policy {
            MergePolicy::KeepLeft => merged.speed,
            MergePolicy::KeepRight => removed.speed,
        };
        self.reindex();

        log::info!(
            "[SEGMENTS] Merged segments {} and {} ({:?})",
            left,
            right,
            self.merge_policy
        );
        true
    }

    // ------------------------------------------------------------------------
    // Speed
    // ------------------------------------------------------------------------

    /// Set a segment's speed multiplier. Any finite positive value is accepted.
    pub fn set_segment_speed(&mut self, index: usize, speed: f64) -> bool {
        if !speed.is_finite() || speed <= 0.0 {
            log::debug!("[SEGMENTS] Rejecting speed {} for segment {}", speed, index);
            return false;
        }
        let Some(segment) = self.segments.get_mut(index) else {
            return false;
        };
        segment.speed = speed;
        log::debug!("[SEGMENTS] Segment {} speed set to {}x", index, speed);
        true
    }

    // ------------------------------------------------------------------------
    // Trimming
    // ------------------------------------------------------------------------

    /// Whether `index` is an active edge segment that may be trimmed now.
    pub fn can_trim(&self, index: usize) -> bool {
        let Some(segment) = self.segments.get(index) else {
            return false;
        };
        if segment.is_trimmed || self.active_count() <= 1 {
            return false;
        }
        Some(index) == self.first_active_index() || Some(index) == self.last_active_index()
    }

    /// Toggle the trim flag of an edge segment.
    ///
    /// Trimming is allowed on the first or last active segment as long as
    /// another segment stays active. A trimmed segment can be toggled back only
    /// if it is the innermost trim on its side.
    pub fn trim_segment(&mut self, index: usize) -> bool {
        let Some(segment) = self.segments.get(index) else {
            return false;
        };

        if segment.is_trimmed {
            return self.untrim_innermost(index);
        }

        if !self.can_trim(index) {
            log::debug!("[SEGMENTS] Segment {} cannot be trimmed", index);
            return false;
        }

        let side = if Some(index) == self.first_active_index() {
            TrimSide::Start
        } else {
            TrimSide::End
        };
        let segment = &mut self.segments[index];
        segment.is_trimmed = true;
        self.trim_history.push(TrimHistoryEntry {
            side,
            segment_start: segment.start,
        });

        log::info!("[SEGMENTS] Trimmed segment {} from the {:?}", index, side);
        true
    }

    fn untrim_innermost(&mut self, index: usize) -> bool {
        let innermost = match (self.first_active_index(), self.last_active_index()) {
            (Some(first), Some(last)) => index + 1 == first || index == last + 1,
            _ => false,
        };
        if !innermost {
            log::debug!(
                "[SEGMENTS] Segment {} is not the innermost trim on its side",
                index
            );
            return false;
        }

        let start = self.segments[index].start;
        if let Some(pos) = self
            .trim_history
            .iter()
            .rposition(|entry| entry.segment_start == start)
        {
            self.trim_history.remove(pos);
        }
        self.segments[index].is_trimmed = false;
        log::info!("[SEGMENTS] Restored segment {}", index);
        true
    }

    /// Undo the most recent start-side trim.
    pub fn detrim_start(&mut self) -> bool {
        self.detrim(TrimSide::Start)
    }

    /// Undo the most recent end-side trim.
    pub fn detrim_end(&mut self) -> bool {
        self.detrim(TrimSide::End)
    }

    fn detrim(&mut self, side: TrimSide) -> bool {
        let Some(pos) = self.trim_history.iter().rposition(|entry| entry.side == side) else {
            log::debug!("[SEGMENTS] No {:?} trim to undo", side);
            return false;
        };
        let entry = self.trim_history.remove(pos);

        match self
            .segments
            .iter_mut()
            .find(|s| s.start == entry.segment_start)
        {
            Some(segment) => {
                segment.is_trimmed = false;
                log::info!(
                    "[SEGMENTS] De-trimmed segment {} ({:?})",
                    segment.index,
                    side
                );
                true
            }
            None => {
                log::warn!(
                    "[SEGMENTS] Trim history entry at {:.3}s has no segment",
                    entry.segment_start
                );
                false
            }
        }
    }
}
