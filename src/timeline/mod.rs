//! Segment timeline and the source/visual time mapping built from it.

pub mod layout;
pub mod mapper;
pub mod segments;

pub use layout::{SegmentLayout, TrimIndicator};
pub use mapper::{frame_to_time, time_to_frame, TimeMapper};
pub use segments::{MergePolicy, Segment, SegmentTimeline, TrimHistoryEntry, TrimRange, TrimSide};
