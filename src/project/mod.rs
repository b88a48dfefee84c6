//! Per-clip editing facade and the export payload it produces.

pub mod editor;
pub mod export;

pub use editor::{ClipEditor, VideoMetadata};
pub use export::{
    CropKeyframePayload, ExportPayload, HighlightKeyframePayload, HighlightPayload, SegmentData,
    SegmentPayload,
};
