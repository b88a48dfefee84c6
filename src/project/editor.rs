//! Per-clip editing state.
//!
//! `ClipEditor` owns both keyframe tracks, the segment timeline and the time
//! mapper derived from it. Timeline edits rebuild the mapper before returning,
//! so callers never observe a timeline and mapper that disagree.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{ClipForgeError, ClipForgeResult};
use crate::geometry::{
    constrain_crop, constrain_highlight, AspectRatio, CropRect, HighlightEllipse,
};
use crate::keyframes::{KeyframeClipboard, KeyframeTrack};
use crate::session::{CommittedEdit, EditContext, EditableGeometry};
use crate::timeline::{frame_to_time, time_to_frame, SegmentTimeline, TimeMapper};

use super::export::ExportPayload;

/// Properties of the loaded clip, as reported by the upload service.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../web/types/generated/")]
pub struct VideoMetadata {
    /// Frame width in pixels.
    pub width: f64,
    /// Frame height in pixels.
    pub height: f64,
    /// Duration in seconds.
    pub duration: f64,
}

impl VideoMetadata {
    pub fn new(width: f64, height: f64, duration: f64) -> Self {
        Self {
            width,
            height,
            duration,
        }
    }

    pub fn validate(&self) -> ClipForgeResult<()> {
        let fields = [
            ("width", self.width),
            ("height", self.height),
            ("duration", self.duration),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(ClipForgeError::InvalidMetadata(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

/// Editing state for one clip.
#[derive(Debug, Clone)]
pub struct ClipEditor {
    id: String,
    metadata: VideoMetadata,
    fps: u32,
    aspect_ratio: AspectRatio,
    crop: KeyframeTrack<CropRect>,
    highlight: KeyframeTrack<HighlightEllipse>,
    highlight_enabled: bool,
    highlight_duration: f64,
    timeline: SegmentTimeline,
    mapper: TimeMapper,
    clipboard: KeyframeClipboard,
}

impl ClipEditor {
    /// Load a clip: full-frame crop, centred highlight, one full-length segment.
    pub fn new(metadata: VideoMetadata, fps: u32) -> ClipForgeResult<Self> {
        metadata.validate()?;
        if fps == 0 {
            return Err(ClipForgeError::InvalidMetadata(
                "framerate must be a positive integer".to_string(),
            ));
        }

        let end_frame = time_to_frame(metadata.duration, fps).max(1);
        let timeline = SegmentTimeline::new(metadata.duration)?;
        let mapper = TimeMapper::new(&timeline);
        let id = Uuid::new_v4().to_string();

        log::info!(
            "[PROJECT] Loaded clip {} ({}x{}, {:.3}s @ {}fps, {} frames)",
            id,
            metadata.width,
            metadata.height,
            metadata.duration,
            fps,
            end_frame
        );

        // Small frames push the default highlight below its minimum radii
        let ctx = EditContext::new(metadata.width, metadata.height);
        let initial_crop =
            CropRect::full_frame(metadata.width, metadata.height).constrained(&ctx);
        let initial_highlight =
            HighlightEllipse::centered_in(metadata.width, metadata.height).constrained(&ctx);

        Ok(Self {
            id,
            metadata,
            fps,
            aspect_ratio: AspectRatio::Free,
            crop: KeyframeTrack::new(initial_crop, end_frame),
            highlight: KeyframeTrack::new(initial_highlight, end_frame),
            highlight_enabled: false,
            highlight_duration: metadata.duration,
            timeline,
            mapper,
            clipboard: KeyframeClipboard::new(),
        })
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn metadata(&self) -> &VideoMetadata {
        &self.metadata
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Index of the final frame (also the end keyframe's frame).
    pub fn end_frame(&self) -> u32 {
        self.crop.end_frame()
    }

    pub fn aspect_ratio(&self) -> AspectRatio {
        self.aspect_ratio
    }

    pub fn crop_track(&self) -> &KeyframeTrack<CropRect> {
        &self.crop
    }

    pub fn highlight_track(&self) -> &KeyframeTrack<HighlightEllipse> {
        &self.highlight
    }

    pub fn timeline(&self) -> &SegmentTimeline {
        &self.timeline
    }

    pub fn mapper(&self) -> &TimeMapper {
        &self.mapper
    }

    pub fn clipboard(&self) -> &KeyframeClipboard {
        &self.clipboard
    }

    pub fn highlight_enabled(&self) -> bool {
        self.highlight_enabled
    }

    pub fn highlight_duration(&self) -> f64 {
        self.highlight_duration
    }

    /// Bounds and lock settings for a new `EditSession`.
    pub fn edit_context(&self) -> EditContext {
        EditContext::new(self.metadata.width, self.metadata.height)
            .with_aspect_ratio(self.aspect_ratio)
    }

    // ------------------------------------------------------------------------
    // Crop
    // ------------------------------------------------------------------------

    /// Constrain `rect` to the frame and store it at `frame`.
    pub fn set_crop_keyframe(&mut self, frame: u32, rect: CropRect) -> bool {
        let rect = constrain_crop(&rect, self.metadata.width, self.metadata.height);
        self.crop.add_keyframe(frame, rect)
    }

    pub fn delete_crop_keyframe(&mut self, frame: u32) -> bool {
        self.crop.delete_keyframe(frame)
    }

    pub fn copy_crop_keyframe(&mut self, frame: u32) -> bool {
        self.clipboard.copy_from(&self.crop, frame)
    }

    pub fn paste_crop_keyframe(&mut self, frame: u32) -> bool {
        self.clipboard.paste_into(&mut self.crop, frame)
    }

    /// Crop shown at `frame`, interpolated between keyframes.
    pub fn crop_at(&self, frame: u32) -> CropRect {
        self.crop.interpolate_at(frame)
    }

    /// Write a finished crop gesture.
    pub fn commit_crop(&mut self, edit: CommittedEdit<CropRect>) -> bool {
        self.set_crop_keyframe(edit.frame, edit.value)
    }

    /// Change the crop lock.
    ///
    /// Picking a fixed ratio also writes the largest centred crop of that ratio
    /// at `frame`.
    pub fn set_aspect_ratio(&mut self, ratio: AspectRatio, frame: u32) -> bool {
        if frame > self.end_frame() {
            log::debug!("[PROJECT] Aspect ratio frame {} is past the clip end", frame);
            return false;
        }
        self.aspect_ratio = ratio;
        log::debug!("[PROJECT] Aspect ratio set to {}", ratio);
        if ratio.is_free() {
            return true;
        }
        let fitted = ratio.fit_crop(self.metadata.width, self.metadata.height);
        self.set_crop_keyframe(frame, fitted)
    }

    // ------------------------------------------------------------------------
    // Highlight
    // ------------------------------------------------------------------------

    pub fn set_highlight_keyframe(&mut self, frame: u32, ellipse: HighlightEllipse) -> bool {
        let ellipse = constrain_highlight(&ellipse, self.metadata.width, self.metadata.height);
        self.highlight.add_keyframe(frame, ellipse)
    }

    pub fn delete_highlight_keyframe(&mut self, frame: u32) -> bool {
        self.highlight.delete_keyframe(frame)
    }

    pub fn copy_highlight_keyframe(&mut self, frame: u32) -> bool {
        self.clipboard.copy_from(&self.highlight, frame)
    }

    pub fn paste_highlight_keyframe(&mut self, frame: u32) -> bool {
        self.clipboard.paste_into(&mut self.highlight, frame)
    }

    pub fn highlight_at(&self, frame: u32) -> HighlightEllipse {
        self.highlight.interpolate_at(frame)
    }

    /// Write a finished highlight gesture.
    pub fn commit_highlight(&mut self, edit: CommittedEdit<HighlightEllipse>) -> bool {
        self.set_highlight_keyframe(edit.frame, edit.value)
    }

    pub fn set_highlight_enabled(&mut self, enabled: bool) {
        self.highlight_enabled = enabled;
    }

    /// Seconds the highlight stays visible, clamped to `(0, clip duration]`.
    pub fn set_highlight_duration(&mut self, seconds: f64) -> bool {
        if !seconds.is_finite() || seconds <= 0.0 {
            return false;
        }
        self.highlight_duration = seconds.min(self.metadata.duration);
        true
    }

    // ------------------------------------------------------------------------
    // Timeline
    // ------------------------------------------------------------------------

    /// Apply one timeline edit and rebuild the mapper if it changed anything.
    fn edit_timeline(&mut self, edit: impl FnOnce(&mut SegmentTimeline) -> bool) -> bool {
        let changed = edit(&mut self.timeline);
        if changed {
            self.mapper = TimeMapper::new(&self.timeline);
        }
        changed
    }

    pub fn add_boundary(&mut self, source_time: f64) -> bool {
        self.edit_timeline(|t| t.add_boundary(source_time))
    }

    pub fn remove_boundary(&mut self, source_time: f64) -> bool {
        self.edit_timeline(|t| t.remove_boundary(source_time))
    }

    pub fn set_segment_speed(&mut self, index: usize, speed: f64) -> bool {
        self.edit_timeline(|t| t.set_segment_speed(index, speed))
    }

    pub fn trim_segment(&mut self, index: usize) -> bool {
        self.edit_timeline(|t| t.trim_segment(index))
    }

    pub fn detrim_start(&mut self) -> bool {
        self.edit_timeline(SegmentTimeline::detrim_start)
    }

    pub fn detrim_end(&mut self) -> bool {
        self.edit_timeline(SegmentTimeline::detrim_end)
    }

    pub fn visual_duration(&self) -> f64 {
        self.mapper.total_visual_duration()
    }

    pub fn source_to_visual_time(&self, source_time: f64) -> f64 {
        self.mapper.source_to_visual_time(source_time)
    }

    pub fn visual_to_source_time(&self, visual_time: f64) -> f64 {
        self.mapper.visual_to_source_time(visual_time)
    }

    /// Visual time of a source frame (playhead position on the edited timeline).
    pub fn frame_to_visual_time(&self, frame: u32) -> f64 {
        self.mapper.source_frame_to_visual_time(frame, self.fps)
    }

    /// Source frame under a visual-time position, capped at the last frame.
    pub fn visual_time_to_frame(&self, visual_time: f64) -> u32 {
        self.mapper
            .visual_time_to_source_frame(visual_time, self.fps)
            .min(self.end_frame())
    }

    pub fn frame_time(&self, frame: u32) -> f64 {
        frame_to_time(frame, self.fps)
    }

    // ------------------------------------------------------------------------
    // Export
    // ------------------------------------------------------------------------

    pub fn export_payload(&self) -> ExportPayload {
        let payload = ExportPayload::build(
            &self.crop,
            &self.highlight,
            self.highlight_enabled,
            self.highlight_duration,
            &self.timeline,
        );
        log::info!(
            "[EXPORT] Clip {}: {} crop keyframes, {} highlight keyframes, {} segments",
            self.id,
            payload.crop_keyframes.len(),
            payload.highlight.keyframes.len(),
            payload.segment_data.segments.len()
        );
        payload
    }

    pub fn export_json(&self) -> ClipForgeResult<String> {
        self.export_payload().to_json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Coord, ResizeHandle, Viewport};
    use crate::session::CropSession;

    fn editor() -> ClipEditor {
        ClipEditor::new(VideoMetadata::new(1920.0, 1080.0, 10.0), 30).unwrap()
    }

    #[test]
    fn test_rejects_bad_metadata() {
        let err = ClipEditor::new(VideoMetadata::new(0.0, 1080.0, 10.0), 30).unwrap_err();
        assert!(matches!(err, ClipForgeError::InvalidMetadata(_)));
        assert!(ClipEditor::new(VideoMetadata::new(1920.0, 1080.0, f64::NAN), 30).is_err());
        assert!(ClipEditor::new(VideoMetadata::new(1920.0, 1080.0, 10.0), 0).is_err());
    }

    #[test]
    fn test_initial_state() {
        let e = editor();
        assert_eq!(e.end_frame(), 300);
        assert_eq!(e.crop_track().len(), 2);
        assert_eq!(e.crop_at(150), CropRect::new(0.0, 0.0, 1920.0, 1080.0));
        assert_eq!(e.timeline().segments().len(), 1);
        assert_eq!(e.visual_duration(), 10.0);
        assert!(!e.highlight_enabled());
        assert!(Uuid::parse_str(e.id()).is_ok());
    }

    #[test]
    fn test_small_frame_initial_highlight_meets_minimums() {
        let e = ClipEditor::new(VideoMetadata::new(100.0, 60.0, 2.0), 30).unwrap();
        let start = e.highlight_track().start_value();
        assert_eq!((start.radius_x, start.radius_y), (10.0, 15.0));
        assert_eq!(e.highlight_track().end_value(), start);

        let json = e.export_json().unwrap();
        assert!(json.contains("\"radiusX\":10.0"));
        assert!(json.contains("\"radiusY\":15.0"));
    }

    #[test]
    fn test_aspect_ratio_past_clip_end_is_refused() {
        let mut e = editor();
        assert!(!e.set_aspect_ratio(AspectRatio::fixed(1, 1), 9999));
        assert_eq!(e.aspect_ratio(), AspectRatio::Free);
        assert_eq!(e.crop_track().len(), 2);
    }

    #[test]
    fn test_speed_scenario_updates_mapper() {
        let mut e = editor();
        assert!(e.add_boundary(5.0));
        assert!(e.set_segment_speed(0, 0.5));
        assert_eq!(e.visual_duration(), 15.0);
        assert_eq!(e.source_to_visual_time(5.0), 10.0);
        assert_eq!(e.frame_to_visual_time(150), 10.0);
        assert_eq!(e.visual_time_to_frame(10.0), 150);
    }

    #[test]
    fn test_refused_edit_leaves_mapper() {
        let mut e = editor();
        let before = e.mapper().clone();
        assert!(!e.trim_segment(0));
        assert!(!e.detrim_end());
        assert_eq!(e.mapper(), &before);
    }

    #[test]
    fn test_trim_and_detrim_through_editor() {
        let mut e = editor();
        e.add_boundary(2.0);
        assert!(e.trim_segment(0));
        assert_eq!(e.visual_duration(), 8.0);
        assert_eq!(e.visual_to_source_time(0.0), 2.0);
        assert!(e.detrim_start());
        assert_eq!(e.visual_duration(), 10.0);
    }

    #[test]
    fn test_crop_keyframes_are_constrained() {
        let mut e = editor();
        assert!(e.set_crop_keyframe(60, CropRect::new(-50.0, 0.0, 5000.0, 5.0)));
        assert_eq!(
            e.crop_track().get(60),
            Some(&CropRect::new(0.0, 0.0, 1920.0, 10.0))
        );
        assert!(!e.delete_crop_keyframe(0));
        assert!(e.delete_crop_keyframe(60));
    }

    #[test]
    fn test_copy_paste_between_frames() {
        let mut e = editor();
        e.set_highlight_keyframe(30, HighlightEllipse::new(300.0, 300.0, 50.0, 60.0));
        assert!(e.copy_highlight_keyframe(30));
        assert!(e.paste_highlight_keyframe(90));
        assert!(!e.paste_crop_keyframe(90));
        assert_eq!(e.highlight_at(90).radius_x, 50.0);
    }

    #[test]
    fn test_aspect_ratio_fits_crop() {
        let mut e = editor();
        assert!(e.set_aspect_ratio(AspectRatio::fixed(1, 1), 0));
        assert_eq!(e.crop_at(0), CropRect::new(420.0, 0.0, 1080.0, 1080.0));
        // Start edit moves the implicit end too
        assert_eq!(e.crop_at(300), CropRect::new(420.0, 0.0, 1080.0, 1080.0));
        assert_eq!(e.edit_context().aspect_ratio, AspectRatio::fixed(1, 1));
    }

    #[test]
    fn test_session_commit_round_trip() {
        let mut e = editor();
        let mut vp = Viewport::new(1920.0, 1080.0, 1920.0, 1080.0);
        let mut session = CropSession::new(e.edit_context());

        let start = e.crop_at(120);
        session.pointer_down_handle(start, ResizeHandle::Se, Coord::new(1920.0, 1080.0));
        session.pointer_move(Coord::new(1420.0, 880.0), &mut vp);
        let commit = session.pointer_up(120).unwrap();

        assert!(e.commit_crop(commit));
        assert_eq!(
            e.crop_track().get(120),
            Some(&CropRect::new(0.0, 0.0, 1420.0, 880.0))
        );
    }

    #[test]
    fn test_highlight_duration_clamped() {
        let mut e = editor();
        assert!(e.set_highlight_duration(30.0));
        assert_eq!(e.highlight_duration(), 10.0);
        assert!(!e.set_highlight_duration(0.0));
    }

    #[test]
    fn test_export_json_contains_timeline() {
        let mut e = editor();
        e.set_highlight_enabled(true);
        e.add_boundary(5.0);
        e.set_segment_speed(1, 2.0);
        let json = e.export_json().unwrap();
        assert!(json.contains("\"speed\":2.0"));
        assert!(json.contains("\"enabled\":true"));
    }
}
