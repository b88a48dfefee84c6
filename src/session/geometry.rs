//! How crop rects and highlight ellipses respond to drag and resize deltas.
//!
//! Every function here works from the geometry captured at pointer-down plus the
//! total delta since then, so repeated moves never accumulate error.

use std::fmt::Debug;

use crate::geometry::{
    apply_aspect_ratio, constrain_crop, constrain_highlight, round3, AspectRatio, CropRect,
    HighlightEllipse, HighlightHandle, ResizeHandle, MIN_CROP_SIZE,
};

/// Frame bounds and lock settings the session edits against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditContext {
    pub frame_width: f64,
    pub frame_height: f64,
    pub aspect_ratio: AspectRatio,
}

impl EditContext {
    pub fn new(frame_width: f64, frame_height: f64) -> Self {
        Self {
            frame_width,
            frame_height,
            aspect_ratio: AspectRatio::Free,
        }
    }

    pub fn with_aspect_ratio(mut self, aspect_ratio: AspectRatio) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }
}

/// Geometry an `EditSession` can drag and resize.
pub trait EditableGeometry: Clone + PartialEq + Debug {
    /// Handle identifier used while resizing.
    type Handle: Copy + PartialEq + Debug;

    /// Move by a source-pixel delta, then constrain.
    fn translated(&self, dx: f64, dy: f64, ctx: &EditContext) -> Self;

    /// Resize from `handle` by a source-pixel delta, then constrain.
    fn resized(&self, handle: Self::Handle, dx: f64, dy: f64, ctx: &EditContext) -> Self;

    /// Clamp into the frame without moving.
    fn constrained(&self, ctx: &EditContext) -> Self;
}

impl EditableGeometry for CropRect {
    type Handle = ResizeHandle;

    fn translated(&self, dx: f64, dy: f64, ctx: &EditContext) -> Self {
        constrain_crop(&self.offset(dx, dy), ctx.frame_width, ctx.frame_height)
    }

    fn resized(&self, handle: ResizeHandle, dx: f64, dy: f64, ctx: &EditContext) -> Self {
        let mut left = self.x;
        let mut top = self.y;
        let mut right = self.right();
        let mut bottom = self.bottom();

        // Moving edges stop at the frame
        if handle.has_west() {
            left = (left + dx).max(0.0);
        }
        if handle.has_east() {
            right = (right + dx).min(ctx.frame_width);
        }
        if handle.has_north() {
            top = (top + dy).max(0.0);
        }
        if handle.has_south() {
            bottom = (bottom + dy).min(ctx.frame_height);
        }

        let width = (right - left).max(MIN_CROP_SIZE);
        let height = (bottom - top).max(MIN_CROP_SIZE);
        let (mut width, mut height) = apply_aspect_ratio(width, height, ctx.aspect_ratio, handle);

        // The aspect lock can grow the derived side past the frame; shrink both
        // sides together so the ratio holds.
        let max_width = if handle.has_west() {
            self.right()
        } else {
            ctx.frame_width - self.x
        };
        let max_height = if handle.has_north() {
            self.bottom()
        } else {
            ctx.frame_height - self.y
        };
        if width > max_width || height > max_height {
            let scale = (max_width / width).min(max_height / height);
            width = round3(width * scale);
            height = round3(height * scale);
        }

        // Keep the edge opposite the dragged one where it was
        let x = if handle.has_west() {
            self.right() - width
        } else {
            self.x
        };
        let y = if handle.has_north() {
            self.bottom() - height
        } else {
            self.y
        };

        constrain_crop(
            &CropRect::new(x, y, width, height),
            ctx.frame_width,
            ctx.frame_height,
        )
    }

    fn constrained(&self, ctx: &EditContext) -> Self {
        constrain_crop(self, ctx.frame_width, ctx.frame_height)
    }
}

impl EditableGeometry for HighlightEllipse {
    type Handle = HighlightHandle;

    fn translated(&self, dx: f64, dy: f64, ctx: &EditContext) -> Self {
        let moved = HighlightEllipse {
            x: self.x + dx,
            y: self.y + dy,
            ..self.clone()
        };
        constrain_highlight(&moved, ctx.frame_width, ctx.frame_height)
    }

    fn resized(&self, handle: HighlightHandle, dx: f64, dy: f64, ctx: &EditContext) -> Self {
        let mut resized = self.clone();
        match handle {
            HighlightHandle::RadiusX => resized.radius_x += dx,
            HighlightHandle::RadiusY => resized.radius_y += dy,
        }
        constrain_highlight(&resized, ctx.frame_width, ctx.frame_height)
    }

    fn constrained(&self, ctx: &EditContext) -> Self {
        constrain_highlight(self, ctx.frame_width, ctx.frame_height)
    }
}
