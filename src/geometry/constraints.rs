//! Constraint functions for crop rectangles and highlight ellipses.
//!
//! These never fail: out-of-range input is clamped. Size is always clamped
//! before position so an oversized rect shrinks first and the position clamp
//! then has a valid range to work in.

use super::types::{
    clamp_range, round3, AspectRatio, CropRect, HighlightEllipse, ResizeHandle, MIN_CROP_SIZE,
    MIN_HIGHLIGHT_RADIUS_X, MIN_HIGHLIGHT_RADIUS_Y,
};

/// Clamp a crop rect into the frame.
///
/// Width/height go to `[10, frame]`, then x/y to `[0, frame - size]`, with all
/// four fields rounded to 3 decimals.
pub fn constrain_crop(rect: &CropRect, frame_width: f64, frame_height: f64) -> CropRect {
    let width = round3(clamp_range(rect.width, MIN_CROP_SIZE, frame_width));
    let height = round3(clamp_range(rect.height, MIN_CROP_SIZE, frame_height));

    let x = round3(clamp_range(rect.x, 0.0, (frame_width - width).max(0.0)));
    let y = round3(clamp_range(rect.y, 0.0, (frame_height - height).max(0.0)));

    CropRect::new(x, y, width, height)
}

/// Clamp a highlight ellipse into the frame.
///
/// Radii are raised to their minimums (10 / 15), capped at half the frame
/// dimension, and the center is then kept far enough from every edge that the
/// ellipse never leaves the frame. Opacity and color pass through.
pub fn constrain_highlight(
    ellipse: &HighlightEllipse,
    frame_width: f64,
    frame_height: f64,
) -> HighlightEllipse {
    let radius_x = round3(
        ellipse
            .radius_x
            .max(MIN_HIGHLIGHT_RADIUS_X)
            .min(frame_width / 2.0),
    );
    let radius_y = round3(
        ellipse
            .radius_y
            .max(MIN_HIGHLIGHT_RADIUS_Y)
            .min(frame_height / 2.0),
    );

    let x = round3(clamp_range(ellipse.x, radius_x, frame_width - radius_x));
    let y = round3(clamp_range(ellipse.y, radius_y, frame_height - radius_y));

    HighlightEllipse {
        x,
        y,
        radius_x,
        radius_y,
        opacity: ellipse.opacity,
        color: ellipse.color.clone(),
    }
}

/// Lock a width/height pair to an aspect ratio for the given handle.
///
/// - East/west handles keep the width and derive the height.
/// - North/south handles keep the height and derive the width.
/// - Corner handles shrink whichever side overshoots the target ratio: if
///   `width / height > target` the width is recomputed from the height,
///   otherwise the height is recomputed from the width.
pub fn apply_aspect_ratio(
    width: f64,
    height: f64,
    ratio: AspectRatio,
    handle: ResizeHandle,
) -> (f64, f64) {
    let Some(target) = ratio.value() else {
        return (round3(width), round3(height));
    };

    let (width, height) = if handle.is_horizontal() {
        (width, width / target)
    } else if handle.is_vertical() {
        (height * target, height)
    } else {
        let current = width / height;
        if current > target {
            (height * target, height)
        } else {
            (width, width / target)
        }
    };

    (round3(width), round3(height))
}
