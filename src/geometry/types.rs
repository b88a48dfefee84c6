//! Geometry value types for crop and highlight keyframes.
//!
//! All values are in source-pixel units of the original video frame (not
//! normalized). Committed values are rounded to three decimals so they survive
//! a JSON round-trip with the export backend byte-for-byte.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ClipForgeError;

// ============================================================================
// Constants
// ============================================================================

/// Minimum crop width/height in source pixels.
pub const MIN_CROP_SIZE: f64 = 10.0;

/// Minimum horizontal highlight radius in source pixels.
pub const MIN_HIGHLIGHT_RADIUS_X: f64 = 10.0;

/// Minimum vertical highlight radius in source pixels.
pub const MIN_HIGHLIGHT_RADIUS_Y: f64 = 15.0;

/// Decimal places kept on every committed value.
pub const ROUND_DECIMALS: i32 = 3;

/// Round to the three decimal places shared with the export backend.
pub fn round3(value: f64) -> f64 {
    let factor = 10f64.powi(ROUND_DECIMALS);
    let rounded = (value * factor).round() / factor;
    // Avoid emitting "-0.0" into payloads.
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Clamp without panicking when `lo > hi` (`hi` wins, matching min-then-max order).
pub(crate) fn clamp_range(value: f64, lo: f64, hi: f64) -> f64 {
    value.max(lo).min(hi)
}

// ============================================================================
// Crop
// ============================================================================

/// Crop rectangle in source pixels, top-left anchored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../web/types/generated/")]
pub struct CropRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CropRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Crop covering the whole frame.
    pub fn full_frame(frame_width: f64, frame_height: f64) -> Self {
        Self::new(0.0, 0.0, frame_width, frame_height)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }

    /// Offset the rectangle by dx, dy.
    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    pub fn rounded(&self) -> Self {
        Self::new(
            round3(self.x),
            round3(self.y),
            round3(self.width),
            round3(self.height),
        )
    }
}

// ============================================================================
// Highlight
// ============================================================================

/// Center-based highlight ellipse in source pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../web/types/generated/")]
pub struct HighlightEllipse {
    pub x: f64,
    pub y: f64,
    pub radius_x: f64,
    pub radius_y: f64,
    /// Fill opacity (0.0 - 1.0).
    pub opacity: f64,
    /// CSS color string (e.g. "#ffff00").
    pub color: String,
}

impl HighlightEllipse {
    pub const DEFAULT_OPACITY: f64 = 0.15;
    pub const DEFAULT_COLOR: &'static str = "#FFFF00";

    pub fn new(x: f64, y: f64, radius_x: f64, radius_y: f64) -> Self {
        Self {
            x,
            y,
            radius_x,
            radius_y,
            opacity: Self::DEFAULT_OPACITY,
            color: Self::DEFAULT_COLOR.to_string(),
        }
    }

    /// Default highlight for a freshly loaded clip: centred, a sixth of the
    /// frame wide and a third tall.
    pub fn centered_in(frame_width: f64, frame_height: f64) -> Self {
        Self::new(
            frame_width / 2.0,
            frame_height / 2.0,
            frame_width / 12.0,
            frame_height / 6.0,
        )
    }

    pub fn with_style(mut self, opacity: f64, color: impl Into<String>) -> Self {
        self.opacity = opacity;
        self.color = color.into();
        self
    }

    pub fn rounded(&self) -> Self {
        Self {
            x: round3(self.x),
            y: round3(self.y),
            radius_x: round3(self.radius_x),
            radius_y: round3(self.radius_y),
            opacity: round3(self.opacity),
            color: self.color.clone(),
        }
    }
}

// ============================================================================
// Resize handles
// ============================================================================

/// The eight compass handles of a crop rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "../web/types/generated/")]
pub enum ResizeHandle {
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
    Nw,
}

impl ResizeHandle {
    pub const ALL: [ResizeHandle; 8] = [
        ResizeHandle::N,
        ResizeHandle::Ne,
        ResizeHandle::E,
        ResizeHandle::Se,
        ResizeHandle::S,
        ResizeHandle::Sw,
        ResizeHandle::W,
        ResizeHandle::Nw,
    ];

    /// East or west edge only.
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Self::E | Self::W)
    }

    /// North or south edge only.
    pub fn is_vertical(&self) -> bool {
        matches!(self, Self::N | Self::S)
    }

    pub fn is_corner(&self) -> bool {
        matches!(self, Self::Ne | Self::Se | Self::Sw | Self::Nw)
    }

    /// Moves the top edge.
    pub fn has_north(&self) -> bool {
        matches!(self, Self::N | Self::Ne | Self::Nw)
    }

    /// Moves the bottom edge.
    pub fn has_south(&self) -> bool {
        matches!(self, Self::S | Self::Se | Self::Sw)
    }

    /// Moves the right edge.
    pub fn has_east(&self) -> bool {
        matches!(self, Self::E | Self::Ne | Self::Se)
    }

    /// Moves the left edge.
    pub fn has_west(&self) -> bool {
        matches!(self, Self::W | Self::Nw | Self::Sw)
    }
}

/// The two axis handles of a highlight ellipse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../web/types/generated/")]
pub enum HighlightHandle {
    /// Right-hand handle, adjusts `radius_x`.
    RadiusX,
    /// Bottom handle, adjusts `radius_y`.
    RadiusY,
}

// ============================================================================
// Aspect ratio
// ============================================================================

/// Crop aspect ratio lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AspectRatio {
    #[default]
    Free,
    Fixed { w: u32, h: u32 },
}

impl AspectRatio {
    pub fn fixed(w: u32, h: u32) -> Self {
        Self::Fixed { w, h }
    }

    /// Target width/height ratio, `None` when free.
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Free => None,
            Self::Fixed { w, h } => Some(*w as f64 / *h as f64),
        }
    }

    pub fn is_free(&self) -> bool {
        matches!(self, Self::Free)
    }

    /// Lenient parse: anything malformed unlocks the ratio.
    pub fn parse_or_free(s: &str) -> Self {
        s.parse().unwrap_or_else(|e| {
            log::warn!("[GEOMETRY] {}, falling back to free aspect", e);
            Self::Free
        })
    }

    /// Largest crop of this ratio centred in the frame (whole frame when free).
    pub fn fit_crop(&self, frame_width: f64, frame_height: f64) -> CropRect {
        let Some(ratio) = self.value() else {
            return CropRect::full_frame(frame_width, frame_height).rounded();
        };

        let (width, height) = if frame_width / frame_height > ratio {
            (frame_height * ratio, frame_height)
        } else {
            (frame_width, frame_width / ratio)
        };

        CropRect::new(
            (frame_width - width) / 2.0,
            (frame_height - height) / 2.0,
            width,
            height,
        )
        .rounded()
    }
}

impl FromStr for AspectRatio {
    type Err = ClipForgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("free") {
            return Ok(Self::Free);
        }

        let invalid = || ClipForgeError::InvalidAspectRatio(s.to_string());
        let (w, h) = trimmed.split_once(':').ok_or_else(invalid)?;
        let w: u32 = w.trim().parse().map_err(|_| invalid())?;
        let h: u32 = h.trim().parse().map_err(|_| invalid())?;
        if w == 0 || h == 0 {
            return Err(invalid());
        }
        Ok(Self::Fixed { w, h })
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Free => write!(f, "free"),
            Self::Fixed { w, h } => write!(f, "{}:{}", w, h),
        }
    }
}
