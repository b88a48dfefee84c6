//! Type-safe coordinates and the video <-> screen viewport transform.
//!
//! ```text
//! VideoSpace (source pixels) <-> ScreenSpace (container pixels)
//! ```
//!
//! Each coordinate space is a phantom type so a screen-space pointer position
//! can never be fed into crop math without going through a `Viewport`.

use std::marker::PhantomData;
use std::ops::{Add, Div, Mul, Sub};

use crate::config::EDITOR_CONFIG;

use super::types::CropRect;

/// Source-video pixel coordinates. `(0, 0)` is the top-left of the frame.
#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct VideoSpace;

/// Pixel coordinates inside the preview container (after fit, zoom and pan).
#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct ScreenSpace;

/// A 2D coordinate tagged with its space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Coord<TSpace> {
    pub x: f64,
    pub y: f64,
    _space: PhantomData<TSpace>,
}

impl<TSpace: Default> Coord<TSpace> {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            _space: PhantomData,
        }
    }

    pub fn as_tuple(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    pub fn distance(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl<T: Default> Add for Coord<T> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl<T: Default> Sub for Coord<T> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl<T: Default> Mul<f64> for Coord<T> {
    type Output = Self;
    fn mul(self, scalar: f64) -> Self {
        Self::new(self.x * scalar, self.y * scalar)
    }
}

impl<T: Default> Div<f64> for Coord<T> {
    type Output = Self;
    fn div(self, scalar: f64) -> Self {
        Self::new(self.x / scalar, self.y / scalar)
    }
}

/// Size in a specific coordinate space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size<TSpace> {
    pub width: f64,
    pub height: f64,
    _space: PhantomData<TSpace>,
}

impl<TSpace: Default> Size<TSpace> {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            _space: PhantomData,
        }
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }
}

/// A rectangular region in a specific coordinate space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect<TSpace> {
    pub origin: Coord<TSpace>,
    pub size: Size<TSpace>,
}

impl<TSpace: Default + Copy> Rect<TSpace> {
    pub fn new(origin: Coord<TSpace>, size: Size<TSpace>) -> Self {
        Self { origin, size }
    }

    pub fn from_coords(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(Coord::new(x, y), Size::new(width, height))
    }

    pub fn bottom_right(&self) -> Coord<TSpace> {
        Coord::new(
            self.origin.x + self.size.width,
            self.origin.y + self.size.height,
        )
    }

    pub fn contains(&self, point: Coord<TSpace>) -> bool {
        point.x >= self.origin.x
            && point.x <= self.origin.x + self.size.width
            && point.y >= self.origin.y
            && point.y <= self.origin.y + self.size.height
    }
}

// ============================================================================
// Viewport
// ============================================================================

/// Affine transform between the source video and the preview container.
///
/// The video is letterboxed (fit, centred) into the container, then scaled by
/// `zoom` and shifted by `pan`. Crop and highlight editors share one instance
/// so the same math serves both overlays.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    video_size: Size<VideoSpace>,
    container_size: Size<ScreenSpace>,
    zoom: f64,
    pan: Coord<ScreenSpace>,
    min_zoom: f64,
    max_zoom: f64,
    zoom_step: f64,
}

impl Viewport {
    pub fn new(video_width: f64, video_height: f64, container_width: f64, container_height: f64) -> Self {
        let config = EDITOR_CONFIG.read();
        Self {
            video_size: Size::new(video_width, video_height),
            container_size: Size::new(container_width, container_height),
            zoom: 1.0,
            pan: Coord::new(0.0, 0.0),
            min_zoom: config.min_zoom,
            max_zoom: config.max_zoom,
            zoom_step: config.zoom_step,
        }
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn pan(&self) -> Coord<ScreenSpace> {
        self.pan
    }

    pub fn video_size(&self) -> Size<VideoSpace> {
        self.video_size
    }

    /// Scale that fits the whole video inside the container at zoom 1.
    pub fn fit_scale(&self) -> f64 {
        let sx = self.container_size.width / self.video_size.width;
        let sy = self.container_size.height / self.video_size.height;
        sx.min(sy)
    }

    /// Screen pixels per source pixel.
    pub fn scale(&self) -> f64 {
        self.fit_scale() * self.zoom
    }

    /// Screen position of the video's top-left corner at the given scale, before pan.
    fn centered_origin(&self, scale: f64) -> Coord<ScreenSpace> {
        Coord::new(
            (self.container_size.width - self.video_size.width * scale) / 2.0,
            (self.container_size.height - self.video_size.height * scale) / 2.0,
        )
    }

    fn origin(&self) -> Coord<ScreenSpace> {
        self.centered_origin(self.scale()) + self.pan
    }

    pub fn video_to_screen(&self, point: Coord<VideoSpace>) -> Coord<ScreenSpace> {
        let scale = self.scale();
        let origin = self.origin();
        Coord::new(origin.x + point.x * scale, origin.y + point.y * scale)
    }

    pub fn screen_to_video(&self, point: Coord<ScreenSpace>) -> Coord<VideoSpace> {
        let scale = self.scale();
        let origin = self.origin();
        Coord::new((point.x - origin.x) / scale, (point.y - origin.y) / scale)
    }

    /// Convert a pointer delta to a source-pixel delta (pan is irrelevant here).
    pub fn screen_delta_to_video(&self, dx: f64, dy: f64) -> (f64, f64) {
        let scale = self.scale();
        (dx / scale, dy / scale)
    }

    /// Screen-space rectangle for drawing a crop overlay.
    pub fn crop_to_screen(&self, crop: &CropRect) -> Rect<ScreenSpace> {
        let scale = self.scale();
        let top_left = self.video_to_screen(Coord::new(crop.x, crop.y));
        Rect::new(top_left, Size::new(crop.width * scale, crop.height * scale))
    }

    /// Set zoom so that the video point under `anchor` stays under `anchor`.
    pub fn zoom_at(&mut self, anchor: Coord<ScreenSpace>, factor: f64) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }

        let anchored = self.screen_to_video(anchor);
        self.zoom = (self.zoom * factor).clamp(self.min_zoom, self.max_zoom);

        let scale = self.scale();
        let origin = self.centered_origin(scale);
        self.pan = Coord::new(
            anchor.x - origin.x - anchored.x * scale,
            anchor.y - origin.y - anchored.y * scale,
        );
    }

    /// Zoom by whole wheel notches (positive zooms in).
    pub fn wheel(&mut self, anchor: Coord<ScreenSpace>, notches: i32) {
        self.zoom_at(anchor, self.zoom_step.powi(notches));
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan = self.pan + Coord::new(dx, dy);
    }

    pub fn set_pan(&mut self, pan: Coord<ScreenSpace>) {
        self.pan = pan;
    }

    /// Back to fit-to-container with no pan.
    pub fn reset(&mut self) {
        self.zoom = 1.0;
        self.pan = Coord::new(0.0, 0.0);
    }

    pub fn set_container_size(&mut self, width: f64, height: f64) {
        self.container_size = Size::new(width, height);
    }
}
