//! Global pointer listener seam.
//!
//! While a session is dragging, resizing or panning it needs pointer events even
//! when the pointer leaves the overlay. The host registers its global listeners
//! in `attach` and removes them in `detach`; the session guarantees the two calls
//! pair up one-to-one.

pub trait PointerCapture {
    /// Called when the session leaves Idle.
    fn attach(&mut self);

    /// Called when the session returns to Idle.
    fn detach(&mut self);
}

/// Capture for hosts that route pointer events themselves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoCapture;

impl PointerCapture for NoCapture {
    fn attach(&mut self) {}

    fn detach(&mut self) {}
}
