//! Interactive edit state machine.
//!
//! ```text
//! Idle --down(body)----> Dragging --up--> Idle
//! Idle --down(handle)--> Resizing --up--> Idle
//! Idle --down(pan)-----> Panning  --up--> Idle
//! ```
//!
//! Every pointer-down starts from Idle, so the active states are mutually
//! exclusive. Moves recompute from the geometry captured at pointer-down and
//! emit a live value; release commits the last live value once.

use crate::geometry::{Coord, ScreenSpace, Viewport};

use super::capture::{NoCapture, PointerCapture};
use super::geometry::{EditContext, EditableGeometry};

/// Current interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum EditState<G: EditableGeometry> {
    Idle,
    Dragging {
        start_geometry: G,
        start_pointer: Coord<ScreenSpace>,
        live: Option<G>,
    },
    Resizing {
        start_geometry: G,
        start_pointer: Coord<ScreenSpace>,
        handle: G::Handle,
        live: Option<G>,
    },
    Panning {
        start_pointer: Coord<ScreenSpace>,
        start_pan: Coord<ScreenSpace>,
    },
}

impl<G: EditableGeometry> Default for EditState<G> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<G: EditableGeometry> EditState<G> {
    fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Dragging { .. } => "dragging",
            Self::Resizing { .. } => "resizing",
            Self::Panning { .. } => "panning",
        }
    }
}

/// Final value of a drag or resize, to be written at the playhead frame.
#[derive(Debug, Clone, PartialEq)]
pub struct CommittedEdit<G> {
    pub frame: u32,
    pub value: G,
}

/// Drag/resize/pan session for one overlay (crop or highlight).
#[derive(Debug)]
pub struct EditSession<G: EditableGeometry, C: PointerCapture = NoCapture> {
    state: EditState<G>,
    context: EditContext,
    capture: C,
}

impl<G: EditableGeometry> EditSession<G> {
    pub fn new(context: EditContext) -> Self {
        Self::with_capture(context, NoCapture)
    }
}

impl<G: EditableGeometry, C: PointerCapture> EditSession<G, C> {
    pub fn with_capture(context: EditContext, capture: C) -> Self {
        Self {
            state: EditState::Idle,
            context,
            capture,
        }
    }

    pub fn state(&self) -> &EditState<G> {
        &self.state
    }

    pub fn context(&self) -> &EditContext {
        &self.context
    }

    pub fn capture(&self) -> &C {
        &self.capture
    }

    /// Replace frame bounds or aspect lock. Ignored mid-gesture.
    pub fn set_context(&mut self, context: EditContext) -> bool {
        if !self.is_idle() {
            return false;
        }
        self.context = context;
        true
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, EditState::Idle)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, EditState::Dragging { .. })
    }

    pub fn is_resizing(&self) -> bool {
        matches!(self.state, EditState::Resizing { .. })
    }

    pub fn is_panning(&self) -> bool {
        matches!(self.state, EditState::Panning { .. })
    }

    /// Latest uncommitted value, if a move has happened.
    pub fn live_value(&self) -> Option<&G> {
        match &self.state {
            EditState::Dragging { live, .. } | EditState::Resizing { live, .. } => live.as_ref(),
            _ => None,
        }
    }

    fn enter(&mut self, state: EditState<G>) -> bool {
        if !self.is_idle() {
            log::debug!(
                "[SESSION] Ignoring pointer down while {}",
                self.state.name()
            );
            return false;
        }
        log::debug!("[SESSION] idle -> {}", state.name());
        self.state = state;
        self.capture.attach();
        true
    }

    fn leave(&mut self) -> EditState<G> {
        let previous = std::mem::take(&mut self.state);
        if !matches!(previous, EditState::Idle) {
            self.capture.detach();
            log::debug!("[SESSION] {} -> idle", previous.name());
        }
        previous
    }

    /// Pointer down on the body of the overlay.
    pub fn pointer_down_body(&mut self, geometry: G, pointer: Coord<ScreenSpace>) -> bool {
        self.enter(EditState::Dragging {
            start_geometry: geometry,
            start_pointer: pointer,
            live: None,
        })
    }

    /// Pointer down on a resize handle.
    pub fn pointer_down_handle(
        &mut self,
        geometry: G,
        handle: G::Handle,
        pointer: Coord<ScreenSpace>,
    ) -> bool {
        self.enter(EditState::Resizing {
            start_geometry: geometry,
            start_pointer: pointer,
            handle,
            live: None,
        })
    }

    /// Pointer down on the video backdrop to pan the view.
    pub fn pointer_down_pan(&mut self, pointer: Coord<ScreenSpace>, viewport: &Viewport) -> bool {
        self.enter(EditState::Panning {
            start_pointer: pointer,
            start_pan: viewport.pan(),
        })
    }

    /// Pointer moved. Returns the new live geometry while dragging or resizing.
    ///
    /// Panning writes straight into `viewport` and yields no geometry.
    pub fn pointer_move(
        &mut self,
        pointer: Coord<ScreenSpace>,
        viewport: &mut Viewport,
    ) -> Option<&G> {
        let context = self.context;
        match &mut self.state {
            EditState::Idle => None,
            EditState::Dragging {
                start_geometry,
                start_pointer,
                live,
            } => {
                let delta = pointer - *start_pointer;
                let (dx, dy) = viewport.screen_delta_to_video(delta.x, delta.y);
                *live = Some(start_geometry.translated(dx, dy, &context));
                live.as_ref()
            }
            EditState::Resizing {
                start_geometry,
                start_pointer,
                handle,
                live,
            } => {
                let delta = pointer - *start_pointer;
                let (dx, dy) = viewport.screen_delta_to_video(delta.x, delta.y);
                *live = Some(start_geometry.resized(*handle, dx, dy, &context));
                live.as_ref()
            }
            EditState::Panning {
                start_pointer,
                start_pan,
            } => {
                viewport.set_pan(*start_pan + (pointer - *start_pointer));
                None
            }
        }
    }

    /// Pointer released. Commits the last live value at `playhead_frame`.
    ///
    /// Returns `None` when idle, when panning, or when no move happened.
    pub fn pointer_up(&mut self, playhead_frame: u32) -> Option<CommittedEdit<G>> {
        match self.leave() {
            EditState::Dragging { live, .. } | EditState::Resizing { live, .. } => {
                let value = live?;
                log::debug!("[SESSION] Committing edit at frame {}", playhead_frame);
                Some(CommittedEdit {
                    frame: playhead_frame,
                    value,
                })
            }
            _ => None,
        }
    }

    /// Pointer capture lost. Drops any live value without committing.
    pub fn cancel(&mut self) {
        if !self.is_idle() {
            log::debug!("[SESSION] Gesture cancelled");
        }
        self.leave();
    }
}
