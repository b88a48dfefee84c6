//! Unit tests for the edit session module.
//!
//! Tests are organized by component:
//! - Crop drag/resize geometry
//! - Highlight geometry
//! - State machine transitions and commits
//! - Pointer capture pairing
//! - Panning

#[cfg(test)]
mod crop_geometry_tests {
    use crate::geometry::{AspectRatio, CropRect, ResizeHandle};
    use crate::session::{EditContext, EditableGeometry};

    fn ctx() -> EditContext {
        EditContext::new(1000.0, 500.0)
    }

    #[test]
    fn translate_moves_without_resizing() {
        let rect = CropRect::new(100.0, 100.0, 200.0, 100.0);
        assert_eq!(
            rect.translated(30.0, -10.0, &ctx()),
            CropRect::new(130.0, 90.0, 200.0, 100.0)
        );
    }

    #[test]
    fn translate_clamps_to_frame() {
        let rect = CropRect::new(100.0, 100.0, 200.0, 100.0);
        let moved = rect.translated(2000.0, -2000.0, &ctx());
        assert_eq!(moved, CropRect::new(800.0, 0.0, 200.0, 100.0));
    }

    #[test]
    fn northwest_keeps_bottom_right_fixed() {
        let rect = CropRect::new(100.0, 100.0, 200.0, 100.0);
        let resized = rect.resized(ResizeHandle::Nw, -50.0, -20.0, &ctx());
        assert_eq!(resized, CropRect::new(50.0, 80.0, 250.0, 120.0));
        assert_eq!(resized.right(), rect.right());
        assert_eq!(resized.bottom(), rect.bottom());
    }

    #[test]
    fn west_past_minimum_pins_right_edge() {
        let rect = CropRect::new(100.0, 100.0, 200.0, 100.0);
        let resized = rect.resized(ResizeHandle::W, 500.0, 0.0, &ctx());
        assert_eq!(resized.width, 10.0);
        assert_eq!(resized.x, 290.0);
    }

    #[test]
    fn south_edge_ignores_horizontal_delta() {
        let rect = CropRect::new(100.0, 100.0, 200.0, 100.0);
        let resized = rect.resized(ResizeHandle::S, 75.0, 40.0, &ctx());
        assert_eq!(resized, CropRect::new(100.0, 100.0, 200.0, 140.0));
    }

    #[test]
    fn east_handle_with_locked_ratio_derives_height() {
        let ctx = EditContext::new(1920.0, 1080.0).with_aspect_ratio(AspectRatio::fixed(16, 9));
        let rect = CropRect::new(0.0, 0.0, 320.0, 180.0);
        let resized = rect.resized(ResizeHandle::E, 160.0, 0.0, &ctx);
        assert_eq!(resized, CropRect::new(0.0, 0.0, 480.0, 270.0));
    }

    #[test]
    fn northwest_with_locked_ratio_keeps_opposite_corner() {
        let ctx = EditContext::new(1920.0, 1080.0).with_aspect_ratio(AspectRatio::fixed(16, 9));
        let rect = CropRect::new(400.0, 300.0, 320.0, 180.0);
        let resized = rect.resized(ResizeHandle::Nw, -160.0, -10.0, &ctx);

        assert!((resized.right() - 720.0).abs() < 1e-3);
        assert_eq!(resized.bottom(), 480.0);
        assert_eq!(resized.height, 190.0);
        assert!((resized.width / resized.height - 16.0 / 9.0).abs() < 1e-3);
    }

    #[test]
    fn northwest_past_frame_corner_keeps_opposite_corner() {
        let rect = CropRect::new(100.0, 100.0, 200.0, 100.0);
        let resized = rect.resized(ResizeHandle::Nw, -150.0, -130.0, &ctx());
        assert_eq!(resized, CropRect::new(0.0, 0.0, 300.0, 200.0));
        assert_eq!(resized.right(), 300.0);
        assert_eq!(resized.bottom(), 200.0);
    }

    #[test]
    fn locked_ratio_shrinks_when_derived_side_overflows() {
        let ctx = ctx().with_aspect_ratio(AspectRatio::fixed(16, 9));
        let rect = CropRect::new(0.0, 0.0, 320.0, 180.0);
        let resized = rect.resized(ResizeHandle::E, 680.0, 0.0, &ctx);

        assert_eq!(resized.height, 500.0);
        assert!((resized.width - 888.889).abs() < 1e-3);
        assert_eq!((resized.x, resized.y), (0.0, 0.0));
    }

    #[test]
    fn resize_never_leaves_frame() {
        let rect = CropRect::new(900.0, 400.0, 100.0, 100.0);
        let resized = rect.resized(ResizeHandle::Se, 300.0, 300.0, &ctx());
        assert!(resized.right() <= 1000.0);
        assert!(resized.bottom() <= 500.0);
    }
}

#[cfg(test)]
mod highlight_geometry_tests {
    use crate::geometry::{HighlightEllipse, HighlightHandle};
    use crate::session::{EditContext, EditableGeometry};

    fn ctx() -> EditContext {
        EditContext::new(1920.0, 1080.0)
    }

    #[test]
    fn radius_handles_touch_one_axis() {
        let ellipse = HighlightEllipse::new(960.0, 540.0, 160.0, 180.0);

        let wider = ellipse.resized(HighlightHandle::RadiusX, 40.0, 999.0, &ctx());
        assert_eq!(wider.radius_x, 200.0);
        assert_eq!(wider.radius_y, 180.0);

        let squashed = ellipse.resized(HighlightHandle::RadiusY, 0.0, -1000.0, &ctx());
        assert_eq!(squashed.radius_y, 15.0);
    }

    #[test]
    fn drag_keeps_ellipse_inside() {
        let ellipse = HighlightEllipse::new(960.0, 540.0, 160.0, 180.0).with_style(0.4, "#FF0000");
        let moved = ellipse.translated(-2000.0, 0.0, &ctx());
        assert_eq!(moved.x, 160.0);
        assert_eq!(moved.y, 540.0);
        assert_eq!(moved.opacity, 0.4);
        assert_eq!(moved.color, "#FF0000");
    }
}

#[cfg(test)]
mod state_machine_tests {
    use crate::geometry::{Coord, CropRect, HighlightEllipse, HighlightHandle, ResizeHandle, Viewport};
    use crate::keyframes::KeyframeTrack;
    use crate::session::{CommittedEdit, CropSession, EditContext, HighlightSession};

    fn viewport() -> Viewport {
        // 1:1 scale so screen deltas equal source deltas
        Viewport::new(1000.0, 500.0, 1000.0, 500.0)
    }

    fn start_rect() -> CropRect {
        CropRect::new(100.0, 100.0, 200.0, 100.0)
    }

    #[test]
    fn drag_commits_last_live_value_once() {
        crate::logging::init_for_tests();
        let mut vp = viewport();
        let mut session = CropSession::new(EditContext::new(1000.0, 500.0));

        assert!(session.pointer_down_body(start_rect(), Coord::new(500.0, 250.0)));
        assert!(session.is_dragging());

        let live = session.pointer_move(Coord::new(530.0, 240.0), &mut vp).cloned();
        assert_eq!(live, Some(CropRect::new(130.0, 90.0, 200.0, 100.0)));

        // Recomputed from the start geometry, not the previous live value
        let live = session.pointer_move(Coord::new(510.0, 250.0), &mut vp).cloned();
        assert_eq!(live, Some(CropRect::new(110.0, 100.0, 200.0, 100.0)));

        let commit = session.pointer_up(42);
        assert_eq!(
            commit,
            Some(CommittedEdit {
                frame: 42,
                value: CropRect::new(110.0, 100.0, 200.0, 100.0),
            })
        );
        assert!(session.is_idle());
        assert_eq!(session.pointer_up(42), None);
    }

    #[test]
    fn release_without_move_commits_nothing() {
        let mut session = CropSession::new(EditContext::new(1000.0, 500.0));
        session.pointer_down_handle(start_rect(), ResizeHandle::Se, Coord::new(0.0, 0.0));
        assert!(session.is_resizing());
        assert_eq!(session.live_value(), None);
        assert_eq!(session.pointer_up(5), None);
        assert!(session.is_idle());
    }

    #[test]
    fn pointer_down_only_from_idle() {
        let mut session = CropSession::new(EditContext::new(1000.0, 500.0));
        assert!(session.pointer_down_body(start_rect(), Coord::new(0.0, 0.0)));
        assert!(!session.pointer_down_handle(start_rect(), ResizeHandle::N, Coord::new(0.0, 0.0)));
        assert!(session.is_dragging());
    }

    #[test]
    fn move_while_idle_is_ignored() {
        let mut vp = viewport();
        let mut session = CropSession::new(EditContext::new(1000.0, 500.0));
        assert_eq!(session.pointer_move(Coord::new(10.0, 10.0), &mut vp), None);
    }

    #[test]
    fn cancel_drops_live_value() {
        let mut vp = viewport();
        let mut session = CropSession::new(EditContext::new(1000.0, 500.0));
        session.pointer_down_body(start_rect(), Coord::new(0.0, 0.0));
        session.pointer_move(Coord::new(50.0, 0.0), &mut vp);
        assert!(session.live_value().is_some());

        session.cancel();
        assert!(session.is_idle());
        assert_eq!(session.pointer_up(3), None);
    }

    #[test]
    fn zoomed_viewport_scales_deltas() {
        // 1920x1080 shown at half size
        let mut vp = Viewport::new(1920.0, 1080.0, 960.0, 540.0);
        let mut session = CropSession::new(EditContext::new(1920.0, 1080.0));
        session.pointer_down_body(CropRect::new(0.0, 0.0, 100.0, 100.0), Coord::new(0.0, 0.0));
        let live = session.pointer_move(Coord::new(10.0, 5.0), &mut vp).cloned();
        assert_eq!(live, Some(CropRect::new(20.0, 10.0, 100.0, 100.0)));
    }

    #[test]
    fn context_locked_during_gesture() {
        let mut session = CropSession::new(EditContext::new(1000.0, 500.0));
        session.pointer_down_body(start_rect(), Coord::new(0.0, 0.0));
        assert!(!session.set_context(EditContext::new(10.0, 10.0)));
        session.cancel();
        assert!(session.set_context(EditContext::new(10.0, 10.0)));
        assert_eq!(session.context().frame_width, 10.0);
    }

    #[test]
    fn highlight_resize_commit_lands_in_track() {
        let mut vp = Viewport::new(1920.0, 1080.0, 1920.0, 1080.0);
        let start = HighlightEllipse::centered_in(1920.0, 1080.0);
        let mut track = KeyframeTrack::new(start.clone(), 300);
        let mut session = HighlightSession::new(EditContext::new(1920.0, 1080.0));

        session.pointer_down_handle(start, HighlightHandle::RadiusX, Coord::new(1120.0, 540.0));
        session.pointer_move(Coord::new(1160.0, 540.0), &mut vp);
        let commit = session.pointer_up(120).unwrap();

        assert!(track.add_keyframe(commit.frame, commit.value));
        assert_eq!(track.len(), 3);
        assert_eq!(track.get(120).map(|e| e.radius_x), Some(200.0));
    }
}

#[cfg(test)]
mod capture_tests {
    use crate::geometry::{Coord, CropRect, ResizeHandle, Viewport};
    use crate::session::{EditContext, EditSession, PointerCapture};

    #[derive(Debug, Default)]
    struct CountingCapture {
        attached: u32,
        detached: u32,
    }

    impl PointerCapture for CountingCapture {
        fn attach(&mut self) {
            self.attached += 1;
        }

        fn detach(&mut self) {
            self.detached += 1;
        }
    }

    #[test]
    fn listeners_pair_with_gestures() {
        let mut vp = Viewport::new(1000.0, 500.0, 1000.0, 500.0);
        let mut session: EditSession<CropRect, CountingCapture> =
            EditSession::with_capture(EditContext::new(1000.0, 500.0), CountingCapture::default());
        let rect = CropRect::new(0.0, 0.0, 100.0, 100.0);

        // Nothing registered before the first pointer down
        assert_eq!(session.capture().attached, 0);

        session.pointer_down_body(rect, Coord::new(0.0, 0.0));
        session.pointer_move(Coord::new(5.0, 5.0), &mut vp);
        session.pointer_up(0);

        session.pointer_down_handle(rect, ResizeHandle::E, Coord::new(0.0, 0.0));
        // Refused pointer down must not attach twice
        session.pointer_down_body(rect, Coord::new(0.0, 0.0));
        session.cancel();

        // Idle cancel/up are no-ops
        session.cancel();
        session.pointer_up(0);

        assert_eq!(session.capture().attached, 2);
        assert_eq!(session.capture().detached, 2);
    }
}

#[cfg(test)]
mod pan_tests {
    use crate::geometry::{Coord, CropRect, Viewport};
    use crate::session::{CropSession, EditContext};

    #[test]
    fn pan_follows_pointer_from_start() {
        let mut vp = Viewport::new(1000.0, 500.0, 1000.0, 500.0);
        let mut session = CropSession::new(EditContext::new(1000.0, 500.0));

        assert!(session.pointer_down_pan(Coord::new(100.0, 100.0), &vp));
        assert!(session.is_panning());

        assert_eq!(session.pointer_move(Coord::new(130.0, 90.0), &mut vp), None::<&CropRect>);
        assert_eq!(vp.pan(), Coord::new(30.0, -10.0));

        session.pointer_move(Coord::new(110.0, 100.0), &mut vp);
        assert_eq!(vp.pan(), Coord::new(10.0, 0.0));

        assert_eq!(session.pointer_up(0), None);
        assert!(session.is_idle());
    }
}
