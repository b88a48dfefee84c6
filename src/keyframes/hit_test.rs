//! Pointer hit-testing against keyframe markers on a timeline track.

use super::track::{KeyframeTrack, KeyframeValue};
use crate::config::EDITOR_CONFIG;

/// Index of the keyframe marker nearest `pointer_x`, if within the hit radius.
///
/// Markers sit at `frame / total_frames * track_width_px`. The radius is
/// `hit_radius_fraction * track_width_px`. Ties go to the first index found
/// scanning left to right.
pub fn nearest_keyframe(
    frames: &[u32],
    pointer_x: f64,
    track_width_px: f64,
    total_frames: u32,
    hit_radius_fraction: f64,
) -> Option<usize> {
    if total_frames == 0 || track_width_px <= 0.0 {
        return None;
    }

    let radius = hit_radius_fraction * track_width_px;
    let mut best: Option<(usize, f64)> = None;

    for (i, &frame) in frames.iter().enumerate() {
        let marker_x = frame as f64 / total_frames as f64 * track_width_px;
        let distance = (marker_x - pointer_x).abs();
        if distance > radius {
            continue;
        }
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((i, distance)),
        }
    }

    best.map(|(i, _)| i)
}

impl<V: KeyframeValue> KeyframeTrack<V> {
    /// Keyframe under the pointer on a track drawn `track_width_px` wide.
    pub fn nearest_keyframe_index(&self, pointer_x: f64, track_width_px: f64) -> Option<usize> {
        let fraction = EDITOR_CONFIG.read().hit_radius_fraction;
        nearest_keyframe(
            &self.frames(),
            pointer_x,
            track_width_px,
            self.end_frame(),
            fraction,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::CropRect;

    #[test]
    fn test_hit_within_radius() {
        // 1000px track, 100 frames: markers every 10px per frame, radius 30px
        let frames = [0, 20, 50, 100];
        assert_eq!(nearest_keyframe(&frames, 210.0, 1000.0, 100, 0.03), Some(1));
        assert_eq!(nearest_keyframe(&frames, 520.0, 1000.0, 100, 0.03), Some(2));
        assert_eq!(nearest_keyframe(&frames, 350.0, 1000.0, 100, 0.03), None);
    }

    #[test]
    fn test_tie_goes_to_first() {
        let frames = [0, 4, 8];
        // Pointer exactly between markers at 40px and 80px
        assert_eq!(nearest_keyframe(&frames, 60.0, 1000.0, 100, 0.03), Some(1));
    }

    #[test]
    fn test_degenerate_track() {
        assert_eq!(nearest_keyframe(&[0, 10], 0.0, 0.0, 10, 0.03), None);
        assert_eq!(nearest_keyframe(&[0], 0.0, 100.0, 0, 0.03), None);
    }

    #[test]
    fn test_track_helper_uses_end_frame() {
        let mut track = KeyframeTrack::new(CropRect::new(0.0, 0.0, 10.0, 10.0), 200);
        track.add_keyframe(100, CropRect::new(1.0, 0.0, 10.0, 10.0));
        assert_eq!(track.nearest_keyframe_index(495.0, 1000.0), Some(1));
        assert_eq!(track.nearest_keyframe_index(995.0, 1000.0), Some(2));
    }
}
