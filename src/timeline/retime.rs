//! Changing a clip's playback speed.
//!
//! A speed change stretches or shrinks one clip on the output timeline.
//! Zoom and scene segments live in output time, so everything at or after
//! that clip has to move with it or the effects drift away from the footage
//! they were placed on.

use crate::project::TimelineConfiguration;
use crate::timeline::interval::Interval;

/// Output-time shift caused by resizing one clip.
///
/// The clip occupies `[clip_start, clip_start + old_length)` in output time
/// and its length changes by `length_diff`:
/// - before the clip: no shift
/// - inside the clip: shift proportional to how far into the clip the time is
/// - at or after the clip end: the full `length_diff`
///
/// Intervals are half-open. The three pieces meet continuously, so a time
/// exactly on either boundary gets the same shift whichever side claims it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetimeShift {
    pub clip_start: f64,
    pub old_length: f64,
    pub length_diff: f64,
}

impl RetimeShift {
    pub fn shift(&self, time: f64) -> f64 {
        if time >= self.clip_start + self.old_length {
            self.length_diff
        } else if time >= self.clip_start {
            self.length_diff * (time - self.clip_start) / self.old_length
        } else {
            0.0
        }
    }

    pub fn apply(&self, time: f64) -> f64 {
        time + self.shift(time)
    }

    fn apply_to<T: Interval>(&self, segment: &T) -> T {
        segment.with_bounds(self.apply(segment.start()), self.apply(segment.end()))
    }
}

/// Set the timescale of clip `index` and re-time the zoom and scene tracks
/// to match. Non-positive or non-finite timescales, unknown indices and
/// unchanged values leave the timeline as it was.
pub fn set_clip_segment_timescale(
    timeline: &TimelineConfiguration,
    index: usize,
    timescale: f64,
) -> TimelineConfiguration {
    let Some(segment) = timeline.segments.get(index) else {
        return timeline.clone();
    };
    if !(timescale.is_finite() && timescale > 0.0) || timescale == segment.timescale {
        log::debug!("[TIMELINE] Ignoring timescale {} for clip {}", timescale, index);
        return timeline.clone();
    }

    let old_length = segment.output_duration();
    let new_length = (segment.end - segment.start) / timescale;
    let shift = RetimeShift {
        clip_start: timeline.segments[..index]
            .iter()
            .map(|s| s.output_duration())
            .sum(),
        old_length,
        length_diff: new_length - old_length,
    };

    let mut next = timeline.clone();
    next.segments[index].timescale = timescale;
    next.zoom_segments = timeline.zoom_segments.iter().map(|s| shift.apply_to(s)).collect();
    next.scene_segments = timeline.scene_segments.iter().map(|s| shift.apply_to(s)).collect();
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::{SceneSegment, TimelineSegment, ZoomSegment};

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn timeline() -> TimelineConfiguration {
        TimelineConfiguration {
            segments: vec![
                TimelineSegment::new(0.0, 10.0, 1.0),
                TimelineSegment::new(10.0, 20.0, 1.0),
                TimelineSegment::new(20.0, 30.0, 1.0),
            ],
            zoom_segments: vec![
                ZoomSegment::new(2.0, 4.0),
                ZoomSegment::new(12.0, 15.0),
                ZoomSegment::new(22.0, 25.0),
            ],
            scene_segments: vec![SceneSegment::new(21.0, 24.0)],
        }
    }

    #[test]
    fn test_three_region_shift() {
        // Clip 1 goes from 10s to 5s of output: length_diff = -5.
        let next = set_clip_segment_timescale(&timeline(), 1, 2.0);

        assert_eq!(next.segments[1].timescale, 2.0);

        // Before: untouched.
        assert!(approx(next.zoom_segments[0].start, 2.0));
        assert!(approx(next.zoom_segments[0].end, 4.0));

        // Within: proportional. 12 -> 10 + 2 * 0.5, 15 -> 10 + 5 * 0.5.
        assert!(approx(next.zoom_segments[1].start, 11.0));
        assert!(approx(next.zoom_segments[1].end, 12.5));

        // After: full shift.
        assert!(approx(next.zoom_segments[2].start, 17.0));
        assert!(approx(next.zoom_segments[2].end, 20.0));
        assert!(approx(next.scene_segments[0].start, 16.0));
        assert!(approx(next.scene_segments[0].end, 19.0));
    }

    #[test]
    fn test_shift_is_continuous_at_boundaries() {
        let shift = RetimeShift {
            clip_start: 10.0,
            old_length: 10.0,
            length_diff: 6.0,
        };
        assert_eq!(shift.shift(10.0), 0.0);
        assert!(approx(shift.shift(10.0 - 1e-12), 0.0));
        assert!(approx(shift.shift(20.0), 6.0));
        assert!(approx(shift.shift(20.0 - 1e-9), 6.0));
        assert!(approx(shift.shift(15.0), 3.0));
    }

    #[test]
    fn test_slow_down_preserves_order() {
        let next = set_clip_segment_timescale(&timeline(), 0, 0.5);
        // Clip 0 now plays for 20s: everything after 10s moves by +10.
        assert!(approx(next.zoom_segments[0].start, 4.0));
        assert!(approx(next.zoom_segments[0].end, 8.0));
        assert!(approx(next.zoom_segments[1].start, 22.0));
        assert!(crate::timeline::interval::is_well_formed(&next.zoom_segments));
    }

    #[test]
    fn test_invalid_timescale_is_noop() {
        let original = timeline();
        assert_eq!(set_clip_segment_timescale(&original, 1, 0.0), original);
        assert_eq!(set_clip_segment_timescale(&original, 1, -2.0), original);
        assert_eq!(set_clip_segment_timescale(&original, 1, f64::NAN), original);
        assert_eq!(set_clip_segment_timescale(&original, 1, 1.0), original);
        assert_eq!(set_clip_segment_timescale(&original, 9, 2.0), original);
    }
}
