//! Clip track operations.
//!
//! Clip segments are slices of the source recording. Their `start`/`end`
//! are source seconds, but their position on the timeline is the running sum
//! of the output durations before them, so most of these functions walk the
//! list in output time.

use crate::project::TimelineSegment;

/// Shortest clip a handle drag may leave, in source seconds.
pub const MIN_CLIP_SECS: f64 = 1.0;

/// Output length of the whole clip track. Falls back to `video_duration`
/// when there are no clip segments.
pub fn total_duration(segments: &[TimelineSegment], video_duration: f64) -> f64 {
    if segments.is_empty() {
        return video_duration;
    }
    segments.iter().map(TimelineSegment::output_duration).sum()
}

/// Output time at which each clip starts.
pub fn clip_output_offsets(segments: &[TimelineSegment]) -> Vec<f64> {
    let mut offsets = Vec::with_capacity(segments.len());
    let mut acc = 0.0;
    for segment in segments {
        offsets.push(acc);
        acc += segment.output_duration();
    }
    offsets
}

/// Split the clip under output time `global_time` into two clips that share
/// its timescale and recording. Times outside the track, or exactly on a
/// clip boundary, leave the list unchanged.
pub fn split_clip_segment(segments: &[TimelineSegment], global_time: f64) -> Vec<TimelineSegment> {
    if !(global_time >= 0.0) {
        return segments.to_vec();
    }

    let mut acc = 0.0;
    for (index, segment) in segments.iter().enumerate() {
        let duration = segment.output_duration();
        if global_time < acc + duration {
            let split_at = segment.start + (global_time - acc) * segment.timescale;
            if !(split_at > segment.start && split_at < segment.end) {
                log::debug!("[TIMELINE] Ignoring clip split at {}s: on a boundary", global_time);
                return segments.to_vec();
            }

            let mut next = Vec::with_capacity(segments.len() + 1);
            next.extend_from_slice(&segments[..index]);
            next.push(TimelineSegment {
                end: split_at,
                ..segment.clone()
            });
            next.push(TimelineSegment {
                start: split_at,
                ..segment.clone()
            });
            next.extend_from_slice(&segments[index + 1..]);
            return next;
        }
        acc += duration;
    }

    log::debug!("[TIMELINE] Ignoring clip split at {}s: past the end ({}s)", global_time, acc);
    segments.to_vec()
}

/// Remove clip `index`, unless it is the last fragment of its recording or
/// has no recording index.
pub fn delete_clip_segment(segments: &[TimelineSegment], index: usize) -> Vec<TimelineSegment> {
    let Some(target) = segments.get(index) else {
        return segments.to_vec();
    };

    let Some(recording) = target.recording_segment else {
        log::debug!("[TIMELINE] Refusing to delete clip {}: no recording index", index);
        return segments.to_vec();
    };

    let siblings = segments
        .iter()
        .filter(|s| s.recording_segment == Some(recording))
        .count();
    if siblings < 2 {
        log::debug!(
            "[TIMELINE] Refusing to delete clip {}: last fragment of recording {}",
            index,
            recording
        );
        return segments.to_vec();
    }

    let mut next = segments.to_vec();
    next.remove(index);
    next
}

/// Move the source start of clip `index`, clamped to `[0, end - 1]`.
pub fn set_clip_segment_start(segments: &[TimelineSegment], index: usize, start: f64) -> Vec<TimelineSegment> {
    let Some(segment) = segments.get(index) else {
        return segments.to_vec();
    };
    let start = start.max(0.0).min(segment.end - MIN_CLIP_SECS);

    let mut next = segments.to_vec();
    next[index].start = start;
    next
}

/// Move the source end of clip `index`, clamped to
/// `[start + 1, source_duration]`.
pub fn set_clip_segment_end(
    segments: &[TimelineSegment],
    index: usize,
    end: f64,
    source_duration: f64,
) -> Vec<TimelineSegment> {
    let Some(segment) = segments.get(index) else {
        return segments.to_vec();
    };
    let end = end.min(source_duration).max(segment.start + MIN_CLIP_SECS);

    let mut next = segments.to_vec();
    next[index].end = end;
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn clip(start: f64, end: f64, timescale: f64) -> TimelineSegment {
        TimelineSegment::new(start, end, timescale)
    }

    #[test]
    fn test_total_duration() {
        let segments = vec![clip(0.0, 10.0, 1.0), clip(10.0, 20.0, 2.0)];
        assert!(approx(total_duration(&segments, 99.0), 15.0));
        assert_eq!(total_duration(&[], 42.0), 42.0);
    }

    #[test]
    fn test_clip_output_offsets() {
        let segments = vec![clip(0.0, 4.0, 2.0), clip(4.0, 10.0, 1.0), clip(10.0, 12.0, 1.0)];
        assert_eq!(clip_output_offsets(&segments), vec![0.0, 2.0, 8.0]);
    }

    #[test]
    fn test_split_single_clip() {
        let segments = vec![clip(0.0, 10.0, 1.0)];
        let next = split_clip_segment(&segments, 4.0);
        assert_eq!(next, vec![clip(0.0, 4.0, 1.0), clip(4.0, 10.0, 1.0)]);
    }

    #[test]
    fn test_split_uses_output_time_and_timescale() {
        // Second clip plays 10s of source in 5s of output.
        let segments = vec![clip(0.0, 4.0, 1.0), clip(20.0, 30.0, 2.0).with_recording(1)];
        let next = split_clip_segment(&segments, 6.0);

        assert_eq!(next.len(), 3);
        assert!(approx(next[1].start, 20.0));
        assert!(approx(next[1].end, 24.0));
        assert!(approx(next[2].start, 24.0));
        assert!(approx(next[2].end, 30.0));
        assert_eq!(next[1].timescale, 2.0);
        assert_eq!(next[2].recording_segment, Some(1));
    }

    #[test]
    fn test_split_then_rejoin_restores_bounds() {
        let original = clip(3.25, 17.5, 1.5);
        let next = split_clip_segment(&[original.clone()], 2.7);

        assert_eq!(next.len(), 2);
        assert_eq!(next[0].end, next[1].start);
        let rejoined = TimelineSegment {
            end: next[1].end,
            ..next[0].clone()
        };
        assert!(approx(rejoined.start, original.start));
        assert!(approx(rejoined.end, original.end));
    }

    #[test]
    fn test_split_out_of_range_is_noop() {
        let segments = vec![clip(0.0, 10.0, 1.0)];
        assert_eq!(split_clip_segment(&segments, 10.0), segments);
        assert_eq!(split_clip_segment(&segments, 25.0), segments);
        assert_eq!(split_clip_segment(&segments, -1.0), segments);
        assert_eq!(split_clip_segment(&segments, 0.0), segments);
        assert_eq!(split_clip_segment(&segments, f64::NAN), segments);
    }

    #[test]
    fn test_delete_clip_with_sibling() {
        let segments = vec![clip(0.0, 5.0, 1.0).with_recording(0), clip(5.0, 10.0, 1.0).with_recording(0)];
        let next = delete_clip_segment(&segments, 0);
        assert_eq!(next, vec![clip(5.0, 10.0, 1.0).with_recording(0)]);
    }

    #[test]
    fn test_delete_last_fragment_is_noop() {
        let segments = vec![clip(0.0, 5.0, 1.0).with_recording(0)];
        assert_eq!(delete_clip_segment(&segments, 0), segments);

        let mixed = vec![clip(0.0, 5.0, 1.0).with_recording(0), clip(0.0, 5.0, 1.0).with_recording(1)];
        assert_eq!(delete_clip_segment(&mixed, 1), mixed);
        assert_eq!(delete_clip_segment(&mixed, 7), mixed);
    }

    #[test]
    fn test_delete_without_recording_index() {
        let segments = vec![clip(0.0, 5.0, 1.0), clip(5.0, 10.0, 1.0)];
        assert_eq!(delete_clip_segment(&segments, 1), segments);

        let mixed = vec![clip(0.0, 5.0, 1.0), clip(5.0, 8.0, 1.0).with_recording(0), clip(8.0, 9.0, 1.0).with_recording(0)];
        assert_eq!(delete_clip_segment(&mixed, 0), mixed);
        assert_eq!(delete_clip_segment(&mixed, 2), mixed[..2].to_vec());
    }

    #[test]
    fn test_clip_handles_clamp() {
        let segments = vec![clip(2.0, 10.0, 1.0)];

        assert_eq!(set_clip_segment_start(&segments, 0, -3.0)[0].start, 0.0);
        assert_eq!(set_clip_segment_start(&segments, 0, 9.5)[0].start, 9.0);
        assert_eq!(set_clip_segment_end(&segments, 0, 2.5, 30.0)[0].end, 3.0);
        assert_eq!(set_clip_segment_end(&segments, 0, 45.0, 30.0)[0].end, 30.0);
        assert_eq!(set_clip_segment_end(&segments, 3, 45.0, 30.0), segments);
    }
}
