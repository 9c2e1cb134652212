//! Scene track operations.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::project::SceneSegment;
use crate::timeline::interval::{self, Interval, SCENE_DEFAULT_SECS, SCENE_MIN_GAP_SECS};

/// Placeholder for a scene segment under the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "generated/")]
pub struct SceneSegmentPreview {
    pub start: f64,
    /// Length the inserted segment will get.
    pub duration: f64,
}

/// Where a scene segment would go if the user clicked at `time`.
///
/// The placeholder is up to three seconds long, pushed forward out of any
/// segment the cursor is past, and hidden when less than half a second of
/// free space is left.
pub fn scene_segment_preview(segments: &[SceneSegment], time: f64, total_duration: f64) -> Option<SceneSegmentPreview> {
    if !time.is_finite() {
        return None;
    }
    if segments.iter().any(|s| s.contains(time)) {
        return None;
    }

    let mut time = time;
    let max_duration = match segments.iter().position(|s| time < s.start) {
        Some(n) => {
            let next = &segments[n];
            let max_duration = match n.checked_sub(1).map(|p| &segments[p]) {
                Some(prev) => {
                    if next.start - prev.end < SCENE_MIN_GAP_SECS {
                        return None;
                    }
                    time = time.max(prev.end);
                    SCENE_DEFAULT_SECS.min(next.start - time)
                },
                None => SCENE_DEFAULT_SECS.min(next.start - time),
            };
            if next.start - time < SCENE_MIN_GAP_SECS {
                return None;
            }
            max_duration
        },
        None => {
            if let Some(last) = segments.last() {
                time = time.max(last.end);
            }
            SCENE_DEFAULT_SECS.min(total_duration - time)
        },
    };

    if max_duration < SCENE_MIN_GAP_SECS {
        return None;
    }

    Some(SceneSegmentPreview {
        start: time.min(total_duration - max_duration).max(0.0),
        duration: max_duration,
    })
}

/// Insert a scene segment with the default camera rect at the previewed
/// place. Returns the list unchanged if it no longer fits.
pub fn insert_scene_segment(segments: &[SceneSegment], preview: &SceneSegmentPreview) -> Vec<SceneSegment> {
    let segment = SceneSegment::new(preview.start, preview.start + preview.duration);
    interval::insert_segment(segments, segment, SCENE_MIN_GAP_SECS)
}

/// Split scene segment `index` at `local_time` seconds into it.
pub fn split_scene_segment(segments: &[SceneSegment], index: usize, local_time: f64) -> Vec<SceneSegment> {
    interval::split_segment(segments, index, local_time)
}

/// Remove scene segment `index`.
pub fn delete_scene_segment(segments: &[SceneSegment], index: usize) -> Vec<SceneSegment> {
    interval::delete_segments(segments, &[index])
}

/// Remove the listed scene segments in one pass.
pub fn delete_scene_segments(segments: &[SceneSegment], indices: &[usize]) -> Vec<SceneSegment> {
    interval::delete_segments(segments, indices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::SceneMode;

    fn scenes(ranges: &[(f64, f64)]) -> Vec<SceneSegment> {
        ranges.iter().map(|&(s, e)| SceneSegment::new(s, e)).collect()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_preview_default_length() {
        let preview = scene_segment_preview(&[], 2.0, 20.0).unwrap();
        assert_eq!(preview.start, 2.0);
        assert_eq!(preview.duration, 3.0);
    }

    #[test]
    fn test_preview_shrinks_to_gap() {
        let list = scenes(&[(0.0, 2.0), (4.0, 6.0)]);
        let preview = scene_segment_preview(&list, 2.5, 20.0).unwrap();
        assert_eq!(preview.start, 2.5);
        assert!(approx(preview.duration, 1.5));
    }

    #[test]
    fn test_preview_hidden_in_small_gap() {
        let list = scenes(&[(0.0, 2.0), (2.3, 6.0)]);
        assert_eq!(scene_segment_preview(&list, 2.1, 20.0), None);

        let list = scenes(&[(4.0, 6.0)]);
        assert_eq!(scene_segment_preview(&list, 3.8, 20.0), None);
    }

    #[test]
    fn test_preview_hidden_over_segment() {
        let list = scenes(&[(4.0, 6.0)]);
        assert_eq!(scene_segment_preview(&list, 5.0, 20.0), None);
    }

    #[test]
    fn test_preview_near_end() {
        let preview = scene_segment_preview(&[], 18.5, 20.0).unwrap();
        assert!(approx(preview.duration, 1.5));
        assert_eq!(scene_segment_preview(&[], 19.8, 20.0), None);
    }

    #[test]
    fn test_insert_scene_segment() {
        let list = scenes(&[(0.0, 2.0), (8.0, 9.0)]);
        let preview = scene_segment_preview(&list, 3.0, 20.0).unwrap();
        let next = insert_scene_segment(&list, &preview);

        assert_eq!(next.len(), 3);
        assert_eq!(next[1].start, 3.0);
        assert_eq!(next[1].end, 6.0);
        assert_eq!(next[1].scene_mode(), SceneMode::Default);
        assert!(interval::is_well_formed(&next));

        // Stale preview that now overlaps is ignored.
        assert_eq!(insert_scene_segment(&next, &preview), next);
    }

    #[test]
    fn test_split_and_delete_scene() {
        let list = scenes(&[(0.0, 4.0), (5.0, 9.0)]);
        let split = split_scene_segment(&list, 1, 2.0);
        assert_eq!(split.len(), 3);
        assert_eq!(split[2].start, 7.0);

        assert_eq!(split_scene_segment(&list, 0, 3.5), list);
        assert_eq!(delete_scene_segment(&list, 0), scenes(&[(5.0, 9.0)]));
        assert_eq!(delete_scene_segment(&list, 4), list);
        assert_eq!(delete_scene_segments(&list, &[1, 0]), Vec::new());
    }
}
