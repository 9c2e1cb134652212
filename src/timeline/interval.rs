//! Shared interval logic for the zoom and scene tracks.
//!
//! Both tracks are lists of `[start, end)` ranges in output seconds, sorted by
//! `start` and never overlapping. Every helper here returns a new list and
//! leaves the input untouched when an edit would break those rules.

/// Pixel width a newly created segment must cover at the current zoom.
pub const MIN_NEW_SEGMENT_PIXEL_WIDTH: f64 = 80.0;

/// Seconds a newly created segment must cover regardless of zoom.
pub const MIN_NEW_SEGMENT_SECS_WIDTH: f64 = 1.0;

/// Shortest piece a zoom/scene split may produce.
pub const MIN_SPLIT_PIECE_SECS: f64 = 1.0;

/// Shortest length a zoom/scene handle drag may leave.
pub const MIN_HANDLE_SEGMENT_SECS: f64 = 1.0;

/// Free space needed before a scene segment may be inserted.
pub const SCENE_MIN_GAP_SECS: f64 = 0.5;

/// Length of a newly inserted scene segment when the gap allows it.
pub const SCENE_DEFAULT_SECS: f64 = 3.0;

/// A segment with a time range.
pub trait Interval: Clone {
    fn start(&self) -> f64;
    fn end(&self) -> f64;

    /// Copy of this segment with new bounds and every other field kept.
    fn with_bounds(&self, start: f64, end: f64) -> Self;

    fn duration(&self) -> f64 {
        self.end() - self.start()
    }

    /// Half-open containment test.
    fn contains(&self, time: f64) -> bool {
        time >= self.start() && time < self.end()
    }
}

/// Minimum length of a segment created from the timeline at the given scale.
pub fn min_new_segment_secs(secs_per_pixel: f64) -> f64 {
    (MIN_NEW_SEGMENT_PIXEL_WIDTH * secs_per_pixel).max(MIN_NEW_SEGMENT_SECS_WIDTH)
}

/// Where a time falls relative to a sorted track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// Inside the segment at this index.
    Containing(usize),
    /// In free space; the value is the index a segment starting here would
    /// take (equal to `len` past the last segment).
    Gap(usize),
}

impl Position {
    pub fn index(&self) -> usize {
        match self {
            Position::Containing(i) | Position::Gap(i) => *i,
        }
    }
}

/// Locate `time` in a sorted track: the segment containing it, or the first
/// segment starting after it.
pub fn find_containing_or_next_index<T: Interval>(segments: &[T], time: f64) -> Position {
    let next = segments.partition_point(|s| s.start() <= time);
    if next > 0 && segments[next - 1].contains(time) {
        Position::Containing(next - 1)
    } else {
        Position::Gap(next)
    }
}

/// Whether `[start, end)` fits in the track without overlapping anything and
/// the free gap it lands in is at least `min_gap` long.
pub fn can_insert<T: Interval>(segments: &[T], start: f64, end: f64, min_gap: f64) -> bool {
    if !(end > start) {
        return false;
    }
    if segments.iter().any(|s| start < s.end() && end > s.start()) {
        return false;
    }

    let next = segments.partition_point(|s| s.start() < end);
    let gap_start = if next > 0 {
        segments[next - 1].end()
    } else {
        f64::NEG_INFINITY
    };
    let gap_end = segments.get(next).map(|s| s.start()).unwrap_or(f64::INFINITY);

    gap_end - gap_start >= min_gap
}

/// Insert at the sorted position, or return the input if it does not fit.
pub fn insert_segment<T: Interval>(segments: &[T], segment: T, min_gap: f64) -> Vec<T> {
    if !can_insert(segments, segment.start(), segment.end(), min_gap) {
        log::debug!(
            "[TIMELINE] Ignoring insert of {}..{}: no room",
            segment.start(),
            segment.end()
        );
        return segments.to_vec();
    }

    let index = segments.partition_point(|s| s.start() < segment.start());
    let mut next = segments.to_vec();
    next.insert(index, segment);
    next
}

/// Sorted, non-overlapping and every segment longer than zero.
pub fn is_well_formed<T: Interval>(segments: &[T]) -> bool {
    segments.iter().all(|s| s.end() > s.start())
        && segments.windows(2).all(|w| w[0].end() <= w[1].start())
}

/// Split segment `index` at `start + local_time`. Both pieces must be at
/// least [`MIN_SPLIT_PIECE_SECS`] long.
pub fn split_segment<T: Interval>(segments: &[T], index: usize, local_time: f64) -> Vec<T> {
    let Some(segment) = segments.get(index) else {
        return segments.to_vec();
    };

    let split_at = segment.start() + local_time;
    if !(local_time >= MIN_SPLIT_PIECE_SECS && segment.end() - split_at >= MIN_SPLIT_PIECE_SECS) {
        log::debug!(
            "[TIMELINE] Ignoring split of segment {} at +{}s: piece shorter than {}s",
            index,
            local_time,
            MIN_SPLIT_PIECE_SECS
        );
        return segments.to_vec();
    }

    let mut next = Vec::with_capacity(segments.len() + 1);
    next.extend_from_slice(&segments[..index]);
    next.push(segment.with_bounds(segment.start(), split_at));
    next.push(segment.with_bounds(split_at, segment.end()));
    next.extend_from_slice(&segments[index + 1..]);
    next
}

/// Remove every listed index in one pass. Duplicates and out-of-range
/// indices are ignored.
pub fn delete_segments<T: Interval>(segments: &[T], indices: &[usize]) -> Vec<T> {
    let mut targets: Vec<usize> = indices.iter().copied().filter(|&i| i < segments.len()).collect();
    targets.sort_unstable();
    targets.dedup();

    if targets.is_empty() {
        return segments.to_vec();
    }

    let mut next = segments.to_vec();
    for &index in targets.iter().rev() {
        next.remove(index);
    }
    next
}

/// Allowed range for the start handle of segment `index`: from the end of
/// the previous segment (or 0) up to one minimum length before its own end.
pub fn start_handle_bounds<T: Interval>(segments: &[T], index: usize) -> Option<(f64, f64)> {
    let segment = segments.get(index)?;
    let min = segments[..index].last().map(|s| s.end()).unwrap_or(0.0);
    let max = segment.end() - MIN_HANDLE_SEGMENT_SECS;
    Some((min, max.max(min)))
}

/// Allowed range for the end handle of segment `index`: from one minimum
/// length after its start up to the next segment (or `max_time`).
pub fn end_handle_bounds<T: Interval>(segments: &[T], index: usize, max_time: f64) -> Option<(f64, f64)> {
    let segment = segments.get(index)?;
    let min = segment.start() + MIN_HANDLE_SEGMENT_SECS;
    let max = segments
        .get(index + 1)
        .map(|s| s.start())
        .unwrap_or(max_time);
    Some((min, max.max(min)))
}

/// Allowed range for the start of segment `index` when the whole body is
/// dragged, keeping its length and staying between its neighbours.
pub fn move_bounds<T: Interval>(segments: &[T], index: usize, max_time: f64) -> Option<(f64, f64)> {
    let segment = segments.get(index)?;
    let min = segments[..index].last().map(|s| s.end()).unwrap_or(0.0);
    let limit = segments
        .get(index + 1)
        .map(|s| s.start())
        .unwrap_or(max_time);
    let max = limit - segment.duration();
    Some((min, max.max(min)))
}

/// Move the start of segment `index`, clamped by [`start_handle_bounds`].
pub fn set_segment_start<T: Interval>(segments: &[T], index: usize, start: f64) -> Vec<T> {
    let Some((min, max)) = start_handle_bounds(segments, index) else {
        return segments.to_vec();
    };
    let segment = &segments[index];
    let start = start.max(min).min(max);

    let mut next = segments.to_vec();
    next[index] = segment.with_bounds(start, segment.end());
    sort_by_start(&mut next);
    next
}

/// Move the end of segment `index`, clamped by [`end_handle_bounds`].
pub fn set_segment_end<T: Interval>(segments: &[T], index: usize, end: f64, max_time: f64) -> Vec<T> {
    let Some((min, max)) = end_handle_bounds(segments, index, max_time) else {
        return segments.to_vec();
    };
    let segment = &segments[index];
    let end = end.max(min).min(max);

    let mut next = segments.to_vec();
    next[index] = segment.with_bounds(segment.start(), end);
    sort_by_start(&mut next);
    next
}

/// Move segment `index` so it starts at `start`, keeping its length.
pub fn move_segment<T: Interval>(segments: &[T], index: usize, start: f64, max_time: f64) -> Vec<T> {
    let Some((min, max)) = move_bounds(segments, index, max_time) else {
        return segments.to_vec();
    };
    let segment = &segments[index];
    let start = start.max(min).min(max);

    let mut next = segments.to_vec();
    next[index] = segment.with_bounds(start, start + segment.duration());
    next
}

fn sort_by_start<T: Interval>(segments: &mut [T]) {
    segments.sort_by(|a, b| a.start().total_cmp(&b.start()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::ZoomSegment;

    fn zooms(ranges: &[(f64, f64)]) -> Vec<ZoomSegment> {
        ranges.iter().map(|&(s, e)| ZoomSegment::new(s, e)).collect()
    }

    fn bounds(segments: &[ZoomSegment]) -> Vec<(f64, f64)> {
        segments.iter().map(|s| (s.start, s.end)).collect()
    }

    #[test]
    fn test_find_containing_or_next_index() {
        let list = zooms(&[(1.0, 3.0), (5.0, 8.0)]);
        assert_eq!(find_containing_or_next_index(&list, 0.5), Position::Gap(0));
        assert_eq!(find_containing_or_next_index(&list, 1.0), Position::Containing(0));
        assert_eq!(find_containing_or_next_index(&list, 3.0), Position::Gap(1));
        assert_eq!(find_containing_or_next_index(&list, 6.0), Position::Containing(1));
        assert_eq!(find_containing_or_next_index(&list, 9.0), Position::Gap(2));
        assert_eq!(find_containing_or_next_index::<ZoomSegment>(&[], 2.0), Position::Gap(0));
    }

    #[test]
    fn test_can_insert() {
        let list = zooms(&[(1.0, 3.0), (5.0, 8.0)]);
        assert!(can_insert(&list, 3.0, 5.0, 0.5));
        assert!(can_insert(&list, 8.0, 20.0, 0.5));
        assert!(!can_insert(&list, 2.0, 4.0, 0.5));
        assert!(!can_insert(&list, 0.0, 10.0, 0.5));
        assert!(!can_insert(&list, 4.0, 4.0, 0.0));

        let tight = zooms(&[(1.0, 3.0), (3.4, 8.0)]);
        assert!(!can_insert(&tight, 3.1, 3.3, 0.5));
        assert!(can_insert(&tight, 3.1, 3.3, 0.0));
    }

    #[test]
    fn test_insert_keeps_order() {
        let list = zooms(&[(1.0, 3.0), (5.0, 8.0)]);
        let next = insert_segment(&list, ZoomSegment::new(3.5, 4.5), 0.0);
        assert_eq!(bounds(&next), vec![(1.0, 3.0), (3.5, 4.5), (5.0, 8.0)]);

        let rejected = insert_segment(&list, ZoomSegment::new(2.0, 4.5), 0.0);
        assert_eq!(rejected, list);
    }

    #[test]
    fn test_split_segment_min_piece() {
        let list = zooms(&[(0.0, 5.0)]);
        assert_eq!(split_segment(&list, 0, 0.5), list);
        assert_eq!(split_segment(&list, 0, 4.5), list);
        assert_eq!(split_segment(&list, 3, 2.0), list);

        let split = split_segment(&list, 0, 2.0);
        assert_eq!(bounds(&split), vec![(0.0, 2.0), (2.0, 5.0)]);
        assert_eq!(split[1].zoom, list[0].zoom);
    }

    #[test]
    fn test_delete_segments_dedup_and_range() {
        let list = zooms(&[(0.0, 1.0), (2.0, 3.0), (4.0, 5.0), (6.0, 7.0)]);
        let next = delete_segments(&list, &[2, 0, 2, 9]);
        assert_eq!(bounds(&next), vec![(2.0, 3.0), (6.0, 7.0)]);

        assert_eq!(delete_segments(&list, &[]), list);
        assert_eq!(delete_segments(&list, &[10, 11]), list);
    }

    #[test]
    fn test_handle_bounds() {
        let list = zooms(&[(1.0, 3.0), (5.0, 8.0)]);
        assert_eq!(start_handle_bounds(&list, 1), Some((3.0, 7.0)));
        assert_eq!(start_handle_bounds(&list, 0), Some((0.0, 2.0)));
        assert_eq!(end_handle_bounds(&list, 0, 20.0), Some((2.0, 5.0)));
        assert_eq!(end_handle_bounds(&list, 1, 20.0), Some((6.0, 20.0)));
        assert_eq!(start_handle_bounds(&list, 2), None);
    }

    #[test]
    fn test_set_segment_start_and_end_clamp() {
        let list = zooms(&[(1.0, 3.0), (5.0, 8.0)]);

        let next = set_segment_start(&list, 1, 0.0);
        assert_eq!(bounds(&next), vec![(1.0, 3.0), (3.0, 8.0)]);

        let next = set_segment_start(&list, 1, 7.9);
        assert_eq!(bounds(&next), vec![(1.0, 3.0), (7.0, 8.0)]);

        let next = set_segment_end(&list, 0, 10.0, 20.0);
        assert_eq!(bounds(&next), vec![(1.0, 5.0), (5.0, 8.0)]);

        let next = set_segment_end(&list, 1, 100.0, 20.0);
        assert_eq!(bounds(&next), vec![(1.0, 3.0), (5.0, 20.0)]);
        assert!(is_well_formed(&next));
    }

    #[test]
    fn test_move_segment_between_neighbours() {
        let list = zooms(&[(1.0, 3.0), (5.0, 6.0), (9.0, 10.0)]);

        let next = move_segment(&list, 1, 8.5, 20.0);
        assert_eq!(bounds(&next), vec![(1.0, 3.0), (8.0, 9.0), (9.0, 10.0)]);

        let next = move_segment(&list, 1, 0.0, 20.0);
        assert_eq!(bounds(&next), vec![(1.0, 3.0), (3.0, 4.0), (9.0, 10.0)]);

        let next = move_segment(&list, 2, 50.0, 12.0);
        assert_eq!(bounds(&next)[2], (11.0, 12.0));
    }

    #[test]
    fn test_is_well_formed() {
        assert!(is_well_formed(&zooms(&[(0.0, 1.0), (1.0, 2.0)])));
        assert!(!is_well_formed(&zooms(&[(0.0, 1.5), (1.0, 2.0)])));
        assert!(!is_well_formed(&zooms(&[(2.0, 3.0), (0.0, 1.0)])));
        assert!(!is_well_formed(&zooms(&[(1.0, 1.0)])));
    }

    #[test]
    fn test_min_new_segment_secs() {
        assert_eq!(min_new_segment_secs(0.001), 1.0);
        assert!((min_new_segment_secs(0.05) - 4.0).abs() < 1e-9);
    }
}
