//! Zoom track operations.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::project::ZoomSegment;
use crate::timeline::interval::{self, Interval};

/// Placeholder shown under the cursor on the zoom track, and the seed of a
/// create-by-drag gesture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "generated/")]
pub struct ZoomSegmentPreview {
    /// Index of the segment the new one would sit before, if any.
    pub index: Option<usize>,
    pub start: f64,
    pub end: f64,
    /// Furthest the new segment's end may be dragged.
    pub max: f64,
}

/// Distance to the next segment under which the placeholder snaps against it.
const SNAP_TO_NEXT_SECS: f64 = 1.0;

/// Where a new zoom segment would go if the user clicked at `preview_time`.
///
/// Hidden while hovering inside a segment, or when the free gap is shorter
/// than `min_duration`. Within a second of the next segment the placeholder
/// ends flush against it.
pub fn new_zoom_segment_preview(
    segments: &[ZoomSegment],
    preview_time: f64,
    min_duration: f64,
    max_time: f64,
) -> Option<ZoomSegmentPreview> {
    if !preview_time.is_finite() {
        return None;
    }

    let next = segments.iter().position(|s| preview_time <= s.start);
    let prev = segments.iter().rposition(|s| preview_time >= s.start);

    if let Some(p) = prev {
        let segment = &segments[p];
        if preview_time > segment.start && preview_time < segment.end {
            return None;
        }
    }

    let preview = match next {
        Some(n) => {
            let next_start = segments[n].start;
            if let Some(p) = prev {
                if next_start - segments[p].end < min_duration {
                    return None;
                }
            }
            if next_start - preview_time < SNAP_TO_NEXT_SECS {
                ZoomSegmentPreview {
                    index: Some(n),
                    start: next_start - min_duration,
                    end: next_start,
                    max: next_start,
                }
            } else {
                ZoomSegmentPreview {
                    index: Some(n),
                    start: preview_time,
                    end: preview_time + min_duration,
                    max: next_start,
                }
            }
        },
        None => ZoomSegmentPreview {
            index: None,
            start: preview_time,
            end: preview_time + min_duration,
            max: max_time,
        },
    };

    let floor = prev.map(|p| segments[p].end).unwrap_or(0.0);
    if preview.start < floor || preview.end > preview.max {
        return None;
    }
    Some(preview)
}

/// Commit a previewed zoom segment ending at `end_time`, clamped to
/// `[start + min_duration, preview.max]`. Returns the new list and the index
/// of the inserted segment, or `None` if it no longer fits.
pub fn insert_zoom_segment(
    segments: &[ZoomSegment],
    preview: &ZoomSegmentPreview,
    end_time: f64,
    min_duration: f64,
) -> Option<(Vec<ZoomSegment>, usize)> {
    let end = clamp_new_end(preview, end_time, min_duration);
    let next = interval::insert_segment(segments, ZoomSegment::new(preview.start, end), 0.0);
    if next.len() == segments.len() {
        return None;
    }
    let index = next.iter().position(|s| s.start == preview.start)?;
    Some((next, index))
}

/// Extend the end of a segment created by drag, clamped like
/// [`insert_zoom_segment`].
pub fn resize_new_zoom_segment(
    segments: &[ZoomSegment],
    index: usize,
    preview: &ZoomSegmentPreview,
    end_time: f64,
    min_duration: f64,
) -> Vec<ZoomSegment> {
    let end = clamp_new_end(preview, end_time, min_duration);
    let mut next = segments.to_vec();
    if let Some(segment) = next.get_mut(index) {
        *segment = segment.with_bounds(segment.start, end);
    }
    next
}

fn clamp_new_end(preview: &ZoomSegmentPreview, end_time: f64, min_duration: f64) -> f64 {
    end_time.max(preview.start + min_duration).min(preview.max)
}

/// Split zoom segment `index` at `local_time` seconds into it.
pub fn split_zoom_segment(segments: &[ZoomSegment], index: usize, local_time: f64) -> Vec<ZoomSegment> {
    interval::split_segment(segments, index, local_time)
}

/// Remove the listed zoom segments in one pass.
pub fn delete_zoom_segments(segments: &[ZoomSegment], indices: &[usize]) -> Vec<ZoomSegment> {
    interval::delete_segments(segments, indices)
}
