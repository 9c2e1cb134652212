//! Pointer gestures on the timeline.
//!
//! A gesture runs from pointer-down to pointer-up (or cancel). It owns a
//! history pause for its whole lifetime, so every project change made while
//! dragging collapses into one undo entry when the gesture ends.
//!
//! ```text
//! Idle --down--> MovePending --moved > threshold--> Moving
//!                     |                               |
//!                     +------------- up --------------+--> Idle
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::history::HistoryPause;
use super::state::TrackKind;
use crate::project::ProjectConfiguration;
use crate::timeline::{clip, interval, SceneSegmentPreview, ZoomSegmentPreview};

/// Drag progress of the active gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "generated/")]
pub enum DragState {
    #[default]
    Idle,
    /// Pointer is down but has not travelled past the threshold yet.
    MovePending,
    Moving,
}

/// Part of a segment the pointer went down on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "generated/")]
pub enum SegmentPart {
    Body,
    StartHandle,
    EndHandle,
}

/// Drag of an existing segment's handle or body.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentDrag {
    pub track: TrackKind,
    pub index: usize,
    pub part: SegmentPart,
    /// Bounds of the segment when the pointer went down.
    pub initial_start: f64,
    pub initial_end: f64,
    /// Clip speed; pixel deltas on the clip track are scaled into source
    /// seconds. 1.0 for the other tracks.
    pub timescale: f64,
}

impl SegmentDrag {
    /// Capture the segment at `index` on `track`, or None if it does not exist.
    pub fn capture(project: &ProjectConfiguration, track: TrackKind, index: usize, part: SegmentPart) -> Option<Self> {
        let timeline = &project.timeline;
        let (start, end, timescale) = match track {
            TrackKind::Clip => timeline
                .segments
                .get(index)
                .map(|s| (s.start, s.end, s.timescale))?,
            TrackKind::Zoom => timeline.zoom_segments.get(index).map(|s| (s.start, s.end, 1.0))?,
            TrackKind::Scene => timeline.scene_segments.get(index).map(|s| (s.start, s.end, 1.0))?,
        };
        Some(Self {
            track,
            index,
            part,
            initial_start: start,
            initial_end: end,
            timescale,
        })
    }

    /// Project with the dragged segment moved by `delta_secs` of timeline
    /// time from where it started.
    pub fn apply(
        &self,
        project: &ProjectConfiguration,
        delta_secs: f64,
        source_duration: f64,
        total_duration: f64,
    ) -> ProjectConfiguration {
        let mut next = project.clone();
        let timeline = &mut next.timeline;
        let i = self.index;

        match (self.track, self.part) {
            (TrackKind::Clip, SegmentPart::StartHandle) => {
                let start = self.initial_start + delta_secs * self.timescale;
                timeline.segments = clip::set_clip_segment_start(&timeline.segments, i, start);
            },
            (TrackKind::Clip, SegmentPart::EndHandle) => {
                let end = self.initial_end + delta_secs * self.timescale;
                timeline.segments = clip::set_clip_segment_end(&timeline.segments, i, end, source_duration);
            },
            (TrackKind::Clip, SegmentPart::Body) => {},
            (TrackKind::Zoom, part) => {
                timeline.zoom_segments =
                    self.apply_interval(&timeline.zoom_segments, part, delta_secs, total_duration);
            },
            (TrackKind::Scene, part) => {
                timeline.scene_segments =
                    self.apply_interval(&timeline.scene_segments, part, delta_secs, total_duration);
            },
        }
        next
    }

    fn apply_interval<T: interval::Interval>(
        &self,
        segments: &[T],
        part: SegmentPart,
        delta_secs: f64,
        max_time: f64,
    ) -> Vec<T> {
        match part {
            SegmentPart::StartHandle => {
                interval::set_segment_start(segments, self.index, self.initial_start + delta_secs)
            },
            SegmentPart::EndHandle => {
                interval::set_segment_end(segments, self.index, self.initial_end + delta_secs, max_time)
            },
            SegmentPart::Body => interval::move_segment(segments, self.index, self.initial_start + delta_secs, max_time),
        }
    }
}

/// What the active gesture does.
#[derive(Debug, Clone, PartialEq)]
pub enum GestureKind {
    /// Press on an existing segment: select on click, resize or move on drag.
    Segment(SegmentDrag),
    /// Press on the zoom track placeholder: create a segment, dragging sets
    /// its length.
    CreateZoom {
        preview: ZoomSegmentPreview,
        min_duration: f64,
        created: Option<usize>,
    },
    /// Press on the scene track placeholder: insert on release.
    CreateScene { preview: SceneSegmentPreview },
    /// Press on empty timeline: move the playhead on release.
    Seek,
}

/// The gesture in progress.
#[derive(Debug)]
pub struct Gesture {
    pub kind: GestureKind,
    /// Pointer x at press.
    pub down_x: f64,
    /// Pointer x when the drag threshold was crossed. Deltas are measured
    /// from here so a drag does not jump by the threshold distance.
    pub anchor_x: Option<f64>,
    pub drag_state: DragState,
    /// Project before the gesture, restored on cancel.
    pub initial_project: ProjectConfiguration,
    _pause: HistoryPause,
}

impl Gesture {
    pub fn new(kind: GestureKind, down_x: f64, initial_project: ProjectConfiguration, pause: HistoryPause) -> Self {
        Self {
            kind,
            down_x,
            anchor_x: None,
            drag_state: DragState::MovePending,
            initial_project,
            _pause: pause,
        }
    }

    /// Feed a pointer position. Returns the pixel delta from the drag anchor
    /// once the pointer has travelled more than `threshold` pixels.
    pub fn track(&mut self, x: f64, threshold: f64) -> Option<f64> {
        if self.anchor_x.is_none() && (x - self.down_x).abs() > threshold {
            self.anchor_x = Some(x);
            self.drag_state = DragState::Moving;
        }
        self.anchor_x.map(|anchor| x - anchor)
    }

    pub fn moved(&self) -> bool {
        self.drag_state == DragState::Moving
    }

    /// Whether this gesture is dragging an existing segment.
    pub fn is_segment_drag(&self) -> bool {
        matches!(self.kind, GestureKind::Segment(_))
    }
}
