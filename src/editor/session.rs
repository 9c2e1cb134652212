//! Editor session: the single owner of the project and the editor state.
//!
//! Each loaded video gets its own EditorSession that manages:
//! - The project configuration and its undo/redo history
//! - Transient editor state (playhead, hover, selection, visible window)
//! - Pointer gestures and keyboard shortcuts on the timeline
//! - Change notification to the rendering layer
//!
//! Every project change goes through [`EditorSession::set_project`], which
//! feeds the transition to the history before publishing it.

use uuid::Uuid;

use super::gesture::{DragState, Gesture, GestureKind, SegmentDrag, SegmentPart};
use super::history::{HistoryPause, ProjectHistory};
use super::input::{action_for, EditorAction, KeyOutcome, KeyPress};
use super::selection::{apply_click, Modifiers, Platform};
use super::state::{EditorState, InteractMode, Selection, TrackKind};
use crate::config::{get_editor_config, EditorConfig};
use crate::error::EditorResult;
use crate::project::{ProjectConfiguration, TimelineConfiguration, VideoData};
use crate::timeline::{self, clip, scene, transform, zoom, SceneSegmentPreview, ZoomLimits, ZoomSegmentPreview};

/// Distance from the end within which starting playback restarts from 0.
const RESTART_THRESHOLD_SECS: f64 = 0.1;

/// Change notifications delivered to subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, ts_rs::TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "generated/")]
pub enum SessionEvent {
    ProjectChanged,
    EditorStateChanged,
    HistoryChanged,
}

/// Handle returned by [`EditorSession::subscribe`].
pub type ListenerId = u64;

type Listener = Box<dyn FnMut(&SessionEvent) + Send>;

/// Editing session for one video.
pub struct EditorSession {
    id: String,
    video: VideoData,
    project: ProjectConfiguration,
    state: EditorState,
    history: ProjectHistory,
    config: EditorConfig,
    platform: Platform,
    /// Pixel width of the timeline tracks, reported by the host.
    timeline_width: f64,
    gesture: Option<Gesture>,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener_id: ListenerId,
}

impl EditorSession {
    /// Create a session with the default project and the global editor config.
    pub fn new(video: VideoData) -> EditorResult<Self> {
        Self::with_config(video, get_editor_config())
    }

    /// Create a session with the default project and an explicit config.
    pub fn with_config(video: VideoData, config: EditorConfig) -> EditorResult<Self> {
        video.validate()?;
        let project = ProjectConfiguration::for_duration(video.duration);
        Ok(Self::build(video, project, config))
    }

    /// Resume editing a persisted project.
    pub fn with_project(video: VideoData, project: ProjectConfiguration, config: EditorConfig) -> EditorResult<Self> {
        video.validate()?;
        project.timeline.validate()?;
        Ok(Self::build(video, project, config))
    }

    fn build(video: VideoData, project: ProjectConfiguration, mut config: EditorConfig) -> Self {
        config.validate();
        let id = Uuid::new_v4().to_string();
        log::info!(
            "[SESSION] Created session {} for video {} ({:.2}s)",
            id,
            video.id,
            video.duration
        );

        Self {
            id,
            state: EditorState::new(config.initial_zoom_secs),
            history: ProjectHistory::new(config.history_limit),
            video,
            project,
            config,
            platform: Platform::current(),
            timeline_width: 0.0,
            gesture: None,
            listeners: Vec::new(),
            next_listener_id: 1,
        }
    }

    // ========================================================================
    // Accessors and derived values
    // ========================================================================

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn video(&self) -> &VideoData {
        &self.video
    }

    pub fn project(&self) -> &ProjectConfiguration {
        &self.project
    }

    pub fn editor_state(&self) -> &EditorState {
        &self.state
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Override the detected platform (Cmd vs Ctrl shortcuts).
    pub fn set_platform(&mut self, platform: Platform) {
        self.platform = platform;
    }

    pub fn timeline_width(&self) -> f64 {
        self.timeline_width
    }

    /// Report the pixel width of the timeline tracks.
    pub fn set_timeline_width(&mut self, width: f64) {
        self.timeline_width = if width.is_finite() { width.max(0.0) } else { 0.0 };
    }

    /// Output length of the project: the sum of the clips' output durations,
    /// or the video duration when there are no clips.
    pub fn total_duration(&self) -> f64 {
        clip::total_duration(&self.project.timeline.segments, self.video.duration)
    }

    pub fn zoom_out_limit(&self) -> f64 {
        transform::zoom_out_limit(self.total_duration(), self.config.max_zoom_out_secs)
    }

    pub fn secs_per_pixel(&self) -> f64 {
        self.state.timeline.transform.secs_per_pixel(self.timeline_width)
    }

    fn zoom_limits(&self) -> ZoomLimits {
        ZoomLimits {
            min_zoom: self.config.min_zoom_secs,
            zoom_out_limit: self.zoom_out_limit(),
            total_duration: self.total_duration(),
        }
    }

    fn time_at_pixel(&self, x: f64) -> f64 {
        self.state.timeline.transform.time_at_pixel(x, self.timeline_width)
    }

    /// Drag progress of the active gesture.
    pub fn drag_state(&self) -> DragState {
        self.gesture.as_ref().map(|g| g.drag_state).unwrap_or_default()
    }

    // ========================================================================
    // Observers
    // ========================================================================

    /// Register a change listener.
    pub fn subscribe(&mut self, listener: impl FnMut(&SessionEvent) + Send + 'static) -> ListenerId {
        let id = self.next_listener_id;
        self.next_listener_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if the id was unknown.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    fn emit(&mut self, event: SessionEvent) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(&event);
        }
    }

    // ========================================================================
    // Core updates
    // ========================================================================

    /// Replace the project with `updater(current)`. Returns false if nothing
    /// changed.
    pub fn set_project<F>(&mut self, updater: F) -> bool
    where
        F: FnOnce(&ProjectConfiguration) -> ProjectConfiguration,
    {
        let next = updater(&self.project);
        if next == self.project {
            return false;
        }

        let entry_created = self.history.record(&self.project, &next);
        self.project = next;

        self.emit(SessionEvent::ProjectChanged);
        if entry_created {
            self.emit(SessionEvent::HistoryChanged);
        }
        true
    }

    /// Replace the editor state with `updater(current)`. Never historied.
    pub fn set_editor_state<F>(&mut self, updater: F) -> bool
    where
        F: FnOnce(&EditorState) -> EditorState,
    {
        let next = updater(&self.state);
        if next == self.state {
            return false;
        }
        self.state = next;
        self.emit(SessionEvent::EditorStateChanged);
        true
    }

    fn update_state(&mut self, f: impl FnOnce(&mut EditorState)) -> bool {
        self.set_editor_state(|state| {
            let mut next = state.clone();
            f(&mut next);
            next
        })
    }

    fn set_timeline<F>(&mut self, f: F) -> bool
    where
        F: FnOnce(&TimelineConfiguration) -> TimelineConfiguration,
    {
        self.set_project(|project| ProjectConfiguration {
            timeline: f(&project.timeline),
            ..project.clone()
        })
    }

    // ========================================================================
    // Project actions
    // ========================================================================

    /// Split the clip under output time `time`.
    pub fn split_clip_segment(&mut self, time: f64) -> bool {
        self.set_timeline(|t| TimelineConfiguration {
            segments: clip::split_clip_segment(&t.segments, time),
            ..t.clone()
        })
    }

    pub fn delete_clip_segment(&mut self, index: usize) -> bool {
        self.set_timeline(|t| TimelineConfiguration {
            segments: clip::delete_clip_segment(&t.segments, index),
            ..t.clone()
        })
    }

    pub fn split_zoom_segment(&mut self, index: usize, local_time: f64) -> bool {
        self.set_timeline(|t| TimelineConfiguration {
            zoom_segments: zoom::split_zoom_segment(&t.zoom_segments, index, local_time),
            ..t.clone()
        })
    }

    pub fn delete_zoom_segments(&mut self, indices: &[usize]) -> bool {
        self.set_timeline(|t| TimelineConfiguration {
            zoom_segments: zoom::delete_zoom_segments(&t.zoom_segments, indices),
            ..t.clone()
        })
    }

    pub fn split_scene_segment(&mut self, index: usize, local_time: f64) -> bool {
        self.set_timeline(|t| TimelineConfiguration {
            scene_segments: scene::split_scene_segment(&t.scene_segments, index, local_time),
            ..t.clone()
        })
    }

    pub fn delete_scene_segment(&mut self, index: usize) -> bool {
        self.set_timeline(|t| TimelineConfiguration {
            scene_segments: scene::delete_scene_segment(&t.scene_segments, index),
            ..t.clone()
        })
    }

    pub fn delete_scene_segments(&mut self, indices: &[usize]) -> bool {
        self.set_timeline(|t| TimelineConfiguration {
            scene_segments: scene::delete_scene_segments(&t.scene_segments, indices),
            ..t.clone()
        })
    }

    /// Change a clip's speed, re-timing the zoom and scene tracks.
    pub fn set_clip_segment_timescale(&mut self, index: usize, timescale: f64) -> bool {
        self.set_timeline(|t| timeline::set_clip_segment_timescale(t, index, timescale))
    }

    /// Delete every selected segment as one history entry and clear the
    /// selection.
    pub fn delete_selection(&mut self) -> bool {
        let Some(selection) = self.state.timeline.selection.clone() else {
            return false;
        };

        let changed = self.set_timeline(|t| {
            let mut next = t.clone();
            match selection.kind {
                TrackKind::Zoom => {
                    next.zoom_segments = zoom::delete_zoom_segments(&t.zoom_segments, &selection.indices);
                },
                TrackKind::Scene => {
                    next.scene_segments = scene::delete_scene_segments(&t.scene_segments, &selection.indices);
                },
                TrackKind::Clip => {
                    let mut indices = selection.indices.clone();
                    indices.sort_unstable_by(|a, b| b.cmp(a));
                    indices.dedup();
                    for index in indices {
                        next.segments = clip::delete_clip_segment(&next.segments, index);
                    }
                },
            }
            next
        });

        self.clear_selection();
        changed
    }

    /// Replace the project with a persisted one. Undoable.
    pub fn load_project_json(&mut self, json: &str) -> EditorResult<()> {
        let project = ProjectConfiguration::from_json(json)?;
        self.cancel_gesture();
        self.clear_selection();
        self.set_project(|_| project);
        log::info!("[SESSION] Loaded project into session {}", self.id);
        Ok(())
    }

    pub fn project_json(&self) -> EditorResult<String> {
        self.project.to_json()
    }

    // ========================================================================
    // History
    // ========================================================================

    /// Step back one entry. Clears the selection first since indices may no
    /// longer point at the same segments.
    pub fn undo(&mut self) -> bool {
        self.cancel_gesture();
        self.clear_selection();
        match self.history.undo(&self.project) {
            Some(previous) => {
                self.project = previous;
                log::debug!("[SESSION] Undo in session {}", self.id);
                self.emit(SessionEvent::ProjectChanged);
                self.emit(SessionEvent::HistoryChanged);
                true
            },
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        self.cancel_gesture();
        self.clear_selection();
        match self.history.redo(&self.project) {
            Some(next) => {
                self.project = next;
                log::debug!("[SESSION] Redo in session {}", self.id);
                self.emit(SessionEvent::ProjectChanged);
                self.emit(SessionEvent::HistoryChanged);
                true
            },
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo() || self.history.has_pending_change(&self.project)
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Suppress history entries until the guard is resumed or dropped. Pass
    /// the guard to [`EditorSession::resume_history`] to commit right away.
    pub fn pause_history(&self) -> HistoryPause {
        self.history.pause()
    }

    /// Release a pause and commit the paused change if it was the last one.
    pub fn resume_history(&mut self, pause: HistoryPause) {
        pause.resume();
        self.settle_history();
    }

    /// Commit a paused change whose guard was dropped.
    pub fn settle_history(&mut self) {
        if self.history.settle(&self.project) {
            self.emit(SessionEvent::HistoryChanged);
        }
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
        self.emit(SessionEvent::HistoryChanged);
    }

    // ========================================================================
    // Playback
    // ========================================================================

    /// Move the playhead, clamped to the project. Reaching the end while
    /// playing stops playback.
    pub fn set_playback_time(&mut self, time: f64) {
        if !time.is_finite() {
            return;
        }
        let total = self.total_duration();
        self.update_state(|s| {
            if s.playing && time >= total {
                s.playing = false;
            }
            s.playback_time = time.max(0.0).min(total);
        });
    }

    /// Play or pause. Playing from the very end restarts from 0.
    pub fn toggle_playback(&mut self) {
        let total = self.total_duration();
        self.update_state(|s| {
            if s.playing {
                s.playing = false;
                return;
            }
            if total - s.playback_time <= RESTART_THRESHOLD_SECS {
                s.playback_time = 0.0;
            }
            s.playing = true;
            s.preview_time = None;
        });
    }

    pub fn set_preview_time(&mut self, time: Option<f64>) {
        self.update_state(|s| s.preview_time = time);
    }

    // ========================================================================
    // Visible window
    // ========================================================================

    /// Zoom to `new_zoom` visible seconds keeping `origin` in place.
    pub fn update_zoom(&mut self, new_zoom: f64, origin: f64) {
        let limits = self.zoom_limits();
        self.update_state(|s| {
            s.timeline.transform = s.timeline.transform.update_zoom(new_zoom, origin, &limits);
        });
    }

    /// Keyboard zoom in, anchored at the playhead.
    pub fn zoom_in(&mut self) {
        let zoom = self.state.timeline.transform.zoom / self.config.zoom_step;
        self.update_zoom(zoom, self.state.playback_time);
    }

    /// Keyboard zoom out, anchored at the playhead.
    pub fn zoom_out(&mut self) {
        let zoom = self.state.timeline.transform.zoom * self.config.zoom_step;
        self.update_zoom(zoom, self.state.playback_time);
    }

    /// Wheel over the timeline: zoom with Ctrl/Cmd (trackpad pinch arrives
    /// this way too), scroll otherwise.
    pub fn wheel(&mut self, delta_x: f64, delta_y: f64, modifiers: Modifiers) {
        let current = self.state.timeline.transform;
        if modifiers.ctrl || modifiers.meta {
            let delta = transform::wheel_zoom_delta(delta_y, current.zoom, self.config.wheel_zoom_divisor);
            let origin = self.state.preview_time.unwrap_or(self.state.playback_time);
            self.update_zoom(current.zoom + delta, origin);
        } else {
            let delta = self.secs_per_pixel() * transform::wheel_scroll_delta(delta_x, delta_y);
            self.update_state(|s| s.timeline.transform = current.scroll_by(delta));
        }
    }

    // ========================================================================
    // Selection and modes
    // ========================================================================

    pub fn set_interact_mode(&mut self, mode: InteractMode) {
        self.update_state(|s| s.timeline.interact_mode = mode);
    }

    pub fn toggle_interact_mode(&mut self) {
        self.update_state(|s| s.timeline.interact_mode = s.timeline.interact_mode.toggled());
    }

    pub fn clear_selection(&mut self) {
        self.update_state(|s| s.timeline.selection = None);
    }

    /// Apply a click on segment `index` of track `kind` to the selection.
    pub fn click_segment(&mut self, kind: TrackKind, index: usize, modifiers: Modifiers) {
        let platform = self.platform;
        self.update_state(|s| {
            s.timeline.selection = apply_click(s.timeline.selection.as_ref(), kind, index, modifiers, platform);
        });
    }

    pub fn set_selection(&mut self, selection: Option<Selection>) {
        self.update_state(|s| s.timeline.selection = selection);
    }

    // ========================================================================
    // Pointer input
    // ========================================================================

    /// Track the pointer entered (Some) or left (None).
    pub fn set_hovered_track(&mut self, track: Option<TrackKind>) {
        self.update_state(|s| s.timeline.hovered_track = track);
    }

    /// Pointer left the timeline.
    pub fn pointer_leave(&mut self) {
        self.update_state(|s| {
            s.preview_time = None;
            s.timeline.hovered_track = None;
        });
    }

    /// Move the playhead to the time under `x`. Ignored while a segment is
    /// being dragged.
    pub fn seek_to_pixel(&mut self, x: f64) {
        if self
            .gesture
            .as_ref()
            .map_or(false, |g| g.is_segment_drag() && g.drag_state != DragState::Idle)
        {
            return;
        }
        let time = self.time_at_pixel(x);
        if !time.is_finite() {
            return;
        }
        let total = self.total_duration();
        self.update_state(|s| s.playback_time = time.max(0.0).min(total));
    }

    /// Placeholder for a new zoom segment under the pointer, if one fits.
    pub fn zoom_segment_preview(&self) -> Option<ZoomSegmentPreview> {
        if matches!(
            self.gesture.as_ref().map(|g| &g.kind),
            Some(GestureKind::CreateZoom { .. })
        ) {
            return None;
        }
        if self.state.timeline.hovered_track != Some(TrackKind::Zoom) {
            return None;
        }
        let preview_time = self.state.preview_time?;
        zoom::new_zoom_segment_preview(
            &self.project.timeline.zoom_segments,
            preview_time,
            self.new_segment_min_duration(),
            self.total_duration(),
        )
    }

    /// Placeholder for a new scene segment under the pointer, if one fits.
    pub fn scene_segment_preview(&self) -> Option<SceneSegmentPreview> {
        if self.state.timeline.hovered_track != Some(TrackKind::Scene) {
            return None;
        }
        let preview_time = self.state.preview_time?;
        scene::scene_segment_preview(&self.project.timeline.scene_segments, preview_time, self.total_duration())
    }

    fn new_segment_min_duration(&self) -> f64 {
        timeline::min_new_segment_secs(self.secs_per_pixel())
    }

    /// Pointer pressed on a segment. In split mode the body is split at the
    /// pointer; otherwise a select/resize/move gesture starts.
    pub fn pointer_down_on_segment(&mut self, kind: TrackKind, index: usize, part: SegmentPart, x: f64) {
        self.finish_stale_gesture();

        if self.state.timeline.interact_mode == InteractMode::Split {
            if part == SegmentPart::Body {
                self.split_at_pixel(kind, index, x);
            }
            return;
        }

        let Some(drag) = SegmentDrag::capture(&self.project, kind, index, part) else {
            return;
        };
        log::debug!("[GESTURE] Segment press on {:?} {} ({:?})", kind, index, part);
        self.begin_gesture(GestureKind::Segment(drag), x);
    }

    fn split_at_pixel(&mut self, kind: TrackKind, index: usize, x: f64) {
        let time = self.time_at_pixel(x);
        match kind {
            // Clip track positions are output time already; keep the split
            // inside the pressed clip.
            TrackKind::Clip => {
                let segments = &self.project.timeline.segments;
                let offsets = clip::clip_output_offsets(segments);
                let bounds = offsets
                    .get(index)
                    .zip(segments.get(index))
                    .map(|(&offset, segment)| (offset, offset + segment.output_duration()));
                if let Some((start, end)) = bounds {
                    self.split_clip_segment(time.max(start).min(end));
                }
            },
            TrackKind::Zoom => {
                if let Some(segment) = self.project.timeline.zoom_segments.get(index) {
                    let local = time - segment.start;
                    self.split_zoom_segment(index, local);
                }
            },
            TrackKind::Scene => {
                if let Some(segment) = self.project.timeline.scene_segments.get(index) {
                    let local = time - segment.start;
                    self.split_scene_segment(index, local);
                }
            },
        }
    }

    /// Pointer pressed on free space of a track (or the ruler, with None).
    pub fn pointer_down_on_track(&mut self, kind: Option<TrackKind>, x: f64) {
        self.finish_stale_gesture();

        let gesture = match kind {
            Some(TrackKind::Zoom) => match self.zoom_segment_preview() {
                Some(preview) => GestureKind::CreateZoom {
                    preview,
                    min_duration: self.new_segment_min_duration(),
                    created: None,
                },
                None => GestureKind::Seek,
            },
            Some(TrackKind::Scene) => match self.scene_segment_preview() {
                Some(preview) => GestureKind::CreateScene { preview },
                None => GestureKind::Seek,
            },
            _ => GestureKind::Seek,
        };
        log::debug!("[GESTURE] Track press on {:?}: {:?}", kind, gesture);
        self.begin_gesture(gesture, x);
    }

    fn begin_gesture(&mut self, kind: GestureKind, x: f64) {
        let pause = self.history.pause();
        self.gesture = Some(Gesture::new(kind, x, self.project.clone(), pause));
    }

    /// Pointer moved over the timeline.
    pub fn pointer_move(&mut self, x: f64) {
        if self.gesture.is_some() {
            self.drive_gesture(x);
            return;
        }
        if !self.state.playing {
            let time = self.time_at_pixel(x);
            if time.is_finite() {
                self.set_preview_time(Some(time.max(0.0)));
            }
        }
    }

    fn drive_gesture(&mut self, x: f64) {
        let Some(mut gesture) = self.gesture.take() else {
            return;
        };
        let spp = self.secs_per_pixel();
        let threshold = self.config.drag_threshold_px;

        match gesture.kind.clone() {
            GestureKind::Segment(drag) => {
                if let Some(dx) = gesture.track(x, threshold) {
                    let source_duration = self.video.duration;
                    let total = self.total_duration();
                    self.set_project(|p| drag.apply(p, dx * spp, source_duration, total));
                }
            },
            GestureKind::CreateZoom {
                preview,
                min_duration,
                created,
            } => {
                let dx = x - gesture.down_x;
                if dx != 0.0 {
                    gesture.drag_state = DragState::Moving;
                    let end = preview.start + dx * spp;
                    let index = self.create_or_resize_zoom(&preview, created, end, min_duration);
                    gesture.kind = GestureKind::CreateZoom {
                        preview,
                        min_duration,
                        created: index,
                    };
                }
            },
            GestureKind::CreateScene { .. } | GestureKind::Seek => {
                gesture.track(x, threshold);
            },
        }

        self.gesture = Some(gesture);
    }

    fn create_or_resize_zoom(
        &mut self,
        preview: &ZoomSegmentPreview,
        created: Option<usize>,
        end: f64,
        min_duration: f64,
    ) -> Option<usize> {
        match created {
            Some(index) => {
                self.set_timeline(|t| TimelineConfiguration {
                    zoom_segments: zoom::resize_new_zoom_segment(&t.zoom_segments, index, preview, end, min_duration),
                    ..t.clone()
                });
                Some(index)
            },
            None => {
                let (segments, index) =
                    zoom::insert_zoom_segment(&self.project.timeline.zoom_segments, preview, end, min_duration)?;
                self.set_timeline(|t| TimelineConfiguration {
                    zoom_segments: segments,
                    ..t.clone()
                });
                log::debug!("[GESTURE] Created zoom segment {} at {:.2}s", index, preview.start);
                Some(index)
            },
        }
    }

    /// Pointer released. Finishes the active gesture: an unmoved press on a
    /// segment selects it and moves the playhead, a drag commits as one
    /// history entry.
    pub fn pointer_up(&mut self, x: f64, modifiers: Modifiers) {
        if self.gesture.is_none() {
            return;
        }
        self.drive_gesture(x);
        let Some(gesture) = self.gesture.take() else {
            return;
        };
        let moved = gesture.moved();

        match &gesture.kind {
            GestureKind::Segment(drag) => {
                if !moved {
                    self.click_segment(drag.track, drag.index, modifiers);
                    self.seek_to_pixel(x);
                }
            },
            GestureKind::CreateZoom {
                preview,
                min_duration,
                created: None,
            } => {
                self.create_or_resize_zoom(preview, None, preview.end, *min_duration);
            },
            GestureKind::CreateZoom { .. } => {},
            GestureKind::CreateScene { preview } => {
                let preview = *preview;
                self.set_timeline(|t| TimelineConfiguration {
                    scene_segments: scene::insert_scene_segment(&t.scene_segments, &preview),
                    ..t.clone()
                });
            },
            GestureKind::Seek => {
                if !moved {
                    self.clear_selection();
                    self.seek_to_pixel(x);
                }
            },
        }

        log::debug!("[GESTURE] Finished (moved={})", moved);
        self.end_gesture(gesture);
    }

    /// Abandon the active gesture and restore the project it started from.
    pub fn cancel_gesture(&mut self) {
        let Some(gesture) = self.gesture.take() else {
            return;
        };
        let initial = gesture.initial_project.clone();
        self.set_project(|_| initial);
        log::debug!("[GESTURE] Cancelled");
        self.end_gesture(gesture);
    }

    /// A press arrived while a gesture was still open (lost pointer-up):
    /// keep what it did and close it.
    fn finish_stale_gesture(&mut self) {
        if let Some(gesture) = self.gesture.take() {
            log::warn!("[GESTURE] Closing gesture that never received pointer-up");
            self.end_gesture(gesture);
        }
    }

    fn end_gesture(&mut self, gesture: Gesture) {
        drop(gesture);
        self.settle_history();
    }

    // ========================================================================
    // Keyboard
    // ========================================================================

    /// Handle a key press. The outcome says whether the host must consume
    /// the event.
    pub fn handle_key(&mut self, press: &KeyPress) -> KeyOutcome {
        let Some(action) = action_for(press, self.platform) else {
            return KeyOutcome::IGNORED;
        };

        match action {
            EditorAction::ToggleSplitMode => self.toggle_interact_mode(),
            EditorAction::ZoomIn => self.zoom_in(),
            EditorAction::ZoomOut => self.zoom_out(),
            EditorAction::TogglePlayback => {
                if !self.state.playing {
                    if let Some(preview) = self.state.preview_time {
                        self.set_playback_time(preview);
                    }
                }
                self.toggle_playback();
            },
            EditorAction::DeleteSelection => {
                if self.state.timeline.selection.is_none() {
                    return KeyOutcome::IGNORED;
                }
                self.delete_selection();
            },
            EditorAction::SplitClipAtCursor => {
                let time = self.state.preview_time.unwrap_or(self.state.playback_time);
                self.split_clip_segment(time);
            },
            EditorAction::ClearSelection => self.clear_selection(),
            EditorAction::Undo => {
                self.undo();
            },
            EditorAction::Redo => {
                self.redo();
            },
        }

        KeyOutcome::handled(action)
    }
}

impl Drop for EditorSession {
    fn drop(&mut self) {
        log::debug!("[SESSION] Session {} closed", self.id);
    }
}
