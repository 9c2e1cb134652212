//! Transient editor state. Never persisted and never part of history.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::timeline::TimelineTransform;

/// Which timeline track a selection, hover or gesture refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "generated/")]
pub enum TrackKind {
    Clip,
    Zoom,
    Scene,
}

/// What a click on a segment does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "generated/")]
pub enum InteractMode {
    /// Select segments and move the playhead.
    #[default]
    Seek,
    /// Split the clicked segment at the cursor.
    Split,
}

impl InteractMode {
    pub fn toggled(self) -> Self {
        match self {
            InteractMode::Seek => InteractMode::Split,
            InteractMode::Split => InteractMode::Seek,
        }
    }
}

/// Selected segments on one track. `indices` is never empty and keeps the
/// order in which segments were added, so the last entry is the most recent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "generated/")]
pub struct Selection {
    #[serde(rename = "type")]
    pub kind: TrackKind,
    pub indices: Vec<usize>,
}

impl Selection {
    pub fn single(kind: TrackKind, index: usize) -> Self {
        Self {
            kind,
            indices: vec![index],
        }
    }

    pub fn contains(&self, kind: TrackKind, index: usize) -> bool {
        self.kind == kind && self.indices.contains(&index)
    }
}

/// Timeline part of the editor state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "generated/")]
pub struct TimelineUiState {
    pub transform: TimelineTransform,
    pub selection: Option<Selection>,
    pub interact_mode: InteractMode,
    pub hovered_track: Option<TrackKind>,
}

/// Playback and timeline UI state shared with the rendering layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "generated/")]
pub struct EditorState {
    pub playing: bool,
    /// Playhead, in output seconds.
    pub playback_time: f64,
    /// Time under the pointer while hovering the timeline.
    pub preview_time: Option<f64>,
    pub timeline: TimelineUiState,
}

impl EditorState {
    /// Initial state: paused at 0 with `visible_secs` seconds on screen.
    pub fn new(visible_secs: f64) -> Self {
        Self {
            playing: false,
            playback_time: 0.0,
            preview_time: None,
            timeline: TimelineUiState {
                transform: TimelineTransform::new(0.0, visible_secs),
                selection: None,
                interact_mode: InteractMode::Seek,
                hovered_track: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_serializes_type_field() {
        let selection = Selection::single(TrackKind::Zoom, 3);
        let json = serde_json::to_string(&selection).unwrap();
        assert_eq!(json, r#"{"type":"zoom","indices":[3]}"#);
    }

    #[test]
    fn test_initial_state() {
        let state = EditorState::new(10.0);
        assert!(!state.playing);
        assert_eq!(state.timeline.transform.zoom, 10.0);
        assert_eq!(state.timeline.interact_mode, InteractMode::Seek);

        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains("playbackTime"));
        assert!(json.contains("interactMode"));
    }

    #[test]
    fn test_interact_mode_toggle() {
        assert_eq!(InteractMode::Seek.toggled(), InteractMode::Split);
        assert_eq!(InteractMode::Split.toggled(), InteractMode::Seek);
    }
}
