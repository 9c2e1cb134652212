//! Editor session configuration.
//!
//! Tunables for the interactive timeline: history depth, drag threshold and
//! the zoom limits used by the coordinate mapper. Sessions snapshot this
//! config when they are created, so changing it affects new sessions only.

use lazy_static::lazy_static;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Centralized editor configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "generated/")]
pub struct EditorConfig {
    /// Maximum number of undo entries kept (oldest dropped first).
    pub history_limit: usize,

    /// Pointer travel (pixels) before a press becomes a drag.
    pub drag_threshold_px: f64,

    /// Factor applied per keyboard zoom step (zoom in divides, zoom out multiplies).
    pub zoom_step: f64,

    /// Divisor for ctrl/cmd + wheel zoom: `delta_y * sqrt(zoom) / divisor`.
    pub wheel_zoom_divisor: f64,

    /// Smallest visible window in seconds (most zoomed in).
    pub min_zoom_secs: f64,

    /// Largest visible window in seconds, regardless of project length.
    pub max_zoom_out_secs: f64,

    /// Visible seconds when a session opens.
    pub initial_zoom_secs: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_limit: 100,
            drag_threshold_px: 2.0,
            zoom_step: 1.1,
            wheel_zoom_divisor: 30.0,
            min_zoom_secs: 3.0,
            max_zoom_out_secs: 600.0,
            initial_zoom_secs: 10.0,
        }
    }
}

impl EditorConfig {
    /// Validate and clamp settings to acceptable ranges.
    pub fn validate(&mut self) {
        self.history_limit = self.history_limit.clamp(1, 10_000);
        self.drag_threshold_px = finite_or(self.drag_threshold_px, 2.0).clamp(0.0, 50.0);
        self.zoom_step = finite_or(self.zoom_step, 1.1).clamp(1.01, 4.0);
        self.wheel_zoom_divisor = finite_or(self.wheel_zoom_divisor, 30.0).clamp(1.0, 1000.0);
        self.min_zoom_secs = finite_or(self.min_zoom_secs, 3.0).clamp(0.1, 60.0);
        self.max_zoom_out_secs =
            finite_or(self.max_zoom_out_secs, 600.0).clamp(self.min_zoom_secs, 24.0 * 3600.0);
        self.initial_zoom_secs =
            finite_or(self.initial_zoom_secs, 10.0).clamp(self.min_zoom_secs, self.max_zoom_out_secs);
    }

    /// Reset all settings to defaults.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

lazy_static! {
    /// Global editor configuration.
    ///
    /// Thread-safe access via `parking_lot::RwLock` (non-poisoning, fast).
    pub static ref EDITOR_CONFIG: RwLock<EditorConfig> = RwLock::new(EditorConfig::default());
}

/// Get a copy of the current editor configuration.
pub fn get_editor_config() -> EditorConfig {
    EDITOR_CONFIG.read().clone()
}

/// Replace the editor configuration (validated before it is stored).
pub fn set_editor_config(config: EditorConfig) {
    let mut current = EDITOR_CONFIG.write();
    *current = config;
    current.validate();
    log::debug!("[CONFIG] Editor config updated: {:?}", *current);
}

/// Reset the editor configuration to defaults.
pub fn reset_editor_config() {
    EDITOR_CONFIG.write().reset();
    log::debug!("[CONFIG] Editor config reset to defaults");
}
