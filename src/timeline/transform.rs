//! Mapping between timeline seconds and pixels.
//!
//! The visible window is described by two numbers:
//!
//! ```text
//! position  - output second at the left edge
//! zoom      - seconds spanned by the full width (not a multiplier)
//! ```
//!
//! With a track `width` in pixels, `secs_per_pixel = zoom / width` and the
//! two directions are `time = position + x * secs_per_pixel` and
//! `x = (time - position) / secs_per_pixel`.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Slack past the end of the project the view may scroll into, in seconds.
const SCROLL_OVERSHOOT_SECS: f64 = 4.0;

/// Ruler spacings, finest first.
const MARKING_RESOLUTIONS: [f64; 6] = [0.5, 1.0, 2.5, 5.0, 10.0, 30.0];

/// Most ruler ticks wanted across the visible window.
const MAX_TIMELINE_MARKINGS: f64 = 20.0;

/// Visible window of the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "generated/")]
pub struct TimelineTransform {
    /// Output second at the left edge.
    pub position: f64,
    /// Seconds visible across the width.
    pub zoom: f64,
}

/// Bounds used when zooming.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomLimits {
    /// Smallest visible window (most zoomed in).
    pub min_zoom: f64,
    /// Largest visible window, see [`zoom_out_limit`].
    pub zoom_out_limit: f64,
    /// Output length of the project.
    pub total_duration: f64,
}

impl TimelineTransform {
    pub fn new(position: f64, zoom: f64) -> Self {
        Self { position, zoom }
    }

    /// Seconds covered by one pixel of a track `width` pixels wide.
    /// Zero for a track that has not been laid out yet.
    pub fn secs_per_pixel(&self, width: f64) -> f64 {
        if width > 0.0 {
            self.zoom / width
        } else {
            0.0
        }
    }

    pub fn time_at_pixel(&self, x: f64, width: f64) -> f64 {
        self.position + x * self.secs_per_pixel(width)
    }

    pub fn pixel_at_time(&self, time: f64, width: f64) -> f64 {
        let spp = self.secs_per_pixel(width);
        if spp > 0.0 {
            (time - self.position) / spp
        } else {
            0.0
        }
    }

    /// Right edge of the visible window.
    pub fn end(&self) -> f64 {
        self.position + self.zoom
    }

    /// Zoom to `new_zoom` seconds while keeping `origin` at the same pixel.
    ///
    /// The zoom is clamped to `[min_zoom, zoom_out_limit]` (the minimum wins
    /// for very short projects). The position is then clamped to
    /// `[0, max(zoom_out_limit, total_duration) + 4 - zoom]`; the origin only
    /// stays fixed when that clamp does not engage.
    pub fn update_zoom(&self, new_zoom: f64, origin: f64, limits: &ZoomLimits) -> Self {
        let zoom = new_zoom.min(limits.zoom_out_limit).max(limits.min_zoom);
        if !zoom.is_finite() || !origin.is_finite() {
            return *self;
        }

        let fraction = if self.zoom > 0.0 {
            ((origin - self.position) / self.zoom).min(1.0)
        } else {
            0.0
        };
        let position = origin - zoom * fraction;
        let max_position =
            limits.zoom_out_limit.max(limits.total_duration) + SCROLL_OVERSHOOT_SECS - zoom;

        Self {
            position: position.max(0.0).min(max_position),
            zoom,
        }
    }

    /// Shift the window by `delta_secs`, never past the start.
    pub fn scroll_by(&self, delta_secs: f64) -> Self {
        if !delta_secs.is_finite() {
            return *self;
        }
        Self {
            position: (self.position + delta_secs).max(0.0),
            zoom: self.zoom,
        }
    }
}

/// Largest visible window: the project length, capped at `max_zoom_out`.
pub fn zoom_out_limit(total_duration: f64, max_zoom_out: f64) -> f64 {
    total_duration.min(max_zoom_out)
}

/// Zoom delta for a ctrl/cmd + wheel event. Larger windows zoom faster.
pub fn wheel_zoom_delta(delta_y: f64, zoom: f64, divisor: f64) -> f64 {
    delta_y * zoom.max(0.0).sqrt() / divisor
}

/// Pixel delta used for a plain wheel scroll: horizontal wins when it clearly
/// dominates.
pub fn wheel_scroll_delta(delta_x: f64, delta_y: f64) -> f64 {
    if delta_x.abs() > delta_y.abs() * 0.5 {
        delta_x
    } else {
        delta_y
    }
}

/// Ruler spacing for a window of `zoom` seconds.
pub fn marking_resolution(zoom: f64) -> f64 {
    MARKING_RESOLUTIONS
        .iter()
        .copied()
        .find(|r| zoom / r <= MAX_TIMELINE_MARKINGS)
        .unwrap_or(30.0)
}

/// One ruler tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "generated/")]
pub struct TimelineMarking {
    pub time: f64,
    /// Text shown above whole-second ticks.
    pub label: Option<String>,
}

/// Ruler ticks covering the visible window and a little past it. Ticks at or
/// before zero are left out.
pub fn timeline_markings(transform: &TimelineTransform) -> Vec<TimelineMarking> {
    let resolution = marking_resolution(transform.zoom);
    if !(transform.zoom.is_finite() && transform.position.is_finite()) {
        return Vec::new();
    }

    let first = transform.position - transform.position % resolution;
    let count = 2 + ((transform.zoom + 5.0) / resolution).ceil() as usize;

    (0..count)
        .map(|i| first + i as f64 * resolution)
        .filter(|&time| time > 0.0)
        .map(|time| TimelineMarking {
            time,
            label: (time % 1.0 == 0.0).then(|| format_time(time)),
        })
        .collect()
}

/// `1h 2m 3s`, `2m 3s` or `3s`. Fractions are dropped.
pub fn format_time(total_secs: f64) -> String {
    let total = total_secs.max(0.0).floor() as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}
