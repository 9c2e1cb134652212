//! Type definitions for studio projects.
//!
//! A ProjectConfiguration is the persisted unit of an editing session:
//! - Timeline (clip, zoom and scene segments)
//! - Background, camera, audio and cursor settings for the compositor
//!
//! Every field serializes in camelCase so the JSON matches what the web
//! editor stores and the exported TypeScript bindings.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{EditorError, EditorResult};
use crate::timeline::interval::{is_well_formed, Interval};

/// Generic 2D pair used for positions and sizes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "generated/")]
pub struct XY<T> {
    pub x: T,
    pub y: T,
}

impl<T> XY<T> {
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

/// RGB color triple.
pub type Rgb = [u8; 3];

// ============================================================================
// Project Configuration
// ============================================================================

/// Complete project configuration: the aggregate root owned by a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "generated/")]
pub struct ProjectConfiguration {
    /// Output aspect ratio (None = follow the recording).
    #[serde(default)]
    pub aspect_ratio: Option<AspectRatio>,
    /// Background behind the recording.
    pub background: BackgroundConfiguration,
    /// Camera overlay.
    pub camera: Camera,
    /// Audio mixing.
    pub audio: AudioConfiguration,
    /// Cursor rendering.
    pub cursor: CursorConfiguration,
    /// Keyboard shortcut overlay.
    #[serde(default)]
    pub hotkeys: HotkeysConfiguration,
    /// Clip, zoom and scene tracks.
    #[serde(default)]
    pub timeline: TimelineConfiguration,
}

impl ProjectConfiguration {
    /// Default configuration for a freshly loaded video: one full-length clip
    /// of recording 0 and empty zoom/scene tracks. A video with no length
    /// gets an empty clip track.
    pub fn for_duration(duration: f64) -> Self {
        let segments = if duration > 0.0 {
            vec![TimelineSegment::new(0.0, duration, 1.0).with_recording(0)]
        } else {
            Vec::new()
        };

        Self {
            aspect_ratio: None,
            background: BackgroundConfiguration::default(),
            camera: Camera::default(),
            audio: AudioConfiguration::default(),
            cursor: CursorConfiguration::default(),
            hotkeys: HotkeysConfiguration::default(),
            timeline: TimelineConfiguration {
                segments,
                zoom_segments: Vec::new(),
                scene_segments: Vec::new(),
            },
        }
    }

    /// Serialize to the JSON shape persisted by the host.
    pub fn to_json(&self) -> EditorResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a persisted project and check its timeline invariants.
    pub fn from_json(json: &str) -> EditorResult<Self> {
        let project: ProjectConfiguration = serde_json::from_str(json)?;
        project.timeline.validate()?;
        Ok(project)
    }
}

// ============================================================================
// Timeline
// ============================================================================

/// The three timeline tracks.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "generated/")]
pub struct TimelineConfiguration {
    /// Clip segments, in playback order.
    #[serde(default)]
    pub segments: Vec<TimelineSegment>,
    /// Zoom segments, sorted by start and non-overlapping.
    #[serde(default)]
    pub zoom_segments: Vec<ZoomSegment>,
    /// Scene segments, sorted by start and non-overlapping.
    #[serde(default)]
    pub scene_segments: Vec<SceneSegment>,
}

impl TimelineConfiguration {
    /// Check the ordering and length invariants of every track.
    pub fn validate(&self) -> EditorResult<()> {
        for (i, segment) in self.segments.iter().enumerate() {
            if !(segment.end > segment.start) {
                return Err(EditorError::InvalidProject(format!(
                    "clip segment {} has end {} <= start {}",
                    i, segment.end, segment.start
                )));
            }
            if !(segment.timescale.is_finite() && segment.timescale > 0.0) {
                return Err(EditorError::InvalidProject(format!(
                    "clip segment {} has invalid timescale {}",
                    i, segment.timescale
                )));
            }
        }
        if !is_well_formed(&self.zoom_segments) {
            return Err(EditorError::InvalidProject(
                "zoom segments must be sorted, non-overlapping and non-empty".to_string(),
            ));
        }
        for (i, segment) in self.zoom_segments.iter().enumerate() {
            if !(segment.zoom >= 1.0) {
                return Err(EditorError::InvalidProject(format!(
                    "zoom segment {} has zoom {} < 1",
                    i, segment.zoom
                )));
            }
            if !((0.0..=1.0).contains(&segment.x) && (0.0..=1.0).contains(&segment.y)) {
                return Err(EditorError::InvalidProject(format!(
                    "zoom segment {} focal point ({}, {}) is outside [0, 1]",
                    i, segment.x, segment.y
                )));
            }
        }
        if !is_well_formed(&self.scene_segments) {
            return Err(EditorError::InvalidProject(
                "scene segments must be sorted, non-overlapping and non-empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// A slice of the source recording placed on the clip track.
///
/// `start`/`end` are source seconds; the segment plays for
/// `(end - start) / timescale` output seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "generated/")]
pub struct TimelineSegment {
    /// Source start in seconds.
    pub start: f64,
    /// Source end in seconds.
    pub end: f64,
    /// Playback speed multiplier (1.0 = normal).
    pub timescale: f64,
    /// Index into the source recording list, when the project has several.
    #[serde(default)]
    pub recording_segment: Option<u32>,
}

impl TimelineSegment {
    pub fn new(start: f64, end: f64, timescale: f64) -> Self {
        Self {
            start,
            end,
            timescale,
            recording_segment: None,
        }
    }

    /// Attach the source recording index.
    pub fn with_recording(mut self, recording_segment: u32) -> Self {
        self.recording_segment = Some(recording_segment);
        self
    }

    /// Length of the segment on the output timeline.
    pub fn output_duration(&self) -> f64 {
        (self.end - self.start) / self.timescale
    }
}

/// A time range during which the output is magnified toward a focal point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "generated/")]
pub struct ZoomSegment {
    /// Start time in output seconds.
    pub start: f64,
    /// End time in output seconds.
    pub end: f64,
    /// Magnification (1.0 = no zoom).
    pub zoom: f64,
    /// Focal point X (normalized 0-1).
    pub x: f64,
    /// Focal point Y (normalized 0-1).
    pub y: f64,
}

/// Zoom applied to segments created from the timeline.
pub const DEFAULT_ZOOM_AMOUNT: f64 = 1.5;

impl ZoomSegment {
    /// New segment with the default zoom, centred on the frame.
    pub fn new(start: f64, end: f64) -> Self {
        Self {
            start,
            end,
            zoom: DEFAULT_ZOOM_AMOUNT,
            x: 0.5,
            y: 0.5,
        }
    }
}

/// Camera visibility/layout override for a scene segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "generated/")]
pub enum SceneMode {
    /// Screen with camera overlay.
    #[default]
    Default,
    /// Fullscreen camera.
    CameraOnly,
    /// Screen only.
    HideCamera,
}

/// A time range overriding the camera overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "generated/")]
pub struct SceneSegment {
    /// Start time in output seconds.
    pub start: f64,
    /// End time in output seconds.
    pub end: f64,
    /// Camera rect position in pixels.
    pub position: XY<f64>,
    /// Camera rect size in pixels.
    pub size: XY<f64>,
    /// Scene mode (None = default).
    #[serde(default)]
    pub mode: Option<SceneMode>,
}

impl SceneSegment {
    /// New segment with the default camera rect.
    pub fn new(start: f64, end: f64) -> Self {
        Self {
            start,
            end,
            position: XY::new(0.0, 0.0),
            size: XY::new(320.0, 180.0),
            mode: None,
        }
    }

    /// Effective mode, treating an unset mode as `Default`.
    pub fn scene_mode(&self) -> SceneMode {
        self.mode.unwrap_or_default()
    }
}

// ============================================================================
// Background
// ============================================================================

/// Output aspect ratio preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "generated/")]
pub enum AspectRatio {
    /// 16:9
    Wide,
    /// 9:16
    Vertical,
    /// 1:1
    Square,
    /// 4:3
    Classic,
    /// 3:4
    Tall,
}

impl AspectRatio {
    /// Width / height.
    pub fn ratio(&self) -> f64 {
        match self {
            AspectRatio::Wide => 16.0 / 9.0,
            AspectRatio::Vertical => 9.0 / 16.0,
            AspectRatio::Square => 1.0,
            AspectRatio::Classic => 4.0 / 3.0,
            AspectRatio::Tall => 3.0 / 4.0,
        }
    }
}

/// What is drawn behind the recording.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "camelCase")]
#[ts(export, export_to = "generated/")]
pub enum BackgroundSource {
    Wallpaper { path: Option<String> },
    Image { path: Option<String> },
    Color { value: Rgb, alpha: Option<f64> },
    Gradient { from: Rgb, to: Rgb, angle: Option<f64> },
}

/// Crop rectangle in source pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "generated/")]
pub struct Crop {
    pub position: XY<f64>,
    pub size: XY<f64>,
}

/// Background configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "generated/")]
pub struct BackgroundConfiguration {
    pub source: BackgroundSource,
    pub blur: f64,
    pub padding: f64,
    pub rounding: f64,
    pub inset: f64,
    #[serde(default)]
    pub crop: Option<Crop>,
}

impl Default for BackgroundConfiguration {
    fn default() -> Self {
        Self {
            source: BackgroundSource::Wallpaper { path: None },
            blur: 0.0,
            padding: 0.0,
            rounding: 0.0,
            inset: 0.0,
            crop: None,
        }
    }
}

// ============================================================================
// Camera
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "generated/")]
pub enum CameraXPosition {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "generated/")]
pub enum CameraYPosition {
    Top,
    Bottom,
}

/// Corner the camera overlay is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "generated/")]
pub struct CameraPosition {
    pub x: CameraXPosition,
    pub y: CameraYPosition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "generated/")]
pub enum CameraShape {
    Square,
    Source,
}

/// Camera overlay configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "generated/")]
pub struct Camera {
    pub hide: bool,
    pub mirror: bool,
    pub position: CameraPosition,
    /// Overlay size in pixels.
    pub size: f64,
    /// Overlay size while a zoom segment is active.
    #[serde(default)]
    pub zoom_size: Option<f64>,
    #[serde(default)]
    pub shape: Option<CameraShape>,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            hide: false,
            mirror: false,
            position: CameraPosition {
                x: CameraXPosition::Right,
                y: CameraYPosition::Bottom,
            },
            size: 200.0,
            zoom_size: None,
            shape: None,
        }
    }
}

// ============================================================================
// Audio / Cursor / Hotkeys
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "generated/")]
pub enum StereoMode {
    Stereo,
    MonoL,
    MonoR,
}

/// Audio mixing configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "generated/")]
pub struct AudioConfiguration {
    pub mute: bool,
    pub improve: bool,
    #[serde(default)]
    pub mic_volume_db: Option<f64>,
    #[serde(default)]
    pub mic_stereo_mode: Option<StereoMode>,
    #[serde(default)]
    pub system_volume_db: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "generated/")]
pub enum CursorType {
    #[default]
    Pointer,
    Circle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "generated/")]
pub enum CursorAnimationStyle {
    #[default]
    Regular,
    Slow,
    Fast,
}

/// Cursor rendering configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "generated/")]
pub struct CursorConfiguration {
    pub hide: bool,
    pub size: f64,
    #[serde(rename = "type")]
    pub cursor_type: CursorType,
    pub animation_style: CursorAnimationStyle,
    pub tension: f64,
    pub mass: f64,
    pub friction: f64,
}

impl Default for CursorConfiguration {
    fn default() -> Self {
        Self {
            hide: false,
            size: 1.0,
            cursor_type: CursorType::Pointer,
            animation_style: CursorAnimationStyle::Regular,
            tension: 0.5,
            mass: 0.5,
            friction: 0.5,
        }
    }
}

/// Keyboard shortcut overlay configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "generated/")]
pub struct HotkeysConfiguration {
    pub show: bool,
}

impl Default for HotkeysConfiguration {
    fn default() -> Self {
        Self { show: true }
    }
}

// ============================================================================
// Interval impls
// ============================================================================

impl Interval for ZoomSegment {
    fn start(&self) -> f64 {
        self.start
    }
    fn end(&self) -> f64 {
        self.end
    }
    fn with_bounds(&self, start: f64, end: f64) -> Self {
        Self {
            start,
            end,
            ..self.clone()
        }
    }
}

impl Interval for SceneSegment {
    fn start(&self) -> f64 {
        self.start
    }
    fn end(&self) -> f64 {
        self.end
    }
    fn with_bounds(&self, start: f64, end: f64) -> Self {
        Self {
            start,
            end,
            ..self.clone()
        }
    }
}

impl Interval for TimelineSegment {
    fn start(&self) -> f64 {
        self.start
    }
    fn end(&self) -> f64 {
        self.end
    }
    fn with_bounds(&self, start: f64, end: f64) -> Self {
        Self {
            start,
            end,
            ..self.clone()
        }
    }
}
