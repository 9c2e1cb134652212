//! Timeline segment operations and coordinate mapping.
//!
//! Every operation is a pure function from the current track list to a new
//! one. Edits that would break ordering, overlap or minimum-length rules are
//! ignored and return the input unchanged.
//!
//! ## Architecture
//!
//! ```text
//! timeline/
//!   interval.rs  - Shared interval rules (insert, split, delete, handle bounds)
//!   clip.rs      - Clip track: output-time split, delete, handle resize
//!   retime.rs    - Clip speed changes and zoom/scene re-timing
//!   zoom.rs      - Zoom track: creation preview, split, delete
//!   scene.rs     - Scene track: creation preview, split, delete
//!   transform.rs - Time <-> pixel mapping, zoom toward cursor, ruler
//! ```

pub mod clip;
pub mod interval;
pub mod retime;
pub mod scene;
pub mod transform;
pub mod zoom;

pub use clip::{
    clip_output_offsets, delete_clip_segment, set_clip_segment_end, set_clip_segment_start, split_clip_segment,
    total_duration,
};
pub use interval::{can_insert, find_containing_or_next_index, min_new_segment_secs, Interval, Position};
pub use retime::set_clip_segment_timescale;
pub use scene::{
    delete_scene_segment, delete_scene_segments, insert_scene_segment, scene_segment_preview, split_scene_segment,
    SceneSegmentPreview,
};
pub use transform::{format_time, timeline_markings, zoom_out_limit, TimelineMarking, TimelineTransform, ZoomLimits};
pub use zoom::{
    delete_zoom_segments, insert_zoom_segment, new_zoom_segment_preview, split_zoom_segment, ZoomSegmentPreview,
};
