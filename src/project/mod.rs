//! Project model for the studio editor.
//!
//! A ProjectConfiguration holds everything an editing session changes:
//! - Timeline (clip segments, zoom segments, scene segments)
//! - Background, camera, audio and cursor settings
//!
//! ## Architecture
//!
//! ```text
//! project/
//!   mod.rs    - Re-exports and tests
//!   types.rs  - Type definitions (ProjectConfiguration, segments, configs)
//!   video.rs  - Metadata of the recording being edited
//! ```

pub mod types;
pub mod video;

pub use types::*;
pub use video::VideoData;
