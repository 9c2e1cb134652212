//! Timeline editing model for the studio video editor.
//!
//! ## Architecture
//!
//! ```text
//! lib.rs
//!   config/   - Editor tunables (history depth, drag threshold, zoom steps)
//!   project/  - Persisted project configuration and video metadata
//!   timeline/ - Pure segment operations and the time <-> pixel transform
//!   editor/   - EditorSession: selection, gestures, shortcuts, undo/redo
//!   error.rs  - EditorError
//!   logging.rs
//! ```
//!
//! Hosts create one [`EditorSession`] per opened video, forward pointer and
//! keyboard input to it, and re-render on [`SessionEvent`]s.

pub mod config;
pub mod editor;
pub mod error;
pub mod logging;
pub mod project;
pub mod timeline;

pub use config::{get_editor_config, set_editor_config, EditorConfig};
pub use editor::{EditorSession, SessionEvent};
pub use error::{EditorError, EditorResult};
pub use project::{ProjectConfiguration, VideoData};
