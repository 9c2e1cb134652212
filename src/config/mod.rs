//! Editor configuration management.
//!
//! Session tunables live in a typed struct behind a `parking_lot::RwLock`
//! so a host can batch-update them in a single call.

pub mod editor;

pub use editor::{get_editor_config, reset_editor_config, set_editor_config, EditorConfig, EDITOR_CONFIG};
