//! Interactive editing layer on top of the timeline operations.
//!
//! ## Architecture
//!
//! ```text
//! editor/
//!   state.rs     - Transient editor state (playhead, selection, visible window)
//!   selection.rs - Click-to-select rules and modifier handling
//!   input.rs     - Keyboard shortcut table
//!   gesture.rs   - Pointer gesture state machine
//!   history.rs   - Snapshot undo/redo with reference-counted pause
//!   session.rs   - EditorSession tying it all together
//!   tests.rs     - Session-level scenarios
//! ```

pub mod gesture;
pub mod history;
pub mod input;
pub mod selection;
pub mod session;
pub mod state;


pub use gesture::{DragState, SegmentPart};
pub use history::{HistoryPause, ProjectHistory};
pub use input::{EditorAction, KeyCode, KeyOutcome, KeyPress};
pub use selection::{Modifiers, Platform};
pub use session::{EditorSession, ListenerId, SessionEvent};
pub use state::{EditorState, InteractMode, Selection, TimelineUiState, TrackKind};
