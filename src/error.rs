//! Central error types for the studio editor.
//!
//! Segment edits never fail: invalid edits are ignored and return the input
//! unchanged. Errors only surface at the boundary of the editing core, when a
//! session is created from bad video metadata, when a persisted project is
//! parsed, or when logging is initialised.
//! All errors implement `Serialize` so a host IPC layer can forward them.

use serde::Serialize;
use thiserror::Error;

/// Main error type for editor operations.
#[derive(Error, Debug)]
pub enum EditorError {
    /// Video metadata handed to the session is unusable
    #[error("Invalid video data: {0}")]
    InvalidVideo(String),

    /// A loaded project violates a timeline invariant
    #[error("Invalid project: {0}")]
    InvalidProject(String),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Logger could not be installed
    #[error("Logging error: {0}")]
    Logging(String),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

/// Serialize as the display string so the frontend gets a readable message.
impl Serialize for EditorError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl From<String> for EditorError {
    fn from(msg: String) -> Self {
        EditorError::Other(msg)
    }
}

impl From<&str> for EditorError {
    fn from(msg: &str) -> Self {
        EditorError::Other(msg.to_string())
    }
}

/// Type alias for Results using EditorError.
pub type EditorResult<T> = Result<T, EditorError>;
