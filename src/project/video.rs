//! Metadata for the video a session edits.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{EditorError, EditorResult};

/// Read-only description of the loaded recording.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "generated/")]
pub struct VideoData {
    /// Recording identifier.
    pub id: String,
    /// Source duration in seconds.
    pub duration: f64,
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    /// Where the host serves the media from.
    #[serde(default)]
    pub url: Option<String>,
}

impl VideoData {
    pub fn new(id: impl Into<String>, duration: f64) -> Self {
        Self {
            id: id.into(),
            duration,
            width: 1920,
            height: 1080,
            fps: 30,
            url: None,
        }
    }

    /// Reject metadata the timeline cannot work with.
    pub fn validate(&self) -> EditorResult<()> {
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(EditorError::InvalidVideo(format!(
                "duration must be a finite, non-negative number of seconds (got {})",
                self.duration
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_duration() {
        assert!(VideoData::new("a", 12.5).validate().is_ok());
        assert!(VideoData::new("a", 0.0).validate().is_ok());
        assert!(VideoData::new("a", -1.0).validate().is_err());
        assert!(VideoData::new("a", f64::NAN).validate().is_err());
        assert!(VideoData::new("a", f64::INFINITY).validate().is_err());
    }
}
