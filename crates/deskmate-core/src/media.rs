//! Media analysis job types.
//!
//! Voice and image assets are analyzed server-side; the client observes the
//! job by polling. A job's status only ever moves from `Processing` to one
//! of the terminal states, and terminal states are final for the life of
//! the job id.

use serde::{Deserialize, Serialize};
use strum::Display;

/// Kind of media asset submitted for analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum MediaKind {
    /// Recorded voice input.
    Voice,
    /// Uploaded image.
    Image,
}

/// Server-side state of an analysis job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisStatus {
    /// Still being processed.
    Processing,
    /// Finished with a usable result.
    Completed,
    /// Finished with a server-reported failure.
    Error,
}

impl AnalysisStatus {
    /// True for `Completed` and `Error`.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Processing)
    }
}

/// Extracted text produced by a completed analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Recognized text content.
    pub text: String,
    /// Server confidence in the recognition, 0.0..=1.0.
    pub confidence: f32,
}

/// A server-side asynchronous analysis task, observed by polling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisJob {
    /// Job identifier assigned at upload time.
    pub id: String,
    /// Current job state.
    pub status: AnalysisStatus,
    /// Present when `status` is `Completed`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<AnalysisResult>,
    /// Present when `status` is `Error`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AnalysisJob {
    /// True when the job has reached a terminal state.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(!AnalysisStatus::Processing.is_terminal());
        assert!(AnalysisStatus::Completed.is_terminal());
        assert!(AnalysisStatus::Error.is_terminal());
    }

    #[test]
    fn test_media_kind_path_segment() {
        assert_eq!(MediaKind::Voice.to_string(), "voice");
        assert_eq!(MediaKind::Image.to_string(), "image");
    }

    #[test]
    fn test_job_deserializes_without_optional_fields() {
        let job: AnalysisJob =
            serde_json::from_str(r#"{"id":"a-1","status":"processing"}"#).unwrap();
        assert_eq!(job.status, AnalysisStatus::Processing);
        assert!(job.result.is_none());
        assert!(job.error.is_none());
    }
}
