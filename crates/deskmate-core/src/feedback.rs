//! Feedback records.

use serde::{Deserialize, Serialize};

/// A user's rating of an assistant answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackSubmission {
    /// The assistant message being rated
    pub message_id: String,
    /// Rating value, 1..=5
    pub rating: u8,
    /// Kind of feedback ("helpful", "not_helpful", ...)
    pub feedback_type: String,
    /// Free-text comment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Suggested improvements to the answer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub improvement_suggestions: Option<String>,
}

/// Aggregate feedback counters returned by the stats endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackStats {
    /// Total number of submissions
    pub total: u64,
    /// Mean rating across all submissions
    pub average_rating: f32,
    /// Submissions marked helpful
    pub positive: u64,
    /// Submissions marked not helpful
    pub negative: u64,
}
